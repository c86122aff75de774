// Epoch-level properties of DataLoader over the provided datasets

use std::sync::Arc;

use vision_foundry_core::FoundryError;
use vision_foundry_data::{CsvDataset, DataLoader, Dataset, FnDataset, LoaderConfig, VecDataset};

fn epoch_batches<D: Dataset + ?Sized>(loader: &mut DataLoader<'_, D>) -> Vec<Vec<D::Item>> {
    let mut out = Vec::new();
    while loader.has_next() {
        out.push(loader.next_batch().unwrap());
    }
    out
}

fn check_sizes(sizes: &[usize], n: usize, b: usize) {
    assert_eq!(sizes.iter().sum::<usize>(), n);
    if let Some((last, rest)) = sizes.split_last() {
        assert!(rest.iter().all(|&s| s == b));
        let expected_last = if n % b == 0 { b } else { n % b };
        assert_eq!(*last, expected_last);
    }
}

#[test]
fn test_length_distribution_over_many_shapes() {
    for n in 0..20usize {
        for b in 1..8usize {
            let ds = VecDataset::new((0..n).collect::<Vec<_>>());
            let mut loader = DataLoader::new(&ds, b, true).unwrap();
            for _ in 0..2 {
                let sizes: Vec<usize> = epoch_batches(&mut loader).iter().map(Vec::len).collect();
                check_sizes(&sizes, n, b);
                assert_eq!(sizes.len(), loader.num_batches());
                loader.reset();
            }
        }
    }
}

#[test]
fn test_sequential_epoch_matches_natural_order() {
    let ds = VecDataset::new((0..23).collect::<Vec<u32>>());
    let mut loader = DataLoader::new(&ds, 5, false).unwrap();
    let flat: Vec<u32> = epoch_batches(&mut loader).concat();
    assert_eq!(flat, (0..23).collect::<Vec<u32>>());
}

#[test]
fn test_shuffled_epochs_visit_every_index_once() {
    let ds = VecDataset::new((0..10).collect::<Vec<i32>>());
    let mut loader = DataLoader::new(&ds, 3, true).unwrap();

    let mut epoch1 = epoch_batches(&mut loader).concat();
    assert!(!loader.has_next());
    loader.reset();
    assert!(loader.has_next());
    let mut epoch2 = epoch_batches(&mut loader).concat();

    assert_eq!(epoch1.len(), ds.len());
    assert_eq!(epoch2.len(), ds.len());
    epoch1.sort();
    epoch2.sort();
    assert_eq!(epoch1, (0..10).collect::<Vec<i32>>());
    assert_eq!(epoch1, epoch2);
}

#[test]
fn test_reshuffle_changes_order() {
    // With 64 samples two independent permutations coincide with probability 1/64!.
    let ds = VecDataset::new((0..64).collect::<Vec<i32>>());
    let config = LoaderConfig::default().batch_size(16).seed(99);
    let mut loader = DataLoader::with_config(&ds, &config).unwrap();
    let first = epoch_batches(&mut loader).concat();
    loader.reset();
    let second = epoch_batches(&mut loader).concat();
    assert_ne!(first, second);
}

#[test]
fn test_empty_dataset_never_yields() {
    let ds: VecDataset<f64> = VecDataset::new(vec![]);
    let mut loader = DataLoader::new(&ds, 1, false).unwrap();
    for _ in 0..3 {
        assert!(!loader.has_next());
        assert_eq!(loader.next_batch(), Err(FoundryError::Exhausted));
        loader.reset();
    }
}

#[test]
fn test_injected_dataset_through_loader() {
    let ds = FnDataset::new(6, |i| Ok(format!("sample-{}", i)));
    let mut loader = DataLoader::new(&ds, 4, false).unwrap();
    assert_eq!(
        loader.next_batch().unwrap(),
        vec!["sample-0", "sample-1", "sample-2", "sample-3"]
    );
    assert_eq!(loader.next_batch().unwrap(), vec!["sample-4", "sample-5"]);
    assert!(loader.next().is_none());
}

#[test]
fn test_shared_dataset_two_loaders() {
    let ds = Arc::new(VecDataset::new((0..9).collect::<Vec<i32>>()));
    let mut a = DataLoader::new(&ds, 2, false).unwrap();
    let mut b = DataLoader::new(&ds, 4, true).unwrap();
    assert_eq!(epoch_batches(&mut a).concat().len(), 9);
    assert_eq!(epoch_batches(&mut b).concat().len(), 9);
    assert_eq!(ds.get(4).unwrap(), 4);
}

#[test]
fn test_csv_dataset_batches() {
    let src = "x,y,label\n0,0,0\n1,1,1\n2,2,0\n3,3,1\n4,4,0\n";
    let ds = CsvDataset::from_reader(src.as_bytes(), Some(2)).unwrap();
    let mut loader = DataLoader::new(&ds, 2, false).unwrap();

    let batches = epoch_batches(&mut loader);
    assert_eq!(batches.len(), 3);
    let targets: Vec<Option<f64>> = batches.iter().flatten().map(|r| r.target).collect();
    assert_eq!(
        targets,
        vec![Some(0.0), Some(1.0), Some(0.0), Some(1.0), Some(0.0)]
    );
    assert_eq!(batches[2][0].features, vec![4.0, 4.0]);
}

#[test]
fn test_config_file_drives_loader() {
    let config = LoaderConfig::from_json_str(r#"{ "batch_size": 3, "shuffle": false }"#).unwrap();
    let ds = VecDataset::new(vec![10, 11, 12, 13, 14]);
    let mut loader = DataLoader::with_config(&ds, &config).unwrap();
    assert_eq!(
        epoch_batches(&mut loader),
        vec![vec![10, 11, 12], vec![13, 14]]
    );
}
