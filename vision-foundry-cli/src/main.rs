use clap::Parser;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use log::info;
use std::io::{stdout, Stdout, Write};
use std::path::PathBuf;

use vision_foundry::core::FoundryResult;
use vision_foundry::data::{CsvDataset, DataLoader, Dataset, FnDataset, LoaderConfig, Record};

/// Walk a dataset for a few epochs and report how it was batched.
#[derive(Debug, Parser)]
#[command(name = "foundry", version)]
struct Args {
    /// CSV file to load (first row is the header).
    #[arg(long, conflicts_with = "synthetic")]
    csv: Option<PathBuf>,

    /// Column of the CSV file holding the target value.
    #[arg(long)]
    target_column: Option<usize>,

    /// Use a synthetic dataset of the integers 0..N instead of a file.
    #[arg(long, default_value_t = 10)]
    synthetic: usize,

    #[arg(long, default_value_t = 32)]
    batch_size: usize,

    /// Keep the natural order instead of shuffling every epoch.
    #[arg(long)]
    no_shuffle: bool,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 2)]
    epochs: usize,

    /// JSON loader config; replaces --batch-size, --no-shuffle and --seed.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn loader_config(&self) -> FoundryResult<LoaderConfig> {
        if let Some(path) = &self.config {
            return LoaderConfig::from_json_file(path);
        }
        let mut config = LoaderConfig::default()
            .batch_size(self.batch_size)
            .shuffle(!self.no_shuffle);
        if let Some(s) = self.seed {
            config = config.seed(s);
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = args.loader_config()?;
    let mut stdout = stdout();

    execute!(
        stdout,
        SetForegroundColor(Color::Cyan),
        Print("VisionFoundry batch loader\n"),
        SetForegroundColor(Color::DarkGrey),
        Print(format!(
            "batch_size={} shuffle={} seed={:?} epochs={}\n\n",
            config.batch_size, config.shuffle, config.seed, args.epochs
        )),
        ResetColor
    )?;

    match &args.csv {
        Some(path) => {
            let ds = CsvDataset::from_path(path, args.target_column)?;
            info!("loaded {} rows from {}", ds.len(), path.display());
            // Tag each row with its position so an epoch can be checked for coverage.
            let rows = FnDataset::new(ds.len(), |i| ds.get(i).map(|record| (i, record)));
            let n = ds.len();
            run_epochs(&mut stdout, &rows, &config, args.epochs, |items: &[(usize, Record)]| {
                is_permutation(items.iter().map(|(i, _)| *i), n)
            })?;
        }
        None => {
            let n = args.synthetic;
            let ds = FnDataset::new(n, Ok);
            run_epochs(&mut stdout, &ds, &config, args.epochs, |items: &[usize]| {
                is_permutation(items.iter().copied(), n)
            })?;
        }
    }

    Ok(())
}

/// Whether `indices` holds every value of `0..n` exactly once.
fn is_permutation<I: Iterator<Item = usize>>(indices: I, n: usize) -> bool {
    let mut sorted: Vec<usize> = indices.collect();
    sorted.sort_unstable();
    sorted.into_iter().eq(0..n)
}

/// Drain `epochs` full passes over `dataset`, printing one line per epoch.
///
/// `covers` is asked whether the concatenated epoch is a complete traversal.
fn run_epochs<D, F>(
    stdout: &mut Stdout,
    dataset: &D,
    config: &LoaderConfig,
    epochs: usize,
    covers: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    D: Dataset + ?Sized,
    F: Fn(&[D::Item]) -> bool,
{
    let mut loader = DataLoader::with_config(dataset, config)?;

    for epoch in 0..epochs {
        if epoch > 0 {
            loader.reset();
        }
        let mut sizes = Vec::with_capacity(loader.num_batches());
        let mut seen = Vec::with_capacity(loader.len());
        while loader.has_next() {
            let batch = loader.next_batch()?;
            sizes.push(batch.len());
            seen.extend(batch);
        }

        let complete = seen.len() == loader.len() && covers(&seen[..]);
        let (status_color, status) = if complete {
            (Color::Green, "complete")
        } else {
            (Color::Red, "INCOMPLETE")
        };
        execute!(
            stdout,
            SetForegroundColor(Color::Cyan),
            Print(format!("Epoch {:3}/{} ", epoch + 1, epochs)),
            ResetColor,
            Print(format!(
                "batches={} first={} last={} samples={} ",
                sizes.len(),
                sizes.first().copied().unwrap_or(0),
                sizes.last().copied().unwrap_or(0),
                seen.len()
            )),
            SetForegroundColor(status_color),
            Print(format!("{}\n", status)),
            ResetColor
        )?;
    }

    stdout.flush()?;
    Ok(())
}
