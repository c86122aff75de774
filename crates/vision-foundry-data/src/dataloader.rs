use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use vision_foundry_core::{FoundryError, FoundryResult};

use crate::config::LoaderConfig;
use crate::dataset::Dataset;

/// DataLoader for batching and shuffling datasets.
///
/// The loader borrows its dataset and walks a permutation of `0..len` in
/// contiguous chunks of `batch_size`. The final batch of an epoch holds the
/// remainder and is never dropped or padded. Once every index has been
/// handed out the loader is exhausted until [`DataLoader::reset`] starts the
/// next epoch.
pub struct DataLoader<'a, D: Dataset + ?Sized> {
    dataset: &'a D,
    batch_size: usize,
    shuffle: bool,
    indices: Vec<usize>,
    current: usize,
    epoch: usize,
    rng: StdRng,
    /// Set when the `Iterator` adapter yielded an error; cleared by `reset`.
    failed: bool,
}

impl<'a, D: Dataset + ?Sized> DataLoader<'a, D> {
    /// Build a loader, failing if `batch_size` is zero.
    pub fn new(dataset: &'a D, batch_size: usize, shuffle: bool) -> FoundryResult<Self> {
        let config = LoaderConfig {
            batch_size,
            shuffle,
            seed: None,
        };
        Self::with_config(dataset, &config)
    }

    pub fn with_config(dataset: &'a D, config: &LoaderConfig) -> FoundryResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let mut loader = DataLoader {
            dataset,
            batch_size: config.batch_size,
            shuffle: config.shuffle,
            indices: Vec::new(),
            current: 0,
            epoch: 0,
            rng,
            failed: false,
        };
        loader.rebuild_indices();
        debug!(
            "DataLoader: {} samples, batch_size={}, shuffle={}",
            loader.indices.len(),
            loader.batch_size,
            loader.shuffle
        );
        Ok(loader)
    }

    /// Snapshot the dataset size and lay out this epoch's traversal order.
    fn rebuild_indices(&mut self) {
        let n = self.dataset.len();
        self.indices.clear();
        self.indices.extend(0..n);
        if self.shuffle {
            self.indices.shuffle(&mut self.rng);
        }
    }

    pub fn has_next(&self) -> bool {
        self.current < self.indices.len()
    }

    /// Produce the next batch, in traversal order.
    ///
    /// # Errors
    /// [`FoundryError::Exhausted`] once the epoch is over. If the dataset fails
    /// on any sample the whole call fails and the cursor does not move.
    pub fn next_batch(&mut self) -> FoundryResult<Vec<D::Item>> {
        if !self.has_next() {
            return Err(FoundryError::Exhausted);
        }

        let end = (self.current + self.batch_size).min(self.indices.len());
        let batch = self.indices[self.current..end]
            .iter()
            .map(|&idx| self.dataset.get(idx))
            .collect::<FoundryResult<Vec<_>>>()?;

        trace!("batch [{}, {}) of {}", self.current, end, self.indices.len());
        self.current = end;
        Ok(batch)
    }

    /// Rewind to the start of a new epoch, reshuffling if enabled.
    pub fn reset(&mut self) {
        self.current = 0;
        self.failed = false;
        self.epoch += 1;
        self.rebuild_indices();
        debug!("DataLoader reset: epoch {}, {} samples", self.epoch, self.indices.len());
    }

    /// Number of samples in one epoch.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Batches per epoch, counting a trailing partial batch.
    pub fn num_batches(&self) -> usize {
        self.indices.len().div_ceil(self.batch_size)
    }

    /// Samples not yet handed out this epoch.
    pub fn remaining(&self) -> usize {
        self.indices.len() - self.current
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffle
    }

    /// How many times [`DataLoader::reset`] has been called.
    pub fn epoch(&self) -> usize {
        self.epoch
    }
}

/// Yields batches until the epoch ends. After the first error the iterator
/// is fused: it returns `None` until [`DataLoader::reset`] is called.
impl<'a, D: Dataset + ?Sized> Iterator for DataLoader<'a, D> {
    type Item = FoundryResult<Vec<D::Item>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || !self.has_next() {
            return None;
        }
        let batch = self.next_batch();
        self.failed = batch.is_err();
        Some(batch)
    }
}
