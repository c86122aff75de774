use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vision_foundry_core::{FoundryError, FoundryResult};

/// Batching configuration for a [`DataLoader`](crate::DataLoader).
///
/// Fields missing from a JSON document fall back to [`LoaderConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Number of samples per batch. Must be at least 1.
    pub batch_size: usize,
    /// Whether to draw a fresh permutation at construction and on every reset.
    pub shuffle: bool,
    /// Seed for the shuffle RNG. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            batch_size: 32,
            shuffle: true,
            seed: None,
        }
    }
}

impl LoaderConfig {
    pub fn batch_size(mut self, bs: usize) -> Self {
        self.batch_size = bs;
        self
    }

    pub fn shuffle(mut self, s: bool) -> Self {
        self.shuffle = s;
        self
    }

    pub fn seed(mut self, s: u64) -> Self {
        self.seed = Some(s);
        self
    }

    pub fn validate(&self) -> FoundryResult<()> {
        if self.batch_size == 0 {
            return Err(FoundryError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> FoundryResult<Self> {
        let config: LoaderConfig = serde_json::from_str(json)
            .map_err(|e| FoundryError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> FoundryResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> FoundryResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| FoundryError::InvalidConfig(e.to_string()))
    }
}
