//! Datasets and epoch-based batch loading.
//!
//! - **dataset** — `Dataset` trait, `VecDataset` (in memory), `FnDataset` (closure-backed)
//! - **csv_dataset** — `CsvDataset`, a numeric table read with the `csv` crate
//! - **config** — `LoaderConfig`: batch size, shuffle, seed; JSON load/save
//! - **dataloader** — `DataLoader`: permutation, cursor, batches, per-epoch reset

pub mod config;
pub mod csv_dataset;
pub mod dataloader;
pub mod dataset;

pub use config::LoaderConfig;
pub use csv_dataset::{CsvDataset, Record};
pub use dataloader::DataLoader;
pub use dataset::{Dataset, FnDataset, VecDataset};
