//! # VisionFoundry
//!
//! Training-data plumbing written in Rust.
//!
//! ## Modules
//!
//! - **core** — Shared `FoundryError`, scalar and element-wise addition helpers
//! - **data** — `Dataset` trait, in-memory / closure / CSV datasets, `LoaderConfig`, `DataLoader`

/// Error type and numeric helpers.
pub use vision_foundry_core as core;

/// Datasets and batch loading.
pub use vision_foundry_data as data;

pub use vision_foundry_core::{FoundryError, FoundryResult};
pub use vision_foundry_data::{Dataset, DataLoader, LoaderConfig};
