pub mod error;
pub mod ops;

pub use error::{FoundryError, FoundryResult};
pub use ops::{add, add_arrays, add_arrays_into};
