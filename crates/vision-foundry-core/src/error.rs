use thiserror::Error;

/// Error type shared by every VisionFoundry crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FoundryError {
    #[error("Index out of bounds: index {index} for dataset of size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Iterator exhausted: call reset() before requesting another batch")]
    Exhausted,

    #[error("Length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Dataset source error: {0}")]
    Source(String),
}

impl From<std::io::Error> for FoundryError {
    fn from(e: std::io::Error) -> Self {
        FoundryError::Io(e.to_string())
    }
}

pub type FoundryResult<T> = Result<T, FoundryError>;
