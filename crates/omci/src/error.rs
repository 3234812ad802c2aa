//! Error types for the OMCI codec

use thiserror::Error;

/// OMCI encoding errors
#[derive(Error, Debug)]
pub enum OmciError {
    /// Message contents exceed the baseline contents field
    #[error("Message contents too long: {0} bytes (limit {1})")]
    ContentsTooLong(usize, usize),

    /// Frame serialization error
    #[error("Serialization error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for OMCI encode operations
pub type Result<T> = std::result::Result<T, OmciError>;
