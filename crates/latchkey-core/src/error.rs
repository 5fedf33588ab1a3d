//! Error types for building a latch
//!
//! Runtime key handling never fails; these errors only surface while a
//! configuration or registry is being assembled.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LatchError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LatchError {
    #[error("PIN must not be empty")]
    EmptyPin,

    #[error("PIN must contain only digits 0-9")]
    NonDigitPin,

    #[error("Too many secrets: {count} given, at most {max} slots available")]
    TooManySecrets { count: usize, max: usize },

    #[error("PIN buffer capacity must be at least 2, got {0}")]
    BufferTooSmall(usize),
}
