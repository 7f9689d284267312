//! Error types for the Bloom filter and its bit array

use thiserror::Error;

use crate::domain::BloomConfig;

/// Errors that can occur while building or combining Bloom filters
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid filter configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Filter configuration mismatch: expected {expected:?}, found {found:?}")]
    ConfigMismatch {
        expected: BloomConfig,
        found: BloomConfig,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Bit array error: {0}")]
    BitArray(#[from] BitArrayError),
}

/// Errors from the packed bit array
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitArrayError {
    #[error("Bit index out of range: {index} >= {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Bit array length mismatch: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Failed to allocate {bytes} bytes for bit array")]
    Allocation { bytes: usize },
}
