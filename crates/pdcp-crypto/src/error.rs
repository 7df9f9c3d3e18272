//! Error types for ciphering configuration.

use thiserror::Error;

/// Errors from cipher configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherError {
    /// Algorithm identifier is not one we implement
    #[error("unsupported ciphering algorithm {id}: only NEA0 (0) and NEA2 (2) are implemented")]
    UnsupportedAlgorithm {
        /// The rejected algorithm identifier
        id: u8,
    },
}
