//! Error types for entity construction.

use thiserror::Error;

/// Errors refusing an [`EntityConfig`](crate::EntityConfig).
///
/// The receive and transmit paths themselves never return errors:
/// malformed, duplicate, and stale PDUs are dropped (upstream RLC may
/// legitimately deliver duplicates), and everything else is caught here,
/// at construction.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Radio bearer id outside the 5-bit bearer identity space
    #[error("invalid radio bearer id {rb_id}: must be in 1..=32")]
    InvalidBearerId {
        /// The rejected bearer id
        rb_id: u8,
    },

    /// An integrity key was supplied, but integrity protection is not
    /// implemented
    #[error("integrity protection is not implemented")]
    IntegrityUnsupported,
}
