//! Error types for the PDU wire format.

use thiserror::Error;

/// Result alias for wire-format operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors from PDU header encoding/decoding.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// Buffer holds fewer bytes than the header needs
    #[error("PDU too short: need {needed} bytes, got {actual}")]
    Truncated {
        /// Minimum number of bytes required
        needed: usize,
        /// Number of bytes actually available
        actual: usize,
    },

    /// D/C flag is clear: a control PDU (or garbage) on the data path
    #[error("control PDU on the data path (D/C bit clear)")]
    ControlPdu,

    /// SN length is not one of the lengths the protocol defines
    #[error("invalid PDCP SN size {0}: must be 12 or 18 bits")]
    InvalidSnSize(u8),
}
