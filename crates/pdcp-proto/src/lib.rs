//! PDCP data PDU wire format.
//!
//! A PDCP data PDU is a 2- or 3-byte header followed by the (possibly
//! ciphered) payload. The header carries the D/C flag and the truncated
//! sequence number; the full 32-bit COUNT is reconstructed by the receiver
//! from entity state.
//!
//! Wire layout (network bit order, reserved bits `R` are zero):
//!
//! ```text
//! 12-bit SN:  | 1 R R R SN[11:8] | SN[7:0]  |            payload...
//! 18-bit SN:  | 1 R R R R R SN[17:16] | SN[15:8] | SN[7:0] | payload...
//! ```
//!
//! The top bit of byte 0 is the D/C flag: 1 for data PDUs, 0 for control
//! PDUs. This crate only parses data PDUs; a clear D/C flag is reported as
//! [`ProtocolError::ControlPdu`] so the caller can decide how loudly to
//! drop it.
//!
//! This is a pure codec: no entity state, no ciphering. COUNT
//! reconstruction and the receive window live in `pdcp-core`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
mod header;

pub use errors::{ProtocolError, Result};
pub use header::{DataPduHeader, SnSize};
