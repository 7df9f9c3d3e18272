//! NR ciphering primitives for PDCP.
//!
//! Implements the user-plane/control-plane ciphering applied to PDCP
//! payloads. The only real algorithm here is NEA2 (AES-128 in counter
//! mode); NEA0 is the null algorithm and leaves data untouched.
//!
//! # Keystream
//!
//! NEA2 is a pure keystream XOR: applying it twice with the same inputs is
//! the identity, so the same function serves both ciphering and
//! deciphering. The keystream is derived from the 128-bit key and an
//! initial counter block binding the packet identity:
//!
//! ```text
//! COUNT(32) | BEARER(5) | DIRECTION(1) | 26 zero bits | 64 zero bits
//! ```
//!
//! - `COUNT` is the full 32-bit PDCP count of the PDU (big-endian)
//! - `BEARER` is the 5-bit bearer identity
//! - `DIRECTION` is 0 for uplink, 1 for downlink
//!
//! # Security
//!
//! - Keystream uniqueness: a `(key, count, bearer, direction)` tuple must
//!   never be reused. The PDCP entity guarantees this by using a strictly
//!   increasing COUNT per direction; re-keying before COUNT wrap is the
//!   host's responsibility.
//! - No authentication: CTR mode provides confidentiality only. Integrity
//!   protection is a separate (unimplemented) mechanism.
//! - Key hygiene: key material is zeroized when the cipher is dropped.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cipher;
mod error;
mod nea2;

pub use cipher::{CipheringAlgorithm, Direction, NeaCipher};
pub use error::CipherError;
pub use nea2::Nea2Cipher;
