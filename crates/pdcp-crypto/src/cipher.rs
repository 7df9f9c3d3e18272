//! Cipher selection: algorithm identifiers, direction bit, and the
//! entity-owned cipher context.

use crate::{error::CipherError, nea2::Nea2Cipher};

/// Transmission direction, as fed into the keystream derivation.
///
/// The direction bit distinguishes uplink from downlink so that the two
/// halves of a bearer never share keystream even at equal COUNT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Terminal to base station (direction bit 0)
    Uplink,
    /// Base station to terminal (direction bit 1)
    Downlink,
}

impl Direction {
    /// The single-bit wire value of this direction.
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            Self::Uplink => 0,
            Self::Downlink => 1,
        }
    }
}

/// NR encryption algorithm identifier.
///
/// Only the null algorithm and NEA2 are implemented; the other identifiers
/// (NEA1, NEA3) are rejected when mapping from raw configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipheringAlgorithm {
    /// NEA0: no ciphering
    Nea0,
    /// NEA2: AES-128 in counter mode
    Nea2,
}

impl CipheringAlgorithm {
    /// The 3GPP algorithm identifier (0 for NEA0, 2 for NEA2).
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Nea0 => 0,
            Self::Nea2 => 2,
        }
    }
}

impl TryFrom<u8> for CipheringAlgorithm {
    type Error = CipherError;

    fn try_from(id: u8) -> Result<Self, CipherError> {
        match id {
            0 => Ok(Self::Nea0),
            2 => Ok(Self::Nea2),
            other => Err(CipherError::UnsupportedAlgorithm { id: other }),
        }
    }
}

/// The cipher context owned by a PDCP entity.
///
/// `Nea0` covers both "null algorithm configured" and "no key installed";
/// either way the payload passes through unchanged. Dropping the context
/// releases the key material exactly once.
pub enum NeaCipher {
    /// No ciphering
    Nea0,
    /// AES-128-CTR ciphering with an installed key
    Nea2(Nea2Cipher),
}

impl NeaCipher {
    /// Select the cipher for a configured algorithm and optional key.
    ///
    /// Ciphering is active only when the algorithm is NEA2 *and* a key is
    /// present; every other combination degrades to `Nea0`.
    #[must_use]
    pub fn new(algorithm: CipheringAlgorithm, key: Option<[u8; 16]>) -> Self {
        match (algorithm, key) {
            (CipheringAlgorithm::Nea2, Some(key)) => Self::Nea2(Nea2Cipher::new(key)),
            _ => Self::Nea0,
        }
    }

    /// Whether payloads are actually transformed.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Nea2(_))
    }

    /// The algorithm actually in effect.
    ///
    /// Reports `Nea0` when ciphering degraded for lack of a key, so
    /// `self.algorithm().id()` is what a host should put in its logs and
    /// telemetry rather than the configured value.
    #[must_use]
    pub fn algorithm(&self) -> CipheringAlgorithm {
        match self {
            Self::Nea0 => CipheringAlgorithm::Nea0,
            Self::Nea2(_) => CipheringAlgorithm::Nea2,
        }
    }

    /// Apply (or strip) the keystream in place. No-op for `Nea0`.
    pub fn apply_keystream(&self, data: &mut [u8], count: u32, bearer: u8, direction: Direction) {
        if let Self::Nea2(cipher) = self {
            cipher.apply_keystream(data, count, bearer, direction);
        }
    }
}
