//! NEA2: AES-128-CTR keystream ciphering.

use ctr::cipher::{KeyIvInit, StreamCipher};
use zeroize::Zeroize;

use crate::cipher::Direction;

type Aes128Ctr = ctr::Ctr128BE<aes::Aes128>;

/// NEA2 cipher context: an AES-128 key bound to one PDCP entity.
///
/// Stateless between calls; every [`apply_keystream`](Self::apply_keystream)
/// derives a fresh keystream from `(count, bearer, direction)`. The same
/// call deciphers what it ciphered.
pub struct Nea2Cipher {
    /// The 128-bit ciphering key
    key: [u8; 16],
}

impl Nea2Cipher {
    /// Create a cipher context from a 128-bit key.
    #[must_use]
    pub fn new(key: [u8; 16]) -> Self {
        Self { key }
    }

    /// XOR `data` in place with the NEA2 keystream for this packet.
    ///
    /// `bearer` is the 5-bit bearer identity (masked here), `count` the
    /// full 32-bit PDCP count, `direction` the transmission direction.
    pub fn apply_keystream(&self, data: &mut [u8], count: u32, bearer: u8, direction: Direction) {
        let iv = build_counter_block(count, bearer, direction);

        let mut cipher = Aes128Ctr::new(&self.key.into(), &iv.into());
        cipher.apply_keystream(data);
    }
}

// Wipe key material when the context is released
impl Drop for Nea2Cipher {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

/// Build the initial 128-bit counter block.
///
/// Layout: `COUNT(32) | BEARER(5) | DIRECTION(1) | 26 zero bits`, followed
/// by 64 zero bits that CTR mode increments across blocks.
fn build_counter_block(count: u32, bearer: u8, direction: Direction) -> [u8; 16] {
    let mut block = [0u8; 16];

    block[0..4].copy_from_slice(&count.to_be_bytes());
    block[4] = ((bearer & 0x1f) << 3) | (direction.bit() << 2);

    block
}
