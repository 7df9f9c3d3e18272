//! Data PDU header: D/C flag plus a truncated sequence number.
//!
//! The header is bit-packed, so it is assembled and parsed by hand rather
//! than cast from raw bytes. Reserved bits are written as zero and ignored
//! on decode (wire tolerance towards future profiles).

use bytes::BufMut;

use crate::errors::{ProtocolError, Result};

/// D/C flag in byte 0: set for data PDUs.
const DC_BIT: u8 = 0x80;

/// Configured PDCP sequence number length.
///
/// NR PDCP defines exactly two SN lengths. The length is radio-bearer
/// configuration, not carried on the wire, so both peers must agree on it
/// out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnSize {
    /// 12-bit sequence numbers (2-byte header)
    Sn12,
    /// 18-bit sequence numbers (3-byte header)
    Sn18,
}

impl SnSize {
    /// Sequence number length in bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Sn12 => 12,
            Self::Sn18 => 18,
        }
    }

    /// Mask selecting the SN bits of a COUNT (`(1 << bits) - 1`).
    #[must_use]
    pub const fn mask(self) -> u32 {
        (1 << self.bits()) - 1
    }

    /// Receive window half-width (`1 << (bits - 1)`).
    #[must_use]
    pub const fn window(self) -> u32 {
        1 << (self.bits() - 1)
    }

    /// Encoded header length in bytes.
    #[must_use]
    pub const fn header_len(self) -> usize {
        match self {
            Self::Sn12 => 2,
            Self::Sn18 => 3,
        }
    }
}

impl TryFrom<u8> for SnSize {
    type Error = ProtocolError;

    fn try_from(bits: u8) -> Result<Self> {
        match bits {
            12 => Ok(Self::Sn12),
            18 => Ok(Self::Sn18),
            other => Err(ProtocolError::InvalidSnSize(other)),
        }
    }
}

/// Header of a PDCP data PDU.
///
/// Holds the truncated sequence number together with the SN length it was
/// encoded under. The D/C flag is implicit: this type only represents data
/// PDUs, and [`DataPduHeader::decode`] rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataPduHeader {
    sn_size: SnSize,
    sn: u32,
}

impl DataPduHeader {
    /// Create a header for the given SN, masked to the configured length.
    #[must_use]
    pub fn new(sn_size: SnSize, sn: u32) -> Self {
        Self { sn_size, sn: sn & sn_size.mask() }
    }

    /// Truncated sequence number.
    #[must_use]
    pub fn sn(&self) -> u32 {
        self.sn
    }

    /// SN length this header was built or decoded under.
    #[must_use]
    pub fn sn_size(&self) -> SnSize {
        self.sn_size
    }

    /// Encoded length in bytes (2 for 12-bit SN, 3 for 18-bit).
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.sn_size.header_len()
    }

    /// Encode the header: D/C flag set, reserved bits zero, SN big-endian.
    ///
    /// Writes exactly [`Self::encoded_len`] bytes into `dst`.
    pub fn encode(&self, dst: &mut impl BufMut) {
        match self.sn_size {
            SnSize::Sn12 => {
                dst.put_u8(DC_BIT | ((self.sn >> 8) & 0x0f) as u8);
                dst.put_u8((self.sn & 0xff) as u8);
            },
            SnSize::Sn18 => {
                dst.put_u8(DC_BIT | ((self.sn >> 16) & 0x03) as u8);
                dst.put_u8(((self.sn >> 8) & 0xff) as u8);
                dst.put_u8((self.sn & 0xff) as u8);
            },
        }
    }

    /// Decode a data PDU header from the start of `bytes`.
    ///
    /// Reserved bits are ignored. The payload (if any) starts at
    /// [`Self::encoded_len`]; this function does not touch it.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::Truncated`] if `bytes` is shorter than the header
    /// - [`ProtocolError::ControlPdu`] if the D/C flag is clear
    pub fn decode(sn_size: SnSize, bytes: &[u8]) -> Result<Self> {
        let Some(&first) = bytes.first() else {
            return Err(ProtocolError::Truncated { needed: 1, actual: 0 });
        };

        if first & DC_BIT == 0 {
            return Err(ProtocolError::ControlPdu);
        }

        let needed = sn_size.header_len();
        if bytes.len() < needed {
            return Err(ProtocolError::Truncated { needed, actual: bytes.len() });
        }

        let sn = match sn_size {
            SnSize::Sn12 => (u32::from(first & 0x0f) << 8) | u32::from(bytes[1]),
            SnSize::Sn18 => {
                (u32::from(first & 0x03) << 16) | (u32::from(bytes[1]) << 8) | u32::from(bytes[2])
            },
        };

        Ok(Self { sn_size, sn })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn sn_size_derived_quantities() {
        assert_eq!(SnSize::Sn12.mask(), 0x0fff);
        assert_eq!(SnSize::Sn12.window(), 0x0800);
        assert_eq!(SnSize::Sn12.header_len(), 2);

        assert_eq!(SnSize::Sn18.mask(), 0x3_ffff);
        assert_eq!(SnSize::Sn18.window(), 0x2_0000);
        assert_eq!(SnSize::Sn18.header_len(), 3);
    }

    #[test]
    fn sn_size_from_bits() {
        assert_eq!(SnSize::try_from(12).unwrap(), SnSize::Sn12);
        assert_eq!(SnSize::try_from(18).unwrap(), SnSize::Sn18);
        assert_eq!(SnSize::try_from(7), Err(ProtocolError::InvalidSnSize(7)));
    }

    #[test]
    fn encode_12_bit_fixture() {
        let mut wire = Vec::new();
        DataPduHeader::new(SnSize::Sn12, 0x123).encode(&mut wire);
        assert_eq!(wire, [0x81, 0x23]);
    }

    #[test]
    fn encode_18_bit_fixture() {
        let mut wire = Vec::new();
        DataPduHeader::new(SnSize::Sn18, 0x2_abcd).encode(&mut wire);
        assert_eq!(wire, [0x82, 0xab, 0xcd]);
    }

    #[test]
    fn encode_sn_zero_is_just_the_dc_flag() {
        let mut wire = Vec::new();
        DataPduHeader::new(SnSize::Sn12, 0).encode(&mut wire);
        assert_eq!(wire, [0x80, 0x00]);
    }

    #[test]
    fn new_masks_oversized_sn() {
        let header = DataPduHeader::new(SnSize::Sn12, 0xffff_ffff);
        assert_eq!(header.sn(), 0x0fff);
    }

    #[test]
    fn decode_ignores_reserved_bits() {
        // Reserved bits set by a sloppy peer must not change the SN
        let header = DataPduHeader::decode(SnSize::Sn12, &[0xf1, 0x23]).unwrap();
        assert_eq!(header.sn(), 0x123);

        let header = DataPduHeader::decode(SnSize::Sn18, &[0xbe, 0xab, 0xcd]).unwrap();
        assert_eq!(header.sn(), 0x2_abcd);
    }

    #[test]
    fn reject_empty_buffer() {
        assert_eq!(
            DataPduHeader::decode(SnSize::Sn12, &[]),
            Err(ProtocolError::Truncated { needed: 1, actual: 0 })
        );
    }

    #[test]
    fn reject_truncated_header() {
        assert_eq!(
            DataPduHeader::decode(SnSize::Sn12, &[0x80]),
            Err(ProtocolError::Truncated { needed: 2, actual: 1 })
        );
        assert_eq!(
            DataPduHeader::decode(SnSize::Sn18, &[0x80, 0x00]),
            Err(ProtocolError::Truncated { needed: 3, actual: 2 })
        );
    }

    #[test]
    fn reject_control_pdu() {
        assert_eq!(
            DataPduHeader::decode(SnSize::Sn12, &[0x00, 0x05]),
            Err(ProtocolError::ControlPdu)
        );
    }

    #[test]
    fn control_check_precedes_length_check() {
        // A 1-byte control PDU is reported as ControlPdu, not Truncated
        assert_eq!(DataPduHeader::decode(SnSize::Sn12, &[0x01]), Err(ProtocolError::ControlPdu));
    }

    proptest! {
        #[test]
        fn round_trip_12_bit(sn in 0u32..=0x0fff) {
            let header = DataPduHeader::new(SnSize::Sn12, sn);
            let mut wire = Vec::new();
            header.encode(&mut wire);

            prop_assert_eq!(wire.len(), header.encoded_len());
            let decoded = DataPduHeader::decode(SnSize::Sn12, &wire).unwrap();
            prop_assert_eq!(decoded, header);
        }

        #[test]
        fn round_trip_18_bit(sn in 0u32..=0x3_ffff) {
            let header = DataPduHeader::new(SnSize::Sn18, sn);
            let mut wire = Vec::new();
            header.encode(&mut wire);

            prop_assert_eq!(wire.len(), header.encoded_len());
            let decoded = DataPduHeader::decode(SnSize::Sn18, &wire).unwrap();
            prop_assert_eq!(decoded, header);
        }

        #[test]
        fn dc_flag_always_set(sn in any::<u32>()) {
            for sn_size in [SnSize::Sn12, SnSize::Sn18] {
                let mut wire = Vec::new();
                DataPduHeader::new(sn_size, sn).encode(&mut wire);
                prop_assert_eq!(wire[0] & 0x80, 0x80);
            }
        }
    }
}
