//! The per-bearer PDCP entity state machine.
//!
//! One entity serves exactly one radio bearer. The transmit path is a
//! straight line (frame, cipher, count, hand down); the receive path is
//! where the state lives: COUNT reconstruction, the duplicate/stale
//! window, the pending buffer, and t-Reordering.
//!
//! ```text
//!               upper layer (RLC/SDAP/RRC)
//!            recv_sdu │         ▲ deliver_sdu
//!                     ▼         │
//!              ┌──────────────────────────┐
//!   set_time ─▶│        PdcpEntity        │
//!              │ tx_next │ rx_deliv       │
//!              │         │ rx_reord       │
//!              │ cipher  │ rx_next        │
//!              │         │ pending buffer │
//!              └──────────────────────────┘
//!         deliver_pdu │         ▲ recv_pdu
//!                     ▼         │
//!                  lower layer (RLC)
//! ```
//!
//! Delivery callbacks run synchronously on the caller's thread; buffers
//! handed to them are borrowed for the duration of the call only.

use bytes::Bytes;
use pdcp_crypto::{CipheringAlgorithm, Direction, NeaCipher};
use pdcp_proto::{DataPduHeader, ProtocolError, SnSize};
use zeroize::Zeroize;

use crate::{count::reconstruct_count, error::ConfigError, rx_buffer::RxBuffer};

/// Radio bearer class served by an entity.
///
/// Kept for identification only; signalling and data bearers run the same
/// state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BearerType {
    /// Signalling radio bearer (RRC)
    Srb,
    /// Data radio bearer (user plane)
    Drb,
}

/// Which end of the radio bearer this entity runs on.
///
/// The side fixes the cipher direction bit: a gNB transmits downlink and
/// receives uplink, a terminal the mirror image. Both peers therefore
/// derive the same keystream for the same PDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Base station
    Gnb,
    /// Terminal
    Ue,
}

impl Side {
    /// Cipher direction for PDUs this entity transmits.
    #[must_use]
    pub const fn tx_direction(self) -> Direction {
        match self {
            Self::Gnb => Direction::Downlink,
            Self::Ue => Direction::Uplink,
        }
    }

    /// Cipher direction for PDUs this entity receives.
    #[must_use]
    pub const fn rx_direction(self) -> Direction {
        match self {
            Self::Gnb => Direction::Uplink,
            Self::Ue => Direction::Downlink,
        }
    }
}

/// Host-supplied delivery hooks, captured at construction.
///
/// Both callbacks are invoked synchronously from within the entity
/// operation that produced the data; the byte slices are only valid for
/// the duration of the call, so a host that needs to retain them must
/// copy. Implementations must not call back into the same entity.
pub trait Delivery {
    /// An SDU reassembled in COUNT order, going up to the upper layer.
    fn deliver_sdu(&mut self, sdu: &[u8]);

    /// A framed (and ciphered) PDU going down to the lower layer.
    /// `sdu_id` is the opaque correlator the upper layer passed to
    /// [`PdcpEntity::recv_sdu`].
    fn deliver_pdu(&mut self, pdu: &[u8], sdu_id: u32);
}

/// Configuration for one PDCP entity.
#[derive(Clone)]
pub struct EntityConfig {
    /// Bearer class (identification only)
    pub bearer_type: BearerType,
    /// Which end of the bearer this entity runs on
    pub side: Side,
    /// Radio bearer identity, 1-based (the cipher BEARER input is
    /// `rb_id - 1`)
    pub rb_id: u8,
    /// Configured sequence number length
    pub sn_size: SnSize,
    /// t-Reordering duration, in the same units as the host clock passed
    /// to [`PdcpEntity::set_time`]
    pub t_reordering: u64,
    /// TX SDU discard timer. Accepted and held; discard is not implemented
    pub discard_timer: Option<u64>,
    /// Configured ciphering algorithm
    pub ciphering_algorithm: CipheringAlgorithm,
    /// 128-bit ciphering key. Without it the entity sends and receives in
    /// the clear regardless of the algorithm
    pub ciphering_key: Option<[u8; 16]>,
    /// 128-bit integrity key. Refused: integrity protection is not
    /// implemented
    pub integrity_key: Option<[u8; 16]>,
}

/// A PDCP entity bound to one radio bearer.
///
/// Single-threaded with respect to itself: the caller serializes all
/// operations. Dropping the entity releases the pending buffer and wipes
/// cipher and integrity key material.
pub struct PdcpEntity<D: Delivery> {
    bearer_type: BearerType,
    side: Side,
    rb_id: u8,
    sn_size: SnSize,

    /// COUNT of the next PDU to transmit
    tx_next: u32,
    /// One past the highest COUNT ever accepted
    rx_next: u32,
    /// First COUNT not yet delivered upward
    rx_deliv: u32,
    /// COUNT that stops t-Reordering once `rx_deliv` reaches it
    rx_reord: u32,

    t_reordering: u64,
    /// Timestamp t-Reordering was armed at; `None` while disarmed
    t_reordering_start: Option<u64>,
    /// Host clock, pushed in through `set_time`
    t_current: u64,

    rx_list: RxBuffer,
    cipher: NeaCipher,
    integrity_key: Option<[u8; 16]>,
    discard_timer: Option<u64>,

    delivery: D,
}

impl<D: Delivery> PdcpEntity<D> {
    /// Create an entity from its configuration and delivery hooks.
    ///
    /// All COUNTs start at zero, the pending buffer is empty, and
    /// t-Reordering is disarmed.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidBearerId`] if `rb_id` is not in `1..=32`
    /// - [`ConfigError::IntegrityUnsupported`] if an integrity key is
    ///   supplied
    pub fn new(config: EntityConfig, delivery: D) -> Result<Self, ConfigError> {
        if !(1..=32).contains(&config.rb_id) {
            return Err(ConfigError::InvalidBearerId { rb_id: config.rb_id });
        }

        if config.integrity_key.is_some() {
            return Err(ConfigError::IntegrityUnsupported);
        }

        Ok(Self {
            bearer_type: config.bearer_type,
            side: config.side,
            rb_id: config.rb_id,
            sn_size: config.sn_size,
            tx_next: 0,
            rx_next: 0,
            rx_deliv: 0,
            rx_reord: 0,
            t_reordering: config.t_reordering,
            t_reordering_start: None,
            t_current: 0,
            rx_list: RxBuffer::new(),
            cipher: NeaCipher::new(config.ciphering_algorithm, config.ciphering_key),
            integrity_key: None,
            discard_timer: config.discard_timer,
            delivery,
        })
    }

    /// Accept an SDU from the upper layer and emit exactly one data PDU.
    ///
    /// The PDU is the SN header followed by the payload, ciphered under
    /// the current `tx_next` COUNT (the header stays in the clear), and is
    /// handed to [`Delivery::deliver_pdu`] together with the caller's
    /// `sdu_id` correlator before this method returns.
    pub fn recv_sdu(&mut self, sdu: &[u8], sdu_id: u32) {
        let count = self.tx_next;
        let header = DataPduHeader::new(self.sn_size, count & self.sn_size.mask());

        let mut pdu = Vec::with_capacity(header.encoded_len() + sdu.len());
        header.encode(&mut pdu);
        pdu.extend_from_slice(sdu);

        self.cipher.apply_keystream(
            &mut pdu[header.encoded_len()..],
            count,
            self.bearer(),
            self.side.tx_direction(),
        );

        self.tx_next = self.tx_next.wrapping_add(1);

        self.delivery.deliver_pdu(&pdu, sdu_id);
    }

    /// Accept a PDU from the lower layer.
    ///
    /// Malformed PDUs, control PDUs, duplicates, and stale arrivals are
    /// dropped without error (upstream RLC may legitimately deliver
    /// duplicates). Everything else is deciphered, buffered, and any
    /// newly contiguous run starting at `rx_deliv` is delivered upward in
    /// COUNT order before this method returns.
    pub fn recv_pdu(&mut self, pdu: &[u8]) {
        let header = match DataPduHeader::decode(self.sn_size, pdu) {
            Ok(header) => header,
            Err(ProtocolError::ControlPdu) => {
                tracing::warn!(rb_id = self.rb_id, "dropping control PDU on the data path");
                return;
            },
            Err(error) => {
                tracing::error!(rb_id = self.rb_id, size = pdu.len(), %error, "bad PDU received");
                return;
            },
        };

        let header_len = header.encoded_len();
        if pdu.len() < header_len + 1 {
            tracing::error!(rb_id = self.rb_id, size = pdu.len(), "bad PDU received");
            return;
        }

        let rcvd_count = reconstruct_count(header.sn(), self.rx_deliv, self.sn_size);

        // Anything below rx_deliv is stale, including reconstructions that
        // landed before COUNT 0. The top of COUNT space is refused too:
        // COUNT must never get there (re-keying happens first), and the
        // bound keeps rx_next = count + 1 from overflowing.
        if rcvd_count < i64::from(self.rx_deliv) || rcvd_count >= i64::from(u32::MAX) {
            tracing::debug!(rb_id = self.rb_id, rcvd_count, "discarding stale PDU");
            return;
        }
        let rcvd_count = rcvd_count as u32;

        let mut sdu = pdu[header_len..].to_vec();
        self.cipher.apply_keystream(&mut sdu, rcvd_count, self.bearer(), self.side.rx_direction());

        if !self.rx_list.insert(rcvd_count, Bytes::from(sdu)) {
            tracing::debug!(rb_id = self.rb_id, rcvd_count, "discarding duplicate PDU");
            return;
        }

        if rcvd_count >= self.rx_next {
            self.rx_next = rcvd_count + 1;
        }

        if rcvd_count == self.rx_deliv {
            self.rx_deliv = self.deliver_contiguous_from(self.rx_deliv);
        }

        if self.t_reordering_start.is_some() && self.rx_deliv >= self.rx_reord {
            // The awaited COUNT arrived; stop and reset t-Reordering
            self.t_reordering_start = None;
        }

        if self.t_reordering_start.is_none() && self.rx_deliv < self.rx_next {
            self.rx_reord = self.rx_next;
            self.t_reordering_start = Some(self.t_current);
        }
    }

    /// Advance the host clock and evaluate t-Reordering.
    ///
    /// Time is monotonic and host-supplied; this is the only point where
    /// the timer can fire. A single call that jumps past several timer
    /// periods still triggers exactly one expiry (driven by the current
    /// `rx_reord`), possibly re-arming for the next gap.
    pub fn set_time(&mut self, now: u64) {
        self.t_current = now;

        self.check_t_reordering();
    }

    /// Install the 16-byte integrity key.
    ///
    /// Stored for future use; no PDU is integrity-protected or verified
    /// yet.
    pub fn set_integrity_key(&mut self, key: [u8; 16]) {
        self.integrity_key = Some(key);
    }

    /// Bearer class this entity serves.
    #[must_use]
    pub fn bearer_type(&self) -> BearerType {
        self.bearer_type
    }

    /// Which end of the bearer this entity runs on.
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Radio bearer identity (1-based).
    #[must_use]
    pub fn rb_id(&self) -> u8 {
        self.rb_id
    }

    /// Configured sequence number length.
    #[must_use]
    pub fn sn_size(&self) -> SnSize {
        self.sn_size
    }

    /// COUNT the next transmitted PDU will carry.
    #[must_use]
    pub fn tx_next(&self) -> u32 {
        self.tx_next
    }

    /// First COUNT not yet delivered upward.
    #[must_use]
    pub fn rx_deliv(&self) -> u32 {
        self.rx_deliv
    }

    /// One past the highest COUNT ever accepted.
    #[must_use]
    pub fn rx_next(&self) -> u32 {
        self.rx_next
    }

    /// COUNT that will stop t-Reordering. Meaningful while
    /// [`Self::is_reordering_running`] is true.
    #[must_use]
    pub fn rx_reord(&self) -> u32 {
        self.rx_reord
    }

    /// Whether t-Reordering is currently armed.
    #[must_use]
    pub fn is_reordering_running(&self) -> bool {
        self.t_reordering_start.is_some()
    }

    /// Whether payloads are actually ciphered.
    #[must_use]
    pub fn is_ciphering_enabled(&self) -> bool {
        self.cipher.is_enabled()
    }

    /// Identifier of the ciphering algorithm actually in effect, for host
    /// logs and telemetry.
    ///
    /// 0 (NEA0) when the entity sends and receives in the clear, even if
    /// NEA2 was configured without a key.
    #[must_use]
    pub fn ciphering_algorithm_id(&self) -> u8 {
        self.cipher.algorithm().id()
    }

    /// Number of received SDUs waiting for a gap to fill.
    #[must_use]
    pub fn buffered_sdus(&self) -> usize {
        self.rx_list.len()
    }

    /// Total payload bytes currently buffered on the receive side.
    #[must_use]
    pub fn buffered_bytes(&self) -> usize {
        self.rx_list.bytes()
    }

    /// TX discard timer from the configuration. Held only; TX SDU discard
    /// is not implemented.
    #[must_use]
    pub fn discard_timer(&self) -> Option<u64> {
        self.discard_timer
    }

    /// 5-bit bearer identity fed to the keystream (`rb_id` is 1-based).
    fn bearer(&self) -> u8 {
        self.rb_id - 1
    }

    /// Deliver the contiguous run of buffered SDUs starting at `from`.
    ///
    /// Returns the first COUNT not delivered.
    fn deliver_contiguous_from(&mut self, from: u32) -> u32 {
        let mut next = from;
        while let Some(sdu) = self.rx_list.take(next) {
            self.delivery.deliver_sdu(&sdu);
            next += 1;
        }
        next
    }

    /// Evaluate t-Reordering against the current clock.
    fn check_t_reordering(&mut self) {
        let Some(started) = self.t_reordering_start else {
            return;
        };
        if self.t_current <= started.saturating_add(self.t_reordering) {
            return;
        }

        self.t_reordering_start = None;

        // Expired: everything below rx_reord goes up now, gaps and all;
        // the missing COUNTs are accepted as loss
        while self.rx_list.first_count().is_some_and(|count| count < self.rx_reord) {
            if let Some((_, sdu)) = self.rx_list.pop_first() {
                self.delivery.deliver_sdu(&sdu);
            }
        }

        // Then the contiguous run from rx_reord on
        self.rx_deliv = self.deliver_contiguous_from(self.rx_reord);

        if self.rx_deliv < self.rx_next {
            self.rx_reord = self.rx_next;
            self.t_reordering_start = Some(self.t_current);
        }
    }
}

// Wipe key material on teardown. The cipher context zeroizes its own key;
// the pending buffer and entity memory are released by the normal drops.
impl<D: Delivery> Drop for PdcpEntity<D> {
    fn drop(&mut self) {
        self.integrity_key.zeroize();
    }
}
