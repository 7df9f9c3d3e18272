//! Per-bearer 5G NR PDCP entity.
//!
//! A [`PdcpEntity`] sits between an upper layer (RLC/SDAP/RRC) and a lower
//! layer (RLC) on one radio bearer. Downwards it frames SDUs with a
//! sequence-numbered header and ciphers the payload; upwards it
//! reconstructs the 32-bit COUNT from the truncated SN, drops duplicates
//! and stale packets, buffers out-of-order arrivals, and delivers SDUs in
//! COUNT order, bounded by the t-Reordering timer.
//!
//! # Receive state
//!
//! Three COUNT watermarks drive the receive side:
//!
//! ```text
//!          rx_deliv              rx_reord            rx_next
//!             │                     │                   │
//!  delivered  │  buffered with gaps │  still waited for │  not yet seen
//! ────────────┼─────────────────────┼───────────────────┼────────▶ COUNT
//! ```
//!
//! - `rx_deliv`: first COUNT not yet delivered upward; everything below it
//!   has been handed to the upper layer exactly once
//! - `rx_reord`: the COUNT t-Reordering is waiting for; reaching it stops
//!   the timer
//! - `rx_next`: one past the highest COUNT ever accepted
//!
//! While the timer is armed, `rx_deliv <= rx_reord <= rx_next`. When it
//! expires, everything below `rx_reord` is delivered (gaps are accepted as
//! loss) followed by the contiguous run from `rx_reord` on.
//!
//! # Concurrency
//!
//! An entity is single-threaded with respect to itself: the caller
//! serializes all operations, the entity spawns nothing, blocks nowhere,
//! and invokes its [`Delivery`] callbacks synchronously before the
//! triggering operation returns. There is no internal clock; the host
//! pushes time in through [`PdcpEntity::set_time`], which is the only
//! point where t-Reordering can fire.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod count;
mod entity;
mod error;
mod rx_buffer;

pub use count::reconstruct_count;
pub use entity::{BearerType, Delivery, EntityConfig, PdcpEntity, Side};
pub use error::ConfigError;

// Configuration vocabulary from the sibling crates, re-exported so hosts
// can build an `EntityConfig` from this crate alone.
pub use pdcp_crypto::{CipheringAlgorithm, Direction};
pub use pdcp_proto::SnSize;
