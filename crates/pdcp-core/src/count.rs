//! COUNT reconstruction from a truncated sequence number.
//!
//! Only the low `sn_size` bits of a COUNT travel on the wire; the receiver
//! infers the hyper frame number (the high bits) from its own delivery
//! watermark. All arithmetic runs in the signed domain so that the window
//! edges behave at `rx_deliv` near zero and near the top of COUNT space.

use pdcp_proto::SnSize;

/// Reconstruct the full COUNT a received SN most plausibly carries.
///
/// The SN is placed in the half-open window
/// `[rx_deliv - window, rx_deliv + window)` around the delivery watermark,
/// where `window` is half the SN space:
///
/// - SN far below the watermark's SN: the SN wrapped forward, HFN + 1
/// - SN at or beyond the watermark's SN plus the window: a leftover from
///   before the wrap, HFN - 1
/// - otherwise: same HFN as the watermark
///
/// The result can be negative (an SN from before COUNT 0) or exceed
/// `u32::MAX` (an SN from past the end of COUNT space); callers treat both
/// as undeliverable.
#[must_use]
pub fn reconstruct_count(rcvd_sn: u32, rx_deliv: u32, sn_size: SnSize) -> i64 {
    let window = i64::from(sn_size.window());
    let deliv_sn = i64::from(rx_deliv & sn_size.mask());
    let deliv_hfn = i64::from(rx_deliv >> sn_size.bits());
    let sn = i64::from(rcvd_sn);

    let hfn = if sn < deliv_sn - window {
        deliv_hfn + 1
    } else if sn >= deliv_sn + window {
        deliv_hfn - 1
    } else {
        deliv_hfn
    };

    // hfn * 2^bits + sn; the OR is exact because sn < 2^bits
    (hfn << sn_size.bits()) | sn
}
