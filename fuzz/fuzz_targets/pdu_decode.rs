//! Fuzz target for DataPduHeader::decode
//!
//! Feeds arbitrary byte sequences to the header decoder under both SN
//! sizes. The decoder should NEVER panic; every invalid input must come
//! back as an error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pdcp_proto::{DataPduHeader, SnSize};

fuzz_target!(|data: &[u8]| {
    let _ = DataPduHeader::decode(SnSize::Sn12, data);
    let _ = DataPduHeader::decode(SnSize::Sn18, data);
});
