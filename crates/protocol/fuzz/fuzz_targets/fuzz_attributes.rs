#![no_main]

//! Fuzz target for the file-attributes block.

use libfuzzer_sys::fuzz_target;
use protocol::WireEncode;

fuzz_target!(|data: &[u8]| {
    if let Ok((attrs, rest)) = protocol::FileAttributes::decode_from_slice(data) {
        let consumed = data.len() - rest.len();
        assert_eq!(attrs.wire_len(), consumed);
        let mut out = Vec::new();
        attrs.encode_into_vec(&mut out);
        assert_eq!(out, &data[..consumed]);
    }
});
