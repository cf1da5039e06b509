#![no_main]

//! Fuzz target for frame splitting and packet body decoding.
//!
//! Every byte string must either decode or produce a `ProtocolError`. A
//! successful decode must re-encode to a frame that decodes to the same
//! packet.

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    if let Ok((packet, _rest)) =
        protocol::Packet::decode_frame(data, protocol::DEFAULT_MAX_FRAME_LEN)
    {
        let bytes = packet.to_frame_bytes().expect("decoded packet re-encodes");
        let (again, rest) = protocol::Packet::decode_frame(&bytes, u32::MAX).expect("re-decodes");
        assert_eq!(again, packet);
        assert!(rest.is_empty());
    }

    if let Some((&tag, body)) = data.split_first() {
        let _ = protocol::Packet::decode(tag, body);
    }

    let mut cursor = Cursor::new(data);
    while let Ok(Some(frame)) = protocol::read_frame(&mut cursor, 4096) {
        let _ = frame.decode();
        let _ = frame.request_id_hint();
    }
});
