//! Length-prefixed framing.
//!
//! A frame is `uint32 length`, `byte type`, then `length - 1` body bytes. The
//! length counts the type byte but not itself. Outbound frames are sized with
//! the same field walk that writes them, so the buffer is allocated exactly
//! once and the length field is known before the body is produced.

use crate::error::ProtocolError;
use crate::packet::{Packet, PacketType};
use crate::wire::{U8_COST, U32_COST, WireEncode, WireReader, WireSink};

/// Bytes occupied by the length field.
pub const LENGTH_FIELD_LEN: usize = U32_COST;

/// Bytes preceding the body: length field plus type byte.
pub const FRAME_HEADER_LEN: usize = U32_COST + U8_COST;

/// Default cap on an inbound frame's declared length.
pub const DEFAULT_MAX_FRAME_LEN: u32 = 256 * 1024;

/// A frame whose type byte and body have been separated but not decoded.
///
/// Dispatchers read frames off the wire as `RawFrame`s so that an
/// undecodable body can still be answered with a STATUS that echoes the
/// request id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawFrame {
    packet_type: u8,
    body: Vec<u8>,
}

impl RawFrame {
    /// Wraps a type byte and body.
    #[must_use]
    pub fn new(packet_type: u8, body: Vec<u8>) -> Self {
        Self { packet_type, body }
    }

    /// Returns the raw type byte.
    #[must_use]
    pub const fn packet_type_byte(&self) -> u8 {
        self.packet_type
    }

    /// Returns the packet type if the tag is known.
    #[must_use]
    pub const fn packet_type(&self) -> Option<PacketType> {
        PacketType::from_u8(self.packet_type)
    }

    /// Returns the body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the value of the frame's length field.
    #[must_use]
    pub fn frame_len(&self) -> usize {
        U8_COST + self.body.len()
    }

    /// Best-effort request id: the first four body bytes.
    ///
    /// INIT and VERSION carry a version number there, so `None` is returned
    /// for those tags. Used to address a STATUS reply to a request whose body
    /// failed to decode.
    #[must_use]
    pub fn request_id_hint(&self) -> Option<u32> {
        match self.packet_type() {
            Some(PacketType::Init | PacketType::Version) => None,
            _ => WireReader::new(&self.body).read_u32().ok(),
        }
    }

    /// Decodes the body according to the type byte.
    pub fn decode(&self) -> Result<Packet, ProtocolError> {
        Packet::decode(self.packet_type, &self.body)
    }

    /// Decodes the body, requiring a specific packet type.
    pub fn decode_expecting(&self, expected: PacketType) -> Result<Packet, ProtocolError> {
        if self.packet_type != expected.as_u8() {
            return Err(ProtocolError::UnexpectedPacketType {
                expected: expected.as_u8(),
                actual: self.packet_type,
            });
        }
        Packet::decode_typed(expected, &self.body)
    }

    /// Consumes the frame and returns the body.
    #[must_use]
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

impl Packet {
    /// Value written into the frame's length field: type byte plus body.
    #[must_use]
    pub fn frame_len(&self) -> usize {
        U8_COST + self.body_len()
    }

    /// Appends the complete frame for this packet to `out`.
    ///
    /// Fails with [`ProtocolError::FrameTooLarge`] when the body cannot be
    /// described by a 32-bit length field, and with
    /// [`ProtocolError::Allocation`] when the buffer cannot grow. In both
    /// cases `out` is left unchanged.
    pub fn encode_frame_into(&self, out: &mut Vec<u8>) -> Result<(), ProtocolError> {
        let frame_len = self.frame_len();
        let length = u32::try_from(frame_len).map_err(|_| ProtocolError::FrameTooLarge {
            length: frame_len as u64,
            max: u64::from(u32::MAX),
        })?;

        let total = LENGTH_FIELD_LEN + frame_len;
        out.try_reserve_exact(total)
            .map_err(|_| ProtocolError::Allocation { requested: total })?;

        let start = out.len();
        out.put_u32(length);
        out.put_u8(self.packet_type().as_u8());
        self.encode_to(out);
        debug_assert_eq!(out.len() - start, total, "size walk disagrees with encoder");
        Ok(())
    }

    /// Encodes the complete frame into a new, exactly sized buffer.
    pub fn to_frame_bytes(&self) -> Result<Vec<u8>, ProtocolError> {
        let mut out = Vec::new();
        self.encode_frame_into(&mut out)?;
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "sftp::packet",
            packet_type = %self.packet_type(),
            request_id = ?self.request_id(),
            frame_len = out.len(),
            "encoded frame"
        );
        Ok(out)
    }

    /// Decodes one complete frame from the front of `input`.
    ///
    /// Returns the packet and the bytes after the frame. An incomplete frame
    /// is reported as [`ProtocolError::ShortPacket`]; nothing is consumed in
    /// that case.
    pub fn decode_frame(input: &[u8], max_len: u32) -> Result<(Self, &[u8]), ProtocolError> {
        let ((packet_type, body), rest) = split_frame(input, max_len)?;
        let packet = Packet::decode(packet_type, body)?;
        Ok((packet, rest))
    }
}

/// Splits the first frame off `input` as `(type, body)` plus the remainder.
///
/// The declared length is validated against `max_len` before any body byte
/// is inspected.
pub fn split_frame(input: &[u8], max_len: u32) -> Result<((u8, &[u8]), &[u8]), ProtocolError> {
    let mut reader = WireReader::new(input);
    let length = reader.read_u32()?;
    check_frame_len(length, max_len)?;

    let rest = reader.remaining();
    let length = length as usize;
    if rest.len() < length {
        return Err(ProtocolError::short(length, rest.len()));
    }
    let (frame, rest) = rest.split_at(length);
    let (&packet_type, body) = frame.split_first().ok_or(ProtocolError::EmptyFrame)?;
    Ok(((packet_type, body), rest))
}

/// Validates a declared frame length against the inbound limit.
pub fn check_frame_len(length: u32, max_len: u32) -> Result<(), ProtocolError> {
    if length == 0 {
        return Err(ProtocolError::EmptyFrame);
    }
    if length > max_len {
        return Err(ProtocolError::FrameTooLarge {
            length: u64::from(length),
            max: u64::from(max_len),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::FileAttributes;
    use crate::flags::OpenFlags;
    use crate::packet::{HandleRequest, OpenRequest, StatusCode, StatusPacket};

    fn open_packet() -> Packet {
        Packet::Open(OpenRequest {
            id: 7,
            filename: b"/tmp/x".to_vec(),
            pflags: OpenFlags::READ | OpenFlags::CREAT,
            attrs: FileAttributes::EMPTY,
        })
    }

    #[test]
    fn open_frame_matches_reference_bytes() {
        let bytes = open_packet().to_frame_bytes().unwrap();
        let mut expected = vec![0, 0, 0, 23, 3, 0, 0, 0, 7, 0, 0, 0, 6];
        expected.extend_from_slice(b"/tmp/x");
        expected.extend_from_slice(&[0, 0, 0, 9, 0, 0, 0, 0]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn length_field_counts_type_byte_and_body() {
        let packet = Packet::Status(StatusPacket::new(1, StatusCode::FAILURE, "nope"));
        let bytes = packet.to_frame_bytes().unwrap();
        let declared = u32::from_be_bytes(bytes[..4].try_into().unwrap()) as usize;
        assert_eq!(declared, bytes.len() - LENGTH_FIELD_LEN);
        assert_eq!(declared, packet.frame_len());
    }

    #[test]
    fn decode_frame_returns_following_bytes() {
        let mut bytes = open_packet().to_frame_bytes().unwrap();
        bytes.extend_from_slice(&[0xEE]);
        let (packet, rest) = Packet::decode_frame(&bytes, DEFAULT_MAX_FRAME_LEN).unwrap();
        assert_eq!(packet, open_packet());
        assert_eq!(rest, &[0xEE]);
    }

    #[test]
    fn incomplete_frame_is_short() {
        let bytes = open_packet().to_frame_bytes().unwrap();
        let err = Packet::decode_frame(&bytes[..10], DEFAULT_MAX_FRAME_LEN).unwrap_err();
        assert!(err.is_short_packet());
    }

    #[test]
    fn oversized_and_empty_frames_are_rejected() {
        assert_eq!(
            split_frame(&[0, 0, 0x10, 0, 1], 1024).unwrap_err(),
            ProtocolError::FrameTooLarge {
                length: 0x1000,
                max: 1024
            }
        );
        assert_eq!(
            split_frame(&[0, 0, 0, 0], 1024).unwrap_err(),
            ProtocolError::EmptyFrame
        );
    }

    #[test]
    fn raw_frame_request_id_hint() {
        let frame = RawFrame::new(PacketType::Close.as_u8(), vec![0, 0, 1, 0, 0xFF]);
        assert_eq!(frame.request_id_hint(), Some(256));
        assert!(frame.decode().unwrap_err().is_short_packet());

        let init = RawFrame::new(PacketType::Init.as_u8(), vec![0, 0, 0, 3]);
        assert_eq!(init.request_id_hint(), None);
    }

    #[test]
    fn decode_expecting_checks_type() {
        let frame = RawFrame::new(PacketType::Version.as_u8(), vec![0, 0, 0, 3]);
        assert_eq!(
            frame.decode_expecting(PacketType::Init).unwrap_err(),
            ProtocolError::UnexpectedPacketType {
                expected: 1,
                actual: 2
            }
        );
        assert!(frame.decode_expecting(PacketType::Version).is_ok());

        let close = Packet::Close(HandleRequest {
            id: 1,
            handle: b"0".to_vec(),
        });
        assert_eq!(close.frame_len(), 1 + 4 + 5);
    }
}
