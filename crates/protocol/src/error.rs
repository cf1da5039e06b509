use std::io;

/// Failures surfaced while decoding or framing SFTP packets.
///
/// Every decoder in the crate reports malformed input through this type rather
/// than panicking. Client input is untrusted, so a truncated field, an unknown
/// type byte, or an oversized frame are ordinary values the caller converts
/// into a STATUS reply (or a dropped connection) instead of a crash.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ProtocolError {
    /// A field required more bytes than remained in the packet body.
    #[error("packet too short: field needs {needed} bytes but only {available} remain")]
    ShortPacket {
        /// Bytes the field being decoded required.
        needed: usize,
        /// Bytes that were left in the buffer.
        available: usize,
    },
    /// The frame's type byte does not name any SFTP v3 packet.
    #[error("unknown SFTP packet type {0}")]
    UnknownPacketType(u8),
    /// An EXTENDED request named an operation this codec does not implement.
    ///
    /// The request id is preserved so the caller can answer that request with
    /// an `OP_UNSUPPORTED` status instead of dropping it.
    #[error("unknown extended request {name:?} (request id {id})")]
    UnknownExtendedRequest {
        /// Request id of the EXTENDED packet.
        id: u32,
        /// The extended request name, lossily rendered as UTF-8.
        name: String,
    },
    /// Attribute flags carried bits whose payload layout is not defined.
    #[error("unsupported file attribute flag bits {0:#010x}")]
    UnsupportedAttributeFlags(u32),
    /// A frame's declared length exceeded the configured limit.
    #[error("frame length {length} exceeds maximum {max}")]
    FrameTooLarge {
        /// Length declared in (or computed for) the frame header.
        length: u64,
        /// Largest accepted length.
        max: u64,
    },
    /// A frame declared a length of zero, leaving no room for the type byte.
    #[error("frame length is zero; a frame must contain at least the type byte")]
    EmptyFrame,
    /// A frame carried a different packet type than the caller required.
    #[error("expected SFTP packet type {expected} but received {actual}")]
    UnexpectedPacketType {
        /// Type tag the caller asked for.
        expected: u8,
        /// Type tag that was present on the wire.
        actual: u8,
    },
    /// Growing the output buffer failed.
    #[error("failed to reserve {requested} bytes for an encoded frame")]
    Allocation {
        /// Number of bytes that could not be reserved.
        requested: usize,
    },
}

impl ProtocolError {
    /// Constructs a [`ProtocolError::ShortPacket`] for a field of `needed` bytes.
    #[must_use]
    #[inline]
    pub const fn short(needed: usize, available: usize) -> Self {
        Self::ShortPacket { needed, available }
    }

    /// Returns `true` when the error reports a truncated packet body.
    #[must_use]
    pub const fn is_short_packet(&self) -> bool {
        matches!(self, Self::ShortPacket { .. })
    }

    /// Returns the request id carried by an unknown EXTENDED request, if any.
    #[must_use]
    pub const fn extended_request_id(&self) -> Option<u32> {
        match self {
            Self::UnknownExtendedRequest { id, .. } => Some(*id),
            _ => None,
        }
    }
}

impl From<ProtocolError> for io::Error {
    fn from(err: ProtocolError) -> Self {
        let kind = match err {
            ProtocolError::Allocation { .. } => io::ErrorKind::OutOfMemory,
            _ => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_short_packet() {
        let err = ProtocolError::short(4, 1);
        assert_eq!(
            err.to_string(),
            "packet too short: field needs 4 bytes but only 1 remain"
        );
        assert!(err.is_short_packet());
    }

    #[test]
    fn display_formats_unsupported_flags_as_hex() {
        let err = ProtocolError::UnsupportedAttributeFlags(0x40);
        assert_eq!(
            err.to_string(),
            "unsupported file attribute flag bits 0x00000040"
        );
    }

    #[test]
    fn extended_request_id_is_exposed() {
        let err = ProtocolError::UnknownExtendedRequest {
            id: 9,
            name: "limits@openssh.com".to_owned(),
        };
        assert_eq!(err.extended_request_id(), Some(9));
        assert_eq!(ProtocolError::EmptyFrame.extended_request_id(), None);
    }

    #[test]
    fn converts_to_io_error_preserving_kind_and_source() {
        let err = ProtocolError::UnknownPacketType(77);
        let io_err: io::Error = err.clone().into();

        assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
        let source = io_err
            .get_ref()
            .and_then(|src| src.downcast_ref::<ProtocolError>())
            .expect("io::Error must carry ProtocolError source");
        assert_eq!(source, &err);
    }
}
