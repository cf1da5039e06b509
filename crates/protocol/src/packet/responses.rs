//! Server reply bodies and the INIT/VERSION handshake.

use crate::attrs::FileAttributes;
use crate::error::ProtocolError;
use crate::extension::{ExtensionPair, decode_until_exhausted};
use crate::name::{NamedFile, decode_named_files};
use crate::wire::{WireEncode, WireReader, WireSink};

use super::status::StatusCode;

/// Protocol version spoken by this crate.
pub const SFTP_VERSION: u32 = 3;

/// Language tag written into every STATUS reply.
pub const LANGUAGE_TAG: &[u8] = b"en-us";

/// INIT and VERSION: `version` followed by extension pairs up to the end of
/// the body.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VersionPacket {
    /// Protocol version offered (INIT) or selected (VERSION).
    pub version: u32,
    /// Advertised extensions.
    pub extensions: Vec<ExtensionPair>,
}

impl VersionPacket {
    /// A version 3 handshake with no extensions.
    #[must_use]
    pub const fn v3() -> Self {
        Self {
            version: SFTP_VERSION,
            extensions: Vec::new(),
        }
    }

    /// Looks up an advertised extension by name.
    #[must_use]
    pub fn extension(&self, name: &[u8]) -> Option<&ExtensionPair> {
        self.extensions.iter().find(|pair| pair.name == name)
    }

    pub(crate) fn decode(reader: &mut WireReader<'_>) -> Result<Self, ProtocolError> {
        let version = reader.read_u32()?;
        let extensions = decode_until_exhausted(reader)?;
        Ok(Self {
            version,
            extensions,
        })
    }
}

impl Default for VersionPacket {
    fn default() -> Self {
        Self::v3()
    }
}

impl WireEncode for VersionPacket {
    fn encode_to<S: WireSink + ?Sized>(&self, sink: &mut S) {
        sink.put_u32(self.version);
        self.extensions.encode_to(sink);
    }
}

/// STATUS: `id, code, message, language`.
///
/// The language tag is not stored. It is always written as `"en-us"` and
/// discarded when read.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusPacket {
    /// Request id being answered.
    pub id: u32,
    /// Result code.
    pub code: StatusCode,
    /// Human-readable message.
    pub message: Vec<u8>,
}

impl StatusPacket {
    /// A STATUS reply with an explicit message.
    pub fn new(id: u32, code: StatusCode, message: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            code,
            message: message.into(),
        }
    }

    /// A STATUS reply whose message is the code's default description.
    #[must_use]
    pub fn with_default_message(id: u32, code: StatusCode) -> Self {
        Self::new(id, code, code.default_message())
    }

    /// `SSH_FX_OK` for `id`.
    #[must_use]
    pub fn ok(id: u32) -> Self {
        Self::with_default_message(id, StatusCode::OK)
    }

    pub(crate) fn decode(reader: &mut WireReader<'_>) -> Result<Self, ProtocolError> {
        let id = reader.read_u32()?;
        let code = StatusCode::from_u32(reader.read_u32()?);
        let message = reader.read_string()?;
        let _language = reader.read_str()?;
        Ok(Self { id, code, message })
    }
}

impl WireEncode for StatusPacket {
    fn encode_to<S: WireSink + ?Sized>(&self, sink: &mut S) {
        sink.put_u32(self.id);
        sink.put_u32(self.code.as_u32());
        sink.put_string(&self.message);
        sink.put_string(LANGUAGE_TAG);
    }
}

/// DATA: `id, data`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataPacket {
    /// Request id being answered.
    pub id: u32,
    /// File contents.
    pub data: Vec<u8>,
}

wire_struct!(DataPacket { id: u32, data: string });

/// ATTRS: `id, attrs`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttrsPacket {
    /// Request id being answered.
    pub id: u32,
    /// Attributes of the requested file.
    pub attrs: FileAttributes,
}

wire_struct!(AttrsPacket { id: u32, attrs: attrs });

/// NAME: `id, count, count × (filename, longname, attrs)`.
///
/// The count is derived from `files` when encoding. When decoding, exactly
/// the declared number of entries must be present.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamePacket {
    /// Request id being answered.
    pub id: u32,
    /// Entries in reply order.
    pub files: Vec<NamedFile>,
}

impl NamePacket {
    pub(crate) fn decode(reader: &mut WireReader<'_>) -> Result<Self, ProtocolError> {
        let id = reader.read_u32()?;
        let count = reader.read_u32()?;
        let files = decode_named_files(reader, count)?;
        Ok(Self { id, files })
    }
}

impl WireEncode for NamePacket {
    fn encode_to<S: WireSink + ?Sized>(&self, sink: &mut S) {
        sink.put_u32(self.id);
        sink.put_u32(self.files.len() as u32);
        self.files.encode_to(sink);
    }
}

/// EXTENDED_REPLY: `id` followed by request-specific bytes up to the end of
/// the body.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtendedReplyPacket {
    /// Request id being answered.
    pub id: u32,
    /// Unframed reply payload.
    pub data: Vec<u8>,
}

impl ExtendedReplyPacket {
    pub(crate) fn decode(reader: &mut WireReader<'_>) -> Result<Self, ProtocolError> {
        let id = reader.read_u32()?;
        let data = reader.read_rest().to_vec();
        Ok(Self { id, data })
    }
}

impl WireEncode for ExtendedReplyPacket {
    fn encode_to<S: WireSink + ?Sized>(&self, sink: &mut S) {
        sink.put_u32(self.id);
        sink.put_raw(&self.data);
    }
}
