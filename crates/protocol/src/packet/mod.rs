//! The SFTP v3 packet catalog.
//!
//! [`Packet`] is a closed sum over every message a client or server may send.
//! Encoding writes only the body; [`crate::frame`] adds the length and type
//! header. Decoding dispatches on the type byte and reads the body with a
//! bounds-checked [`WireReader`], so a malformed body always surfaces as a
//! [`ProtocolError`].
//!
//! Bytes left over after a fixed-layout body has been read are ignored.
//! Bodies whose tail is open-ended (INIT/VERSION extensions, EXTENDED_REPLY
//! data) consume everything.

#[macro_use]
mod macros;

mod extended;
mod kind;
mod requests;
mod responses;
mod status;


use crate::error::ProtocolError;
use crate::wire::{WireEncode, WireReader, WireSink};

pub use self::extended::{ExtendedRequest, FSTATVFS, FSYNC, HARDLINK, POSIX_RENAME, STATVFS};
pub use self::kind::PacketType;
pub use self::requests::{
    ExtendedPacket, HandleAttrsRequest, HandleRequest, OpenRequest, PathAttrsRequest,
    PathRequest, ReadRequest, RenameRequest, SymlinkRequest, WriteRequest,
};
pub use self::responses::{
    AttrsPacket, DataPacket, ExtendedReplyPacket, LANGUAGE_TAG, NamePacket, SFTP_VERSION,
    StatusPacket, VersionPacket,
};
pub use self::status::StatusCode;

/// Any SFTP v3 packet.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Packet {
    /// `SSH_FXP_INIT`
    Init(VersionPacket),
    /// `SSH_FXP_VERSION`
    Version(VersionPacket),
    /// `SSH_FXP_OPEN`
    Open(OpenRequest),
    /// `SSH_FXP_CLOSE`
    Close(HandleRequest),
    /// `SSH_FXP_READ`
    Read(ReadRequest),
    /// `SSH_FXP_WRITE`
    Write(WriteRequest),
    /// `SSH_FXP_LSTAT`
    LStat(PathRequest),
    /// `SSH_FXP_FSTAT`
    FStat(HandleRequest),
    /// `SSH_FXP_SETSTAT`
    SetStat(PathAttrsRequest),
    /// `SSH_FXP_FSETSTAT`
    FSetStat(HandleAttrsRequest),
    /// `SSH_FXP_OPENDIR`
    OpenDir(PathRequest),
    /// `SSH_FXP_READDIR`
    ReadDir(HandleRequest),
    /// `SSH_FXP_REMOVE`
    Remove(PathRequest),
    /// `SSH_FXP_MKDIR`
    MkDir(PathAttrsRequest),
    /// `SSH_FXP_RMDIR`
    RmDir(PathRequest),
    /// `SSH_FXP_REALPATH`
    RealPath(PathRequest),
    /// `SSH_FXP_STAT`
    Stat(PathRequest),
    /// `SSH_FXP_RENAME`
    Rename(RenameRequest),
    /// `SSH_FXP_READLINK`
    ReadLink(PathRequest),
    /// `SSH_FXP_SYMLINK`
    Symlink(SymlinkRequest),
    /// `SSH_FXP_STATUS`
    Status(StatusPacket),
    /// `SSH_FXP_HANDLE`
    Handle(HandleRequest),
    /// `SSH_FXP_DATA`
    Data(DataPacket),
    /// `SSH_FXP_NAME`
    Name(NamePacket),
    /// `SSH_FXP_ATTRS`
    Attrs(AttrsPacket),
    /// `SSH_FXP_EXTENDED`
    Extended(ExtendedPacket),
    /// `SSH_FXP_EXTENDED_REPLY`
    ExtendedReply(ExtendedReplyPacket),
}

impl Packet {
    /// Returns the type tag written in the frame header.
    #[must_use]
    pub const fn packet_type(&self) -> PacketType {
        match self {
            Self::Init(_) => PacketType::Init,
            Self::Version(_) => PacketType::Version,
            Self::Open(_) => PacketType::Open,
            Self::Close(_) => PacketType::Close,
            Self::Read(_) => PacketType::Read,
            Self::Write(_) => PacketType::Write,
            Self::LStat(_) => PacketType::LStat,
            Self::FStat(_) => PacketType::FStat,
            Self::SetStat(_) => PacketType::SetStat,
            Self::FSetStat(_) => PacketType::FSetStat,
            Self::OpenDir(_) => PacketType::OpenDir,
            Self::ReadDir(_) => PacketType::ReadDir,
            Self::Remove(_) => PacketType::Remove,
            Self::MkDir(_) => PacketType::MkDir,
            Self::RmDir(_) => PacketType::RmDir,
            Self::RealPath(_) => PacketType::RealPath,
            Self::Stat(_) => PacketType::Stat,
            Self::Rename(_) => PacketType::Rename,
            Self::ReadLink(_) => PacketType::ReadLink,
            Self::Symlink(_) => PacketType::Symlink,
            Self::Status(_) => PacketType::Status,
            Self::Handle(_) => PacketType::Handle,
            Self::Data(_) => PacketType::Data,
            Self::Name(_) => PacketType::Name,
            Self::Attrs(_) => PacketType::Attrs,
            Self::Extended(_) => PacketType::Extended,
            Self::ExtendedReply(_) => PacketType::ExtendedReply,
        }
    }

    /// Returns the request id, or `None` for INIT and VERSION which carry a
    /// protocol version in that position instead.
    #[must_use]
    pub const fn request_id(&self) -> Option<u32> {
        Some(match self {
            Self::Init(_) | Self::Version(_) => return None,
            Self::Open(p) => p.id,
            Self::Close(p) | Self::FStat(p) | Self::ReadDir(p) | Self::Handle(p) => p.id,
            Self::Read(p) => p.id,
            Self::Write(p) => p.id,
            Self::LStat(p)
            | Self::OpenDir(p)
            | Self::Remove(p)
            | Self::RmDir(p)
            | Self::RealPath(p)
            | Self::Stat(p)
            | Self::ReadLink(p) => p.id,
            Self::SetStat(p) | Self::MkDir(p) => p.id,
            Self::FSetStat(p) => p.id,
            Self::Rename(p) => p.id,
            Self::Symlink(p) => p.id,
            Self::Status(p) => p.id,
            Self::Data(p) => p.id,
            Self::Name(p) => p.id,
            Self::Attrs(p) => p.id,
            Self::Extended(p) => p.id,
            Self::ExtendedReply(p) => p.id,
        })
    }

    /// Decodes a packet body for the given type tag.
    ///
    /// `body` must not include the length field or the type byte.
    pub fn decode(packet_type: u8, body: &[u8]) -> Result<Self, ProtocolError> {
        let kind = PacketType::try_from(packet_type)?;
        let result = Self::decode_typed(kind, body);
        #[cfg(feature = "tracing")]
        if let Err(err) = &result {
            tracing::debug!(
                target: "sftp::packet",
                packet_type = %kind,
                body_len = body.len(),
                error = %err,
                "failed to decode packet body"
            );
        }
        result
    }

    /// Decodes a packet body whose type has already been validated.
    pub fn decode_typed(kind: PacketType, body: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = WireReader::new(body);
        let reader = &mut reader;
        Ok(match kind {
            PacketType::Init => Self::Init(VersionPacket::decode(reader)?),
            PacketType::Version => Self::Version(VersionPacket::decode(reader)?),
            PacketType::Open => Self::Open(OpenRequest::decode(reader)?),
            PacketType::Close => Self::Close(HandleRequest::decode(reader)?),
            PacketType::Read => Self::Read(ReadRequest::decode(reader)?),
            PacketType::Write => Self::Write(WriteRequest::decode(reader)?),
            PacketType::LStat => Self::LStat(PathRequest::decode(reader)?),
            PacketType::FStat => Self::FStat(HandleRequest::decode(reader)?),
            PacketType::SetStat => Self::SetStat(PathAttrsRequest::decode(reader)?),
            PacketType::FSetStat => Self::FSetStat(HandleAttrsRequest::decode(reader)?),
            PacketType::OpenDir => Self::OpenDir(PathRequest::decode(reader)?),
            PacketType::ReadDir => Self::ReadDir(HandleRequest::decode(reader)?),
            PacketType::Remove => Self::Remove(PathRequest::decode(reader)?),
            PacketType::MkDir => Self::MkDir(PathAttrsRequest::decode(reader)?),
            PacketType::RmDir => Self::RmDir(PathRequest::decode(reader)?),
            PacketType::RealPath => Self::RealPath(PathRequest::decode(reader)?),
            PacketType::Stat => Self::Stat(PathRequest::decode(reader)?),
            PacketType::Rename => Self::Rename(RenameRequest::decode(reader)?),
            PacketType::ReadLink => Self::ReadLink(PathRequest::decode(reader)?),
            PacketType::Symlink => Self::Symlink(SymlinkRequest::decode(reader)?),
            PacketType::Status => Self::Status(StatusPacket::decode(reader)?),
            PacketType::Handle => Self::Handle(HandleRequest::decode(reader)?),
            PacketType::Data => Self::Data(DataPacket::decode(reader)?),
            PacketType::Name => Self::Name(NamePacket::decode(reader)?),
            PacketType::Attrs => Self::Attrs(AttrsPacket::decode(reader)?),
            PacketType::Extended => Self::Extended(ExtendedPacket::decode(reader)?),
            PacketType::ExtendedReply => {
                Self::ExtendedReply(ExtendedReplyPacket::decode(reader)?)
            }
        })
    }

    /// Size of the encoded body in bytes, excluding the frame header.
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.wire_len()
    }
}

impl WireEncode for Packet {
    /// Writes the packet body (no length field, no type byte).
    fn encode_to<S: WireSink + ?Sized>(&self, sink: &mut S) {
        match self {
            Self::Init(p) | Self::Version(p) => p.encode_to(sink),
            Self::Open(p) => p.encode_to(sink),
            Self::Close(p) | Self::FStat(p) | Self::ReadDir(p) | Self::Handle(p) => {
                p.encode_to(sink)
            }
            Self::Read(p) => p.encode_to(sink),
            Self::Write(p) => p.encode_to(sink),
            Self::LStat(p)
            | Self::OpenDir(p)
            | Self::Remove(p)
            | Self::RmDir(p)
            | Self::RealPath(p)
            | Self::Stat(p)
            | Self::ReadLink(p) => p.encode_to(sink),
            Self::SetStat(p) | Self::MkDir(p) => p.encode_to(sink),
            Self::FSetStat(p) => p.encode_to(sink),
            Self::Rename(p) => p.encode_to(sink),
            Self::Symlink(p) => p.encode_to(sink),
            Self::Status(p) => p.encode_to(sink),
            Self::Data(p) => p.encode_to(sink),
            Self::Name(p) => p.encode_to(sink),
            Self::Attrs(p) => p.encode_to(sink),
            Self::Extended(p) => p.encode_to(sink),
            Self::ExtendedReply(p) => p.encode_to(sink),
        }
    }
}

macro_rules! packet_from {
    ($($variant:ident($body:ty)),+ $(,)?) => {
        $(
            impl From<$body> for Packet {
                fn from(body: $body) -> Self {
                    Self::$variant(body)
                }
            }
        )+
    };
}

// Only bodies that map to exactly one packet type get a `From` impl.
packet_from!(
    Open(OpenRequest),
    Read(ReadRequest),
    Write(WriteRequest),
    FSetStat(HandleAttrsRequest),
    Rename(RenameRequest),
    Symlink(SymlinkRequest),
    Status(StatusPacket),
    Data(DataPacket),
    Name(NamePacket),
    Attrs(AttrsPacket),
    Extended(ExtendedPacket),
    ExtendedReply(ExtendedReplyPacket),
);
