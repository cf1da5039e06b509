use core::fmt;

use crate::error::ProtocolError;

/// Type tags of every SFTP v3 packet.
///
/// The numeric values are the `SSH_FXP_*` constants from
/// draft-ietf-secsh-filexfer-02 and are written verbatim as the byte that
/// follows a frame's length field.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(u8)]
pub enum PacketType {
    /// `SSH_FXP_INIT`: client hello carrying its protocol version.
    Init = 1,
    /// `SSH_FXP_VERSION`: server reply to INIT.
    Version = 2,
    /// `SSH_FXP_OPEN`: open or create a file.
    Open = 3,
    /// `SSH_FXP_CLOSE`: release a file or directory handle.
    Close = 4,
    /// `SSH_FXP_READ`: read from an open file.
    Read = 5,
    /// `SSH_FXP_WRITE`: write to an open file.
    Write = 6,
    /// `SSH_FXP_LSTAT`: attributes of a path without following symlinks.
    LStat = 7,
    /// `SSH_FXP_FSTAT`: attributes of an open handle.
    FStat = 8,
    /// `SSH_FXP_SETSTAT`: change attributes of a path.
    SetStat = 9,
    /// `SSH_FXP_FSETSTAT`: change attributes of an open handle.
    FSetStat = 10,
    /// `SSH_FXP_OPENDIR`: open a directory for listing.
    OpenDir = 11,
    /// `SSH_FXP_READDIR`: read the next batch of directory entries.
    ReadDir = 12,
    /// `SSH_FXP_REMOVE`: delete a file.
    Remove = 13,
    /// `SSH_FXP_MKDIR`: create a directory.
    MkDir = 14,
    /// `SSH_FXP_RMDIR`: remove a directory.
    RmDir = 15,
    /// `SSH_FXP_REALPATH`: canonicalise a path.
    RealPath = 16,
    /// `SSH_FXP_STAT`: attributes of a path, following symlinks.
    Stat = 17,
    /// `SSH_FXP_RENAME`: rename a file or directory.
    Rename = 18,
    /// `SSH_FXP_READLINK`: read a symlink target.
    ReadLink = 19,
    /// `SSH_FXP_SYMLINK`: create a symlink.
    Symlink = 20,
    /// `SSH_FXP_STATUS`: generic success/failure reply.
    Status = 101,
    /// `SSH_FXP_HANDLE`: reply carrying a new handle.
    Handle = 102,
    /// `SSH_FXP_DATA`: reply carrying file contents.
    Data = 103,
    /// `SSH_FXP_NAME`: reply carrying names and attributes.
    Name = 104,
    /// `SSH_FXP_ATTRS`: reply carrying attributes.
    Attrs = 105,
    /// `SSH_FXP_EXTENDED`: vendor extension request.
    Extended = 200,
    /// `SSH_FXP_EXTENDED_REPLY`: vendor extension reply.
    ExtendedReply = 201,
}

impl PacketType {
    /// Every packet type, ordered by tag value.
    pub const ALL: [PacketType; 27] = [
        PacketType::Init,
        PacketType::Version,
        PacketType::Open,
        PacketType::Close,
        PacketType::Read,
        PacketType::Write,
        PacketType::LStat,
        PacketType::FStat,
        PacketType::SetStat,
        PacketType::FSetStat,
        PacketType::OpenDir,
        PacketType::ReadDir,
        PacketType::Remove,
        PacketType::MkDir,
        PacketType::RmDir,
        PacketType::RealPath,
        PacketType::Stat,
        PacketType::Rename,
        PacketType::ReadLink,
        PacketType::Symlink,
        PacketType::Status,
        PacketType::Handle,
        PacketType::Data,
        PacketType::Name,
        PacketType::Attrs,
        PacketType::Extended,
        PacketType::ExtendedReply,
    ];

    /// Returns the tag byte written on the wire.
    #[must_use]
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Maps a tag byte to its packet type.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            1 => Self::Init,
            2 => Self::Version,
            3 => Self::Open,
            4 => Self::Close,
            5 => Self::Read,
            6 => Self::Write,
            7 => Self::LStat,
            8 => Self::FStat,
            9 => Self::SetStat,
            10 => Self::FSetStat,
            11 => Self::OpenDir,
            12 => Self::ReadDir,
            13 => Self::Remove,
            14 => Self::MkDir,
            15 => Self::RmDir,
            16 => Self::RealPath,
            17 => Self::Stat,
            18 => Self::Rename,
            19 => Self::ReadLink,
            20 => Self::Symlink,
            101 => Self::Status,
            102 => Self::Handle,
            103 => Self::Data,
            104 => Self::Name,
            105 => Self::Attrs,
            200 => Self::Extended,
            201 => Self::ExtendedReply,
            _ => return None,
        })
    }

    /// Returns the `SSH_FXP_*` constant name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Init => "SSH_FXP_INIT",
            Self::Version => "SSH_FXP_VERSION",
            Self::Open => "SSH_FXP_OPEN",
            Self::Close => "SSH_FXP_CLOSE",
            Self::Read => "SSH_FXP_READ",
            Self::Write => "SSH_FXP_WRITE",
            Self::LStat => "SSH_FXP_LSTAT",
            Self::FStat => "SSH_FXP_FSTAT",
            Self::SetStat => "SSH_FXP_SETSTAT",
            Self::FSetStat => "SSH_FXP_FSETSTAT",
            Self::OpenDir => "SSH_FXP_OPENDIR",
            Self::ReadDir => "SSH_FXP_READDIR",
            Self::Remove => "SSH_FXP_REMOVE",
            Self::MkDir => "SSH_FXP_MKDIR",
            Self::RmDir => "SSH_FXP_RMDIR",
            Self::RealPath => "SSH_FXP_REALPATH",
            Self::Stat => "SSH_FXP_STAT",
            Self::Rename => "SSH_FXP_RENAME",
            Self::ReadLink => "SSH_FXP_READLINK",
            Self::Symlink => "SSH_FXP_SYMLINK",
            Self::Status => "SSH_FXP_STATUS",
            Self::Handle => "SSH_FXP_HANDLE",
            Self::Data => "SSH_FXP_DATA",
            Self::Name => "SSH_FXP_NAME",
            Self::Attrs => "SSH_FXP_ATTRS",
            Self::Extended => "SSH_FXP_EXTENDED",
            Self::ExtendedReply => "SSH_FXP_EXTENDED_REPLY",
        }
    }

    /// Returns `true` for packets a server sends (replies and VERSION).
    #[must_use]
    pub const fn is_response(self) -> bool {
        matches!(
            self,
            Self::Version
                | Self::Status
                | Self::Handle
                | Self::Data
                | Self::Name
                | Self::Attrs
                | Self::ExtendedReply
        )
    }
}

impl TryFrom<u8> for PacketType {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(ProtocolError::UnknownPacketType(value))
    }
}

impl From<PacketType> for u8 {
    fn from(value: PacketType) -> Self {
        value.as_u8()
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
