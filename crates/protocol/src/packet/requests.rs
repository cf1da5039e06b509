//! Client request bodies.
//!
//! Every request starts with the request id the server echoes in its reply.
//! Several packet types share a body layout, so one struct serves each
//! layout and [`Packet`](super::Packet) tells them apart.

use crate::attrs::FileAttributes;
use crate::error::ProtocolError;
use crate::flags::OpenFlags;
use crate::wire::{WireEncode, WireReader, WireSink};

use super::extended::ExtendedRequest;

/// `id, path`: LSTAT, STAT, OPENDIR, REMOVE, RMDIR, REALPATH, READLINK.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathRequest {
    /// Request id.
    pub id: u32,
    /// Target path.
    pub path: Vec<u8>,
}

wire_struct!(PathRequest { id: u32, path: string });

/// `id, handle`: CLOSE, FSTAT, READDIR and the HANDLE reply.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandleRequest {
    /// Request id.
    pub id: u32,
    /// Opaque handle string issued by the server.
    pub handle: Vec<u8>,
}

wire_struct!(HandleRequest { id: u32, handle: string });

/// OPEN: `id, filename, pflags, attrs`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenRequest {
    /// Request id.
    pub id: u32,
    /// Path of the file to open.
    pub filename: Vec<u8>,
    /// Access and creation mode.
    pub pflags: OpenFlags,
    /// Initial attributes applied when the file is created.
    pub attrs: FileAttributes,
}

wire_struct!(OpenRequest {
    id: u32,
    filename: string,
    pflags: open_flags,
    attrs: attrs,
});

/// READ: `id, handle, offset, len`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadRequest {
    /// Request id.
    pub id: u32,
    /// Open file handle.
    pub handle: Vec<u8>,
    /// Byte offset to read from.
    pub offset: u64,
    /// Maximum number of bytes to return.
    pub len: u32,
}

wire_struct!(ReadRequest {
    id: u32,
    handle: string,
    offset: u64,
    len: u32,
});

/// WRITE: `id, handle, offset, data`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriteRequest {
    /// Request id.
    pub id: u32,
    /// Open file handle.
    pub handle: Vec<u8>,
    /// Byte offset to write at.
    pub offset: u64,
    /// Bytes to write.
    pub data: Vec<u8>,
}

wire_struct!(WriteRequest {
    id: u32,
    handle: string,
    offset: u64,
    data: string,
});

/// `id, path, attrs`: SETSTAT and MKDIR.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathAttrsRequest {
    /// Request id.
    pub id: u32,
    /// Target path.
    pub path: Vec<u8>,
    /// Attributes to apply.
    pub attrs: FileAttributes,
}

wire_struct!(PathAttrsRequest {
    id: u32,
    path: string,
    attrs: attrs,
});

/// FSETSTAT: `id, handle, attrs`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandleAttrsRequest {
    /// Request id.
    pub id: u32,
    /// Open handle.
    pub handle: Vec<u8>,
    /// Attributes to apply.
    pub attrs: FileAttributes,
}

wire_struct!(HandleAttrsRequest {
    id: u32,
    handle: string,
    attrs: attrs,
});

/// RENAME: `id, oldpath, newpath`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenameRequest {
    /// Request id.
    pub id: u32,
    /// Existing path.
    pub old_path: Vec<u8>,
    /// Destination path.
    pub new_path: Vec<u8>,
}

wire_struct!(RenameRequest {
    id: u32,
    old_path: string,
    new_path: string,
});

/// SYMLINK: `id, linkpath, targetpath`.
///
/// The field order follows draft-02. OpenSSH swaps the two paths on the
/// wire; callers talking to OpenSSH must swap them back themselves.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymlinkRequest {
    /// Request id.
    pub id: u32,
    /// Path of the link to create.
    pub link_path: Vec<u8>,
    /// Path the link points to.
    pub target_path: Vec<u8>,
}

wire_struct!(SymlinkRequest {
    id: u32,
    link_path: string,
    target_path: string,
});

/// EXTENDED: `id, request-name, request-data`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtendedPacket {
    /// Request id.
    pub id: u32,
    /// The vendor request, including its name.
    pub request: ExtendedRequest,
}

impl ExtendedPacket {
    pub(crate) fn decode(reader: &mut WireReader<'_>) -> Result<Self, ProtocolError> {
        let id = reader.read_u32()?;
        let name = reader.read_str()?;
        let request = ExtendedRequest::decode(id, name, reader)?;
        Ok(Self { id, request })
    }
}

impl WireEncode for ExtendedPacket {
    fn encode_to<S: WireSink + ?Sized>(&self, sink: &mut S) {
        sink.put_u32(self.id);
        self.request.encode_to(sink);
    }
}
