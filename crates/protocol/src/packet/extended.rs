//! Vendor requests carried inside `SSH_FXP_EXTENDED`.
//!
//! The request name selects the layout of the remainder of the body. Only
//! the OpenSSH extensions below are understood; anything else decodes to
//! [`ProtocolError::UnknownExtendedRequest`] so the dispatcher can still
//! answer the request id with `SSH_FX_OP_UNSUPPORTED`.

use crate::error::ProtocolError;
use crate::wire::{WireEncode, WireReader, WireSink};

/// `posix-rename@openssh.com`: rename with POSIX overwrite semantics.
pub const POSIX_RENAME: &[u8] = b"posix-rename@openssh.com";
/// `statvfs@openssh.com`: filesystem statistics for a path.
pub const STATVFS: &[u8] = b"statvfs@openssh.com";
/// `fstatvfs@openssh.com`: filesystem statistics for an open handle.
pub const FSTATVFS: &[u8] = b"fstatvfs@openssh.com";
/// `hardlink@openssh.com`: create a hard link.
pub const HARDLINK: &[u8] = b"hardlink@openssh.com";
/// `fsync@openssh.com`: flush an open file to stable storage.
pub const FSYNC: &[u8] = b"fsync@openssh.com";

/// A decoded EXTENDED request body (everything after the name).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtendedRequest {
    /// `posix-rename@openssh.com`
    PosixRename {
        /// Existing path.
        old_path: Vec<u8>,
        /// Destination path, replaced if present.
        new_path: Vec<u8>,
    },
    /// `statvfs@openssh.com`
    StatVfs {
        /// Path on the filesystem to query.
        path: Vec<u8>,
    },
    /// `fstatvfs@openssh.com`
    FStatVfs {
        /// Open handle on the filesystem to query.
        handle: Vec<u8>,
    },
    /// `hardlink@openssh.com`
    HardLink {
        /// Existing path.
        old_path: Vec<u8>,
        /// Path of the new link.
        new_path: Vec<u8>,
    },
    /// `fsync@openssh.com`
    Fsync {
        /// Open file handle to flush.
        handle: Vec<u8>,
    },
}

impl ExtendedRequest {
    /// Returns the request name written before the request data.
    #[must_use]
    pub const fn name(&self) -> &'static [u8] {
        match self {
            Self::PosixRename { .. } => POSIX_RENAME,
            Self::StatVfs { .. } => STATVFS,
            Self::FStatVfs { .. } => FSTATVFS,
            Self::HardLink { .. } => HARDLINK,
            Self::Fsync { .. } => FSYNC,
        }
    }

    /// Every extension name this codec can decode, for advertising in VERSION.
    pub const SUPPORTED: [&'static [u8]; 5] = [POSIX_RENAME, STATVFS, FSTATVFS, HARDLINK, FSYNC];

    /// Decodes the request data that follows `name`.
    ///
    /// `id` is only used to build the error for an unrecognised name.
    pub(crate) fn decode(
        id: u32,
        name: &[u8],
        reader: &mut WireReader<'_>,
    ) -> Result<Self, ProtocolError> {
        match name {
            POSIX_RENAME => Ok(Self::PosixRename {
                old_path: reader.read_string()?,
                new_path: reader.read_string()?,
            }),
            STATVFS => Ok(Self::StatVfs {
                path: reader.read_string()?,
            }),
            FSTATVFS => Ok(Self::FStatVfs {
                handle: reader.read_string()?,
            }),
            HARDLINK => Ok(Self::HardLink {
                old_path: reader.read_string()?,
                new_path: reader.read_string()?,
            }),
            FSYNC => Ok(Self::Fsync {
                handle: reader.read_string()?,
            }),
            other => Err(ProtocolError::UnknownExtendedRequest {
                id,
                name: String::from_utf8_lossy(other).into_owned(),
            }),
        }
    }
}

impl WireEncode for ExtendedRequest {
    /// Writes the name followed by the request-specific fields.
    fn encode_to<S: WireSink + ?Sized>(&self, sink: &mut S) {
        sink.put_string(self.name());
        match self {
            Self::PosixRename { old_path, new_path } | Self::HardLink { old_path, new_path } => {
                sink.put_string(old_path);
                sink.put_string(new_path);
            }
            Self::StatVfs { path } => sink.put_string(path),
            Self::FStatVfs { handle } | Self::Fsync { handle } => sink.put_string(handle),
        }
    }
}
