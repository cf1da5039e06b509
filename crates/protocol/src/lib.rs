#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! SFTP version 3 packet codec.
//!
//! The crate converts between byte streams and typed [`Packet`] values as
//! described by draft-ietf-secsh-filexfer-02. It is layered bottom-up:
//!
//! - [`wire`]: big-endian integers and length-prefixed strings, plus the
//!   [`WireSink`] walk that serves both encoding and size precomputation.
//! - [`FileAttributes`], [`ExtensionPair`] and [`NamedFile`]: the composite
//!   structures shared by several packets.
//! - [`Packet`]: the closed catalog of request and reply bodies.
//! - [`frame`] and [`io`]: the `length, type, body` envelope and blocking
//!   stream helpers. With the `async` feature, `SftpCodec` provides the same
//!   framing for `tokio_util::codec::Framed`.
//!
//! All decoding is bounds-checked. Malformed input is reported through
//! [`ProtocolError`] and never panics.
//!
//! # Examples
//!
//! Encode an OPEN request and decode it back from the wire bytes.
//!
//! ```
//! use protocol::{DEFAULT_MAX_FRAME_LEN, FileAttributes, OpenFlags, OpenRequest, Packet};
//!
//! let packet = Packet::Open(OpenRequest {
//!     id: 7,
//!     filename: b"/tmp/x".to_vec(),
//!     pflags: OpenFlags::READ | OpenFlags::CREAT,
//!     attrs: FileAttributes::EMPTY,
//! });
//!
//! let bytes = packet.to_frame_bytes().expect("frame fits");
//! assert_eq!(bytes.len(), 4 + packet.frame_len());
//!
//! let (decoded, rest) = Packet::decode_frame(&bytes, DEFAULT_MAX_FRAME_LEN).expect("decodes");
//! assert_eq!(decoded, packet);
//! assert!(rest.is_empty());
//! ```
//!
//! Truncated input is an error value rather than a panic.
//!
//! ```
//! use protocol::{Packet, PacketType, ProtocolError};
//!
//! let err = Packet::decode(PacketType::Read.as_u8(), &[0, 0, 0, 1]).unwrap_err();
//! assert!(matches!(err, ProtocolError::ShortPacket { .. }));
//! ```

mod attrs;
#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
mod codec;
mod error;
mod extension;
mod flags;
pub mod frame;
pub mod io;
mod name;
mod packet;
pub mod wire;

pub use attrs::{FileAttributes, FileTimes, Ownership};
#[cfg(feature = "async")]
pub use codec::SftpCodec;
pub use error::ProtocolError;
pub use extension::ExtensionPair;
pub use flags::{AttrFlags, OpenFlags};
pub use frame::{DEFAULT_MAX_FRAME_LEN, FRAME_HEADER_LEN, LENGTH_FIELD_LEN, RawFrame};
pub use io::{read_frame, read_packet, write_packet};
pub use name::NamedFile;
pub use packet::{
    AttrsPacket, DataPacket, ExtendedPacket, ExtendedReplyPacket, ExtendedRequest, FSTATVFS,
    FSYNC, HARDLINK, HandleAttrsRequest, HandleRequest, LANGUAGE_TAG, NamePacket, OpenRequest,
    POSIX_RENAME, Packet, PacketType, PathAttrsRequest, PathRequest, ReadRequest, RenameRequest,
    SFTP_VERSION, STATVFS, StatusCode, StatusPacket, SymlinkRequest, VersionPacket, WriteRequest,
};
pub use wire::{SizeCounter, WireEncode, WireReader, WireSink};
