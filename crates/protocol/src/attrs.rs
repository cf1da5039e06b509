//! File attributes block (`ATTRS` in draft-ietf-secsh-filexfer-02).
//!
//! The flags word is never stored: it is derived from which optional groups
//! are populated, so an encoded block can never claim a field it omits or omit
//! a field it claims.

use crate::error::ProtocolError;
use crate::extension::{ExtensionPair, decode_counted};
use crate::flags::AttrFlags;
use crate::wire::{WireEncode, WireReader, WireSink};

/// Numeric owner of a file. Always transmitted as a pair.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ownership {
    /// Numeric user id.
    pub uid: u32,
    /// Numeric group id.
    pub gid: u32,
}

/// Access and modification times in seconds since the Unix epoch.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileTimes {
    /// Last access time.
    pub atime: u32,
    /// Last modification time.
    pub mtime: u32,
}

/// A file-attributes block with conditionally present fields.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileAttributes {
    /// File size in bytes.
    pub size: Option<u64>,
    /// Owner uid and gid.
    pub owner: Option<Ownership>,
    /// POSIX permission bits (including the file type bits).
    pub permissions: Option<u32>,
    /// Access and modification times.
    pub times: Option<FileTimes>,
    /// Vendor extended attributes. `Some(vec![])` still sets the EXTENDED bit.
    pub extended: Option<Vec<ExtensionPair>>,
}

impl FileAttributes {
    /// An attributes block with no optional fields (flags word `0`).
    pub const EMPTY: Self = Self {
        size: None,
        owner: None,
        permissions: None,
        times: None,
        extended: None,
    };

    /// Returns the flags word implied by the populated fields.
    #[must_use]
    pub fn flags(&self) -> AttrFlags {
        let mut flags = AttrFlags::EMPTY;
        if self.size.is_some() {
            flags |= AttrFlags::SIZE;
        }
        if self.owner.is_some() {
            flags |= AttrFlags::UIDGID;
        }
        if self.permissions.is_some() {
            flags |= AttrFlags::PERMISSIONS;
        }
        if self.times.is_some() {
            flags |= AttrFlags::ACMODTIME;
        }
        if self.extended.is_some() {
            flags |= AttrFlags::EXTENDED;
        }
        flags
    }

    /// Returns `true` when no optional field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags().is_empty()
    }

    /// Sets the size.
    #[must_use]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the numeric owner.
    #[must_use]
    pub fn with_owner(mut self, uid: u32, gid: u32) -> Self {
        self.owner = Some(Ownership { uid, gid });
        self
    }

    /// Sets the permission bits.
    #[must_use]
    pub fn with_permissions(mut self, permissions: u32) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Sets access and modification times.
    #[must_use]
    pub fn with_times(mut self, atime: u32, mtime: u32) -> Self {
        self.times = Some(FileTimes { atime, mtime });
        self
    }

    /// Sets the extended attribute list.
    #[must_use]
    pub fn with_extended(mut self, pairs: Vec<ExtensionPair>) -> Self {
        self.extended = Some(pairs);
        self
    }

    /// Decodes an attributes block from the front of `input`.
    ///
    /// Returns the attributes together with the unread remainder. Any missing
    /// sub-field fails the whole block; partial attributes are never returned.
    pub fn decode_from_slice(input: &[u8]) -> Result<(Self, &[u8]), ProtocolError> {
        let mut reader = WireReader::new(input);
        let attrs = Self::decode(&mut reader)?;
        Ok((attrs, reader.remaining()))
    }

    pub(crate) fn decode(reader: &mut WireReader<'_>) -> Result<Self, ProtocolError> {
        let flags = AttrFlags::from_bits(reader.read_u32()?);
        let unknown = flags.unknown_bits();
        if unknown != 0 {
            return Err(ProtocolError::UnsupportedAttributeFlags(unknown));
        }

        let size = if flags.contains(AttrFlags::SIZE) {
            Some(reader.read_u64()?)
        } else {
            None
        };

        let owner = if flags.contains(AttrFlags::UIDGID) {
            let uid = reader.read_u32()?;
            let gid = reader.read_u32()?;
            Some(Ownership { uid, gid })
        } else {
            None
        };

        let permissions = if flags.contains(AttrFlags::PERMISSIONS) {
            Some(reader.read_u32()?)
        } else {
            None
        };

        let times = if flags.contains(AttrFlags::ACMODTIME) {
            let atime = reader.read_u32()?;
            let mtime = reader.read_u32()?;
            Some(FileTimes { atime, mtime })
        } else {
            None
        };

        let extended = if flags.contains(AttrFlags::EXTENDED) {
            let count = reader.read_u32()?;
            Some(decode_counted(reader, count)?)
        } else {
            None
        };

        Ok(Self {
            size,
            owner,
            permissions,
            times,
            extended,
        })
    }
}

impl WireEncode for FileAttributes {
    fn encode_to<S: WireSink + ?Sized>(&self, sink: &mut S) {
        sink.put_u32(self.flags().bits());
        if let Some(size) = self.size {
            sink.put_u64(size);
        }
        if let Some(owner) = self.owner {
            sink.put_u32(owner.uid);
            sink.put_u32(owner.gid);
        }
        if let Some(permissions) = self.permissions {
            sink.put_u32(permissions);
        }
        if let Some(times) = self.times {
            sink.put_u32(times.atime);
            sink.put_u32(times.mtime);
        }
        if let Some(extended) = &self.extended {
            sink.put_u32(extended.len() as u32);
            extended.encode_to(sink);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(attrs: &FileAttributes) -> Vec<u8> {
        let mut out = Vec::new();
        attrs.encode_into_vec(&mut out);
        out
    }

    #[test]
    fn empty_attributes_are_just_the_flags_word() {
        let bytes = encode(&FileAttributes::EMPTY);
        assert_eq!(bytes, [0, 0, 0, 0]);
        assert_eq!(FileAttributes::EMPTY.wire_len(), 4);
    }

    #[test]
    fn all_groups_are_written_in_fixed_order() {
        let attrs = FileAttributes::default()
            .with_size(0x0102)
            .with_owner(10, 20)
            .with_permissions(0o100_644)
            .with_times(30, 40);
        let bytes = encode(&attrs);

        let mut expected = vec![0, 0, 0, 0x0F];
        expected.extend_from_slice(&0x0102u64.to_be_bytes());
        expected.extend_from_slice(&10u32.to_be_bytes());
        expected.extend_from_slice(&20u32.to_be_bytes());
        expected.extend_from_slice(&0o100_644u32.to_be_bytes());
        expected.extend_from_slice(&30u32.to_be_bytes());
        expected.extend_from_slice(&40u32.to_be_bytes());
        assert_eq!(bytes, expected);
        assert_eq!(bytes.len(), 4 + 8 + 8 + 4 + 8);
    }

    #[test]
    fn permissions_only_costs_four_bytes() {
        let attrs = FileAttributes::default().with_permissions(0o755);
        assert_eq!(attrs.wire_len(), 8);
        assert_eq!(encode(&attrs).len(), 8);
    }

    #[test]
    fn decode_skips_absent_groups() {
        let attrs = FileAttributes::default().with_times(1, 2);
        let mut bytes = encode(&attrs);
        bytes.push(0xAB);

        let (decoded, rest) = FileAttributes::decode_from_slice(&bytes).unwrap();
        assert_eq!(decoded, attrs);
        assert_eq!(rest, &[0xAB]);
    }

    #[test]
    fn extended_group_round_trips_even_when_empty() {
        let attrs = FileAttributes::default().with_extended(Vec::new());
        let bytes = encode(&attrs);
        assert_eq!(bytes, [0x80, 0, 0, 0, 0, 0, 0, 0]);

        let (decoded, _) = FileAttributes::decode_from_slice(&bytes).unwrap();
        assert_eq!(decoded, attrs);
        assert!(decoded.flags().contains(AttrFlags::EXTENDED));
    }

    #[test]
    fn truncated_paired_group_fails_entirely() {
        let attrs = FileAttributes::default().with_owner(1, 2);
        let bytes = encode(&attrs);
        let err = FileAttributes::decode_from_slice(&bytes[..bytes.len() - 1]).unwrap_err();
        assert_eq!(err, ProtocolError::short(4, 3));
    }

    #[test]
    fn undefined_flag_bits_are_rejected() {
        let bytes = [0, 0, 0, 0x10];
        assert_eq!(
            FileAttributes::decode_from_slice(&bytes).unwrap_err(),
            ProtocolError::UnsupportedAttributeFlags(0x10)
        );
    }
}
