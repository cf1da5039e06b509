use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

macro_rules! bitfield_ops {
    ($name:ident) => {
        impl BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self::Output {
                self.union(rhs)
            }
        }

        impl BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                *self = self.union(rhs);
            }
        }

        impl BitAnd for $name {
            type Output = Self;

            fn bitand(self, rhs: Self) -> Self::Output {
                Self::from_bits(self.bits & rhs.bits)
            }
        }

        impl From<u32> for $name {
            fn from(bits: u32) -> Self {
                Self::from_bits(bits)
            }
        }

        impl From<$name> for u32 {
            fn from(flags: $name) -> Self {
                flags.bits()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let mut first = true;
                write!(f, "{}(", stringify!($name))?;
                for (bit, label) in Self::NAMES {
                    if self.bits & bit != 0 {
                        if !first {
                            f.write_str(" | ")?;
                        }
                        f.write_str(label)?;
                        first = false;
                    }
                }
                let unknown = self.unknown_bits();
                if unknown != 0 {
                    if !first {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{unknown:#x}")?;
                }
                f.write_str(")")
            }
        }
    };
}

/// Bitmask selecting which optional groups a file-attributes block carries.
///
/// The group order on the wire is fixed: SIZE, UIDGID, PERMISSIONS,
/// ACMODTIME, then EXTENDED.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttrFlags {
    bits: u32,
}

impl AttrFlags {
    /// No optional fields present.
    pub const EMPTY: Self = Self::from_bits(0);
    /// `SSH_FILEXFER_ATTR_SIZE`: a `uint64` size follows.
    pub const SIZE: Self = Self::from_bits(0x0000_0001);
    /// `SSH_FILEXFER_ATTR_UIDGID`: `uint32` uid then `uint32` gid follow.
    pub const UIDGID: Self = Self::from_bits(0x0000_0002);
    /// `SSH_FILEXFER_ATTR_PERMISSIONS`: a `uint32` permission mask follows.
    pub const PERMISSIONS: Self = Self::from_bits(0x0000_0004);
    /// `SSH_FILEXFER_ATTR_ACMODTIME`: `uint32` atime then `uint32` mtime follow.
    pub const ACMODTIME: Self = Self::from_bits(0x0000_0008);
    /// `SSH_FILEXFER_ATTR_EXTENDED`: a counted list of name/data pairs follows.
    pub const EXTENDED: Self = Self::from_bits(0x8000_0000);

    const KNOWN_MASK: u32 = Self::SIZE.bits
        | Self::UIDGID.bits
        | Self::PERMISSIONS.bits
        | Self::ACMODTIME.bits
        | Self::EXTENDED.bits;

    const NAMES: [(u32, &'static str); 5] = [
        (Self::SIZE.bits, "SIZE"),
        (Self::UIDGID.bits, "UIDGID"),
        (Self::PERMISSIONS.bits, "PERMISSIONS"),
        (Self::ACMODTIME.bits, "ACMODTIME"),
        (Self::EXTENDED.bits, "EXTENDED"),
    ];

    /// Returns a bitfield constructed from the raw `bits` without masking.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Returns the raw bit representation.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// Returns `true` when no bits are set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Checks whether all bits in `other` are set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Returns the union of both operands.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self::from_bits(self.bits | other.bits)
    }

    /// Reports bits outside the five defined groups.
    #[must_use]
    pub const fn unknown_bits(self) -> u32 {
        self.bits & !Self::KNOWN_MASK
    }
}

bitfield_ops!(AttrFlags);

/// The `pflags` word of an OPEN request.
///
/// Unknown bits are preserved so a request re-encodes exactly as received.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenFlags {
    bits: u32,
}

impl OpenFlags {
    /// `SSH_FXF_READ`: open for reading.
    pub const READ: Self = Self::from_bits(0x0000_0001);
    /// `SSH_FXF_WRITE`: open for writing.
    pub const WRITE: Self = Self::from_bits(0x0000_0002);
    /// `SSH_FXF_APPEND`: writes append to the end of the file.
    pub const APPEND: Self = Self::from_bits(0x0000_0004);
    /// `SSH_FXF_CREAT`: create the file if it does not exist.
    pub const CREAT: Self = Self::from_bits(0x0000_0008);
    /// `SSH_FXF_TRUNC`: truncate an existing file to zero length.
    pub const TRUNC: Self = Self::from_bits(0x0000_0010);
    /// `SSH_FXF_EXCL`: fail if the file already exists (requires CREAT).
    pub const EXCL: Self = Self::from_bits(0x0000_0020);

    const KNOWN_MASK: u32 = Self::READ.bits
        | Self::WRITE.bits
        | Self::APPEND.bits
        | Self::CREAT.bits
        | Self::TRUNC.bits
        | Self::EXCL.bits;

    const NAMES: [(u32, &'static str); 6] = [
        (Self::READ.bits, "READ"),
        (Self::WRITE.bits, "WRITE"),
        (Self::APPEND.bits, "APPEND"),
        (Self::CREAT.bits, "CREAT"),
        (Self::TRUNC.bits, "TRUNC"),
        (Self::EXCL.bits, "EXCL"),
    ];

    /// Returns a bitfield constructed from the raw `bits` without masking.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Returns the raw bit representation.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// Checks whether all bits in `other` are set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Returns the union of both operands.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self::from_bits(self.bits | other.bits)
    }

    /// Reports bits outside the six defined open flags.
    #[must_use]
    pub const fn unknown_bits(self) -> u32 {
        self.bits & !Self::KNOWN_MASK
    }

    /// Returns `true` when the flags request any kind of modification.
    #[must_use]
    pub const fn is_mutating(self) -> bool {
        self.bits & (Self::WRITE.bits | Self::APPEND.bits | Self::CREAT.bits | Self::TRUNC.bits)
            != 0
    }
}

bitfield_ops!(OpenFlags);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_and_contains() {
        let flags = OpenFlags::READ | OpenFlags::CREAT;
        assert_eq!(flags.bits(), 0x9);
        assert!(flags.contains(OpenFlags::READ));
        assert!(!flags.contains(OpenFlags::WRITE));
        assert!(flags.is_mutating());
        assert!(!OpenFlags::READ.is_mutating());
    }

    #[test]
    fn unknown_bits_are_reported_and_kept() {
        let flags = AttrFlags::from_bits(0x8000_0041);
        assert_eq!(flags.unknown_bits(), 0x40);
        assert_eq!(u32::from(flags), 0x8000_0041);
    }

    #[test]
    fn debug_lists_flag_names() {
        let flags = AttrFlags::SIZE | AttrFlags::ACMODTIME;
        assert_eq!(format!("{flags:?}"), "AttrFlags(SIZE | ACMODTIME)");
        assert_eq!(
            format!("{:?}", OpenFlags::from_bits(0x101)),
            "OpenFlags(READ | 0x100)"
        );
        assert_eq!(format!("{:?}", AttrFlags::EMPTY), "AttrFlags()");
    }
}
