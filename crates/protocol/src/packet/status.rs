use core::fmt;
use std::io;

/// Result code carried by a STATUS reply.
///
/// Codes outside the nine defined by SFTP v3 are kept as-is so a reply
/// re-encodes exactly as received.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusCode(u32);

impl StatusCode {
    /// `SSH_FX_OK`
    pub const OK: Self = Self(0);
    /// `SSH_FX_EOF`
    pub const EOF: Self = Self(1);
    /// `SSH_FX_NO_SUCH_FILE`
    pub const NO_SUCH_FILE: Self = Self(2);
    /// `SSH_FX_PERMISSION_DENIED`
    pub const PERMISSION_DENIED: Self = Self(3);
    /// `SSH_FX_FAILURE`
    pub const FAILURE: Self = Self(4);
    /// `SSH_FX_BAD_MESSAGE`
    pub const BAD_MESSAGE: Self = Self(5);
    /// `SSH_FX_NO_CONNECTION`
    pub const NO_CONNECTION: Self = Self(6);
    /// `SSH_FX_CONNECTION_LOST`
    pub const CONNECTION_LOST: Self = Self(7);
    /// `SSH_FX_OP_UNSUPPORTED`
    pub const OP_UNSUPPORTED: Self = Self(8);

    /// Wraps a raw status code.
    #[must_use]
    pub const fn from_u32(code: u32) -> Self {
        Self(code)
    }

    /// Returns the raw status code.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns the `SSH_FX_*` name for defined codes.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        Some(match self.0 {
            0 => "SSH_FX_OK",
            1 => "SSH_FX_EOF",
            2 => "SSH_FX_NO_SUCH_FILE",
            3 => "SSH_FX_PERMISSION_DENIED",
            4 => "SSH_FX_FAILURE",
            5 => "SSH_FX_BAD_MESSAGE",
            6 => "SSH_FX_NO_CONNECTION",
            7 => "SSH_FX_CONNECTION_LOST",
            8 => "SSH_FX_OP_UNSUPPORTED",
            _ => return None,
        })
    }

    /// A short English description suitable as a STATUS error message.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self.0 {
            0 => "Success",
            1 => "End of file",
            2 => "No such file",
            3 => "Permission denied",
            5 => "Bad message",
            6 => "No connection",
            7 => "Connection lost",
            8 => "Operation unsupported",
            _ => "Failure",
        }
    }
}

impl From<u32> for StatusCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl From<StatusCode> for u32 {
    fn from(code: StatusCode) -> Self {
        code.0
    }
}

impl From<io::ErrorKind> for StatusCode {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => Self::NO_SUCH_FILE,
            io::ErrorKind::PermissionDenied | io::ErrorKind::ReadOnlyFilesystem => {
                Self::PERMISSION_DENIED
            }
            io::ErrorKind::UnexpectedEof => Self::EOF,
            io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput => Self::BAD_MESSAGE,
            io::ErrorKind::Unsupported => Self::OP_UNSUPPORTED,
            io::ErrorKind::NotConnected => Self::NO_CONNECTION,
            io::ErrorKind::BrokenPipe
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset => Self::CONNECTION_LOST,
            _ => Self::FAILURE,
        }
    }
}

impl From<&io::Error> for StatusCode {
    fn from(err: &io::Error) -> Self {
        err.kind().into()
    }
}

impl fmt::Debug for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "StatusCode({})", self.0),
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({})", self.0),
            None => write!(f, "status {}", self.0),
        }
    }
}
