//! Tracing targets used across the workspace.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A component that logs under its own tracing target.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Subsystem {
    /// Packet encoding and decoding (`sftp::packet`).
    Packet,
    /// Handle allocation and lookup (`sftp::handle`).
    Handle,
    /// Frame reads and writes on the connection (`sftp::conn`).
    Conn,
    /// Client path resolution (`sftp::path`).
    Path,
}

impl Subsystem {
    /// Every subsystem, in target order.
    pub const ALL: [Self; 4] = [Self::Packet, Self::Handle, Self::Conn, Self::Path];

    /// Tracing target the subsystem logs under.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Self::Packet => "sftp::packet",
            Self::Handle => "sftp::handle",
            Self::Conn => "sftp::conn",
            Self::Path => "sftp::path",
        }
    }

    /// Short lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Packet => "packet",
            Self::Handle => "handle",
            Self::Conn => "conn",
            Self::Path => "path",
        }
    }

    /// Maps a tracing target back to its subsystem.
    ///
    /// Nested targets such as `sftp::handle::gc` belong to their parent.
    #[must_use]
    pub fn from_target(target: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|subsystem| {
            target
                .strip_prefix(subsystem.target())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
        })
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a subsystem name is not recognised.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown logging subsystem {0:?}")]
pub struct UnknownSubsystem(pub String);

impl FromStr for Subsystem {
    type Err = UnknownSubsystem;

    /// Accepts either the short name (`handle`) or the full target
    /// (`sftp::handle`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|subsystem| lowered == subsystem.name() || lowered == subsystem.target())
            .ok_or_else(|| UnknownSubsystem(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_are_under_sftp() {
        for subsystem in Subsystem::ALL {
            assert!(subsystem.target().starts_with("sftp::"));
            assert!(subsystem.target().ends_with(subsystem.name()));
        }
    }

    #[test]
    fn from_target_matches_whole_segments() {
        assert_eq!(Subsystem::from_target("sftp::handle"), Some(Subsystem::Handle));
        assert_eq!(Subsystem::from_target("sftp::conn::write"), Some(Subsystem::Conn));
        assert_eq!(Subsystem::from_target("sftp::pathological"), None);
        assert_eq!(Subsystem::from_target("server::registry"), None);
    }

    #[test]
    fn parse_accepts_names_and_targets() {
        assert_eq!("packet".parse::<Subsystem>(), Ok(Subsystem::Packet));
        assert_eq!("SFTP::PATH".parse::<Subsystem>(), Ok(Subsystem::Path));
        assert_eq!(
            "disk".parse::<Subsystem>(),
            Err(UnknownSubsystem("disk".to_owned()))
        );
    }
}
