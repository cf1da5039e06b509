//! crates/logging/src/config.rs
//! Logging configuration: a default filter directive plus per-subsystem
//! level overrides.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::subsystem::Subsystem;

/// Severity threshold for one filter directive.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LogLevel {
    /// Disable output.
    Off,
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Informational messages and above.
    Info,
    /// Debug messages and above.
    Debug,
    /// Everything.
    Trace,
}

impl LogLevel {
    /// Directive spelling of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a level name is not recognised.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown log level {0:?}")]
pub struct UnknownLevel(pub String);

impl FromStr for LogLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(UnknownLevel(s.to_owned())),
        }
    }
}

/// Subscriber settings used by [`init_tracing`](crate::init_tracing).
///
/// The filter is built from `RUST_LOG` when it is set; otherwise from
/// [`directives`](Self::directives).
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    default_directive: String,
    ansi: bool,
    subsystems: BTreeMap<Subsystem, LogLevel>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_directive: LogLevel::Warn.as_str().to_owned(),
            ansi: true,
            subsystems: BTreeMap::new(),
        }
    }
}

impl LogConfig {
    /// Creates the default configuration: warnings and above, ANSI colours on.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a `-v` count onto a configuration.
    ///
    /// | count | effect |
    /// |-------|--------|
    /// | 0     | `warn` |
    /// | 1     | `info` |
    /// | 2     | `info`, every SFTP subsystem at `debug` |
    /// | 3+    | `debug`, every SFTP subsystem at `trace` |
    #[must_use]
    pub fn from_verbosity(count: u8) -> Self {
        let (default, subsystems) = match count {
            0 => (LogLevel::Warn, None),
            1 => (LogLevel::Info, None),
            2 => (LogLevel::Info, Some(LogLevel::Debug)),
            _ => (LogLevel::Debug, Some(LogLevel::Trace)),
        };
        let mut config = Self::new().with_default_directive(default.as_str());
        if let Some(level) = subsystems {
            for subsystem in Subsystem::ALL {
                config = config.with_subsystem(subsystem, level);
            }
        }
        config
    }

    /// Replaces the directive applied to every target without an override.
    #[must_use]
    pub fn with_default_directive(mut self, directive: impl Into<String>) -> Self {
        self.default_directive = directive.into();
        self
    }

    /// Enables or disables ANSI colour codes in the output.
    #[must_use]
    pub const fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Overrides the level of one subsystem.
    #[must_use]
    pub fn with_subsystem(mut self, subsystem: Subsystem, level: LogLevel) -> Self {
        self.subsystems.insert(subsystem, level);
        self
    }

    /// Directive applied to targets without an override.
    #[must_use]
    pub fn default_directive(&self) -> &str {
        &self.default_directive
    }

    /// Whether ANSI colour codes are emitted.
    #[must_use]
    pub const fn ansi(&self) -> bool {
        self.ansi
    }

    /// Level override for `subsystem`, if any.
    #[must_use]
    pub fn subsystem_level(&self, subsystem: Subsystem) -> Option<LogLevel> {
        self.subsystems.get(&subsystem).copied()
    }

    /// Renders the full filter directive string, e.g.
    /// `warn,sftp::handle=debug`.
    #[must_use]
    pub fn directives(&self) -> String {
        let mut out = self.default_directive.clone();
        for (subsystem, level) in &self.subsystems {
            if !out.is_empty() {
                out.push(',');
            }
            out.push_str(subsystem.target());
            out.push('=');
            out.push_str(level.as_str());
        }
        out
    }
}
