//! Server configuration and its builder.
//!
//! [`ServerConfig`] is immutable once built. Callers assemble it through
//! [`ServerConfig::builder`], overriding only the values they care about; all
//! other fields keep the defaults listed on each builder method.

use std::path::{Path, PathBuf};

use protocol::DEFAULT_MAX_FRAME_LEN;

/// Default number of request workers the dispatcher should run.
pub const DEFAULT_WORKER_COUNT: usize = 8;

/// Default largest DATA payload the server sends in one reply.
pub const DEFAULT_MAX_PACKET_LEN: u32 = 1 << 15;

/// Configuration for a [`crate::Server`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ServerConfig {
    root_directory: Option<PathBuf>,
    worker_count: usize,
    max_packet_len: u32,
    max_frame_len: u32,
    read_only: bool,
}

impl ServerConfig {
    /// Creates a new [`ServerConfigBuilder`].
    #[must_use]
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Directory every client path is confined to, if any.
    #[must_use]
    pub fn root_directory(&self) -> Option<&Path> {
        self.root_directory.as_deref()
    }

    /// Number of request workers the dispatcher should run.
    #[must_use]
    pub const fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Largest DATA payload sent in a single reply.
    #[must_use]
    pub const fn max_packet_len(&self) -> u32 {
        self.max_packet_len
    }

    /// Largest inbound frame length accepted before the frame is rejected.
    #[must_use]
    pub const fn max_frame_len(&self) -> u32 {
        self.max_frame_len
    }

    /// Reports whether requests that would modify the filesystem are refused.
    #[must_use]
    pub const fn read_only(&self) -> bool {
        self.read_only
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder used to assemble a [`ServerConfig`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfigBuilder {
    root_directory: Option<PathBuf>,
    worker_count: usize,
    max_packet_len: u32,
    max_frame_len: u32,
    read_only: bool,
}

impl Default for ServerConfigBuilder {
    fn default() -> Self {
        Self {
            root_directory: None,
            worker_count: DEFAULT_WORKER_COUNT,
            max_packet_len: DEFAULT_MAX_PACKET_LEN,
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
            read_only: false,
        }
    }
}

impl ServerConfigBuilder {
    /// Confines every client path to `root`. Unset by default.
    #[must_use]
    pub fn root_directory(mut self, root: impl Into<PathBuf>) -> Self {
        self.root_directory = Some(root.into());
        self
    }

    /// Sets the dispatcher worker count. Defaults to
    /// [`DEFAULT_WORKER_COUNT`]; zero is raised to one.
    #[must_use]
    pub const fn worker_count(mut self, count: usize) -> Self {
        self.worker_count = count;
        self
    }

    /// Sets the largest DATA payload per reply. Defaults to
    /// [`DEFAULT_MAX_PACKET_LEN`].
    #[must_use]
    pub const fn max_packet_len(mut self, len: u32) -> Self {
        self.max_packet_len = len;
        self
    }

    /// Sets the inbound frame cap. Defaults to [`DEFAULT_MAX_FRAME_LEN`].
    #[must_use]
    pub const fn max_frame_len(mut self, len: u32) -> Self {
        self.max_frame_len = len;
        self
    }

    /// Refuses OPEN requests that would write, create or truncate.
    #[must_use]
    pub const fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Finalises the builder and returns the constructed configuration.
    #[must_use]
    pub fn build(self) -> ServerConfig {
        ServerConfig {
            root_directory: self.root_directory,
            worker_count: self.worker_count.max(1),
            max_packet_len: self.max_packet_len,
            max_frame_len: self.max_frame_len,
            read_only: self.read_only,
        }
    }
}
