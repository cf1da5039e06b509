#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Overview
//!
//! `logging` gives every SFTP crate in the workspace the same tracing
//! targets and one way to install a subscriber.
//!
//! # Design
//!
//! - [`Subsystem`] names the four targets: `sftp::packet`, `sftp::handle`,
//!   `sftp::conn` and `sftp::path`.
//! - The `trace_*!` macros emit `debug` events under those targets, so a
//!   filter like `warn,sftp::handle=debug` isolates one subsystem.
//! - [`LogConfig`] renders a default directive plus per-subsystem overrides
//!   into an `EnvFilter` directive string.
//! - With the `tracing` feature, `init_tracing` installs a stderr formatter
//!   as the global subscriber. `RUST_LOG` takes precedence when set.
//!
//! # Examples
//!
//! ```
//! use logging::{LogConfig, LogLevel, Subsystem};
//!
//! let config = LogConfig::new()
//!     .with_subsystem(Subsystem::Handle, LogLevel::Debug)
//!     .with_ansi(false);
//! assert_eq!(config.directives(), "warn,sftp::handle=debug");
//! assert_eq!(Subsystem::from_target("sftp::handle"), Some(Subsystem::Handle));
//! ```

mod config;
mod subsystem;
#[cfg(feature = "tracing")]
#[cfg_attr(docsrs, doc(cfg(feature = "tracing")))]
mod subscriber;
mod tracing_macros;

pub use config::{LogConfig, LogLevel, UnknownLevel};
#[cfg(feature = "tracing")]
pub use subscriber::{InitError, build_filter, init_tracing};
pub use subsystem::{Subsystem, UnknownSubsystem};
