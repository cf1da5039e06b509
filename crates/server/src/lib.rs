#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Server-side core for SFTP version 3.
//!
//! This crate holds the state one connection needs between decoding a
//! request and encoding its reply:
//!
//! - [`Connection`]: the peer stream split into an unsynchronized frame reader
//!   and a cloneable [`ConnectionWriter`] that writes each frame under one
//!   lock, so replies from concurrent workers never interleave.
//! - [`HandleRegistry`]: opaque handle strings mapped to open resources
//!   behind a reader/writer lock, with a monotonic handle counter.
//! - [`PathConfinement`]: lexical resolution of client paths under an
//!   optional root directory.
//! - [`Server`]: the value tying these together with a [`ServerConfig`].
//!
//! Request dispatch and worker scheduling live outside this crate. Errors
//! are reported as [`ServerError`], which maps onto a STATUS code for the
//! reply.
//!
//! # Examples
//!
//! ```
//! use protocol::{FileAttributes, OpenFlags, StatusCode};
//! use server::{Server, ServerConfig};
//!
//! let dir = std::env::temp_dir();
//! let config = ServerConfig::builder().root_directory(&dir).build();
//! let (server, _reader) = Server::attach(config, std::io::empty(), Vec::new());
//!
//! let err = server
//!     .open(b"/no/such/file", OpenFlags::READ, &FileAttributes::EMPTY)
//!     .unwrap_err();
//! assert_eq!(Server::<Vec<u8>>::status(7, &err).code, StatusCode::NO_SUCH_FILE);
//!
//! assert!(server.close(b"0").unwrap_err().is_unknown_handle());
//! ```

mod config;
mod connection;
mod error;
mod paths;
mod registry;
mod resource;
mod server;


pub use config::{DEFAULT_MAX_PACKET_LEN, DEFAULT_WORKER_COUNT, ServerConfig, ServerConfigBuilder};
pub use connection::{Connection, ConnectionReader, ConnectionWriter};
pub use error::ServerError;
pub use paths::PathConfinement;
pub use registry::HandleRegistry;
pub use resource::{OpenDirectory, OpenFile, OpenResource, attrs_from_metadata};
pub use server::Server;
