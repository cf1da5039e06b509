//! The per-connection server value.
//!
//! [`Server`] ties together the configuration, path confinement, the handle
//! registry and the shared connection writer. It holds no global state, so
//! several independent servers can run in one process.

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use protocol::{FileAttributes, OpenFlags, Packet, StatusPacket};

use crate::config::ServerConfig;
use crate::connection::{Connection, ConnectionReader, ConnectionWriter};
use crate::error::ServerError;
use crate::paths::PathConfinement;
use crate::registry::HandleRegistry;
use crate::resource::{OpenDirectory, OpenFile, OpenResource};

/// Serves one SFTP connection.
///
/// The dispatcher reads frames from the [`ConnectionReader`] returned by
/// [`Server::attach`], decodes them, and calls into the server from any
/// number of worker threads.
///
/// # Example
///
/// ```ignore
/// use server::{Server, ServerConfig};
///
/// let config = ServerConfig::builder().root_directory("/srv/sftp").build();
/// let (server, mut reader) = Server::attach(config, stdin, stdout);
///
/// while let Some(frame) = reader.recv_frame()? {
///     let Some(id) = frame.request_id_hint() else { continue };
///     match frame.decode() {
///         Ok(Packet::Close(req)) => match server.close(&req.handle) {
///             Ok(()) => server.send(&Packet::Status(StatusPacket::ok(id)))?,
///             Err(err) => server.reply_error(id, &err)?,
///         },
///         Ok(_) => { /* other requests */ }
///         Err(err) => server.reply_error(id, &err.into())?,
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Server<W> {
    config: ServerConfig,
    paths: PathConfinement,
    handles: HandleRegistry<OpenResource>,
    writer: ConnectionWriter<W>,
}

impl<W: Write> Server<W> {
    /// Creates a server that replies through `writer`.
    pub fn new(config: ServerConfig, writer: ConnectionWriter<W>) -> Self {
        let paths = config
            .root_directory()
            .map_or_else(PathConfinement::unconfined, PathConfinement::new);
        Self {
            config,
            paths,
            handles: HandleRegistry::new(),
            writer,
        }
    }

    /// Wraps a peer stream and returns the server with the reader the
    /// dispatcher should poll.
    pub fn attach<R: Read>(
        config: ServerConfig,
        reader: R,
        writer: W,
    ) -> (Self, ConnectionReader<R>) {
        let (reader, writer) =
            Connection::with_max_frame_len(reader, writer, config.max_frame_len()).split();
        (Self::new(config, writer), reader)
    }

    /// Configuration the server was built with.
    #[must_use]
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Open handles of this connection.
    #[must_use]
    pub const fn handles(&self) -> &HandleRegistry<OpenResource> {
        &self.handles
    }

    /// Shared writer for sending replies from other threads.
    #[must_use]
    pub fn writer(&self) -> ConnectionWriter<W> {
        self.writer.clone()
    }

    /// Maps a client path onto the local filesystem, applying confinement.
    pub fn resolve_path(&self, path: &[u8]) -> Result<PathBuf, ServerError> {
        self.paths.resolve(path)
    }

    /// Canonical client-visible form of `path`, as returned by REALPATH.
    ///
    /// The result is lexical; the path does not need to exist. Without a
    /// root directory, relative paths are anchored at the process working
    /// directory.
    pub fn real_path(&self, path: &[u8]) -> Result<Vec<u8>, ServerError> {
        let cwd = if self.paths.root().is_some() {
            PathBuf::new()
        } else {
            std::env::current_dir()?
        };
        let local = self.paths.canonical(path, &cwd)?;
        Ok(self.paths.client_view(&local))
    }

    /// Opens a file and registers it under a new handle.
    ///
    /// `attrs.permissions` sets the mode of a newly created file on Unix.
    /// A read-only server refuses any flag that would modify the file.
    pub fn open(
        &self,
        path: &[u8],
        flags: OpenFlags,
        attrs: &FileAttributes,
    ) -> Result<String, ServerError> {
        if self.config.read_only() && flags.is_mutating() {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "server is read-only").into());
        }

        let local = self.paths.resolve(path)?;
        let file = open_options(flags, attrs).open(&local)?;
        let handle = self
            .handles
            .insert(OpenResource::File(OpenFile::new(local, file)));
        logging::trace_handle!(handle = %handle, flags = flags.bits(), "file opened");
        Ok(handle)
    }

    /// Opens a directory for listing and registers it under a new handle.
    pub fn open_dir(&self, path: &[u8]) -> Result<String, ServerError> {
        let local = self.paths.resolve(path)?;
        let entries = fs::read_dir(&local)?;
        let handle = self
            .handles
            .insert(OpenResource::Directory(OpenDirectory::new(local, entries)));
        Ok(handle)
    }

    /// Returns the resource behind `handle`.
    pub fn lookup(&self, handle: &[u8]) -> Result<Arc<OpenResource>, ServerError> {
        self.handles.lookup(handle)
    }

    /// Closes `handle`. Closing an unknown handle is an error.
    pub fn close(&self, handle: &[u8]) -> Result<(), ServerError> {
        self.handles.close(handle).map(drop)
    }

    /// Clamps a client READ length to the configured largest DATA payload.
    #[must_use]
    pub fn read_len(&self, requested: u32) -> u32 {
        requested.min(self.config.max_packet_len())
    }

    /// Writes one reply frame.
    pub fn send(&self, packet: &Packet) -> Result<(), ServerError> {
        self.writer.send(packet)
    }

    /// Builds the STATUS reply describing `error` for request `id`.
    #[must_use]
    pub fn status(id: u32, error: &ServerError) -> StatusPacket {
        StatusPacket::new(id, error.status_code(), error.to_string())
    }

    /// Sends the STATUS reply describing `error` for request `id`.
    pub fn reply_error(&self, id: u32, error: &ServerError) -> Result<(), ServerError> {
        let status = Self::status(id, error);
        logging::trace_packet!(
            id,
            code = %status.code,
            error = %error,
            "request failed"
        );
        self.send(&Packet::Status(status))
    }

    /// Closes every handle and the write side of the connection.
    ///
    /// Returns how many handles were still open.
    pub fn shutdown(&self) -> Result<usize, ServerError> {
        let open = self.handles.close_all();
        self.writer.close()?;
        Ok(open)
    }
}

fn open_options(flags: OpenFlags, attrs: &FileAttributes) -> OpenOptions {
    let mut options = OpenOptions::new();
    let read = flags.contains(OpenFlags::READ);
    let write = flags.contains(OpenFlags::WRITE);
    let append = flags.contains(OpenFlags::APPEND);

    options
        .read(read || !(write || append))
        .write(write)
        .append(append)
        .truncate(flags.contains(OpenFlags::TRUNC));
    if flags.contains(OpenFlags::CREAT) {
        if flags.contains(OpenFlags::EXCL) {
            options.create_new(true);
        } else {
            options.create(true);
        }
    }

    #[cfg(unix)]
    if let Some(mode) = attrs.permissions {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode & 0o7777);
    }
    #[cfg(not(unix))]
    let _ = attrs;

    options
}
