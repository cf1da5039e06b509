//! Duplex connection with a serialized write side.
//!
//! A [`Connection`] owns the read half and the write-and-close half of a peer
//! stream. Reads are unsynchronized: one dispatcher pulls frames in order.
//! Writes go through [`ConnectionWriter`], which any number of workers may
//! clone. Each reply is encoded into a complete frame before the writer lock
//! is taken, and the lock is held until the whole frame has been written, so
//! concurrent replies never interleave on the wire.

use std::fmt;
use std::io::{Read, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use protocol::{DEFAULT_MAX_FRAME_LEN, Packet, RawFrame};

use crate::error::ServerError;

/// A peer stream split into an inbound frame reader and a shared writer.
#[derive(Debug)]
pub struct Connection<R, W> {
    reader: ConnectionReader<R>,
    writer: ConnectionWriter<W>,
}

impl<R: Read, W: Write> Connection<R, W> {
    /// Wraps the two halves of a peer stream.
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_max_frame_len(reader, writer, DEFAULT_MAX_FRAME_LEN)
    }

    /// Wraps the two halves, rejecting inbound frames longer than
    /// `max_frame_len`.
    pub fn with_max_frame_len(reader: R, writer: W, max_frame_len: u32) -> Self {
        Self {
            reader: ConnectionReader {
                inner: reader,
                max_frame_len,
            },
            writer: ConnectionWriter::new(writer),
        }
    }

    /// Reads the next inbound frame. See [`ConnectionReader::recv_frame`].
    pub fn recv_frame(&mut self) -> Result<Option<RawFrame>, ServerError> {
        self.reader.recv_frame()
    }

    /// Writes one packet. See [`ConnectionWriter::send`].
    pub fn send(&self, packet: &Packet) -> Result<(), ServerError> {
        self.writer.send(packet)
    }

    /// Returns a handle to the shared write side.
    #[must_use]
    pub fn writer(&self) -> ConnectionWriter<W> {
        self.writer.clone()
    }

    /// Flushes and closes the write side.
    pub fn close(&self) -> Result<(), ServerError> {
        self.writer.close()
    }

    /// Separates the reader from the writer so each can move to its own task.
    pub fn split(self) -> (ConnectionReader<R>, ConnectionWriter<W>) {
        (self.reader, self.writer)
    }
}

/// Inbound half of a [`Connection`].
#[derive(Debug)]
pub struct ConnectionReader<R> {
    inner: R,
    max_frame_len: u32,
}

impl<R: Read> ConnectionReader<R> {
    /// Reads the next complete frame.
    ///
    /// Returns `Ok(None)` when the peer closed the stream between frames.
    /// The frame's body is not decoded, so a malformed body still leaves the
    /// stream positioned at the next frame.
    pub fn recv_frame(&mut self) -> Result<Option<RawFrame>, ServerError> {
        let frame = protocol::read_frame(&mut self.inner, self.max_frame_len)
            .map_err(ServerError::transport)?;
        if let Some(frame) = &frame {
            logging::trace_conn!(
                packet_type = frame.packet_type_byte(),
                len = frame.frame_len(),
                "frame received"
            );
        }
        Ok(frame)
    }

    /// Largest inbound frame length accepted.
    #[must_use]
    pub const fn max_frame_len(&self) -> u32 {
        self.max_frame_len
    }
}

/// Shared, cloneable outbound half of a [`Connection`].
pub struct ConnectionWriter<W> {
    inner: Arc<Mutex<Option<W>>>,
}

impl<W> Clone for ConnectionWriter<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W> fmt::Debug for ConnectionWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionWriter")
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl<W> ConnectionWriter<W> {
    /// Reports whether [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().is_none()
    }

    fn lock(&self) -> MutexGuard<'_, Option<W>> {
        self.inner
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl<W: Write> ConnectionWriter<W> {
    /// Wraps a writer for shared use.
    pub fn new(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(writer))),
        }
    }

    /// Writes `packet` as one uninterrupted frame and flushes it.
    ///
    /// Fails with [`ServerError::ConnectionClosed`] once the writer has been
    /// closed.
    pub fn send(&self, packet: &Packet) -> Result<(), ServerError> {
        let frame = packet.to_frame_bytes()?;
        self.send_frame_bytes(&frame)?;
        logging::trace_conn!(
            packet_type = %packet.packet_type(),
            request_id = ?packet.request_id(),
            len = frame.len(),
            "frame sent"
        );
        Ok(())
    }

    fn send_frame_bytes(&self, frame: &[u8]) -> Result<(), ServerError> {
        let mut guard = self.lock();
        let writer = guard.as_mut().ok_or(ServerError::ConnectionClosed)?;
        writer.write_all(frame).map_err(ServerError::transport)?;
        writer.flush().map_err(ServerError::transport)
    }

    /// Flushes and drops the underlying writer.
    ///
    /// Closing twice is not an error; later sends fail with
    /// [`ServerError::ConnectionClosed`].
    pub fn close(&self) -> Result<(), ServerError> {
        let Some(mut writer) = self.lock().take() else {
            return Ok(());
        };
        writer.flush().map_err(ServerError::transport)?;
        drop(writer);
        logging::trace_conn!("connection closed");
        Ok(())
    }
}
