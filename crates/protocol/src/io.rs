//! Blocking frame I/O over [`std::io`] streams.

use std::io::{self, Read, Write};

use crate::error::ProtocolError;
use crate::frame::{LENGTH_FIELD_LEN, RawFrame, check_frame_len};
use crate::packet::Packet;

/// Reads the next frame from `reader`.
///
/// Returns `Ok(None)` when the stream ends cleanly on a frame boundary. A
/// stream that ends inside a frame fails with [`io::ErrorKind::UnexpectedEof`].
/// Declared lengths of zero or above `max_len` fail with
/// [`io::ErrorKind::InvalidData`] before any body byte is read or allocated.
pub fn read_frame<R: Read + ?Sized>(reader: &mut R, max_len: u32) -> io::Result<Option<RawFrame>> {
    let mut header = [0u8; LENGTH_FIELD_LEN];
    if !read_header(reader, &mut header)? {
        return Ok(None);
    }

    let length = u32::from_be_bytes(header);
    check_frame_len(length, max_len)?;

    let mut packet_type = [0u8; 1];
    reader.read_exact(&mut packet_type)?;

    let body_len = length as usize - 1;
    let mut body = Vec::new();
    body.try_reserve_exact(body_len)
        .map_err(|_| io::Error::from(ProtocolError::Allocation { requested: body_len }))?;
    body.resize(body_len, 0);
    reader.read_exact(&mut body)?;

    Ok(Some(RawFrame::new(packet_type[0], body)))
}

/// Fills `header`, distinguishing a clean end of stream from a torn one.
fn read_header<R: Read + ?Sized>(reader: &mut R, header: &mut [u8]) -> io::Result<bool> {
    let mut filled = 0;
    while filled < header.len() {
        match reader.read(&mut header[filled..]) {
            Ok(0) if filled == 0 => return Ok(false),
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "stream ended inside a frame length field",
                ));
            }
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    Ok(true)
}

/// Reads and decodes the next packet. See [`read_frame`].
pub fn read_packet<R: Read + ?Sized>(reader: &mut R, max_len: u32) -> io::Result<Option<Packet>> {
    match read_frame(reader, max_len)? {
        Some(frame) => Ok(Some(frame.decode()?)),
        None => Ok(None),
    }
}

/// Encodes `packet` and writes the whole frame with a single `write_all`.
pub fn write_packet<W: Write + ?Sized>(writer: &mut W, packet: &Packet) -> io::Result<()> {
    let frame = packet.to_frame_bytes()?;
    writer.write_all(&frame)
}
