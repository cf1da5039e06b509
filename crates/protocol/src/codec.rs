//! Async framing for SFTP packets using tokio-util.
//!
//! [`SftpCodec`] implements [`Decoder`] and [`Encoder`] so a packet stream
//! can be driven through `tokio_util::codec::Framed` over any async byte
//! stream. Decoding yields [`RawFrame`]s; call [`RawFrame::decode`] to get a
//! [`Packet`] while keeping the option to answer an undecodable request.

use bytes::{Buf, BufMut, BytesMut};
use std::io;
use tokio_util::codec::{Decoder, Encoder};

use crate::frame::{
    DEFAULT_MAX_FRAME_LEN, FRAME_HEADER_LEN, LENGTH_FIELD_LEN, RawFrame, check_frame_len,
};
use crate::packet::Packet;

/// Async codec for length-prefixed SFTP frames.
///
/// # Example
///
/// ```ignore
/// use futures::{SinkExt, StreamExt};
/// use tokio_util::codec::Framed;
/// use protocol::{Packet, SftpCodec, StatusPacket};
///
/// async fn serve(stream: impl AsyncRead + AsyncWrite + Unpin) -> std::io::Result<()> {
///     let mut framed = Framed::new(stream, SftpCodec::new());
///     while let Some(frame) = framed.next().await {
///         let frame = frame?;
///         if let Some(id) = frame.request_id_hint() {
///             framed.send(Packet::Status(StatusPacket::ok(id))).await?;
///         }
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct SftpCodec {
    max_frame_len: u32,
}

impl SftpCodec {
    /// Creates a codec accepting frames up to [`DEFAULT_MAX_FRAME_LEN`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_frame_len(DEFAULT_MAX_FRAME_LEN)
    }

    /// Creates a codec with a custom inbound length limit.
    #[must_use]
    pub fn with_max_frame_len(max_frame_len: u32) -> Self {
        Self { max_frame_len }
    }

    /// Returns the largest declared frame length this codec accepts.
    #[must_use]
    pub const fn max_frame_len(&self) -> u32 {
        self.max_frame_len
    }
}

impl Default for SftpCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for SftpCodec {
    type Item = RawFrame;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < LENGTH_FIELD_LEN {
            return Ok(None);
        }

        let mut length = [0u8; LENGTH_FIELD_LEN];
        length.copy_from_slice(&src[..LENGTH_FIELD_LEN]);
        let length = u32::from_be_bytes(length);
        check_frame_len(length, self.max_frame_len)?;

        let total_len = LENGTH_FIELD_LEN + length as usize;
        if src.len() < total_len {
            src.reserve(total_len - src.len());
            return Ok(None);
        }

        src.advance(LENGTH_FIELD_LEN);
        let packet_type = src.get_u8();
        let body = src.split_to(total_len - FRAME_HEADER_LEN).to_vec();
        Ok(Some(RawFrame::new(packet_type, body)))
    }
}

impl Encoder<&Packet> for SftpCodec {
    type Error = io::Error;

    fn encode(&mut self, item: &Packet, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let frame = item.to_frame_bytes()?;
        dst.reserve(frame.len());
        dst.put_slice(&frame);
        Ok(())
    }
}

impl Encoder<Packet> for SftpCodec {
    type Error = io::Error;

    fn encode(&mut self, item: Packet, dst: &mut BytesMut) -> Result<(), Self::Error> {
        <Self as Encoder<&Packet>>::encode(self, &item, dst)
    }
}
