//! Input side of the primitive codec.
//!
//! The free functions consume a prefix of `input` and return the decoded value
//! together with the unread remainder. None of them index past the end of the
//! slice: a missing byte is always reported as [`ProtocolError::ShortPacket`].

use crate::error::ProtocolError;

use super::size::{U8_COST, U32_COST, U64_COST};

#[inline]
fn split_fixed<const N: usize>(input: &[u8]) -> Result<([u8; N], &[u8]), ProtocolError> {
    match input.split_first_chunk::<N>() {
        Some((head, rest)) => Ok((*head, rest)),
        None => Err(ProtocolError::short(N, input.len())),
    }
}

/// Decodes one byte from the front of `input`.
pub fn unmarshal_u8(input: &[u8]) -> Result<(u8, &[u8]), ProtocolError> {
    let ([value], rest) = split_fixed::<U8_COST>(input)?;
    Ok((value, rest))
}

/// Decodes a big-endian `uint32` from the front of `input`.
pub fn unmarshal_u32(input: &[u8]) -> Result<(u32, &[u8]), ProtocolError> {
    let (bytes, rest) = split_fixed::<U32_COST>(input)?;
    Ok((u32::from_be_bytes(bytes), rest))
}

/// Decodes a big-endian `uint64` from the front of `input`.
pub fn unmarshal_u64(input: &[u8]) -> Result<(u64, &[u8]), ProtocolError> {
    let (bytes, rest) = split_fixed::<U64_COST>(input)?;
    Ok((u64::from_be_bytes(bytes), rest))
}

/// Decodes a length-prefixed string from the front of `input`.
///
/// The returned slice borrows from `input`. A declared length larger than the
/// bytes that follow the prefix fails with a short-packet error.
pub fn unmarshal_string(input: &[u8]) -> Result<(&[u8], &[u8]), ProtocolError> {
    let (len, rest) = unmarshal_u32(input)?;
    let len = len as usize;
    if len > rest.len() {
        return Err(ProtocolError::short(len, rest.len()));
    }
    Ok(rest.split_at(len))
}

/// Cursor over a packet body.
///
/// Wraps the free `unmarshal_*` functions so packet decoders can read their
/// fields in order without threading the remainder by hand.
#[derive(Clone, Copy, Debug)]
pub struct WireReader<'a> {
    remaining: &'a [u8],
}

impl<'a> WireReader<'a> {
    /// Creates a cursor positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self { remaining: input }
    }

    /// Returns the unread bytes.
    #[must_use]
    pub const fn remaining(&self) -> &'a [u8] {
        self.remaining
    }

    /// Returns `true` when every byte has been consumed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Reads one byte.
    pub fn read_u8(&mut self) -> Result<u8, ProtocolError> {
        let (value, rest) = unmarshal_u8(self.remaining)?;
        self.remaining = rest;
        Ok(value)
    }

    /// Reads a big-endian `uint32`.
    pub fn read_u32(&mut self) -> Result<u32, ProtocolError> {
        let (value, rest) = unmarshal_u32(self.remaining)?;
        self.remaining = rest;
        Ok(value)
    }

    /// Reads a big-endian `uint64`.
    pub fn read_u64(&mut self) -> Result<u64, ProtocolError> {
        let (value, rest) = unmarshal_u64(self.remaining)?;
        self.remaining = rest;
        Ok(value)
    }

    /// Reads a length-prefixed string, borrowing from the input.
    pub fn read_str(&mut self) -> Result<&'a [u8], ProtocolError> {
        let (value, rest) = unmarshal_string(self.remaining)?;
        self.remaining = rest;
        Ok(value)
    }

    /// Reads a length-prefixed string into an owned buffer.
    pub fn read_string(&mut self) -> Result<Vec<u8>, ProtocolError> {
        self.read_str().map(<[u8]>::to_vec)
    }

    /// Consumes and returns every remaining byte.
    pub fn read_rest(&mut self) -> &'a [u8] {
        std::mem::take(&mut self.remaining)
    }
}
