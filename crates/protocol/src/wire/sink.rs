//! Output side of the primitive codec.
//!
//! All SFTP integers are big-endian and fixed width; strings are a 4-byte
//! length followed by raw bytes. [`WireSink`] is implemented both for
//! `Vec<u8>` (real serialisation) and for [`SizeCounter`](super::SizeCounter)
//! (byte counting), so a single field walk drives both the length header and
//! the body.

/// Destination for big-endian SFTP primitives.
pub trait WireSink {
    /// Appends raw bytes without a length prefix.
    fn put_raw(&mut self, bytes: &[u8]);

    /// Appends a single byte.
    #[inline]
    fn put_u8(&mut self, value: u8) {
        self.put_raw(&[value]);
    }

    /// Appends a big-endian `uint32`.
    #[inline]
    fn put_u32(&mut self, value: u32) {
        self.put_raw(&value.to_be_bytes());
    }

    /// Appends a big-endian `uint64`.
    #[inline]
    fn put_u64(&mut self, value: u64) {
        self.put_raw(&value.to_be_bytes());
    }

    /// Appends a length-prefixed string.
    ///
    /// Lengths are truncated to 32 bits; frame encoding rejects bodies that
    /// large before any string could be.
    #[inline]
    fn put_string(&mut self, bytes: &[u8]) {
        self.put_u32(bytes.len() as u32);
        self.put_raw(bytes);
    }
}

impl WireSink for Vec<u8> {
    #[inline]
    fn put_raw(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    #[inline]
    fn put_u8(&mut self, value: u8) {
        self.push(value);
    }
}

/// Appends a big-endian `uint32` to `out` and returns the extended buffer.
pub fn marshal_u32(mut out: Vec<u8>, value: u32) -> Vec<u8> {
    out.put_u32(value);
    out
}

/// Appends a big-endian `uint64` to `out` and returns the extended buffer.
pub fn marshal_u64(mut out: Vec<u8>, value: u64) -> Vec<u8> {
    out.put_u64(value);
    out
}

/// Appends one byte to `out` and returns the extended buffer.
pub fn marshal_u8(mut out: Vec<u8>, value: u8) -> Vec<u8> {
    out.put_u8(value);
    out
}

/// Appends a length-prefixed string to `out` and returns the extended buffer.
pub fn marshal_string(mut out: Vec<u8>, value: &[u8]) -> Vec<u8> {
    out.put_string(value);
    out
}
