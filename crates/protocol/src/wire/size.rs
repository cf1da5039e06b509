use super::WireSink;

/// Encoded size of a single byte.
pub const U8_COST: usize = 1;
/// Encoded size of a `uint32`.
pub const U32_COST: usize = 4;
/// Encoded size of a `uint64`.
pub const U64_COST: usize = 8;

/// Returns the encoded size of a length-prefixed string of `len` bytes.
#[must_use]
#[inline]
pub const fn string_cost(len: usize) -> usize {
    U32_COST + len
}

/// A [`WireSink`] that only counts the bytes it would have written.
///
/// Running a value's field walk against a counter yields its exact encoded
/// length without touching memory, which is how frame headers are sized
/// before the body is serialised.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SizeCounter {
    total: usize,
}

impl SizeCounter {
    /// Creates a counter starting at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { total: 0 }
    }

    /// Returns the number of bytes counted so far.
    #[must_use]
    pub const fn total(self) -> usize {
        self.total
    }
}

impl WireSink for SizeCounter {
    #[inline]
    fn put_raw(&mut self, bytes: &[u8]) {
        self.total += bytes.len();
    }

    #[inline]
    fn put_u8(&mut self, _value: u8) {
        self.total += U8_COST;
    }

    #[inline]
    fn put_u32(&mut self, _value: u32) {
        self.total += U32_COST;
    }

    #[inline]
    fn put_u64(&mut self, _value: u64) {
        self.total += U64_COST;
    }

    #[inline]
    fn put_string(&mut self, bytes: &[u8]) {
        self.total += string_cost(bytes.len());
    }
}

/// A value with a fixed field layout on the wire.
///
/// Implementors describe their layout once, in [`encode_to`](Self::encode_to).
/// Both [`wire_len`](Self::wire_len) and the real serialisation are derived
/// from that one walk, so the precomputed length header and the body bytes
/// cannot disagree.
pub trait WireEncode {
    /// Writes every field of `self`, in wire order, into `sink`.
    fn encode_to<S: WireSink + ?Sized>(&self, sink: &mut S);

    /// Returns the exact number of bytes [`encode_to`](Self::encode_to) emits.
    fn wire_len(&self) -> usize {
        let mut counter = SizeCounter::new();
        self.encode_to(&mut counter);
        counter.total()
    }

    /// Appends the encoding of `self` to `out`.
    fn encode_into_vec(&self, out: &mut Vec<u8>) {
        out.reserve(self.wire_len());
        self.encode_to(out);
    }
}

impl<T: WireEncode> WireEncode for [T] {
    fn encode_to<S: WireSink + ?Sized>(&self, sink: &mut S) {
        for item in self {
            item.encode_to(sink);
        }
    }
}

impl<T: WireEncode> WireEncode for Vec<T> {
    fn encode_to<S: WireSink + ?Sized>(&self, sink: &mut S) {
        self.as_slice().encode_to(sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_matches_vec_for_mixed_primitives() {
        let mut bytes = Vec::new();
        let mut counter = SizeCounter::new();

        let sinks: [&mut dyn WireSink; 2] = [&mut bytes, &mut counter];
        for sink in sinks {
            sink.put_u8(7);
            sink.put_u32(1);
            sink.put_u64(2);
            sink.put_string(b"hello");
            sink.put_string(b"");
        }

        assert_eq!(counter.total(), bytes.len());
        assert_eq!(counter.total(), 1 + 4 + 8 + (4 + 5) + 4);
    }

    #[test]
    fn string_cost_includes_prefix() {
        assert_eq!(string_cost(0), 4);
        assert_eq!(string_cost(70_000), 70_004);
    }
}
