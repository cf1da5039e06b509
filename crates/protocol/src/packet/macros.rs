//! Field-list macro shared by the fixed-layout packet bodies.
//!
//! A packet body is declared once as an ordered list of `field: kind` pairs.
//! The macro expands that list into both the [`WireEncode`] walk (which also
//! drives size precomputation) and the decoder, so the byte order written
//! and the byte order read can never drift apart.
//!
//! [`WireEncode`]: crate::wire::WireEncode

/// Encodes or decodes one field of the given wire kind.
macro_rules! wire_field {
    (put u32, $sink:expr, $value:expr) => {
        $sink.put_u32($value)
    };
    (put u64, $sink:expr, $value:expr) => {
        $sink.put_u64($value)
    };
    (put string, $sink:expr, $value:expr) => {
        $sink.put_string(&$value)
    };
    (put open_flags, $sink:expr, $value:expr) => {
        $sink.put_u32($value.bits())
    };
    (put attrs, $sink:expr, $value:expr) => {
        $crate::wire::WireEncode::encode_to(&$value, $sink)
    };
    (get u32, $reader:expr) => {
        $reader.read_u32()?
    };
    (get u64, $reader:expr) => {
        $reader.read_u64()?
    };
    (get string, $reader:expr) => {
        $reader.read_string()?
    };
    (get open_flags, $reader:expr) => {
        $crate::flags::OpenFlags::from_bits($reader.read_u32()?)
    };
    (get attrs, $reader:expr) => {
        $crate::attrs::FileAttributes::decode($reader)?
    };
}

/// Implements [`WireEncode`](crate::wire::WireEncode) and a crate-private
/// `decode` for a struct whose fields are all fixed-layout wire values.
macro_rules! wire_struct {
    ($name:ident { $($field:ident : $kind:ident),+ $(,)? }) => {
        impl $crate::wire::WireEncode for $name {
            fn encode_to<S: $crate::wire::WireSink + ?Sized>(&self, sink: &mut S) {
                $( wire_field!(put $kind, sink, self.$field); )+
            }
        }

        impl $name {
            pub(crate) fn decode(
                reader: &mut $crate::wire::WireReader<'_>,
            ) -> Result<Self, $crate::error::ProtocolError> {
                $( let $field = wire_field!(get $kind, reader); )+
                Ok(Self { $($field),+ })
            }
        }
    };
}
