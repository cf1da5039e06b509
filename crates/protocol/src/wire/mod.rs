#![deny(unsafe_code)]
//! Primitive SFTP wire codec.
//!
//! Fixed-width big-endian integers and 4-byte-length-prefixed byte strings are
//! the only encodings the protocol uses; there are no variable-length integers
//! anywhere on the wire.

mod reader;
mod sink;
mod size;

pub use self::reader::{WireReader, unmarshal_string, unmarshal_u8, unmarshal_u32, unmarshal_u64};
pub use self::sink::{WireSink, marshal_string, marshal_u8, marshal_u32, marshal_u64};
pub use self::size::{SizeCounter, U8_COST, U32_COST, U64_COST, WireEncode, string_cost};
