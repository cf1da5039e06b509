//! Extension name/data pairs.
//!
//! INIT and VERSION carry an uncounted list of pairs that runs to the end of
//! the packet body. The EXTENDED attribute group carries a counted list.

use crate::error::ProtocolError;
use crate::wire::{WireEncode, WireReader, WireSink};

/// A protocol extension advertised during INIT/VERSION or attached to
/// attributes. Both halves are raw byte strings.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtensionPair {
    /// Extension name, conventionally `name@domain`.
    pub name: Vec<u8>,
    /// Extension payload.
    pub data: Vec<u8>,
}

impl ExtensionPair {
    /// Creates a pair from anything convertible to byte vectors.
    pub fn new(name: impl Into<Vec<u8>>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    pub(crate) fn decode(reader: &mut WireReader<'_>) -> Result<Self, ProtocolError> {
        let name = reader.read_string()?;
        let data = reader.read_string()?;
        Ok(Self { name, data })
    }
}

impl WireEncode for ExtensionPair {
    fn encode_to<S: WireSink + ?Sized>(&self, sink: &mut S) {
        sink.put_string(&self.name);
        sink.put_string(&self.data);
    }
}

/// Decodes pairs until `reader` is exhausted.
///
/// A trailing fragment that cannot form a whole pair is a short packet.
pub(crate) fn decode_until_exhausted(
    reader: &mut WireReader<'_>,
) -> Result<Vec<ExtensionPair>, ProtocolError> {
    let mut pairs = Vec::new();
    while !reader.is_empty() {
        pairs.push(ExtensionPair::decode(reader)?);
    }
    Ok(pairs)
}

/// Decodes exactly `count` pairs.
pub(crate) fn decode_counted(
    reader: &mut WireReader<'_>,
    count: u32,
) -> Result<Vec<ExtensionPair>, ProtocolError> {
    // Each pair is at least two empty strings; never trust `count` for capacity.
    let plausible = reader.remaining().len() / 8;
    let mut pairs = Vec::with_capacity((count as usize).min(plausible));
    for _ in 0..count {
        pairs.push(ExtensionPair::decode(reader)?);
    }
    Ok(pairs)
}
