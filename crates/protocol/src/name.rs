//! NAME entries: filename, long name and attributes, decoded as a counted
//! list so a short body fails instead of yielding padded entries.

use crate::attrs::FileAttributes;
use crate::error::ProtocolError;
use crate::wire::{U32_COST, WireEncode, WireReader, WireSink};

/// One entry of a NAME reply: a filename, its `ls -l` style long name, and
/// its attributes.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedFile {
    /// Bare file name (or the canonical path for REALPATH/READLINK replies).
    pub filename: Vec<u8>,
    /// Human-readable listing line. Clients must not parse it.
    pub longname: Vec<u8>,
    /// Attributes of the entry.
    pub attrs: FileAttributes,
}

impl NamedFile {
    /// Creates an entry.
    pub fn new(
        filename: impl Into<Vec<u8>>,
        longname: impl Into<Vec<u8>>,
        attrs: FileAttributes,
    ) -> Self {
        Self {
            filename: filename.into(),
            longname: longname.into(),
            attrs,
        }
    }

    pub(crate) fn decode(reader: &mut WireReader<'_>) -> Result<Self, ProtocolError> {
        let filename = reader.read_string()?;
        let longname = reader.read_string()?;
        let attrs = FileAttributes::decode(reader)?;
        Ok(Self {
            filename,
            longname,
            attrs,
        })
    }
}

impl WireEncode for NamedFile {
    fn encode_to<S: WireSink + ?Sized>(&self, sink: &mut S) {
        sink.put_string(&self.filename);
        sink.put_string(&self.longname);
        self.attrs.encode_to(sink);
    }
}

/// Decodes exactly `count` entries.
///
/// Fewer decodable entries than `count` is a short packet; a zero-filled tail
/// is never produced.
pub(crate) fn decode_named_files(
    reader: &mut WireReader<'_>,
    count: u32,
) -> Result<Vec<NamedFile>, ProtocolError> {
    // Smallest entry: two empty strings and an empty attribute block.
    const MIN_ENTRY: usize = 3 * U32_COST;
    let plausible = reader.remaining().len() / MIN_ENTRY;
    let mut files = Vec::with_capacity((count as usize).min(plausible));
    for _ in 0..count {
        files.push(NamedFile::decode(reader)?);
    }
    Ok(files)
}
