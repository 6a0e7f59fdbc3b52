use crate::error::WireError;
use crate::reader::ByteReader;

/// Per-document table of interned strings.
///
/// Read once, right after the header, as a 16-bit count followed by that
/// many length-prefixed strings. Node names, attribute names and the
/// `LookupString` attribute variant all refer to entries by 16-bit index.
///
/// ```text
/// ┌────────────┬──────────────────────────────────────┐
/// │ u16 count  │ string[0] string[1] … string[n-1]    │
/// └────────────┴──────────────────────────────────────┘
/// ```
///
/// The table is immutable after reading and owned by a single decode
/// call; it is passed down the decoder by shared reference.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringLookupTable {
    entries: Vec<String>,
}

impl StringLookupTable {
    #[must_use]
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// Read the count and every entry.
    ///
    /// # Errors
    ///
    /// Any error from [`ByteReader::read_u16`] or
    /// [`ByteReader::read_string`].
    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, WireError> {
        let count = reader.read_u16()?;
        // Each entry needs at least its one-byte length prefix.
        let mut entries = Vec::with_capacity(usize::from(count).min(reader.remaining()));
        for _ in 0..count {
            entries.push(reader.read_string()?);
        }
        Ok(Self { entries })
    }

    /// Resolve a 16-bit index to its string.
    ///
    /// # Errors
    ///
    /// [`WireError::InvalidLookupIndex`] if `index >= self.len()`.
    pub fn resolve(&self, index: u16) -> Result<&str, WireError> {
        self.entries
            .get(usize::from(index))
            .map(String::as_str)
            .ok_or(WireError::InvalidLookupIndex {
                index,
                len: self.entries.len(),
            })
    }

    /// Read a 16-bit index from `reader` and resolve it.
    ///
    /// # Errors
    ///
    /// A short read, or [`WireError::InvalidLookupIndex`].
    pub fn read_ref(&self, reader: &mut ByteReader<'_>) -> Result<&str, WireError> {
        let index = reader.read_u16()?;
        self.resolve(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
