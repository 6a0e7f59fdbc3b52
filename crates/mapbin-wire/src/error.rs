/// Byte-level failures while reading a map `.bin` stream.
///
/// Every variant carries the byte offset (from the start of the input)
/// at which the read failed, so a corrupt file can be diagnosed without
/// a hex editor.
///
/// ```text
///   WireError
///   ├── UnexpectedEof       ← short read on a fixed-width primitive
///   ├── MalformedVarint     ← more than 5 LEB128 groups
///   ├── TruncatedString     ← length prefix runs past the end of input
///   ├── InvalidUtf8         ← string bytes are not UTF-8
///   ├── InvalidLookupIndex  ← 16-bit index >= string table length
///   └── StringTooLong       ← (write side) length does not fit a u32 varint
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// The stream ended before `needed` more bytes could be read.
    #[error("unexpected end of input at offset {offset} (needed {needed} more bytes)")]
    UnexpectedEof { offset: usize, needed: usize },

    /// A varint kept its continuation bit set past the fifth group.
    #[error("malformed varint at offset {offset}: exceeds 5 groups")]
    MalformedVarint { offset: usize },

    /// A length-prefixed string declared more bytes than remain.
    #[error("truncated string at offset {offset}: length {length}, {remaining} bytes remaining")]
    TruncatedString {
        offset: usize,
        length: usize,
        remaining: usize,
    },

    /// String bytes did not form valid UTF-8.
    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    /// A lookup index pointed past the end of the string table.
    #[error("lookup index {index} out of range (table has {len} entries)")]
    InvalidLookupIndex { index: u16, len: usize },

    /// A string handed to the writer is too long for a 32-bit length prefix.
    #[error("string of {length} bytes does not fit a 32-bit length prefix")]
    StringTooLong { length: usize },
}
