use crate::error::WireError;
use crate::reader::ByteReader;
use crate::varint::{MAX_VARINT_BYTES, encode_varint};

/// The two length-prefixed strings that open every map payload.
///
/// ```text
/// ┌─────────┬──────────────────────────────────────────────┐
/// │ Field   │ Encoding                                     │
/// ├─────────┼──────────────────────────────────────────────┤
/// │ tag     │ varint length + UTF-8 ("CELESTE MAP")        │
/// │ package │ varint length + UTF-8 (map package name)     │
/// └─────────┴──────────────────────────────────────────────┘
/// ```
///
/// Both strings are read unconditionally; the tag is not validated, so
/// files written by third-party editors with a different tag still decode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapHeader {
    pub tag: String,
    pub package: String,
}

impl MapHeader {
    /// Tag written by the game and by every known map editor.
    pub const DEFAULT_TAG: &'static str = "CELESTE MAP";

    /// Create a header with the default tag.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            tag: Self::DEFAULT_TAG.to_string(),
            package: package.into(),
        }
    }

    /// Read both header strings from the front of the stream.
    ///
    /// # Errors
    ///
    /// Any string-read error from [`ByteReader::read_string`].
    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, WireError> {
        let tag = reader.read_string()?;
        let package = reader.read_string()?;
        Ok(Self { tag, package })
    }

    /// Append both header strings to `buf`.
    ///
    /// # Errors
    ///
    /// [`WireError::StringTooLong`] if either string exceeds `u32::MAX` bytes.
    pub fn write_to(&self, buf: &mut Vec<u8>) -> Result<(), WireError> {
        write_string(buf, &self.tag)?;
        write_string(buf, &self.package)
    }
}

/// Append a varint length prefix and the UTF-8 bytes of `s`.
///
/// # Errors
///
/// [`WireError::StringTooLong`] if `s` is longer than `u32::MAX` bytes.
pub fn write_string(buf: &mut Vec<u8>, s: &str) -> Result<(), WireError> {
    let len = u32::try_from(s.len()).map_err(|_| WireError::StringTooLong { length: s.len() })?;
    let mut varint = [0u8; MAX_VARINT_BYTES];
    let n = encode_varint(len, &mut varint);
    buf.extend_from_slice(&varint[..n]);
    buf.extend_from_slice(s.as_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_default_header() {
        let header = MapHeader::new("Maddie/TestMap");
        let mut buf = Vec::new();
        header.write_to(&mut buf).unwrap();
        let parsed = MapHeader::read_from(&mut ByteReader::new(&buf)).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn tag_bytes_are_length_prefixed() {
        let mut buf = Vec::new();
        MapHeader::new("").write_to(&mut buf).unwrap();
        assert_eq!(buf[0], 11);
        assert_eq!(&buf[1..12], b"CELESTE MAP");
        assert_eq!(buf[12], 0);
    }

    #[test]
    fn foreign_tag_is_accepted() {
        let mut buf = Vec::new();
        MapHeader {
            tag: "NOT A MAP".to_string(),
            package: "x".to_string(),
        }
        .write_to(&mut buf)
        .unwrap();
        let parsed = MapHeader::read_from(&mut ByteReader::new(&buf)).unwrap();
        assert_eq!(parsed.tag, "NOT A MAP");
    }

    #[test]
    fn missing_package_fails() {
        let mut buf = Vec::new();
        write_string(&mut buf, MapHeader::DEFAULT_TAG).unwrap();
        let result = MapHeader::read_from(&mut ByteReader::new(&buf));
        assert!(matches!(result, Err(WireError::UnexpectedEof { .. })));
    }
}
