use crate::error::WireError;
use crate::varint::decode_varint;

/// Forward-only primitive reader over an in-memory map payload.
///
/// All multi-byte integers and floats in the map format are stored
/// little-endian. Reads never allocate beyond the bytes actually present:
/// a length prefix larger than the remaining input fails before any
/// buffer is sized from it.
///
/// ```text
/// ┌──────────────────────────┬─────────┬──────────────────────────────┐
/// │ Method                   │ Width   │ Encoding                     │
/// ├──────────────────────────┼─────────┼──────────────────────────────┤
/// │ read_u8                  │ 1       │ raw byte                     │
/// │ read_varint              │ 1–5     │ unsigned LEB128              │
/// │ read_u16 / read_i16      │ 2       │ little-endian                │
/// │ read_i32                 │ 4       │ little-endian                │
/// │ read_f32                 │ 4       │ little-endian IEEE-754 bits  │
/// │ read_string              │ varint+ │ LEB128 length + UTF-8 bytes  │
/// └──────────────────────────┴─────────┴──────────────────────────────┘
/// ```
#[derive(Clone, Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current byte offset from the start of the input.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Borrow the next `n` bytes and advance past them.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than `n` bytes remain.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        if self.remaining() < n {
            return Err(WireError::UnexpectedEof {
                offset: self.pos,
                needed: n - self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if the stream is exhausted.
    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] on a short read.
    pub fn read_u16(&mut self) -> Result<u16, WireError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] on a short read.
    pub fn read_i16(&mut self) -> Result<i16, WireError> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] on a short read.
    pub fn read_i32(&mut self) -> Result<i32, WireError> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Read four little-endian bytes and reinterpret them as IEEE-754.
    ///
    /// Non-finite bit patterns are returned as-is; mapping them to text
    /// is the renderer's job.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] on a short read.
    pub fn read_f32(&mut self) -> Result<f32, WireError> {
        Ok(f32::from_bits(u32::from_le_bytes(self.read_array()?)))
    }

    /// Read an unsigned LEB128 varint of at most five groups.
    ///
    /// # Errors
    ///
    /// - [`WireError::MalformedVarint`] past the fifth group.
    /// - [`WireError::UnexpectedEof`] if the input ends mid-varint.
    pub fn read_varint(&mut self) -> Result<u32, WireError> {
        let start = self.pos;
        match decode_varint(&self.data[start..]) {
            Ok((value, consumed)) => {
                self.pos += consumed;
                Ok(value)
            }
            Err(WireError::MalformedVarint { .. }) => {
                Err(WireError::MalformedVarint { offset: start })
            }
            Err(_) => Err(WireError::UnexpectedEof {
                offset: self.data.len(),
                needed: 1,
            }),
        }
    }

    /// Read a varint length followed by that many UTF-8 bytes.
    ///
    /// # Errors
    ///
    /// - Any error from [`read_varint`](Self::read_varint).
    /// - [`WireError::TruncatedString`] if the length exceeds the input.
    /// - [`WireError::InvalidUtf8`] if the bytes are not UTF-8.
    pub fn read_string(&mut self) -> Result<String, WireError> {
        // A length that does not fit usize cannot fit the input either.
        let length = usize::try_from(self.read_varint()?).unwrap_or(usize::MAX);
        let offset = self.pos;
        if length > self.remaining() {
            return Err(WireError::TruncatedString {
                offset,
                length,
                remaining: self.remaining(),
            });
        }
        let bytes = self.read_bytes(length)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| WireError::InvalidUtf8 { offset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_integers() {
        let mut r = ByteReader::new(&[0x34, 0x12, 0xFE, 0xFF, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(r.read_u16().unwrap(), 0x1234);
        assert_eq!(r.read_i16().unwrap(), -2);
        assert_eq!(r.read_i32().unwrap(), 0x1234_5678);
        assert!(r.is_empty());
    }

    #[test]
    fn reads_float_from_swapped_bytes() {
        // 1.5f32 = 0x3FC00000, stored low byte first.
        let mut r = ByteReader::new(&[0x00, 0x00, 0xC0, 0x3F]);
        assert!((r.read_f32().unwrap() - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn reads_non_finite_float_bits() {
        let mut r = ByteReader::new(&[0x00, 0x00, 0x80, 0x7F, 0x00, 0x00, 0xC0, 0x7F]);
        assert_eq!(r.read_f32().unwrap(), f32::INFINITY);
        assert!(r.read_f32().unwrap().is_nan());
    }

    #[test]
    fn short_read_reports_offset() {
        let mut r = ByteReader::new(&[0x01, 0x02, 0x03]);
        r.read_u8().unwrap();
        assert_eq!(
            r.read_i32(),
            Err(WireError::UnexpectedEof {
                offset: 1,
                needed: 2
            })
        );
    }

    #[test]
    fn read_u8_on_empty_fails() {
        let mut r = ByteReader::new(&[]);
        assert!(matches!(r.read_u8(), Err(WireError::UnexpectedEof { .. })));
    }

    #[test]
    fn reads_length_prefixed_string() {
        let mut r = ByteReader::new(b"\x05Level\xFF");
        assert_eq!(r.read_string().unwrap(), "Level");
        assert_eq!(r.position(), 6);
        assert_eq!(r.remaining(), 1);
    }

    #[test]
    fn truncated_string_fails() {
        let mut r = ByteReader::new(b"\x0AshortXX");
        assert_eq!(
            r.read_string(),
            Err(WireError::TruncatedString {
                offset: 1,
                length: 10,
                remaining: 7
            })
        );
    }

    #[test]
    fn huge_length_prefix_fails_without_allocating() {
        let mut r = ByteReader::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0x0F, b'a']);
        assert!(matches!(
            r.read_string(),
            Err(WireError::TruncatedString { .. })
        ));
    }

    #[test]
    fn malformed_varint_reports_start_offset() {
        let mut r = ByteReader::new(&[0x00, 0x80, 0x80, 0x80, 0x80, 0x80, 0x01]);
        r.read_u8().unwrap();
        assert_eq!(r.read_varint(), Err(WireError::MalformedVarint { offset: 1 }));
    }

    #[test]
    fn invalid_utf8_string_fails() {
        let mut r = ByteReader::new(&[0x02, 0xC3, 0x28]);
        assert_eq!(r.read_string(), Err(WireError::InvalidUtf8 { offset: 1 }));
    }
}
