use crate::error::WireError;

/// Maximum number of 7-bit groups a length varint may occupy.
///
/// The map format only stores 32-bit lengths: ceil(32 / 7) = 5 groups.
/// Anything longer is rejected rather than accumulated.
pub const MAX_VARINT_BYTES: usize = 5;

/// Encode a `u32` as an unsigned LEB128 varint into the provided buffer.
///
/// # Returns
///
/// The number of bytes written (1–5).
///
/// # Panics
///
/// Panics if `buf` is shorter than the required encoding length.
/// A 5-byte buffer is always sufficient for any `u32`.
///
/// # Wire format examples
///
/// | Value   | Encoded bytes        | Length |
/// |---------|----------------------|--------|
/// | 0       | `[0x00]`             | 1      |
/// | 127     | `[0x7F]`             | 1      |
/// | 128     | `[0x80, 0x01]`       | 2      |
/// | 300     | `[0xAC, 0x02]`       | 2      |
/// | 16384   | `[0x80, 0x80, 0x01]` | 3      |
pub fn encode_varint(mut value: u32, buf: &mut [u8]) -> usize {
    let mut i = 0;
    loop {
        let mut byte = value.to_le_bytes()[0] & 0x7F;
        value >>= 7;

        if value > 0 {
            byte |= 0x80;
        }

        buf[i] = byte;
        i += 1;

        if value == 0 {
            break;
        }
    }
    i
}

/// Decode an unsigned LEB128 varint from the start of `buf`.
///
/// Bits of the fifth group above bit 31 are discarded, matching how the
/// format's writers produce lengths.
///
/// # Returns
///
/// `(decoded_value, bytes_consumed)` on success.
///
/// # Errors
///
/// - [`WireError::MalformedVarint`] if the fifth byte still has its
///   continuation bit set.
/// - [`WireError::UnexpectedEof`] if the slice ends mid-varint.
pub fn decode_varint(buf: &[u8]) -> Result<(u32, usize), WireError> {
    let mut result: u32 = 0;
    let mut shift: u32 = 0;

    for (i, &byte) in buf.iter().enumerate() {
        if i >= MAX_VARINT_BYTES {
            return Err(WireError::MalformedVarint { offset: 0 });
        }

        // shift is at most 28 here; high bits of the fifth group fall off.
        result |= u32::from(byte & 0x7F) << shift;
        shift += 7;

        if byte & 0x80 == 0 {
            return Ok((result, i + 1));
        }
    }

    Err(WireError::UnexpectedEof {
        offset: buf.len(),
        needed: 1,
    })
}
