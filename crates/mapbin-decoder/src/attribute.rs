use mapbin_types::{AttributeType, AttributeValue};
use mapbin_wire::{ByteReader, StringLookupTable};

use crate::budget::DecodeBudget;
use crate::error::DecodeError;

/// Read a tag byte and the value payload it selects.
///
/// # Errors
///
/// - [`DecodeError::UnknownAttributeType`] for a tag of 8 or above.
/// - Any error from [`decode_value`].
pub fn read_value(
    reader: &mut ByteReader<'_>,
    table: &StringLookupTable,
    budget: &mut DecodeBudget,
) -> Result<AttributeValue, DecodeError> {
    let offset = reader.position();
    let tag = reader.read_u8()?;
    let ty = AttributeType::from_wire_id(tag)
        .ok_or(DecodeError::UnknownAttributeType { tag, offset })?;
    decode_value(reader, ty, table, budget)
}

/// Decode the payload of a value whose tag has already been read.
///
/// All three string encodings resolve to [`AttributeValue::String`], and
/// each is charged to `budget` at its decoded UTF-8 length before the
/// owned string is built.
///
/// # Errors
///
/// - [`DecodeError::Wire`] on a short read, bad string, or lookup index
///   out of range.
/// - [`DecodeError::MalformedRunLength`] for an odd run-length byte count.
/// - [`DecodeError::DecodedSizeExceeded`] when `budget` runs out.
pub fn decode_value(
    reader: &mut ByteReader<'_>,
    ty: AttributeType,
    table: &StringLookupTable,
    budget: &mut DecodeBudget,
) -> Result<AttributeValue, DecodeError> {
    let value = match ty {
        AttributeType::Boolean => AttributeValue::Boolean(reader.read_u8()? != 0),
        AttributeType::Byte => AttributeValue::Byte(reader.read_u8()?),
        AttributeType::Short => AttributeValue::Short(reader.read_i16()?),
        AttributeType::Integer => AttributeValue::Integer(reader.read_i32()?),
        AttributeType::Float => AttributeValue::Float(reader.read_f32()?),
        AttributeType::LookupString => {
            AttributeValue::String(budget.owned(table.read_ref(reader)?)?)
        }
        AttributeType::String => {
            let s = reader.read_string()?;
            budget.charge(s.len())?;
            AttributeValue::String(s)
        }
        AttributeType::LengthEncodedString => {
            AttributeValue::String(read_run_length(reader, budget)?)
        }
    };
    Ok(value)
}

/// Read a 16-bit byte length followed by `(repeat count, code point)`
/// pairs and expand them.
///
/// # Errors
///
/// - [`DecodeError::MalformedRunLength`] if the byte length is odd.
/// - [`DecodeError::Wire`] if fewer bytes remain than declared.
/// - [`DecodeError::DecodedSizeExceeded`] if the expansion does not fit
///   in `budget`. Nothing is allocated in that case.
pub fn read_run_length(
    reader: &mut ByteReader<'_>,
    budget: &mut DecodeBudget,
) -> Result<String, DecodeError> {
    let offset = reader.position();
    let length = reader.read_u16()?;
    if length % 2 != 0 {
        return Err(DecodeError::MalformedRunLength { length, offset });
    }
    let pairs = reader.read_bytes(usize::from(length))?;
    budget.charge(expanded_len(pairs))?;
    Ok(expand_run_length(pairs))
}

/// UTF-8 byte length of [`expand_run_length`]`(pairs)`, without building it.
///
/// Code points above U+007F take two bytes.
#[must_use]
pub fn expanded_len(pairs: &[u8]) -> usize {
    pairs
        .chunks_exact(2)
        .map(|p| usize::from(p[0]) * char::from(p[1]).len_utf8())
        .sum()
}

/// Expand `(repeat count, code point)` byte pairs into a string.
///
/// Each code point is a single byte taken as a Unicode scalar value
/// (U+0000..=U+00FF), not as UTF-8. A trailing unpaired byte is ignored;
/// [`read_run_length`] rejects such input before it gets here.
///
/// ```text
/// [0x03, 0x41, 0x01, 0x42]  →  "AAAB"
/// ```
#[must_use]
pub fn expand_run_length(pairs: &[u8]) -> String {
    let mut out = String::with_capacity(expanded_len(pairs));
    for pair in pairs.chunks_exact(2) {
        let c = char::from(pair[1]);
        out.extend(std::iter::repeat_n(c, usize::from(pair[0])));
    }
    out
}
