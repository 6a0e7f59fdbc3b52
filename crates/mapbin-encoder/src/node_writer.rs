use std::collections::HashMap;

use mapbin_types::AttributeType;
use mapbin_wire::header::write_string;

use crate::encoder::WireValue;
use crate::error::EncodeError;

/// Assigns 16-bit indices to strings in first-seen order.
///
/// The resulting order is the order the lookup table is written in, so
/// index `i` on the wire always names `entries()[i]`.
#[derive(Debug, Default)]
pub struct StringInterner {
    entries: Vec<String>,
    index: HashMap<String, u16>,
}

impl StringInterner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the index of `s`, adding it if unseen.
    ///
    /// # Errors
    ///
    /// [`EncodeError::LookupTableFull`] once 65536 strings are interned.
    pub fn intern(&mut self, s: &str) -> Result<u16, EncodeError> {
        if let Some(&i) = self.index.get(s) {
            return Ok(i);
        }
        let i = u16::try_from(self.entries.len()).map_err(|_| EncodeError::LookupTableFull {
            count: self.entries.len(),
        })?;
        self.entries.push(s.to_string());
        self.index.insert(s.to_string(), i);
        Ok(i)
    }

    #[must_use]
    pub fn index_of(&self, s: &str) -> Option<u16> {
        self.index.get(s).copied()
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

/// Little-endian primitive writer for map payloads.
///
/// The write-side mirror of `mapbin_wire::ByteReader`. Strings that go
/// through the lookup table must already be interned; the writer only
/// looks indices up, it never adds entries, so the table written up front
/// stays complete.
///
/// ```text
/// ┌────────────────────────┬──────────────────────────────────────────┐
/// │ Method                 │ Encodes                                  │
/// ├────────────────────────┼──────────────────────────────────────────┤
/// │ write_lookup_table     │ u16 count + length-prefixed strings      │
/// │ write_ref              │ u16 index of an interned string          │
/// │ write_value            │ tag byte + type-specific payload         │
/// │ write_run_length       │ u16 byte length + (count, code point)*   │
/// └────────────────────────┴──────────────────────────────────────────┘
/// ```
pub struct NodeWriter<'a> {
    buf: Vec<u8>,
    strings: &'a StringInterner,
}

impl<'a> NodeWriter<'a> {
    #[must_use]
    pub fn new(strings: &'a StringInterner) -> Self {
        Self {
            buf: Vec::new(),
            strings,
        }
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn write_u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_i16(&mut self, v: i16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_f32(&mut self, v: f32) {
        self.buf.extend_from_slice(&v.to_bits().to_le_bytes());
    }

    /// # Errors
    ///
    /// [`EncodeError::Wire`] if the string length does not fit a `u32`.
    pub fn write_string(&mut self, s: &str) -> Result<(), EncodeError> {
        write_string(&mut self.buf, s)?;
        Ok(())
    }

    /// Write the interner's entries as the document lookup table.
    ///
    /// # Errors
    ///
    /// [`EncodeError::LookupTableFull`] if the count does not fit a `u16`.
    pub fn write_lookup_table(&mut self) -> Result<(), EncodeError> {
        let entries = self.strings.entries();
        let count = u16::try_from(entries.len()).map_err(|_| EncodeError::LookupTableFull {
            count: entries.len(),
        })?;
        self.write_u16(count);
        for entry in entries {
            self.write_string(entry)?;
        }
        Ok(())
    }

    /// Write the 16-bit index of an already-interned string.
    ///
    /// # Errors
    ///
    /// [`EncodeError::NotInterned`] if `s` was never interned.
    pub fn write_ref(&mut self, s: &str) -> Result<(), EncodeError> {
        let index = self
            .strings
            .index_of(s)
            .ok_or_else(|| EncodeError::NotInterned { value: s.to_owned() })?;
        self.write_u16(index);
        Ok(())
    }

    /// Write a tag byte followed by the value payload.
    ///
    /// # Errors
    ///
    /// Any error from [`write_ref`](Self::write_ref),
    /// [`write_string`](Self::write_string) or
    /// [`write_run_length`](Self::write_run_length).
    pub fn write_value(&mut self, value: &WireValue) -> Result<(), EncodeError> {
        self.write_u8(value.attribute_type().wire_id());
        match value {
            WireValue::Boolean(v) => self.write_u8(u8::from(*v)),
            WireValue::Byte(v) => self.write_u8(*v),
            WireValue::Short(v) => self.write_i16(*v),
            WireValue::Integer(v) => self.write_i32(*v),
            WireValue::Float(v) => self.write_f32(*v),
            WireValue::LookupString(s) => self.write_ref(s)?,
            WireValue::String(s) => self.write_string(s)?,
            WireValue::LengthEncodedString(s) => self.write_run_length(s)?,
        }
        Ok(())
    }

    /// Write `s` as `(repeat count, code point)` byte pairs behind a
    /// 16-bit byte length. Runs longer than 255 are split.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::UnencodableCodePoint`] for chars above U+00FF.
    /// - [`EncodeError::StringTooLong`] if the pairs exceed 65535 bytes.
    pub fn write_run_length(&mut self, s: &str) -> Result<(), EncodeError> {
        let mut pairs: Vec<u8> = Vec::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            let code_point =
                u8::try_from(u32::from(c)).map_err(|_| EncodeError::UnencodableCodePoint { code_point: c })?;
            let mut count: u8 = 1;
            while count < u8::MAX && chars.peek() == Some(&c) {
                chars.next();
                count += 1;
            }
            pairs.push(count);
            pairs.push(code_point);
        }
        let length =
            u16::try_from(pairs.len()).map_err(|_| EncodeError::StringTooLong { length: pairs.len() })?;
        self.write_u16(length);
        self.buf.extend_from_slice(&pairs);
        Ok(())
    }

    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

impl WireValue {
    /// Wire tag this value is written under.
    #[must_use]
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Self::Boolean(_) => AttributeType::Boolean,
            Self::Byte(_) => AttributeType::Byte,
            Self::Short(_) => AttributeType::Short,
            Self::Integer(_) => AttributeType::Integer,
            Self::Float(_) => AttributeType::Float,
            Self::LookupString(_) => AttributeType::LookupString,
            Self::String(_) => AttributeType::String,
            Self::LengthEncodedString(_) => AttributeType::LengthEncodedString,
        }
    }
}
