/// Wire tag selecting how an attribute value is encoded.
///
/// ```text
/// ┌─────┬─────────────────────┬──────────────────────────────────────────┐
/// │ Tag │ Variant             │ Payload                                  │
/// ├─────┼─────────────────────┼──────────────────────────────────────────┤
/// │ 0   │ Boolean             │ 1 byte, zero / non-zero                  │
/// │ 1   │ Byte                │ 1 unsigned byte                          │
/// │ 2   │ Short               │ i16 little-endian                        │
/// │ 3   │ Integer             │ i32 little-endian                        │
/// │ 4   │ Float               │ f32 little-endian                        │
/// │ 5   │ LookupString        │ u16 string-table index                   │
/// │ 6   │ String              │ varint length + UTF-8                    │
/// │ 7   │ LengthEncodedString │ u16 byte length + (count, code point)*   │
/// └─────┴─────────────────────┴──────────────────────────────────────────┘
/// ```
///
/// Unlike block types in an extensible container, there is no catch-all
/// variant: an unknown tag makes the rest of the stream unreadable, so
/// [`from_wire_id`](Self::from_wire_id) returns `None` and the decoder
/// aborts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Boolean,
    Byte,
    Short,
    Integer,
    Float,
    LookupString,
    String,
    LengthEncodedString,
}

impl AttributeType {
    pub const ALL: [Self; 8] = [
        Self::Boolean,
        Self::Byte,
        Self::Short,
        Self::Integer,
        Self::Float,
        Self::LookupString,
        Self::String,
        Self::LengthEncodedString,
    ];

    #[must_use]
    pub fn wire_id(self) -> u8 {
        match self {
            Self::Boolean => 0,
            Self::Byte => 1,
            Self::Short => 2,
            Self::Integer => 3,
            Self::Float => 4,
            Self::LookupString => 5,
            Self::String => 6,
            Self::LengthEncodedString => 7,
        }
    }

    #[must_use]
    pub fn from_wire_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }
}
