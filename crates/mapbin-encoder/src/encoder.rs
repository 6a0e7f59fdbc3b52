use mapbin_types::{AttributeValue, Node};
use mapbin_wire::MapHeader;

use crate::error::EncodeError;
use crate::node_writer::{NodeWriter, StringInterner};

/// An attribute value together with the wire encoding to write it under.
///
/// Decoding collapses the three string encodings into one; writing needs
/// to know which to use, so the encoder works with this richer type.
#[derive(Clone, Debug, PartialEq)]
pub enum WireValue {
    Boolean(bool),
    Byte(u8),
    Short(i16),
    Integer(i32),
    Float(f32),
    /// Interned in the lookup table, written as a 16-bit index.
    LookupString(String),
    /// Written inline with a varint length prefix.
    String(String),
    /// Written inline as run-length pairs; single-byte code points only.
    LengthEncodedString(String),
}

/// Strings from a decoded tree are written as lookup strings.
impl From<&AttributeValue> for WireValue {
    fn from(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::Boolean(v) => Self::Boolean(*v),
            AttributeValue::Byte(v) => Self::Byte(*v),
            AttributeValue::Short(v) => Self::Short(*v),
            AttributeValue::Integer(v) => Self::Integer(*v),
            AttributeValue::Float(v) => Self::Float(*v),
            AttributeValue::String(s) => Self::LookupString(s.clone()),
        }
    }
}

/// A node awaiting encoding.
///
/// Attributes are kept as a list, not a map, so a builder can emit
/// duplicate attribute records on purpose.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeBuilder {
    name: String,
    attributes: Vec<(String, WireValue)>,
    children: Vec<NodeBuilder>,
}

impl NodeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: WireValue) -> Self {
        self.attributes.push((name.into(), value));
        self
    }

    #[must_use]
    pub fn child(mut self, child: NodeBuilder) -> Self {
        self.children.push(child);
        self
    }

    /// Convert a decoded tree back into a builder.
    #[must_use]
    pub fn from_node(node: &Node) -> Self {
        Self {
            name: node.name.clone(),
            attributes: node
                .attributes
                .iter()
                .map(|(name, value)| (name.clone(), WireValue::from(value)))
                .collect(),
            children: node.children.iter().map(Self::from_node).collect(),
        }
    }

    fn intern_all(&self, strings: &mut StringInterner) -> Result<(), EncodeError> {
        strings.intern(&self.name)?;
        for (name, value) in &self.attributes {
            strings.intern(name)?;
            if let WireValue::LookupString(s) = value {
                strings.intern(s)?;
            }
        }
        for child in &self.children {
            child.intern_all(strings)?;
        }
        Ok(())
    }

    fn write(&self, w: &mut NodeWriter<'_>) -> Result<(), EncodeError> {
        w.write_ref(&self.name)?;

        let attr_count =
            u8::try_from(self.attributes.len()).map_err(|_| EncodeError::TooManyAttributes {
                node: self.name.clone(),
                count: self.attributes.len(),
            })?;
        w.write_u8(attr_count);
        for (name, value) in &self.attributes {
            w.write_ref(name)?;
            w.write_value(value)?;
        }

        let child_count =
            u16::try_from(self.children.len()).map_err(|_| EncodeError::TooManyChildren {
                node: self.name.clone(),
                count: self.children.len(),
            })?;
        w.write_u16(child_count);
        for child in &self.children {
            child.write(w)?;
        }
        Ok(())
    }
}

/// Writes map payloads byte-for-byte in the layout the decoder reads.
///
/// ```text
/// ┌──────────────────────┬───────────────────────────────────────────────┐
/// │ header               │ varint-prefixed tag + package                 │
/// │ lookup table         │ u16 count + varint-prefixed strings           │
/// │ root node            │ u16 name index, u8 attr count,                │
/// │                      │ (u16 name, u8 tag, value)*, u16 child count,  │
/// │                      │ child nodes…                                  │
/// └──────────────────────┴───────────────────────────────────────────────┘
/// ```
///
/// Strings are interned in pre-order: each node's name, then its
/// attribute names and lookup-string values, then its children.
///
/// # Example
///
/// ```rust
/// use mapbin_encoder::{MapEncoder, NodeBuilder, WireValue};
///
/// let root = NodeBuilder::new("Map")
///     .child(NodeBuilder::new("Level").attr("x", WireValue::Integer(5)));
/// let bytes = MapEncoder::new("TestMap").encode(&root).unwrap();
/// assert_eq!(&bytes[1..12], b"CELESTE MAP");
/// ```
pub struct MapEncoder {
    header: MapHeader,
}

impl MapEncoder {
    /// Encoder with the default `CELESTE MAP` tag.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            header: MapHeader::new(package),
        }
    }

    #[must_use]
    pub fn with_header(header: MapHeader) -> Self {
        Self { header }
    }

    /// Encode a builder tree.
    ///
    /// # Errors
    ///
    /// Any [`EncodeError`] width limit hit while writing.
    pub fn encode(&self, root: &NodeBuilder) -> Result<Vec<u8>, EncodeError> {
        let mut strings = StringInterner::new();
        root.intern_all(&mut strings)?;

        let mut out = Vec::new();
        self.header.write_to(&mut out)?;

        let mut w = NodeWriter::new(&strings);
        w.write_lookup_table()?;
        root.write(&mut w)?;
        out.extend_from_slice(&w.finish());
        Ok(out)
    }

    /// Encode a decoded tree, writing every string as a lookup string.
    ///
    /// # Errors
    ///
    /// Any [`EncodeError`] width limit hit while writing.
    pub fn encode_node(&self, root: &Node) -> Result<Vec<u8>, EncodeError> {
        self.encode(&NodeBuilder::from_node(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_map_layout() {
        let root = NodeBuilder::new("Map")
            .child(NodeBuilder::new("Level").attr("x", WireValue::Integer(5)));
        let bytes = MapEncoder::new("P").encode(&root).unwrap();

        let mut expected = vec![11];
        expected.extend_from_slice(b"CELESTE MAP");
        expected.extend_from_slice(&[1, b'P']);
        // lookup table: Map, Level, x
        expected.extend_from_slice(&[3, 0, 3, b'M', b'a', b'p', 5]);
        expected.extend_from_slice(b"Level");
        expected.extend_from_slice(&[1, b'x']);
        // root: name 0, no attributes, one child
        expected.extend_from_slice(&[0, 0, 0, 1, 0]);
        // Level: name 1, one attribute x (index 2) = Integer 5, no children
        expected.extend_from_slice(&[1, 0, 1, 2, 0, 3, 5, 0, 0, 0, 0, 0]);

        assert_eq!(bytes, expected);
    }

    #[test]
    fn lookup_string_values_share_table_entries() {
        let root = NodeBuilder::new("Map")
            .attr("Map", WireValue::LookupString("Map".into()));
        let bytes = MapEncoder::new("").encode(&root).unwrap();
        // header (12 + 1) then a one-entry table
        assert_eq!(&bytes[13..15], &[1, 0]);
    }

    #[test]
    fn too_many_attributes_rejected() {
        let mut node = NodeBuilder::new("n");
        for i in 0..256 {
            node = node.attr(format!("a{i}"), WireValue::Byte(0));
        }
        assert!(matches!(
            MapEncoder::new("").encode(&node),
            Err(EncodeError::TooManyAttributes { count: 256, .. })
        ));
    }

    #[test]
    fn from_node_writes_strings_as_lookups() {
        let node = Node::new("Map").with_attribute("s", "v");
        let builder = NodeBuilder::from_node(&node);
        assert_eq!(
            builder.attributes,
            vec![("s".to_string(), WireValue::LookupString("v".into()))]
        );
    }
}
