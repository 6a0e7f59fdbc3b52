use mapbin_types::Node;
use mapbin_wire::{ByteReader, MapHeader, StringLookupTable};
use tracing::{debug, warn};

use crate::attribute;
use crate::budget::DecodeBudget;
use crate::config::DecoderConfig;
use crate::error::DecodeError;

/// Smallest possible encoded node: name index, attribute count, child count.
const MIN_NODE_SIZE: usize = 5;

/// The result of decoding a map payload.
///
/// ```text
/// ┌────────────────────────────────────────────────────────┐
/// │ DecodedMap                                             │
/// │   header: MapHeader      ← tag + package strings       │
/// │   root: Node             ← always named "CelesteMap"   │
/// │   lookup_len: usize      ← entries in the string table │
/// │   trailing_bytes: usize  ← bytes left after the root   │
/// └────────────────────────────────────────────────────────┘
/// ```
///
/// The string table itself is dropped once decoding finishes; every
/// reference into it has been resolved to an owned string.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedMap {
    pub header: MapHeader,
    pub root: Node,
    pub lookup_len: usize,
    pub trailing_bytes: usize,
}

/// Recursive-descent decoder for map `.bin` payloads.
///
/// Decoding is a single forward pass:
///
///   1. **Header**: two length-prefixed strings (tag, package).
///   2. **Lookup table**: 16-bit count of length-prefixed strings.
///   3. **Root**: a 16-bit name index that is read and discarded (the
///      root is always named [`Node::ROOT_NAME`]), then attributes and
///      children.
///   4. **Nodes**: 16-bit name index, 1-byte attribute count, attribute
///      records, 16-bit child count, child nodes.
///
/// The document is complete when the root's descent returns. Bytes left
/// over after that are logged and counted in
/// [`DecodedMap::trailing_bytes`] but do not fail the decode; running out
/// of bytes before that point fails the whole document.
///
/// # Example
///
/// ```rust
/// use mapbin_decoder::MapDecoder;
/// use mapbin_encoder::{MapEncoder, NodeBuilder, WireValue};
///
/// let root = NodeBuilder::new("Map")
///     .child(NodeBuilder::new("Level").attr("x", WireValue::Integer(5)));
/// let bytes = MapEncoder::new("TestMap").encode(&root).unwrap();
///
/// let decoded = MapDecoder::new().decode(&bytes).unwrap();
/// assert_eq!(decoded.root.name, "CelesteMap");
/// assert_eq!(decoded.header.package, "TestMap");
/// ```
#[derive(Clone, Debug, Default)]
pub struct MapDecoder {
    config: DecoderConfig,
}

impl MapDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a complete in-memory payload.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Wire`] on a short read, malformed varint, truncated
    ///   or non-UTF-8 string, or out-of-range lookup index.
    /// - [`DecodeError::UnknownAttributeType`] on an attribute tag >= 8.
    /// - [`DecodeError::MalformedRunLength`] on an odd run-length size.
    /// - [`DecodeError::DepthLimitExceeded`] past `config.max_depth`.
    /// - [`DecodeError::DecodedSizeExceeded`] once node names, attribute
    ///   names and string values together pass `config.max_decoded_bytes`.
    pub fn decode(&self, payload: &[u8]) -> Result<DecodedMap, DecodeError> {
        let mut reader = ByteReader::new(payload);

        let header = MapHeader::read_from(&mut reader)?;
        let table = StringLookupTable::read_from(&mut reader)?;
        debug!(
            tag = %header.tag,
            package = %header.package,
            lookup_len = table.len(),
            "read map header and lookup table"
        );

        let mut budget = DecodeBudget::new(self.config.max_decoded_bytes);
        let root = self.decode_root(&mut reader, &table, &mut budget)?;

        let trailing_bytes = reader.remaining();
        if trailing_bytes > 0 {
            warn!(
                offset = reader.position(),
                trailing_bytes, "undecoded bytes after root node"
            );
        }
        debug!(
            nodes = root.node_count(),
            bytes = payload.len(),
            decoded_bytes = budget.used(),
            "decoded map"
        );

        Ok(DecodedMap {
            header,
            root,
            lookup_len: table.len(),
            trailing_bytes,
        })
    }

    fn decode_root(
        &self,
        reader: &mut ByteReader<'_>,
        table: &StringLookupTable,
        budget: &mut DecodeBudget,
    ) -> Result<Node, DecodeError> {
        // Placeholder name index; never resolved.
        reader.read_u16()?;
        let mut root = Node::new(Node::ROOT_NAME);
        self.decode_body(reader, table, budget, &mut root, 1)?;
        Ok(root)
    }

    fn decode_node(
        &self,
        reader: &mut ByteReader<'_>,
        table: &StringLookupTable,
        budget: &mut DecodeBudget,
        depth: usize,
    ) -> Result<Node, DecodeError> {
        if depth > self.config.max_depth {
            return Err(DecodeError::DepthLimitExceeded {
                limit: self.config.max_depth,
            });
        }
        let mut node = Node::new(budget.owned(table.read_ref(reader)?)?);
        self.decode_body(reader, table, budget, &mut node, depth)?;
        Ok(node)
    }

    /// Attributes then children, shared by the root and every other node.
    fn decode_body(
        &self,
        reader: &mut ByteReader<'_>,
        table: &StringLookupTable,
        budget: &mut DecodeBudget,
        node: &mut Node,
        depth: usize,
    ) -> Result<(), DecodeError> {
        let attr_count = reader.read_u8()?;
        for _ in 0..attr_count {
            let name = budget.owned(table.read_ref(reader)?)?;
            let value = attribute::read_value(reader, table, budget)?;
            node.set_attribute(name, value);
        }

        let child_count = usize::from(reader.read_u16()?);
        node.children
            .reserve(child_count.min(reader.remaining() / MIN_NODE_SIZE));
        for _ in 0..child_count {
            let child = self.decode_node(reader, table, budget, depth + 1)?;
            node.children.push(child);
        }
        Ok(())
    }

    /// Decode a payload, or log why it could not be decoded.
    ///
    /// For callers that treat an undecodable file as an ordinary outcome
    /// (foreign or corrupt upload) rather than a fault: the full error is
    /// logged at `warn` together with `source`, and `None` is returned.
    /// This decoder's limits apply as they do for [`decode`](Self::decode).
    #[must_use]
    pub fn decode_or_report(&self, payload: &[u8], source: &str) -> Option<DecodedMap> {
        match self.decode(payload) {
            Ok(decoded) => Some(decoded),
            Err(error) => {
                warn!(%source, %error, bytes = payload.len(), "map is not decodable");
                None
            }
        }
    }
}

/// [`MapDecoder::decode_or_report`] with the default limits.
#[must_use]
pub fn decode_or_report(payload: &[u8], source: &str) -> Option<DecodedMap> {
    MapDecoder::new().decode_or_report(payload, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapbin_encoder::{MapEncoder, NodeBuilder, WireValue};
    use mapbin_types::AttributeValue;
    use mapbin_wire::WireError;

    fn encode(root: &NodeBuilder) -> Vec<u8> {
        MapEncoder::new("TestMap").encode(root).unwrap()
    }

    fn nested(depth: usize) -> NodeBuilder {
        let mut node = NodeBuilder::new("leaf");
        for _ in 1..depth {
            node = NodeBuilder::new("n").child(node);
        }
        node
    }

    #[test]
    fn decodes_minimal_level() {
        let bytes = encode(
            &NodeBuilder::new("Map")
                .child(NodeBuilder::new("Level").attr("x", WireValue::Integer(5))),
        );
        let decoded = MapDecoder::new().decode(&bytes).unwrap();

        assert_eq!(decoded.header.tag, "CELESTE MAP");
        assert_eq!(decoded.header.package, "TestMap");
        assert_eq!(decoded.lookup_len, 3);
        assert_eq!(decoded.trailing_bytes, 0);

        let expected = Node::new("CelesteMap")
            .with_child(Node::new("Level").with_attribute("x", 5));
        assert_eq!(decoded.root, expected);
    }

    #[test]
    fn root_name_is_forced() {
        let bytes = encode(&NodeBuilder::new("Whatever"));
        let decoded = MapDecoder::new().decode(&bytes).unwrap();
        assert_eq!(decoded.root.name, Node::ROOT_NAME);
    }

    #[test]
    fn root_placeholder_is_not_resolved() {
        let mut bytes = encode(&NodeBuilder::new("Map"));
        // Root record is the last 5 bytes; point its name far out of range.
        let at = bytes.len() - 5;
        bytes[at] = 0xFF;
        bytes[at + 1] = 0xFF;
        assert!(MapDecoder::new().decode(&bytes).is_ok());
    }

    #[test]
    fn child_name_out_of_range_fails() {
        let mut bytes = encode(&NodeBuilder::new("Map").child(NodeBuilder::new("c")));
        // Child record is the last 5 bytes.
        let at = bytes.len() - 5;
        bytes[at] = 0x09;
        assert!(matches!(
            MapDecoder::new().decode(&bytes),
            Err(DecodeError::Wire(WireError::InvalidLookupIndex { index: 9, len: 2 }))
        ));
    }

    #[test]
    fn duplicate_attributes_last_wins() {
        let bytes = encode(
            &NodeBuilder::new("Map")
                .attr("a", WireValue::Integer(1))
                .attr("b", WireValue::Boolean(true))
                .attr("a", WireValue::LookupString("two".into())),
        );
        let root = MapDecoder::new().decode(&bytes).unwrap().root;
        assert_eq!(
            root.attributes,
            vec![
                ("a".to_string(), AttributeValue::from("two")),
                ("b".to_string(), AttributeValue::Boolean(true)),
            ]
        );
    }

    #[test]
    fn children_keep_stream_order() {
        let bytes = encode(
            &NodeBuilder::new("Map")
                .child(NodeBuilder::new("Filler"))
                .child(NodeBuilder::new("levels"))
                .child(NodeBuilder::new("Style")),
        );
        let root = MapDecoder::new().decode(&bytes).unwrap().root;
        let names: Vec<_> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Filler", "levels", "Style"]);
    }

    #[test]
    fn trailing_bytes_are_counted_not_fatal() {
        let mut bytes = encode(&NodeBuilder::new("Map"));
        bytes.extend_from_slice(&[0xDE, 0xAD, 0xBE]);
        let decoded = MapDecoder::new().decode(&bytes).unwrap();
        assert_eq!(decoded.trailing_bytes, 3);
    }

    #[test]
    fn every_truncation_fails() {
        let bytes = encode(
            &NodeBuilder::new("Map").child(
                NodeBuilder::new("level")
                    .attr("name", WireValue::String("a-00".into()))
                    .attr("solids", WireValue::LengthEncodedString("00\n0".into()))
                    .attr("alpha", WireValue::Float(0.5)),
            ),
        );
        for len in 0..bytes.len() {
            assert!(
                MapDecoder::new().decode(&bytes[..len]).is_err(),
                "prefix of {len} bytes decoded"
            );
        }
    }

    #[test]
    fn unknown_attribute_tag_aborts_document() {
        let mut bytes = encode(&NodeBuilder::new("Map").attr("x", WireValue::Byte(1)));
        // ... attr name (2) | tag | value | child count (2)
        let tag_at = bytes.len() - 4;
        assert_eq!(bytes[tag_at], 1);
        bytes[tag_at] = 8;
        assert!(matches!(
            MapDecoder::new().decode(&bytes),
            Err(DecodeError::UnknownAttributeType { tag: 8, .. })
        ));
    }

    #[test]
    fn depth_limit_enforced() {
        let config = DecoderConfig {
            max_depth: 4,
            ..DecoderConfig::default()
        };
        let decoder = MapDecoder::with_config(config);

        let ok = encode(&NodeBuilder::new("Map").child(nested(3)));
        assert_eq!(decoder.decode(&ok).unwrap().root.depth(), 4);

        let too_deep = encode(&NodeBuilder::new("Map").child(nested(4)));
        assert!(matches!(
            decoder.decode(&too_deep),
            Err(DecodeError::DepthLimitExceeded { limit: 4 })
        ));
    }

    #[test]
    fn decode_or_report_returns_none_on_garbage() {
        assert!(decode_or_report(&[0x80, 0x80], "garbage.bin").is_none());
        let bytes = encode(&NodeBuilder::new("Map"));
        assert!(decode_or_report(&bytes, "ok.bin").is_some());
    }

    #[test]
    fn decode_or_report_applies_decoder_limits() {
        let bytes = encode(&NodeBuilder::new("Map").child(nested(3)));
        let shallow = MapDecoder::with_config(DecoderConfig {
            max_depth: 3,
            ..DecoderConfig::default()
        });
        assert!(shallow.decode_or_report(&bytes, "deep.bin").is_none());
        assert!(decode_or_report(&bytes, "deep.bin").is_some());
    }

    #[test]
    fn names_are_charged_to_the_budget() {
        // Child name "level" (5) + attribute name "x" (1); the root name
        // is fixed and free.
        let bytes = encode(
            &NodeBuilder::new("Map")
                .child(NodeBuilder::new("level").attr("x", WireValue::Integer(1))),
        );
        let with_limit = |max_decoded_bytes| {
            MapDecoder::with_config(DecoderConfig {
                max_decoded_bytes,
                ..DecoderConfig::default()
            })
        };
        assert!(with_limit(6).decode(&bytes).is_ok());
        assert!(matches!(
            with_limit(5).decode(&bytes),
            Err(DecodeError::DecodedSizeExceeded { limit: 5 })
        ));
    }
}
