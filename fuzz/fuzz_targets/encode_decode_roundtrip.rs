#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mapbin_decoder::{DecoderConfig, MapDecoder};
use mapbin_encoder::{MapEncoder, NodeBuilder, WireValue};
use mapbin_types::{AttributeValue, Node};

#[derive(Debug, Arbitrary)]
enum FuzzValue {
    Boolean(bool),
    Byte(u8),
    Short(i16),
    Integer(i32),
    Float(u32),
    LookupString(String),
    String(String),
    /// Bytes taken as U+0000..=U+00FF code points.
    LengthEncoded(Vec<u8>),
}

#[derive(Debug, Arbitrary)]
struct FuzzNode {
    name: String,
    attributes: Vec<(String, FuzzValue)>,
    children: Vec<FuzzNode>,
}

fn wire_value(value: &FuzzValue) -> WireValue {
    match value {
        FuzzValue::Boolean(v) => WireValue::Boolean(*v),
        FuzzValue::Byte(v) => WireValue::Byte(*v),
        FuzzValue::Short(v) => WireValue::Short(*v),
        FuzzValue::Integer(v) => WireValue::Integer(*v),
        FuzzValue::Float(bits) => WireValue::Float(f32::from_bits(*bits)),
        FuzzValue::LookupString(s) => WireValue::LookupString(s.clone()),
        FuzzValue::String(s) => WireValue::String(s.clone()),
        FuzzValue::LengthEncoded(bytes) => {
            WireValue::LengthEncodedString(bytes.iter().map(|&b| char::from(b)).collect())
        }
    }
}

fn builder(node: &FuzzNode) -> NodeBuilder {
    let mut b = NodeBuilder::new(node.name.clone());
    for (name, value) in &node.attributes {
        b = b.attr(name.clone(), wire_value(value));
    }
    for child in &node.children {
        b = b.child(builder(child));
    }
    b
}

/// The tree the decoder should produce: duplicate names collapse in place.
fn expected(node: &FuzzNode) -> Node {
    let mut out = Node::new(node.name.clone());
    for (name, value) in &node.attributes {
        let value = match wire_value(value) {
            WireValue::Boolean(v) => AttributeValue::Boolean(v),
            WireValue::Byte(v) => AttributeValue::Byte(v),
            WireValue::Short(v) => AttributeValue::Short(v),
            WireValue::Integer(v) => AttributeValue::Integer(v),
            WireValue::Float(v) => AttributeValue::Float(v),
            WireValue::LookupString(s) | WireValue::String(s) | WireValue::LengthEncodedString(s) => {
                AttributeValue::String(s)
            }
        };
        out.set_attribute(name.clone(), value);
    }
    out.children = node.children.iter().map(expected).collect();
    out
}

fn same_bits(a: &Node, b: &Node) -> bool {
    a.name == b.name
        && a.attributes.len() == b.attributes.len()
        && a.attributes.iter().zip(&b.attributes).all(|((na, va), (nb, vb))| {
            na == nb
                && match (va, vb) {
                    (AttributeValue::Float(x), AttributeValue::Float(y)) => x.to_bits() == y.to_bits(),
                    (x, y) => x == y,
                }
        })
        && a.children.len() == b.children.len()
        && a.children.iter().zip(&b.children).all(|(x, y)| same_bits(x, y))
}

// Fuzz target: arbitrary tree encode->decode roundtrip.
//
// Trees the encoder rejects (width limits) or the decoder would refuse
// (depth limit) are skipped; every other tree must decode to the same
// names, values and float bit patterns.
fuzz_target!(|input: (String, FuzzNode)| {
    let (package, root) = input;
    let mut want = expected(&root);
    if want.depth() > DecoderConfig::DEFAULT_MAX_DEPTH {
        return;
    }
    let Ok(bytes) = MapEncoder::new(package.clone()).encode(&builder(&root)) else {
        return;
    };
    let decoded = MapDecoder::new()
        .decode(&bytes)
        .expect("encoder output must decode");

    assert_eq!(decoded.header.package, package);
    assert_eq!(decoded.trailing_bytes, 0);

    want.name = Node::ROOT_NAME.to_string();
    assert!(same_bits(&decoded.root, &want), "{:?} != {:?}", decoded.root, want);
});
