use mapbin_types::{AttributeValue, Node};
use mapbin_wire::MapHeader;
use serde_json::{Map, Number, Value};

use crate::error::DriverError;

/// Structured-document renderer: one JSON object per node.
///
/// ```json
/// {
///   "name": "CelesteMap",
///   "attributes": { "Header": "CELESTE MAP", "Package": "MyMap" },
///   "children": [
///     { "name": "Level", "attributes": { "x": 5 }, "children": [] }
///   ]
/// }
/// ```
///
/// Values keep their native JSON type. JSON has no literal for
/// non-finite numbers, so those floats become the strings `"+Infinity"`,
/// `"-Infinity"` and `"NaN"`. Finite floats are widened to `f64`, which
/// is exact.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Build the JSON value for a decoded map.
    ///
    /// The header's tag and package become the root attributes `Header`
    /// and `Package`, ahead of the root's own attributes.
    #[must_use]
    pub fn to_value(header: &MapHeader, root: &Node) -> Value {
        let mut attributes = Map::new();
        attributes.insert("Header".to_string(), Value::from(header.tag.as_str()));
        attributes.insert("Package".to_string(), Value::from(header.package.as_str()));
        node_value(root, attributes)
    }

    /// Render a decoded map as JSON text.
    ///
    /// # Errors
    ///
    /// [`DriverError::Json`] if serialization fails.
    pub fn render(header: &MapHeader, root: &Node, pretty: bool) -> Result<String, DriverError> {
        let value = Self::to_value(header, root);
        let text = if pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(text)
    }
}

fn node_value(node: &Node, mut attributes: Map<String, Value>) -> Value {
    for (name, value) in &node.attributes {
        attributes.insert(name.clone(), attribute_value(value));
    }
    let children = node
        .children
        .iter()
        .map(|child| node_value(child, Map::new()))
        .collect();

    let mut object = Map::new();
    object.insert("name".to_string(), Value::from(node.name.as_str()));
    object.insert("attributes".to_string(), Value::Object(attributes));
    object.insert("children".to_string(), Value::Array(children));
    Value::Object(object)
}

/// Map one attribute to its JSON value.
#[must_use]
pub fn attribute_value(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::Boolean(v) => Value::Bool(*v),
        AttributeValue::Byte(v) => Value::from(*v),
        AttributeValue::Short(v) => Value::from(*v),
        AttributeValue::Integer(v) => Value::from(*v),
        AttributeValue::Float(v) => float_value(*v),
        AttributeValue::String(s) => Value::from(s.as_str()),
    }
}

fn float_value(v: f32) -> Value {
    if v.is_nan() {
        return Value::from("NaN");
    }
    if v.is_infinite() {
        return Value::from(if v.is_sign_positive() { "+Infinity" } else { "-Infinity" });
    }
    // from_f64 only refuses non-finite input, handled above.
    Number::from_f64(f64::from(v)).map_or(Value::Null, Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_level_shape() {
        let root = Node::new(Node::ROOT_NAME).with_child(Node::new("Level").with_attribute("x", 5));
        let value = JsonRenderer::to_value(&MapHeader::new("P"), &root);
        assert_eq!(
            value,
            json!({
                "name": "CelesteMap",
                "attributes": { "Header": "CELESTE MAP", "Package": "P" },
                "children": [
                    { "name": "Level", "attributes": { "x": 5 }, "children": [] }
                ]
            })
        );
    }

    #[test]
    fn float_sentinels() {
        assert_eq!(float_value(f32::INFINITY), json!("+Infinity"));
        assert_eq!(float_value(f32::NEG_INFINITY), json!("-Infinity"));
        assert_eq!(float_value(f32::NAN), json!("NaN"));
        assert_eq!(float_value(f32::from_bits(0xFFC0_0001)), json!("NaN"));
    }

    #[test]
    fn finite_floats_are_exact() {
        assert_eq!(float_value(1.5), json!(1.5));
        assert_eq!(float_value(0.1), json!(f64::from(0.1f32)));
        assert_eq!(float_value(-0.0).as_f64(), Some(0.0));
    }

    #[test]
    fn native_types_preserved() {
        let node = Node::new("e")
            .with_attribute("b", true)
            .with_attribute("u", 200u8)
            .with_attribute("s", -7i16)
            .with_attribute("t", "text");
        let value = node_value(&node, Map::new());
        assert_eq!(
            value["attributes"],
            json!({ "b": true, "u": 200, "s": -7, "t": "text" })
        );
    }

    #[test]
    fn attribute_order_follows_decode_order() {
        let root = Node::new(Node::ROOT_NAME)
            .with_attribute("zeta", 1)
            .with_attribute("alpha", 2);
        let text = JsonRenderer::render(&MapHeader::new("P"), &root, false).unwrap();
        assert_eq!(
            text,
            r#"{"name":"CelesteMap","attributes":{"Header":"CELESTE MAP","Package":"P","zeta":1,"alpha":2},"children":[]}"#
        );
    }

    #[test]
    fn root_attribute_named_package_overrides_header() {
        let root = Node::new(Node::ROOT_NAME).with_attribute("Package", "inner");
        let value = JsonRenderer::to_value(&MapHeader::new("outer"), &root);
        assert_eq!(value["attributes"]["Package"], json!("inner"));
    }
}
