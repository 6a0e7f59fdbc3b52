use std::fmt::Write;

use mapbin_types::Node;
use mapbin_wire::MapHeader;

/// Markup renderer: one XML element per node.
///
/// ```text
/// <CelesteMap Package="MyMap">
///   <levels>
///     <level name="a-00" x="0" y="0" />
///   </levels>
/// </CelesteMap>
/// ```
///
/// Node and attribute names go through [`escape_name`]; attribute values
/// use their plain text form with XML character escaping. Only the
/// header's package is kept (as the root attribute `Package`); the
/// document tag is dropped.
///
/// Childless elements are self-closing. With `pretty` off, no whitespace
/// is emitted between elements.
pub struct XmlRenderer;

impl XmlRenderer {
    #[must_use]
    pub fn render(header: &MapHeader, root: &Node, pretty: bool, declaration: bool) -> String {
        let mut out = String::new();
        if declaration {
            out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
            if pretty {
                out.push('\n');
            }
        }
        let root_attributes = vec![("Package".to_string(), xml_escape(&header.package))];
        write_element(&mut out, root, root_attributes, 0, pretty);
        out
    }
}

fn write_element(
    out: &mut String,
    node: &Node,
    mut attributes: Vec<(String, String)>,
    depth: usize,
    pretty: bool,
) {
    for (name, value) in &node.attributes {
        let name = escape_name(name);
        let value = xml_escape(&value.to_string());
        // Distinct source names can collide once escaped ("a b", "a_b").
        match attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => attributes.push((name, value)),
        }
    }

    let indent = if pretty { "  ".repeat(depth) } else { String::new() };
    let tag = escape_name(&node.name);

    let _ = write!(out, "{indent}<{tag}");
    for (name, value) in &attributes {
        let _ = write!(out, " {name}=\"{value}\"");
    }

    if node.children.is_empty() {
        out.push_str(" />");
    } else {
        out.push('>');
        for child in &node.children {
            if pretty {
                out.push('\n');
            }
            write_element(out, child, Vec::new(), depth + 1, pretty);
        }
        if pretty {
            out.push('\n');
        }
        let _ = write!(out, "{indent}</{tag}>");
    }
}

/// Turn an arbitrary string into a legal XML name.
///
/// 1. Every character outside `[A-Za-z0-9:_.-]` becomes `_`.
/// 2. If the first character is then not a letter, digit, `_` or `:`
///    (that is, it is `.` or `-`), it alone becomes `_`.
///
/// Digits may lead a name. An empty string becomes `_`.
///
/// ```text
/// ".hidden"  →  "_hidden"
/// "a b"      →  "a_b"
/// "9slice"   →  "9slice"
/// ```
#[must_use]
pub fn escape_name(name: &str) -> String {
    let mut escaped: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, ':' | '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    match escaped.chars().next() {
        None => escaped.push('_'),
        Some(first) if !(first.is_ascii_alphanumeric() || first == '_' || first == ':') => {
            escaped.replace_range(..first.len_utf8(), "_");
        }
        Some(_) => {}
    }
    escaped
}

/// Escape text for use inside a double-quoted attribute value.
///
/// Whitespace control characters are written as character references so
/// multi-line values (tile grids) survive attribute-value normalization.
/// Characters XML 1.0 forbids outright (other C0 controls, U+FFFE,
/// U+FFFF) have no legal reference form and become U+FFFD.
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            c if !is_xml_char(c) => out.push(char::REPLACEMENT_CHARACTER),
            c => out.push(c),
        }
    }
    out
}

/// The XML 1.0 `Char` production. Surrogates are not `char`s, so only
/// the C0 controls and the two noncharacters need excluding.
fn is_xml_char(c: char) -> bool {
    !matches!(c, '\0'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_name_examples() {
        assert_eq!(escape_name(".hidden"), "_hidden");
        assert_eq!(escape_name("a b"), "a_b");
        assert_eq!(escape_name("9slice"), "9slice");
        assert_eq!(escape_name("-dash"), "_dash");
        assert_eq!(escape_name("ns:tag.name-1"), "ns:tag.name-1");
        assert_eq!(escape_name("spring/trigger"), "spring_trigger");
        assert_eq!(escape_name("é"), "_");
        assert_eq!(escape_name(""), "_");
    }

    #[test]
    fn escape_name_leading_space_replaced_once() {
        assert_eq!(escape_name(" x"), "_x");
        assert_eq!(escape_name(".."), "_.");
    }

    #[test]
    fn attribute_values_escaped() {
        assert_eq!(
            xml_escape("a<b & \"c\"\n'd'"),
            "a&lt;b &amp; &quot;c&quot;&#10;&apos;d&apos;"
        );
    }

    #[test]
    fn forbidden_characters_replaced() {
        assert_eq!(xml_escape("a\u{1}b\0c\u{1B}"), "a\u{FFFD}b\u{FFFD}c\u{FFFD}");
        assert_eq!(xml_escape("\u{FFFE}\u{FFFF}"), "\u{FFFD}\u{FFFD}");
        assert_eq!(xml_escape("\u{7F}é\u{10000}"), "\u{7F}é\u{10000}");
    }

    #[test]
    fn whitespace_controls_kept_as_references() {
        assert_eq!(xml_escape("\t\r\n"), "&#9;&#13;&#10;");
        for c in ['\t', '\n', '\r', ' '] {
            assert!(is_xml_char(c));
        }
    }

    #[test]
    fn pretty_output() {
        let root = Node::new(Node::ROOT_NAME).with_child(
            Node::new("levels").with_child(
                Node::new("level")
                    .with_attribute("name", "a-00")
                    .with_attribute("x", 0),
            ),
        );
        let xml = XmlRenderer::render(&MapHeader::new("My Map"), &root, true, false);
        assert_eq!(
            xml,
            "<CelesteMap Package=\"My Map\">\n  <levels>\n    <level name=\"a-00\" x=\"0\" />\n  </levels>\n</CelesteMap>"
        );
    }

    #[test]
    fn compact_output_with_declaration() {
        let root = Node::new(Node::ROOT_NAME).with_child(Node::new("Style"));
        let xml = XmlRenderer::render(&MapHeader::new("P"), &root, false, true);
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><CelesteMap Package=\"P\"><Style /></CelesteMap>"
        );
    }

    #[test]
    fn header_tag_is_dropped() {
        let xml = XmlRenderer::render(&MapHeader::new("P"), &Node::new(Node::ROOT_NAME), false, false);
        assert!(!xml.contains("CELESTE MAP"));
        assert_eq!(xml, "<CelesteMap Package=\"P\" />");
    }

    #[test]
    fn colliding_escaped_attribute_names_last_wins() {
        let node = Node::new("e")
            .with_attribute("a b", 1)
            .with_attribute("a_b", 2);
        let mut out = String::new();
        write_element(&mut out, &node, Vec::new(), 0, false);
        assert_eq!(out, "<e a_b=\"2\" />");
    }

    #[test]
    fn float_text_forms() {
        let node = Node::new("e")
            .with_attribute("f", 0.5f32)
            .with_attribute("n", f32::NAN)
            .with_attribute("i", f32::NEG_INFINITY);
        let mut out = String::new();
        write_element(&mut out, &node, Vec::new(), 0, false);
        assert_eq!(out, "<e f=\"0.5\" n=\"NaN\" i=\"-Infinity\" />");
    }
}
