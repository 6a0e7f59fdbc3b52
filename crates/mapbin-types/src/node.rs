use crate::value::AttributeValue;

/// A decoded map element: a name, ordered attributes, ordered children.
///
/// Attributes keep first-insertion order; setting an existing name
/// replaces its value in place (last write wins), which is how duplicate
/// attribute records in one node resolve.
///
/// ```text
/// CelesteMap
/// ├── Filler
/// ├── levels
/// │   ├── level  name="a-00" x=0 y=0 …
/// │   │   ├── solids  innerText="000\n0…"
/// │   │   └── entities
/// │   └── level  …
/// └── Style
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    pub name: String,
    pub attributes: Vec<(String, AttributeValue)>,
    pub children: Vec<Node>,
}

impl Node {
    /// Name given to every decoded root, whatever the stream encodes for it.
    pub const ROOT_NAME: &'static str = "CelesteMap";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Insert or overwrite an attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Builder form of [`set_attribute`](Self::set_attribute).
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.set_attribute(name, value);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v))
    }

    /// First child with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follow a `/`-separated path of child names, taking the first match
    /// at each step. An empty path returns `self`.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Node> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Nesting depth of this subtree; a leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Node::depth).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::new(Node::ROOT_NAME)
            .with_child(
                Node::new("levels")
                    .with_child(Node::new("level").with_attribute("name", "a-00"))
                    .with_child(Node::new("level").with_attribute("name", "a-01")),
            )
            .with_child(Node::new("Style"))
    }

    #[test]
    fn duplicate_attribute_keeps_position_and_last_value() {
        let mut node = Node::new("level");
        node.set_attribute("x", 1);
        node.set_attribute("y", 2);
        node.set_attribute("x", 3);
        assert_eq!(node.attributes.len(), 2);
        assert_eq!(node.attributes[0], ("x".to_string(), AttributeValue::Integer(3)));
        assert_eq!(node.attribute("y"), Some(&AttributeValue::Integer(2)));
    }

    #[test]
    fn find_walks_first_matching_children() {
        let root = sample();
        let level = root.find("levels/level").unwrap();
        assert_eq!(level.attribute("name").and_then(AttributeValue::as_str), Some("a-00"));
        assert!(root.find("levels/missing").is_none());
        assert_eq!(root.find("").map(|n| n.name.as_str()), Some(Node::ROOT_NAME));
    }

    #[test]
    fn children_named_filters() {
        let root = sample();
        let levels = root.child("levels").unwrap();
        assert_eq!(levels.children_named("level").count(), 2);
        assert_eq!(levels.children_named("Style").count(), 0);
    }

    #[test]
    fn counts_and_depth() {
        let root = sample();
        assert_eq!(root.node_count(), 5);
        assert_eq!(root.depth(), 3);
        assert_eq!(Node::new("leaf").depth(), 1);
    }
}
