// -----------------------------------------------------------------------------
// Node

/// One element of a document tree.
///
/// `Node` is the in-memory form both halves of the codec meet at: the save
/// path builds a tree of nodes from the object graph and the XML layer
/// renders it; the load path parses XML into a tree and the object graph is
/// populated from it. Attribute and child order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    name: String,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a leaf node carrying `text`.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut node = Self::new(name);
        node.text = Some(text.into());
        node
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn push_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.push((name.into(), value.into()));
    }

    /// The value of the attribute named `name`, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn clear_text(&mut self) {
        self.text = None;
    }

    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    /// The first child element named `name`.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All child elements named `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Whether this node carries neither text nor children.
    ///
    /// A vacant node is the stored form of an empty optional or polymorphic
    /// slot.
    pub fn is_vacant(&self) -> bool {
        self.text.is_none() && self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        let mut root = Node::new("Root");
        root.push_child(Node::with_text("a", "1"));
        root.push_child(Node::with_text("b", "2"));
        root.push_child(Node::with_text("a", "3"));

        assert_eq!(root.child("a").and_then(Node::text), Some("1"));
        assert_eq!(root.children_named("a").count(), 2);
        assert!(root.child("c").is_none());
    }

    #[test]
    fn vacancy() {
        assert!(Node::new("Empty").is_vacant());
        assert!(!Node::with_text("T", "").is_vacant());

        let mut parent = Node::new("P");
        parent.push_child(Node::new("C"));
        assert!(!parent.is_vacant());
    }

    #[test]
    fn attrs_preserve_order() {
        let mut node = Node::new("N");
        node.push_attr("z", "1");
        node.push_attr("a", "2");
        let names: Vec<_> = node.attrs().map(|(n, _)| n).collect();
        assert_eq!(names, ["z", "a"]);
        assert_eq!(node.attr("a"), Some("2"));
    }
}
