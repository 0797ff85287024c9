use std::collections::HashMap;

use crate::names;
use crate::node::Node;

// -----------------------------------------------------------------------------
// AliasTable

/// Per-call table of type aliases for polymorphic nodes.
///
/// Polymorphic nodes do not carry full type tags; they carry short aliases
/// (`t1`, `t2`, ...) that the document's root maps back to tags. The table
/// is built fresh for every save and load, in first-seen order on the save
/// side, so documents come out deterministic.
#[derive(Debug, Default)]
pub struct AliasTable {
    // Save side: (tag, alias) in first-seen order.
    forward: Vec<(&'static str, String)>,
    // Load side: alias -> tag, read off the root element.
    reverse: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The alias for `tag`, allocating the next `tN` on first sight.
    pub fn alias_for(&mut self, tag: &'static str) -> String {
        if let Some((_, alias)) = self.forward.iter().find(|(t, _)| *t == tag) {
            return alias.clone();
        }
        let alias = format!("t{}", self.forward.len() + 1);
        self.forward.push((tag, alias.clone()));
        alias
    }

    /// Iterates `(alias, tag)` pairs for the root's alias attributes.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.forward.iter().map(|(tag, alias)| (alias.as_str(), *tag))
    }

    /// Reads the alias attributes off a document root.
    pub fn load_root(&mut self, root: &Node) {
        for (name, value) in root.attrs() {
            let Some(token) = name.strip_prefix(&format!("{}:", names::NS_PREFIX)) else {
                continue;
            };
            let is_alias = token
                .strip_prefix('t')
                .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()));
            if is_alias {
                self.reverse.insert(token.to_owned(), value.to_owned());
            }
        }
    }

    /// The tag an alias stands for, if the document declared it.
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.reverse.get(alias).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_allocate_in_first_seen_order_from_one() {
        let mut table = AliasTable::new();
        assert_eq!(table.alias_for("B"), "t1");
        assert_eq!(table.alias_for("A"), "t2");
        assert_eq!(table.alias_for("B"), "t1");

        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs, [("t1", "B"), ("t2", "A")]);
    }

    #[test]
    fn root_attributes_resolve_back_to_tags() {
        let mut root = Node::new("Root");
        root.push_attr("xmlns:xb", names::NS_URI);
        root.push_attr("xb:t1", "Derived");
        root.push_attr("xb:t12", "Other");
        root.push_attr("xb:type", "t1"); // not an alias declaration
        root.push_attr("plain", "x");

        let mut table = AliasTable::new();
        table.load_root(&root);
        assert_eq!(table.resolve("t1"), Some("Derived"));
        assert_eq!(table.resolve("t12"), Some("Other"));
        assert_eq!(table.resolve("type"), None);
        assert_eq!(table.resolve("t2"), None);
    }
}
