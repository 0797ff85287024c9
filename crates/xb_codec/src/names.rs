//! Reserved names and name hygiene.
//!
//! Everything the codec writes for its own bookkeeping lives under one
//! namespace so it can never collide with user property names.

/// Namespace URI for codec bookkeeping.
pub const NS_URI: &str = "urn:xb:codec";
/// Prefix bound to [`NS_URI`].
pub const NS_PREFIX: &str = "xb";
/// Attribute declaring the namespace on the root element.
pub const NS_DECL: &str = "xmlns:xb";

/// Attribute naming the type alias of a polymorphic node.
pub const TYPE_ATTR: &str = "xb:type";
/// Attribute carrying an array's comma-joined dimension list, e.g. `3,2`.
pub const DIMS_ATTR: &str = "xb:dims";

/// Element wrapping an object's lifecycle side-channel entries.
pub const EXTRA_NODE: &str = "xb:Extra";
/// One side-channel entry inside [`EXTRA_NODE`].
pub const ENTRY_NODE: &str = "xb:Entry";
/// Attribute on [`ENTRY_NODE`] holding the entry key.
pub const ENTRY_KEY_ATTR: &str = "key";
/// Element replacing a confidential property's subtree.
pub const SECRET_NODE: &str = "xb:Secret";

/// Wrapper element around a collection's items.
pub const ITEMS_NODE: &str = "Items";
/// One collection item.
pub const ITEM_NODE: &str = "Item";
/// The key half of a mapping item or pair.
pub const KEY_NODE: &str = "Key";
/// The value half of a mapping item or pair.
pub const VALUE_NODE: &str = "Value";

/// The attribute name recording the alias `alias` in the root alias table.
pub fn alias_attr(alias: &str) -> String {
    format!("{NS_PREFIX}:{alias}")
}

/// Rewrites `name` into a well-formed element name.
///
/// Type tags can contain characters XML names cannot (generic brackets,
/// path separators); every offending character becomes a dot. An empty or
/// digit-leading result gets a leading underscore.
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let ok = c.is_alphanumeric() || c == '_' || c == '-' || c == '.';
        out.push(if ok { c } else { '.' });
    }
    let starts_ok = out
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_');
    if !starts_ok {
        out.insert(0, '_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_passes_clean_names_through() {
        assert_eq!(sanitize_name("SomeData"), "SomeData");
        assert_eq!(sanitize_name("with_underscore"), "with_underscore");
    }

    #[test]
    fn sanitize_rewrites_offending_characters() {
        assert_eq!(sanitize_name("List<Item>"), "List.Item.");
        assert_eq!(sanitize_name("a::b"), "a..b");
    }

    #[test]
    fn sanitize_guards_the_first_character() {
        assert_eq!(sanitize_name("1st"), "_1st");
        assert_eq!(sanitize_name(""), "_");
        assert_eq!(sanitize_name(".dot"), "_.dot");
    }

    #[test]
    fn alias_attrs_carry_the_prefix() {
        assert_eq!(alias_attr("t1"), "xb:t1");
    }
}
