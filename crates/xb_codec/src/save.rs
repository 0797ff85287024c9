//! The save driver: object graph to [`Node`] tree.

use tracing::trace;
use xb_reflect::ops::Odometer;
use xb_reflect::{ExtraData, GraphValue, Object, TypeRegistry, ValueRef};

use crate::alias::AliasTable;
use crate::error::Error;
use crate::names;
use crate::node::Node;
use crate::secret::SecretBox;
use crate::text;
use crate::xml;

/// State for one save call. Built fresh per call; the formatter itself
/// stays immutable.
pub(crate) struct SaveCtx<'a> {
    pub aliases: AliasTable,
    /// Set once any reserved name is written; controls the root declaration.
    pub ns_needed: bool,
    pub secrets: &'a SecretBox,
    pub registry: &'a TypeRegistry,
}

/// Renders `object` as a document root, with namespace declaration and
/// alias table when the document used any reserved names.
pub(crate) fn save_root(object: &dyn Object, ctx: &mut SaveCtx<'_>) -> Result<Node, Error> {
    let mut root = Node::new(names::sanitize_name(object.type_tag()));
    save_object(object, &mut root, ctx)?;

    if ctx.ns_needed {
        root.push_attr(names::NS_DECL, names::NS_URI);
        for (alias, tag) in ctx.aliases.iter() {
            root.push_attr(names::alias_attr(alias), tag);
        }
    }
    Ok(root)
}

fn save_object(object: &dyn Object, node: &mut Node, ctx: &mut SaveCtx<'_>) -> Result<(), Error> {
    trace!(tag = object.type_tag(), "saving object");

    let mut extra = ExtraData::new();
    object.before_save(&mut extra);

    for spec in object.properties() {
        let Some(value) = object.property(spec.name) else {
            continue;
        };
        let mut child = Node::new(spec.name);
        save_value(value, &mut child, ctx)?;

        if spec.confidential {
            let fragment = xml::node_to_fragment(&child)?;
            child = Node::with_text(names::SECRET_NODE, ctx.secrets.seal(&fragment));
            ctx.ns_needed = true;
        }
        node.push_child(child);
    }

    // The sidecar is written before the after-save hook runs, so only
    // entries placed by the before-save hook travel with the document.
    if !extra.is_empty() {
        ctx.ns_needed = true;
        let mut sidecar = Node::new(names::EXTRA_NODE);
        for (key, value) in extra.iter() {
            let mut entry = Node::with_text(names::ENTRY_NODE, value);
            entry.push_attr(names::ENTRY_KEY_ATTR, key);
            sidecar.push_child(entry);
        }
        node.push_child(sidecar);
    }
    object.after_save(&mut extra);
    Ok(())
}

fn save_value(value: &dyn GraphValue, node: &mut Node, ctx: &mut SaveCtx<'_>) -> Result<(), Error> {
    match value.value_ref() {
        // A vacant optional stores as an element with nothing in it.
        ValueRef::Null => {}
        ValueRef::Text(text) => node.set_text(text),
        ValueRef::Scalar(scalar) => node.set_text(scalar.encode()),
        ValueRef::Date(date) => node.set_text(text::encode_date(date)),
        ValueRef::Duration(duration) => node.set_text(text::encode_duration(duration)),
        ValueRef::Pair(pair) => {
            let mut key = Node::new(names::KEY_NODE);
            save_value(pair.entry_key(), &mut key, ctx)?;
            node.push_child(key);

            let mut val = Node::new(names::VALUE_NODE);
            save_value(pair.entry_value(), &mut val, ctx)?;
            node.push_child(val);
        }
        ValueRef::Array(tensor) => {
            let dims = tensor.dims();
            let rendered: Vec<String> = dims.iter().map(usize::to_string).collect();
            node.push_attr(names::DIMS_ATTR, rendered.join(","));
            ctx.ns_needed = true;

            for tuple in Odometer::new(&dims) {
                let Some(item) = tensor.item(&tuple) else {
                    continue;
                };
                let mut child = Node::new(names::ITEM_NODE);
                save_value(item, &mut child, ctx)?;
                node.push_child(child);
            }
        }
        ValueRef::Sequence(sequence) => {
            let mut items = Node::new(names::ITEMS_NODE);
            for index in 0..sequence.item_len() {
                let Some(item) = sequence.item(index) else {
                    continue;
                };
                let mut child = Node::new(names::ITEM_NODE);
                save_value(item, &mut child, ctx)?;
                items.push_child(child);
            }
            node.push_child(items);
        }
        // Stacks store top-first, the order their items would pop in.
        ValueRef::Stack(stack) => {
            let mut items = Node::new(names::ITEMS_NODE);
            for depth in 0..stack.item_len() {
                let Some(item) = stack.peek(depth) else {
                    continue;
                };
                let mut child = Node::new(names::ITEM_NODE);
                save_value(item, &mut child, ctx)?;
                items.push_child(child);
            }
            node.push_child(items);
        }
        ValueRef::Queue(queue) => {
            let mut items = Node::new(names::ITEMS_NODE);
            for index in 0..queue.item_len() {
                let Some(item) = queue.item(index) else {
                    continue;
                };
                let mut child = Node::new(names::ITEM_NODE);
                save_value(item, &mut child, ctx)?;
                items.push_child(child);
            }
            node.push_child(items);
        }
        ValueRef::Mapping(mapping) => {
            let mut items = Node::new(names::ITEMS_NODE);
            for (entry_key, entry_value) in mapping.iter_entries() {
                let mut item = Node::new(names::ITEM_NODE);

                let mut key = Node::new(names::KEY_NODE);
                save_value(entry_key, &mut key, ctx)?;
                item.push_child(key);

                let mut val = Node::new(names::VALUE_NODE);
                save_value(entry_value, &mut val, ctx)?;
                item.push_child(val);

                items.push_child(item);
            }
            node.push_child(items);
        }
        ValueRef::Object(object) => save_object(object, node, ctx)?,
        ValueRef::Dynamic(poly) => {
            let Some(object) = poly.get() else {
                // Empty slot stores vacant, like a vacant optional.
                return Ok(());
            };
            let tag = object.type_tag();
            if !ctx.registry.contains(tag) {
                return Err(Error::UnregisteredType(tag.to_owned()));
            }
            let alias = ctx.aliases.alias_for(tag);
            node.push_attr(names::TYPE_ATTR, alias);
            ctx.ns_needed = true;
            save_object(object, node, ctx)?;
        }
    }
    Ok(())
}
