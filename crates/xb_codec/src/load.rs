//! The load driver: [`Node`] tree back into an object graph.

use std::borrow::Cow;

use tracing::trace;
use xb_reflect::ops::Odometer;
use xb_reflect::{ExtraData, GraphValue, Object, Tagged, TypeRegistry, ValueMut};

use crate::alias::AliasTable;
use crate::error::Error;
use crate::names;
use crate::node::Node;
use crate::secret::SecretBox;
use crate::text;
use crate::xml;

/// State for one load call.
pub(crate) struct LoadCtx<'a> {
    pub aliases: AliasTable,
    pub secrets: &'a SecretBox,
    pub registry: &'a TypeRegistry,
}

/// Populates a fresh `T` from a parsed document root.
pub(crate) fn load_root<T>(root: &Node, ctx: &mut LoadCtx<'_>) -> Result<T, Error>
where
    T: Object + Tagged + Default,
{
    let expected = names::sanitize_name(T::TAG);
    if root.name() != expected {
        return Err(Error::UnexpectedRoot {
            expected,
            found: root.name().to_owned(),
        });
    }

    ctx.aliases.load_root(root);
    let mut value = T::default();
    load_object(&mut value, root, ctx)?;
    Ok(value)
}

fn load_object(
    object: &mut dyn Object,
    node: &Node,
    ctx: &mut LoadCtx<'_>,
) -> Result<(), Error> {
    trace!(tag = object.type_tag(), "loading object");

    let node = reveal(node, ctx)?;
    let node = node.as_ref();

    let mut extra = ExtraData::new();
    if let Some(sidecar) = node.child(names::EXTRA_NODE) {
        for entry in sidecar.children_named(names::ENTRY_NODE) {
            let key = entry
                .attr(names::ENTRY_KEY_ATTR)
                .ok_or_else(|| Error::MissingAttribute {
                    node: entry.name().to_owned(),
                    attr: names::ENTRY_KEY_ATTR.to_owned(),
                })?;
            extra.set(key, entry.text().unwrap_or_default());
        }
    }

    object.before_load(&mut extra);

    for spec in object.properties() {
        // A property absent from the document keeps its default.
        let Some(child) = node.child(spec.name) else {
            continue;
        };
        let Some(value) = object.property_mut(spec.name) else {
            continue;
        };
        load_value(value, child, ctx)?;
    }

    object.after_load(&mut extra);
    Ok(())
}

/// Replaces concealed children with their decrypted subtrees, cloning the
/// node only when concealed children are actually present.
fn reveal<'n>(node: &'n Node, ctx: &LoadCtx<'_>) -> Result<Cow<'n, Node>, Error> {
    if node.child(names::SECRET_NODE).is_none() {
        return Ok(Cow::Borrowed(node));
    }

    let mut copy = node.clone();
    for child in copy.children_mut() {
        if child.name() == names::SECRET_NODE {
            let fragment = ctx.secrets.open(child.text().unwrap_or_default())?;
            *child = xml::parse_fragment(&fragment)?;
        }
    }
    Ok(Cow::Owned(copy))
}

fn load_value(
    value: &mut dyn GraphValue,
    node: &Node,
    ctx: &mut LoadCtx<'_>,
) -> Result<(), Error> {
    match value.value_mut() {
        ValueMut::Text(text) => {
            *text = node.text().unwrap_or_default().to_owned();
        }
        ValueMut::Scalar(scalar) => {
            scalar.decode(node.text().unwrap_or_default())?;
        }
        ValueMut::Date(date) => {
            *date = text::decode_date(node.text().unwrap_or_default())?;
        }
        ValueMut::Duration(duration) => {
            *duration = text::decode_duration(node.text().unwrap_or_default())?;
        }
        ValueMut::Option(slot) => {
            if node.is_vacant() && node.attr(names::TYPE_ATTR).is_none() {
                slot.vacate();
            } else {
                load_value(slot.occupy_default(), node, ctx)?;
            }
        }
        ValueMut::Pair(pair) => {
            if let Some(key) = node.child(names::KEY_NODE) {
                load_value(pair.entry_key_mut(), key, ctx)?;
            }
            if let Some(val) = node.child(names::VALUE_NODE) {
                load_value(pair.entry_value_mut(), val, ctx)?;
            }
        }
        ValueMut::Array(tensor) => {
            let dims_text =
                node.attr(names::DIMS_ATTR)
                    .ok_or_else(|| Error::MissingAttribute {
                        node: node.name().to_owned(),
                        attr: names::DIMS_ATTR.to_owned(),
                    })?;
            let dims = parse_dims(dims_text)?;
            tensor.reshape(&dims)?;

            let items: Vec<&Node> = node.children_named(names::ITEM_NODE).collect();
            let expected: usize = dims.iter().product();
            if items.len() != expected {
                return Err(Error::Malformed(format!(
                    "array <{}> declares {} items but carries {}",
                    node.name(),
                    expected,
                    items.len()
                )));
            }
            for (tuple, item) in Odometer::new(&dims).zip(items) {
                let Some(slot) = tensor.item_mut(&tuple) else {
                    return Err(Error::Malformed(format!(
                        "array <{}> has no slot at {:?}",
                        node.name(),
                        tuple
                    )));
                };
                load_value(slot, item, ctx)?;
            }
        }
        ValueMut::Sequence(sequence) => {
            sequence.clear_items();
            if let Some(items) = node.child(names::ITEMS_NODE) {
                for item in items.children_named(names::ITEM_NODE) {
                    load_value(sequence.append_default(), item, ctx)?;
                }
            }
        }
        // Stored top-first; pushing in reverse file order rebuilds the
        // original pop order.
        ValueMut::Stack(stack) => {
            stack.clear_items();
            if let Some(items) = node.child(names::ITEMS_NODE) {
                let stored: Vec<&Node> = items.children_named(names::ITEM_NODE).collect();
                for item in stored.into_iter().rev() {
                    load_value(stack.push_default(), item, ctx)?;
                }
            }
        }
        ValueMut::Queue(queue) => {
            queue.clear_items();
            if let Some(items) = node.child(names::ITEMS_NODE) {
                for item in items.children_named(names::ITEM_NODE) {
                    load_value(queue.enqueue_default(), item, ctx)?;
                }
            }
        }
        ValueMut::Mapping(mapping) => {
            mapping.clear_entries();
            if let Some(items) = node.child(names::ITEMS_NODE) {
                for item in items.children_named(names::ITEM_NODE) {
                    let (mut entry_key, mut entry_value) = mapping.default_entry();
                    if let Some(key) = item.child(names::KEY_NODE) {
                        load_value(entry_key.as_mut(), key, ctx)?;
                    }
                    if let Some(val) = item.child(names::VALUE_NODE) {
                        load_value(entry_value.as_mut(), val, ctx)?;
                    }
                    mapping.insert_entry(entry_key, entry_value)?;
                }
            }
        }
        ValueMut::Object(object) => load_object(object, node, ctx)?,
        ValueMut::Dynamic(poly) => {
            let Some(alias) = node.attr(names::TYPE_ATTR) else {
                if node.is_vacant() {
                    poly.vacate();
                    return Ok(());
                }
                return Err(Error::MissingAlias {
                    property: node.name().to_owned(),
                });
            };
            let tag = ctx
                .aliases
                .resolve(alias)
                .ok_or_else(|| Error::UnknownAlias(alias.to_owned()))?
                .to_owned();
            let Some(instance) = ctx.registry.create(&tag) else {
                return Err(Error::UnregisteredType(tag));
            };
            let object = poly.replace(instance);
            load_object(object, node, ctx)?;
        }
    }
    Ok(())
}

fn parse_dims(text: &str) -> Result<Vec<usize>, Error> {
    text.split(',')
        .map(|token| token.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| Error::BadDimensions(text.to_owned()))
}
