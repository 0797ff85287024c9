use std::collections::BTreeMap;

use crate::value::GraphValue;

// -----------------------------------------------------------------------------
// Property catalog

/// One entry in an object's property catalog.
///
/// Catalogs are built at compile time by the [`describe!`](crate::describe)
/// macro; a field left out of the `describe!` block simply has no entry and
/// is invisible to the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySpec {
    /// The property name, also used as its element name in documents.
    pub name: &'static str,
    /// Whether the property's subtree is concealed under the formatter's
    /// passphrase-derived key.
    pub confidential: bool,
}

// -----------------------------------------------------------------------------
// Tagged

/// A type with a stable document tag.
///
/// The tag names the type in documents: as the root element name and as the
/// target of alias resolution for polymorphic slots. It must stay stable
/// across builds for old documents to remain readable.
pub trait Tagged {
    const TAG: &'static str;
}

// -----------------------------------------------------------------------------
// Object

/// A class-shaped value with a named property catalog.
///
/// Objects are the interior nodes of a graph: each one lists its properties
/// via [`properties`] and hands out the field behind a name via [`property`]
/// and [`property_mut`]. Implementations come from the
/// [`describe!`](crate::describe) macro.
///
/// [`properties`]: Object::properties
/// [`property`]: Object::property
/// [`property_mut`]: Object::property_mut
pub trait Object: GraphValue + Lifecycle {
    /// The document tag of this object's concrete type.
    fn type_tag(&self) -> &'static str;

    /// This type's property catalog, in declaration order.
    fn properties(&self) -> &'static [PropertySpec];

    /// Borrows the property named `name`, if the catalog has it.
    fn property(&self, name: &str) -> Option<&dyn GraphValue>;

    /// Mutably borrows the property named `name`, if the catalog has it.
    fn property_mut(&mut self, name: &str) -> Option<&mut dyn GraphValue>;
}

// -----------------------------------------------------------------------------
// Lifecycle

/// Hooks fired around an object's save and load.
///
/// All four default to no-ops. Save-side hooks take `&self` since the object
/// is borrowed by the writer; state that must change during a save goes in a
/// [`Cell`](std::cell::Cell) or in the [`ExtraData`] side channel.
///
/// The side channel travels with the document: entries placed by
/// [`before_save`] are written into a sidecar block once the object's
/// properties are encoded, and the same entries are handed back to
/// [`before_load`] and [`after_load`] when the document is read. The
/// sidecar is already written by the time [`after_save`] runs, so entries
/// added there do not persist. Entries are plain strings; both sides must
/// agree on the keys.
///
/// [`before_save`]: Lifecycle::before_save
/// [`after_save`]: Lifecycle::after_save
/// [`before_load`]: Lifecycle::before_load
/// [`after_load`]: Lifecycle::after_load
pub trait Lifecycle {
    /// Runs before this object's properties are written.
    fn before_save(&self, _extra: &mut ExtraData) {}

    /// Runs after this object's properties are written.
    fn after_save(&self, _extra: &mut ExtraData) {}

    /// Runs before this object's properties are populated.
    fn before_load(&mut self, _extra: &mut ExtraData) {}

    /// Runs after this object's properties are populated.
    fn after_load(&mut self, _extra: &mut ExtraData) {}
}

// -----------------------------------------------------------------------------
// ExtraData

/// The string-keyed side channel passed to [`Lifecycle`] hooks.
///
/// Keys are kept sorted so sidecar blocks come out in a stable order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtraData(BTreeMap<String, String>);

impl ExtraData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Removes and returns the entry under `key`.
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
