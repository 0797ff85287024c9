use std::collections::HashMap;

use crate::object::{Object, Tagged};

// -----------------------------------------------------------------------------
// TypeRegistry

/// The allow-list of types a polymorphic slot may hold.
///
/// Reading a document never instantiates a type the registry does not know:
/// an unknown tag is an error, not a fallback. Registration is explicit and
/// happens before any document is read, so the set of constructible types is
/// fixed by the caller rather than by document content.
///
/// # Examples
///
/// ```
/// use xb_reflect::{describe, Object, TypeRegistry};
///
/// #[derive(Default)]
/// struct Widget { id: u32 }
///
/// describe! { Widget = "Widget" { id } }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Widget>();
///
/// let fresh = registry.create("Widget").unwrap();
/// assert_eq!(fresh.type_tag(), "Widget");
/// assert!(registry.create("Gadget").is_none());
/// ```
#[derive(Default)]
pub struct TypeRegistry {
    factories: HashMap<&'static str, fn() -> Box<dyn Object>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under its document tag, replacing a previous
    /// registration of the same tag.
    pub fn register<T: Object + Tagged + Default>(&mut self) {
        self.factories.insert(T::TAG, || Box::new(T::default()));
    }

    /// Whether `tag` has a registered factory.
    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// Builds a default instance of the type registered under `tag`.
    pub fn create(&self, tag: &str) -> Option<Box<dyn Object>> {
        self.factories.get(tag).map(|factory| factory())
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Iterates the registered tags, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }
}
