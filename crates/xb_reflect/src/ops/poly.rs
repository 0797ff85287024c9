use crate::object::Object;
use crate::value::{GraphValue, ValueKind, ValueMut, ValueRef};

// -----------------------------------------------------------------------------
// Poly

/// A slot holding any [`Object`] type, or nothing.
///
/// `Poly` is the field shape for values whose concrete type is only known at
/// runtime. The stored document records which type the slot held via a type
/// alias; on read the type is looked up in the registry and re-created, so
/// every type that can appear in a `Poly` must be registered with the
/// formatter up front.
///
/// An empty `Poly` stores and loads as an empty slot, like a vacant `Option`.
///
/// # Examples
///
/// ```
/// use xb_reflect::{describe, ops::Poly};
///
/// #[derive(Default)]
/// struct Circle { radius: f64 }
///
/// describe! { Circle = "Circle" { radius } }
///
/// let slot = Poly::new(Box::new(Circle { radius: 2.0 }));
/// assert_eq!(slot.downcast_ref::<Circle>().unwrap().radius, 2.0);
/// ```
#[derive(Default)]
pub struct Poly(Option<Box<dyn Object>>);

impl Poly {
    /// Creates a slot holding `object`.
    pub fn new(object: Box<dyn Object>) -> Self {
        Self(Some(object))
    }

    /// Creates an empty slot.
    pub fn none() -> Self {
        Self(None)
    }

    pub fn is_vacant(&self) -> bool {
        self.0.is_none()
    }

    /// Borrows the held object, if any.
    pub fn get(&self) -> Option<&dyn Object> {
        self.0.as_deref()
    }

    /// Mutably borrows the held object, if any.
    pub fn get_mut(&mut self) -> Option<&mut dyn Object> {
        self.0.as_deref_mut()
    }

    /// Borrows the held object as a concrete type.
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.get()?.as_any().downcast_ref::<T>()
    }

    /// Mutably borrows the held object as a concrete type.
    pub fn downcast_mut<T: Object>(&mut self) -> Option<&mut T> {
        self.get_mut()?.as_any_mut().downcast_mut::<T>()
    }

    /// Stores `object`, dropping any previous content.
    pub fn set(&mut self, object: Box<dyn Object>) {
        self.0 = Some(object);
    }

    /// Empties the slot.
    pub fn vacate(&mut self) {
        self.0 = None;
    }

    /// Stores `object` and borrows it back for population.
    pub fn replace(&mut self, object: Box<dyn Object>) -> &mut dyn Object {
        self.0.insert(object).as_mut()
    }
}

impl core::fmt::Debug for Poly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.get() {
            Some(object) => write!(f, "Poly({})", object.type_tag()),
            None => f.write_str("Poly(vacant)"),
        }
    }
}

impl GraphValue for Poly {
    fn kind(&self) -> ValueKind {
        ValueKind::Dynamic
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Dynamic(self)
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Dynamic(self)
    }

    fn as_any(&self) -> &dyn core::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn core::any::Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn core::any::Any> {
        self
    }
}
