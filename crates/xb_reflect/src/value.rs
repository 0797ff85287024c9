use core::any::Any;

use chrono::{DateTime, Utc};

use crate::object::Object;
use crate::ops::{Fifo, Lifo, Mapping, OptionSlot, Pair, Poly, Sequence, Tensor};
use crate::scalar::Scalar;

// -----------------------------------------------------------------------------
// GraphValue

/// The foundational trait for every value the codec can carry.
///
/// A `GraphValue` classifies itself into one of a closed set of shapes via
/// [`kind`], and hands out a shape-specific borrowed view via [`value_ref`]
/// and [`value_mut`]. The codec drives the whole traversal through those two
/// views and never needs the concrete type.
///
/// Most implementations come for free: scalars, `String`, timestamps,
/// durations, `Option<T>`, `Vec<T>`, arrays, maps and tuples are covered by
/// blanket impls in this crate, and the [`describe!`](crate::describe) macro
/// writes the impl for user-defined objects.
///
/// # Examples
///
/// ```
/// use xb_reflect::ops::Sequence;
/// use xb_reflect::{GraphValue, ValueKind, ValueRef};
///
/// let v = vec![1_i32, 2, 3];
/// assert_eq!(v.kind(), ValueKind::Sequence);
///
/// let ValueRef::Sequence(seq) = v.value_ref() else { unreachable!() };
/// assert_eq!(seq.item_len(), 3);
/// ```
///
/// [`kind`]: GraphValue::kind
/// [`value_ref`]: GraphValue::value_ref
/// [`value_mut`]: GraphValue::value_mut
pub trait GraphValue: Any {
    /// Returns which shape this value takes.
    fn kind(&self) -> ValueKind;

    /// Borrows a shape-specific view of this value.
    fn value_ref(&self) -> ValueRef<'_>;

    /// Mutably borrows a shape-specific view of this value.
    fn value_mut(&mut self) -> ValueMut<'_>;

    /// Casts to [`Any`] for concrete downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Casts to [`Any`] mutably.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Consumes the box and casts to [`Any`].
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

// -----------------------------------------------------------------------------
// ValueKind

/// The closed set of shapes a [`GraphValue`] can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Free-form text, stored verbatim.
    Text,
    /// A value with a canonical single-token text form. See [`Scalar`].
    Scalar,
    /// A point in time with nanosecond precision.
    Date,
    /// A non-negative span of time.
    Duration,
    /// A two-slot key/value composite.
    Pair,
    /// A rectangular N-dimensional array. See [`Tensor`].
    Array,
    /// An ordered, growable collection. See [`Sequence`].
    Sequence,
    /// A last-in first-out collection. See [`Lifo`].
    Stack,
    /// A first-in first-out collection. See [`Fifo`].
    Queue,
    /// A keyed collection of entries. See [`Mapping`].
    Mapping,
    /// A class-shaped value with a property catalog. See [`Object`].
    Object,
    /// A slot holding any registered [`Object`], or nothing. See [`Poly`].
    Dynamic,
    /// An optional value; absent means the slot is vacant.
    Option,
}

// -----------------------------------------------------------------------------
// ValueRef / ValueMut

/// An immutable shape-specific view of a [`GraphValue`].
///
/// `Option<T>` borrows through to its content when present, so readers see
/// either `Null` or the inner value's own variant.
pub enum ValueRef<'a> {
    /// A vacant optional slot.
    Null,
    Text(&'a str),
    Scalar(&'a dyn Scalar),
    Date(&'a DateTime<Utc>),
    Duration(&'a std::time::Duration),
    Pair(&'a dyn Pair),
    Array(&'a dyn Tensor),
    Sequence(&'a dyn Sequence),
    Stack(&'a dyn Lifo),
    Queue(&'a dyn Fifo),
    Mapping(&'a dyn Mapping),
    Object(&'a dyn Object),
    /// A polymorphic slot; may be empty.
    Dynamic(&'a Poly),
}

/// A mutable shape-specific view of a [`GraphValue`].
///
/// Unlike [`ValueRef`], optional slots do not borrow through: writers get the
/// [`OptionSlot`] itself so they can vacate or occupy it before descending.
pub enum ValueMut<'a> {
    Text(&'a mut String),
    Scalar(&'a mut dyn Scalar),
    Date(&'a mut DateTime<Utc>),
    Duration(&'a mut std::time::Duration),
    Pair(&'a mut dyn Pair),
    Array(&'a mut dyn Tensor),
    Sequence(&'a mut dyn Sequence),
    Stack(&'a mut dyn Lifo),
    Queue(&'a mut dyn Fifo),
    Mapping(&'a mut dyn Mapping),
    Object(&'a mut dyn Object),
    Dynamic(&'a mut Poly),
    Option(&'a mut dyn OptionSlot),
}

impl dyn GraphValue {
    /// Downcasts to a concrete type by reference.
    #[inline]
    pub fn downcast_ref<T: GraphValue>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcasts to a concrete type by mutable reference.
    #[inline]
    pub fn downcast_mut<T: GraphValue>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}
