use crate::value::GraphValue;

// -----------------------------------------------------------------------------
// Sequence

/// Operations on an ordered, growable collection.
///
/// Readers walk items front to back with [`item`]; writers rebuild the
/// collection by clearing it and appending one default slot per stored item,
/// then populating the slot in place.
///
/// # Examples
///
/// ```
/// use xb_reflect::ops::Sequence;
/// use xb_reflect::GraphValue;
///
/// let mut v: Vec<i32> = Vec::new();
/// let slot = v.append_default();
/// assert!(matches!(slot.value_mut(), xb_reflect::ValueMut::Scalar(_)));
/// assert_eq!(v.item_len(), 1);
/// ```
///
/// [`item`]: Sequence::item
pub trait Sequence: GraphValue {
    /// Removes all items.
    fn clear_items(&mut self);

    /// The number of items.
    fn item_len(&self) -> usize;

    /// Borrows the item at `index`, front first.
    fn item(&self, index: usize) -> Option<&dyn GraphValue>;

    /// Appends a default-constructed item and borrows it for population.
    fn append_default(&mut self) -> &mut dyn GraphValue;
}

impl<T: GraphValue + Default> Sequence for Vec<T> {
    fn clear_items(&mut self) {
        self.clear();
    }

    fn item_len(&self) -> usize {
        self.len()
    }

    fn item(&self, index: usize) -> Option<&dyn GraphValue> {
        self.get(index).map(|item| item as &dyn GraphValue)
    }

    fn append_default(&mut self) -> &mut dyn GraphValue {
        self.push(T::default());
        let index = self.len() - 1;
        &mut self[index]
    }
}
