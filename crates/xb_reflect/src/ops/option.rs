use crate::value::GraphValue;

// -----------------------------------------------------------------------------
// OptionSlot

/// Operations on an optional slot.
///
/// Writers either [`vacate`] the slot (the stored form was empty) or
/// [`occupy_default`] it and populate the returned content in place.
///
/// [`vacate`]: OptionSlot::vacate
/// [`occupy_default`]: OptionSlot::occupy_default
pub trait OptionSlot: GraphValue {
    /// Whether the slot currently holds nothing.
    fn is_vacant(&self) -> bool;

    /// Empties the slot.
    fn vacate(&mut self);

    /// Fills the slot with a default value if vacant, and borrows the content.
    fn occupy_default(&mut self) -> &mut dyn GraphValue;
}

impl<T: GraphValue + Default> OptionSlot for Option<T> {
    fn is_vacant(&self) -> bool {
        self.is_none()
    }

    fn vacate(&mut self) {
        *self = None;
    }

    fn occupy_default(&mut self) -> &mut dyn GraphValue {
        self.get_or_insert_with(T::default)
    }
}
