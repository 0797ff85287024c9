use crate::value::GraphValue;

// -----------------------------------------------------------------------------
// Pair

/// Operations on a two-slot key/value composite.
///
/// Two-element tuples implement this; mappings also use pairs implicitly for
/// their entries, but a standalone `Pair` is a value in its own right.
pub trait Pair: GraphValue {
    fn entry_key(&self) -> &dyn GraphValue;

    fn entry_key_mut(&mut self) -> &mut dyn GraphValue;

    fn entry_value(&self) -> &dyn GraphValue;

    fn entry_value_mut(&mut self) -> &mut dyn GraphValue;
}

impl<K: GraphValue, V: GraphValue> Pair for (K, V) {
    fn entry_key(&self) -> &dyn GraphValue {
        &self.0
    }

    fn entry_key_mut(&mut self) -> &mut dyn GraphValue {
        &mut self.0
    }

    fn entry_value(&self) -> &dyn GraphValue {
        &self.1
    }

    fn entry_value_mut(&mut self) -> &mut dyn GraphValue {
        &mut self.1
    }
}
