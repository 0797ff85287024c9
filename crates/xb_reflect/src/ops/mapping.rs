use crate::value::GraphValue;

// -----------------------------------------------------------------------------
// Mapping

/// Operations on a keyed collection of entries.
///
/// Readers iterate entries with [`iter_entries`]; the order is whatever the
/// concrete container yields. Writers rebuild an entry at a time: take a
/// fresh key/value pair from [`default_entry`], populate both halves, then
/// hand them back through [`insert_entry`].
///
/// [`iter_entries`]: Mapping::iter_entries
/// [`default_entry`]: Mapping::default_entry
/// [`insert_entry`]: Mapping::insert_entry
pub trait Mapping: GraphValue {
    /// Removes all entries.
    fn clear_entries(&mut self);

    /// The number of entries.
    fn entry_len(&self) -> usize;

    /// Iterates over `(key, value)` entries.
    fn iter_entries<'a>(
        &'a self,
    ) -> Box<dyn Iterator<Item = (&'a dyn GraphValue, &'a dyn GraphValue)> + 'a>;

    /// Produces a default-constructed key/value pair for population.
    fn default_entry(&self) -> (Box<dyn GraphValue>, Box<dyn GraphValue>);

    /// Inserts a populated pair produced by [`default_entry`], replacing any
    /// entry with an equal key.
    ///
    /// Fails if the boxes do not hold this mapping's key and value types.
    ///
    /// [`default_entry`]: Mapping::default_entry
    fn insert_entry(
        &mut self,
        key: Box<dyn GraphValue>,
        value: Box<dyn GraphValue>,
    ) -> Result<(), EntryError>;
}

/// A key or value box of the wrong concrete type reached [`Mapping::insert_entry`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("mapping entry {slot} has the wrong type")]
pub struct EntryError {
    /// Which half was wrong: `"key"` or `"value"`.
    pub slot: &'static str,
}

macro_rules! impl_mapping {
    ($map:ident, $($bound:path),+) => {
        impl<K, V> Mapping for std::collections::$map<K, V>
        where
            K: GraphValue + Default $(+ $bound)+,
            V: GraphValue + Default,
        {
            fn clear_entries(&mut self) {
                self.clear();
            }

            fn entry_len(&self) -> usize {
                self.len()
            }

            fn iter_entries<'a>(
                &'a self,
            ) -> Box<dyn Iterator<Item = (&'a dyn GraphValue, &'a dyn GraphValue)> + 'a> {
                Box::new(
                    self.iter()
                        .map(|(k, v)| (k as &dyn GraphValue, v as &dyn GraphValue)),
                )
            }

            fn default_entry(&self) -> (Box<dyn GraphValue>, Box<dyn GraphValue>) {
                (Box::new(K::default()), Box::new(V::default()))
            }

            fn insert_entry(
                &mut self,
                key: Box<dyn GraphValue>,
                value: Box<dyn GraphValue>,
            ) -> Result<(), EntryError> {
                let key = key
                    .into_any()
                    .downcast::<K>()
                    .map_err(|_| EntryError { slot: "key" })?;
                let value = value
                    .into_any()
                    .downcast::<V>()
                    .map_err(|_| EntryError { slot: "value" })?;
                self.insert(*key, *value);
                Ok(())
            }
        }
    };
}

impl_mapping!(HashMap, core::hash::Hash, Eq);
impl_mapping!(BTreeMap, Ord);

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn rebuild_through_entry_protocol() {
        let mut map: BTreeMap<String, i32> = BTreeMap::new();
        let (mut key, mut value) = map.default_entry();
        *key.downcast_mut::<String>().unwrap() = "answer".into();
        *value.downcast_mut::<i32>().unwrap() = 42;
        map.insert_entry(key, value).unwrap();

        assert_eq!(map.get("answer"), Some(&42));
        assert_eq!(map.entry_len(), 1);
    }

    #[test]
    fn wrong_key_type_is_rejected() {
        let mut map: BTreeMap<String, i32> = BTreeMap::new();
        let err = map
            .insert_entry(Box::new(3_u8), Box::new(0_i32))
            .unwrap_err();
        assert_eq!(err.slot, "key");
    }

    #[test]
    fn insert_replaces_equal_keys() {
        let mut map: BTreeMap<String, i32> = BTreeMap::from([("k".to_owned(), 1)]);
        let (mut key, mut value) = map.default_entry();
        *key.downcast_mut::<String>().unwrap() = "k".into();
        *value.downcast_mut::<i32>().unwrap() = 2;
        map.insert_entry(key, value).unwrap();
        assert_eq!(map.get("k"), Some(&2));
        assert_eq!(map.len(), 1);
    }
}
