//! [`GraphValue`] impls for std and chrono types.
//!
//! Scalars get theirs from the macro in [`scalar`](crate::scalar); the
//! concrete containers (`Stack`, `Queue`, `MultiArray`, `Poly`) carry their
//! own impls next to their definitions.

use core::any::Any;

use chrono::{DateTime, Utc};

use crate::ops::{OptionSlot, ShapeError, Tensor};
use crate::value::{GraphValue, ValueKind, ValueMut, ValueRef};

macro_rules! impl_graph_value_body {
    () => {
        #[inline]
        fn as_any(&self) -> &dyn Any {
            self
        }

        #[inline]
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        #[inline]
        fn into_any(self: Box<Self>) -> Box<dyn Any> {
            self
        }
    };
}

// -----------------------------------------------------------------------------
// Text / time

impl GraphValue for String {
    fn kind(&self) -> ValueKind {
        ValueKind::Text
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Text(self)
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Text(self)
    }

    impl_graph_value_body!();
}

impl GraphValue for DateTime<Utc> {
    fn kind(&self) -> ValueKind {
        ValueKind::Date
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Date(self)
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Date(self)
    }

    impl_graph_value_body!();
}

impl GraphValue for std::time::Duration {
    fn kind(&self) -> ValueKind {
        ValueKind::Duration
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Duration(self)
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Duration(self)
    }

    impl_graph_value_body!();
}

// -----------------------------------------------------------------------------
// Option

impl<T: GraphValue + Default> GraphValue for Option<T> {
    fn kind(&self) -> ValueKind {
        ValueKind::Option
    }

    /// Borrows through to the content; a vacant slot reads as [`ValueRef::Null`].
    fn value_ref(&self) -> ValueRef<'_> {
        match self {
            Some(content) => content.value_ref(),
            None => ValueRef::Null,
        }
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Option(self as &mut dyn OptionSlot)
    }

    impl_graph_value_body!();
}

// -----------------------------------------------------------------------------
// Containers

impl<T: GraphValue + Default> GraphValue for Vec<T> {
    fn kind(&self) -> ValueKind {
        ValueKind::Sequence
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Sequence(self)
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Sequence(self)
    }

    impl_graph_value_body!();
}

macro_rules! impl_graph_value_for_map {
    ($map:ident, $($bound:path),+) => {
        impl<K, V> GraphValue for std::collections::$map<K, V>
        where
            K: GraphValue + Default $(+ $bound)+,
            V: GraphValue + Default,
        {
            fn kind(&self) -> ValueKind {
                ValueKind::Mapping
            }

            fn value_ref(&self) -> ValueRef<'_> {
                ValueRef::Mapping(self)
            }

            fn value_mut(&mut self) -> ValueMut<'_> {
                ValueMut::Mapping(self)
            }

            impl_graph_value_body!();
        }
    };
}

impl_graph_value_for_map!(HashMap, core::hash::Hash, Eq);
impl_graph_value_for_map!(BTreeMap, Ord);

impl<K: GraphValue, V: GraphValue> GraphValue for (K, V) {
    fn kind(&self) -> ValueKind {
        ValueKind::Pair
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Pair(self)
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Pair(self)
    }

    impl_graph_value_body!();
}

// -----------------------------------------------------------------------------
// Fixed-size arrays

impl<T: GraphValue + Default, const N: usize> GraphValue for [T; N] {
    fn kind(&self) -> ValueKind {
        ValueKind::Array
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Array(self)
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Array(self)
    }

    impl_graph_value_body!();
}

impl<T: GraphValue + Default, const N: usize> Tensor for [T; N] {
    fn dims(&self) -> Vec<usize> {
        vec![N]
    }

    fn item(&self, index: &[usize]) -> Option<&dyn GraphValue> {
        match index {
            &[i] => self.get(i).map(|item| item as &dyn GraphValue),
            _ => None,
        }
    }

    fn item_mut(&mut self, index: &[usize]) -> Option<&mut dyn GraphValue> {
        match index {
            &[i] => self.get_mut(i).map(|item| item as &mut dyn GraphValue),
            _ => None,
        }
    }

    /// The length is fixed, so only `[N]` is accepted; items reset to defaults.
    fn reshape(&mut self, dims: &[usize]) -> Result<(), ShapeError> {
        if dims != &[N] {
            return Err(ShapeError {
                dims: dims.to_vec(),
                len: N,
            });
        }
        for item in self.iter_mut() {
            *item = T::default();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_array_is_a_one_dimensional_tensor() {
        let arr = [1_i32, 2, 3];
        assert_eq!(Tensor::dims(&arr), vec![3]);
        assert_eq!(arr.item(&[2]).unwrap().downcast_ref::<i32>(), Some(&3));
        assert!(arr.item(&[0, 0]).is_none());
    }

    #[test]
    fn fixed_array_rejects_foreign_dimensions() {
        let mut arr = [0_u8; 4];
        assert!(Tensor::reshape(&mut arr, &[4]).is_ok());
        let err = Tensor::reshape(&mut arr, &[2, 2]).unwrap_err();
        assert_eq!(err.len, 4);
    }

    #[test]
    fn pair_reads_as_key_and_value() {
        use crate::ops::Pair;

        let pair = ("k".to_owned(), 3_i64);
        assert_eq!(pair.kind(), ValueKind::Pair);
        assert_eq!(
            pair.entry_value().downcast_ref::<i64>(),
            Some(&3)
        );
    }
}
