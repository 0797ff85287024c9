use crate::value::{GraphValue, ValueKind, ValueMut, ValueRef};

// -----------------------------------------------------------------------------
// Tensor

/// Operations on a rectangular N-dimensional array.
///
/// Items are addressed by a full index tuple, one coordinate per dimension.
/// Writers call [`reshape`] with the stored dimensions first, then populate
/// items tuple by tuple; [`Odometer`] produces the tuples in storage order.
///
/// [`reshape`]: Tensor::reshape
pub trait Tensor: GraphValue {
    /// The length of each dimension.
    fn dims(&self) -> Vec<usize>;

    /// Borrows the item at `index`; `None` when out of bounds or the wrong rank.
    fn item(&self, index: &[usize]) -> Option<&dyn GraphValue>;

    /// Mutably borrows the item at `index`.
    fn item_mut(&mut self, index: &[usize]) -> Option<&mut dyn GraphValue>;

    /// Re-dimensions the array to `dims`, default-filling the items.
    fn reshape(&mut self, dims: &[usize]) -> Result<(), ShapeError>;
}

/// An array could not take the requested dimensions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("array of {len} items cannot take dimensions {dims:?}")]
pub struct ShapeError {
    pub dims: Vec<usize>,
    pub len: usize,
}

// Row-major linear offset of an index tuple, or None when out of bounds.
fn offset(dims: &[usize], index: &[usize]) -> Option<usize> {
    if index.len() != dims.len() {
        return None;
    }
    let mut linear = 0_usize;
    for (&coord, &dim) in index.iter().zip(dims) {
        if coord >= dim {
            return None;
        }
        linear = linear * dim + coord;
    }
    Some(linear)
}

// -----------------------------------------------------------------------------
// MultiArray

/// A rectangular N-dimensional array with run-time dimensions.
///
/// Items are stored row-major, the last dimension varying fastest.
///
/// # Examples
///
/// ```
/// use xb_reflect::ops::MultiArray;
///
/// let mut grid: MultiArray<i32> = MultiArray::new([2, 3]);
/// *grid.get_mut(&[1, 2]).unwrap() = 9;
/// assert_eq!(grid.get(&[1, 2]), Some(&9));
/// assert_eq!(grid.len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiArray<T> {
    dims: Vec<usize>,
    items: Vec<T>,
}

impl<T: Default> MultiArray<T> {
    /// Creates an array of the given dimensions, filled with defaults.
    pub fn new(dims: impl Into<Vec<usize>>) -> Self {
        let dims = dims.into();
        let len = dims.iter().product();
        Self {
            items: (0..len).map(|_| T::default()).collect(),
            dims,
        }
    }
}

impl<T> MultiArray<T> {
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Total number of items across all dimensions.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: &[usize]) -> Option<&T> {
        self.items.get(offset(&self.dims, index)?)
    }

    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        let linear = offset(&self.dims, index)?;
        self.items.get_mut(linear)
    }

    /// Iterates items in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Default> Default for MultiArray<T> {
    fn default() -> Self {
        Self::new([0])
    }
}

impl<T: Default> From<Vec<T>> for MultiArray<T> {
    /// Builds a one-dimensional array over `items`.
    fn from(items: Vec<T>) -> Self {
        Self {
            dims: vec![items.len()],
            items,
        }
    }
}

impl<T: GraphValue + Default> GraphValue for MultiArray<T> {
    fn kind(&self) -> ValueKind {
        ValueKind::Array
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Array(self)
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Array(self)
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

impl<T: GraphValue + Default> Tensor for MultiArray<T> {
    fn dims(&self) -> Vec<usize> {
        self.dims.clone()
    }

    fn item(&self, index: &[usize]) -> Option<&dyn GraphValue> {
        self.get(index).map(|item| item as &dyn GraphValue)
    }

    fn item_mut(&mut self, index: &[usize]) -> Option<&mut dyn GraphValue> {
        self.get_mut(index).map(|item| item as &mut dyn GraphValue)
    }

    fn reshape(&mut self, dims: &[usize]) -> Result<(), ShapeError> {
        *self = Self::new(dims.to_vec());
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Odometer

/// Iterates the index tuples of a rectangular array in storage order.
///
/// The last dimension varies fastest, rolling over into the next like the
/// digits of an odometer. Dimensions containing a zero produce no tuples.
///
/// # Examples
///
/// ```
/// use xb_reflect::ops::Odometer;
///
/// let tuples: Vec<_> = Odometer::new(&[2, 2]).collect();
/// assert_eq!(tuples, [vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
/// ```
pub struct Odometer {
    dims: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl Odometer {
    pub fn new(dims: &[usize]) -> Self {
        let next = if dims.is_empty() || dims.contains(&0) {
            None
        } else {
            Some(vec![0; dims.len()])
        };
        Self {
            dims: dims.to_vec(),
            next,
        }
    }
}

impl Iterator for Odometer {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.next.take()?;

        // Advance with carry, last dimension first.
        let mut following = current.clone();
        for axis in (0..self.dims.len()).rev() {
            following[axis] += 1;
            if following[axis] < self.dims[axis] {
                self.next = Some(following);
                break;
            }
            following[axis] = 0;
        }

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn odometer_walks_last_dimension_fastest() {
        let tuples: Vec<_> = Odometer::new(&[2, 3]).collect();
        assert_eq!(
            tuples,
            [
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2],
            ]
        );
    }

    #[test]
    fn odometer_handles_degenerate_dimensions() {
        assert_eq!(Odometer::new(&[]).count(), 0);
        assert_eq!(Odometer::new(&[3, 0, 2]).count(), 0);
        assert_eq!(Odometer::new(&[1]).collect::<Vec<_>>(), [vec![0]]);
    }

    #[test]
    fn odometer_matches_storage_order() {
        let mut grid: MultiArray<usize> = MultiArray::new([3, 2, 4]);
        for (linear, tuple) in Odometer::new(&[3, 2, 4]).enumerate() {
            *grid.get_mut(&tuple).unwrap() = linear;
        }
        let flat: Vec<_> = grid.iter().copied().collect();
        assert_eq!(flat, (0..24).collect::<Vec<_>>());
    }

    #[test]
    fn out_of_bounds_and_wrong_rank_are_rejected() {
        let grid: MultiArray<i32> = MultiArray::new([2, 2]);
        assert!(grid.get(&[2, 0]).is_none());
        assert!(grid.get(&[0]).is_none());
        assert!(grid.get(&[0, 0, 0]).is_none());
    }

    #[test]
    fn reshape_resets_to_defaults() {
        let mut grid: MultiArray<i32> = MultiArray::from(vec![1, 2, 3]);
        Tensor::reshape(&mut grid, &[2, 2]).unwrap();
        assert_eq!(grid.dims(), &[2, 2]);
        assert_eq!(grid.get(&[1, 1]), Some(&0));
    }
}
