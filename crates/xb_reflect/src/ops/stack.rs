use crate::value::{GraphValue, ValueKind, ValueMut, ValueRef};

// -----------------------------------------------------------------------------
// Lifo

/// Operations on a last-in first-out collection.
///
/// Readers peek by depth, `0` being the value the next pop would return.
/// Writers rebuild by pushing default slots; the last slot pushed becomes the
/// new top, so a writer that wants to reproduce a given pop order must push
/// in the reverse of it.
pub trait Lifo: GraphValue {
    /// Removes all items.
    fn clear_items(&mut self);

    /// The number of items.
    fn item_len(&self) -> usize;

    /// Borrows the item `depth` positions below the top.
    fn peek(&self, depth: usize) -> Option<&dyn GraphValue>;

    /// Pushes a default-constructed item and borrows the new top.
    fn push_default(&mut self) -> &mut dyn GraphValue;
}

// -----------------------------------------------------------------------------
// Stack

/// A last-in first-out container.
///
/// # Examples
///
/// ```
/// use xb_reflect::ops::Stack;
///
/// let mut stack = Stack::new();
/// stack.push("a");
/// stack.push("b");
/// assert_eq!(stack.pop(), Some("b"));
/// assert_eq!(stack.peek(), Some(&"a"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack<T> {
    // Top of the stack is the last element.
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Borrows the top item without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates from the top down.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().rev()
    }
}

impl<T> From<Vec<T>> for Stack<T> {
    /// Pushes the items in order, so the last item of `items` ends up on top.
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T: GraphValue + Default> GraphValue for Stack<T> {
    fn kind(&self) -> ValueKind {
        ValueKind::Stack
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Stack(self)
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Stack(self)
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

impl<T: GraphValue + Default> Lifo for Stack<T> {
    fn clear_items(&mut self) {
        self.items.clear();
    }

    fn item_len(&self) -> usize {
        self.items.len()
    }

    fn peek(&self, depth: usize) -> Option<&dyn GraphValue> {
        let len = self.items.len();
        if depth >= len {
            return None;
        }
        Some(&self.items[len - 1 - depth])
    }

    fn push_default(&mut self) -> &mut dyn GraphValue {
        self.items.push(T::default());
        let index = self.items.len() - 1;
        &mut self.items[index]
    }
}
