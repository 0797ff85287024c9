use std::collections::VecDeque;

use crate::value::{GraphValue, ValueKind, ValueMut, ValueRef};

// -----------------------------------------------------------------------------
// Fifo

/// Operations on a first-in first-out collection.
///
/// Readers walk items front to back, `0` being the value the next dequeue
/// would return. Writers rebuild by enqueuing default slots in order.
pub trait Fifo: GraphValue {
    /// Removes all items.
    fn clear_items(&mut self);

    /// The number of items.
    fn item_len(&self) -> usize;

    /// Borrows the item `index` positions behind the front.
    fn item(&self, index: usize) -> Option<&dyn GraphValue>;

    /// Enqueues a default-constructed item and borrows it for population.
    fn enqueue_default(&mut self) -> &mut dyn GraphValue;
}

// -----------------------------------------------------------------------------
// Queue

/// A first-in first-out container.
///
/// # Examples
///
/// ```
/// use xb_reflect::ops::Queue;
///
/// let mut queue = Queue::new();
/// queue.enqueue(1);
/// queue.enqueue(2);
/// assert_eq!(queue.dequeue(), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    pub fn dequeue(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Borrows the front item without removing it.
    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates front to back.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T> From<Vec<T>> for Queue<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T: GraphValue + Default> GraphValue for Queue<T> {
    fn kind(&self) -> ValueKind {
        ValueKind::Queue
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Queue(self)
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Queue(self)
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

impl<T: GraphValue + Default> Fifo for Queue<T> {
    fn clear_items(&mut self) {
        self.items.clear();
    }

    fn item_len(&self) -> usize {
        self.items.len()
    }

    fn item(&self, index: usize) -> Option<&dyn GraphValue> {
        self.items.get(index).map(|item| item as &dyn GraphValue)
    }

    fn enqueue_default(&mut self) -> &mut dyn GraphValue {
        self.items.push_back(T::default());
        let index = self.items.len() - 1;
        &mut self.items[index]
    }
}
