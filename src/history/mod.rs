//! Capacity-bounded, most-recent-first collections.
//!
//! Used for the generated-task library and the assessment history. Both
//! operations return a new value and leave the receiver untouched.

use crate::domain::{GeneratedTask, HistoryEntry};

/// Items addressable by a unique id.
pub trait Keyed {
    type Id: PartialEq + ?Sized;

    fn id(&self) -> &Self::Id;
}

impl Keyed for GeneratedTask {
    type Id = str;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Keyed for HistoryEntry {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundedHistory<T> {
    capacity: usize,
    items: Vec<T>,
}

impl<T: Clone> BoundedHistory<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
        }
    }

    /// Restore from stored items, dropping any beyond `capacity`.
    pub fn from_items(capacity: usize, mut items: Vec<T>) -> Self {
        items.truncate(capacity);
        Self { capacity, items }
    }

    /// Prepend `item` and drop the oldest entries past capacity.
    #[must_use]
    pub fn insert_front(&self, item: T) -> Self {
        let mut items = Vec::with_capacity(self.capacity.min(self.items.len() + 1));
        items.push(item);
        items.extend(self.items.iter().cloned());
        items.truncate(self.capacity);
        Self {
            capacity: self.capacity,
            items,
        }
    }

    /// Drop the item with `id`. Unknown ids leave the history unchanged.
    #[must_use]
    pub fn remove_by_id(&self, id: &T::Id) -> Self
    where
        T: Keyed,
    {
        Self {
            capacity: self.capacity,
            items: self
                .items
                .iter()
                .filter(|item| item.id() != id)
                .cloned()
                .collect(),
        }
    }

    pub fn find(&self, id: &T::Id) -> Option<&T>
    where
        T: Keyed,
    {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}
