//! Fixed-capacity ordered history with drop-oldest eviction.
//!
//! Used for the outcome check-ins (60 entries) and reflection memory notes
//! (25 entries) on [`UserProgress`](crate::UserProgress). The capacity is part
//! of the type, so the length bound holds after every push and after every load.

use std::collections::VecDeque;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedHistory<T, const N: usize> {
    items: VecDeque<T>,
}

impl<T, const N: usize> BoundedHistory<T, N> {
    pub fn new() -> Self {
        Self { items: VecDeque::with_capacity(N) }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }

    /// Append `item`, evicting the oldest entries beyond capacity.
    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
        while self.items.len() > N {
            self.items.pop_front();
        }
    }

    /// Remove every entry `same` considers equal to `item`, then append it.
    pub fn push_replacing(&mut self, item: T, same: impl Fn(&T, &T) -> bool) {
        self.items.retain(|existing| !same(existing, &item));
        self.push(item);
    }

    /// Keep the most recent `N` of `items`.
    pub fn from_vec(items: Vec<T>) -> Self {
        let mut history = Self::new();
        for item in items {
            history.push(item);
        }
        history
    }
}

impl<T, const N: usize> Default for BoundedHistory<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> From<Vec<T>> for BoundedHistory<T, N> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T: Serialize, const N: usize> Serialize for BoundedHistory<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for BoundedHistory<T, N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Ok(Self::from_vec(items))
    }
}
