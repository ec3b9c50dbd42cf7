//! Local patches applied to cached lists after a successful mutation, in
//! place of a re-fetch.

use crate::models::{Booking, Lab, Room};

/// An item with a backend-assigned identifier.
pub trait Keyed {
    type Key: PartialEq + Copy;

    fn key(&self) -> Self::Key;
}

impl Keyed for Lab {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for Room {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for Booking {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T: Keyed> {
    /// Push a newly created item to the end.
    Append(T),
    /// Swap every entry keyed `key` for `item`. Matching on the edited key
    /// rather than `item.key()` keeps the entry in place even if the backend
    /// answers with a different id.
    Replace { key: T::Key, item: T },
    /// Drop every entry keyed `key`.
    Remove(T::Key),
}

impl<T: Keyed + Clone> Patch<T> {
    /// Apply to `items`, returning how many entries were touched.
    pub fn apply(self, items: &mut Vec<T>) -> usize {
        match self {
            Patch::Append(item) => {
                items.push(item);
                1
            }
            Patch::Replace { key, item } => {
                let mut replaced = 0;
                for entry in items.iter_mut().filter(|entry| entry.key() == key) {
                    *entry = item.clone();
                    replaced += 1;
                }
                replaced
            }
            Patch::Remove(key) => {
                let before = items.len();
                items.retain(|entry| entry.key() != key);
                before - items.len()
            }
        }
    }
}
