//! Entity store - ordered collection of records with shared elements
//!
//! Updates never mutate a store in place. Every write returns a new store in
//! which unchanged records are the same `Arc` as before, so consumers can
//! detect what changed with a pointer comparison.

use serde::{Serialize, Serializer};
use std::sync::Arc;

use crate::core::entity::Record;
use crate::core::identity::EntityId;

/// Ordered collection of one record kind
#[derive(Debug)]
pub struct Store<T> {
    items: Vec<Arc<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> Store<T> {
    /// Build a store from owned records, keeping their order
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().map(Arc::new).collect(),
        }
    }

    pub(crate) fn from_shared(items: Vec<Arc<T>>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map(|a| a.as_ref())
    }

    /// Iterate the shared handles (for pointer comparisons)
    pub fn shared(&self) -> &[Arc<T>] {
        &self.items
    }

    pub fn get(&self, id: &EntityId) -> Option<&T> {
        self.get_shared(id).map(|a| a.as_ref())
    }

    pub fn get_shared(&self, id: &EntityId) -> Option<&Arc<T>> {
        self.items.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.get_shared(id).is_some()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.items.iter().map(|r| r.id().clone()).collect()
    }

    /// Return a new store with `record` appended at the end
    pub fn with_inserted(&self, record: T) -> Self {
        let mut items = self.items.clone();
        items.push(Arc::new(record));
        Self { items }
    }

    /// Return a new store where the record with `id` is replaced by `f(old)`
    ///
    /// Returns `None` when no record has that ID.
    pub(crate) fn replaced(&self, id: &EntityId, f: impl FnOnce(&T) -> T) -> Option<Self> {
        let pos = self.items.iter().position(|r| r.id() == id)?;
        let mut items = self.items.clone();
        items[pos] = Arc::new(f(&self.items[pos]));
        Some(Self { items })
    }
}

impl<T: PartialEq> PartialEq for Store<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(other.items.iter())
                .all(|(a, b)| Arc::ptr_eq(a, b) || a == b)
    }
}

impl<T: Serialize> Serialize for Store<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter().map(|a| a.as_ref()))
    }
}

impl<T: Record> FromIterator<T> for Store<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Store::new(iter)
    }
}
