//! Multi-select tracking for bulk actions on one list

use std::collections::BTreeSet;

use crate::core::identity::EntityId;
use crate::core::workflow::WorkflowError;

/// Set of checked record IDs within one visible list
///
/// The selection is independent of the underlying store: changing the
/// active filter does not drop IDs that are no longer visible. Call
/// [`Selection::retain_visible`] to prune explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<EntityId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present
    pub fn toggle(&self, id: &EntityId) -> Self {
        let mut ids = self.ids.clone();
        if !ids.remove(id) {
            ids.insert(id.clone());
        }
        Self { ids }
    }

    /// Replace the selection with every visible ID
    pub fn select_all(visible: impl IntoIterator<Item = EntityId>) -> Self {
        Self {
            ids: visible.into_iter().collect(),
        }
    }

    pub fn clear(&self) -> Self {
        Self::default()
    }

    /// Drop IDs that are not in `visible`
    pub fn retain_visible(&self, visible: &[EntityId]) -> Self {
        Self {
            ids: self
                .ids
                .iter()
                .filter(|id| visible.contains(id))
                .cloned()
                .collect(),
        }
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityId> {
        self.ids.iter()
    }

    /// The selected IDs, or `NoSelection` for bulk consumers
    pub fn require_any(&self) -> Result<&BTreeSet<EntityId>, WorkflowError> {
        if self.ids.is_empty() {
            Err(WorkflowError::NoSelection)
        } else {
            Ok(&self.ids)
        }
    }
}

impl FromIterator<EntityId> for Selection {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        Selection::select_all(iter)
    }
}
