//! Changelog recorder - apply one update to one record and audit it
//!
//! The audit trail is append-only: entries are pushed to the tail in call
//! order and never rewritten. Recording is not idempotent; two identical
//! calls produce two rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::entity::{FieldUpdates, Record};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::store::Store;

/// One row of a record's audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    /// Generated entry ID (LOG-ULID)
    pub id: EntityId,
    /// When the action was recorded
    pub timestamp: DateTime<Utc>,
    /// Who performed the action
    pub user: String,
    /// What happened (e.g., "Approved")
    pub action: String,
    /// Free-text note
    #[serde(default)]
    pub comment: String,
}

/// Caller-supplied part of an audit entry, before stamping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub user: String,
    pub action: String,
    pub comment: String,
}

impl LogEntry {
    pub fn new(
        user: impl Into<String>,
        action: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            action: action.into(),
            comment: comment.into(),
        }
    }

    /// Assign an entry ID and the current time
    pub fn stamp(self) -> ChangeLogEntry {
        self.stamp_at(Utc::now())
    }

    pub fn stamp_at(self, timestamp: DateTime<Utc>) -> ChangeLogEntry {
        ChangeLogEntry {
            id: EntityId::new(EntityPrefix::Log),
            timestamp,
            user: self.user,
            action: self.action,
            comment: self.comment,
        }
    }
}

/// Append an audit entry to one record without changing any other field
pub fn append_log<T: Record>(store: &Store<T>, id: &EntityId, entry: LogEntry) -> Store<T> {
    apply_changelog(store, id, entry, &FieldUpdates::none())
}

/// Apply `updates` to the record with `id` and append `entry` to its changelog
///
/// Returns a store of the same length and order. Records other than the
/// target are shared with the input. An unknown `id` returns the input store
/// unchanged.
pub fn apply_changelog<T: Record>(
    store: &Store<T>,
    id: &EntityId,
    entry: LogEntry,
    updates: &FieldUpdates,
) -> Store<T> {
    let stamped = entry.stamp();
    let action = stamped.action.clone();

    let updated = store.replaced(id, |old| {
        let mut record = old.clone();
        record.apply_updates(updates);
        record.changelog_mut().push(stamped);
        record
    });

    match updated {
        Some(next) => {
            debug!(record = %id, %action, "changelog entry recorded");
            next
        }
        None => {
            warn!(record = %id, %action, "no record with this id; store unchanged");
            store.clone()
        }
    }
}
