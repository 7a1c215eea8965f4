//! Containment entity - temporary mitigation scoped to production areas
//!
//! A containment starts active and expires once the permanent fix is in.
//! Expiry is the only transition; an expired containment stays expired.

use serde::{Deserialize, Serialize};

use crate::core::changelog::{apply_changelog, ChangeLogEntry, LogEntry};
use crate::core::entity::{FieldUpdates, Record, Severity, Status};
use crate::core::filter::Filterable;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::store::Store;
use crate::core::workflow::WorkflowError;

/// A temporary containment action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Containment {
    /// Unique identifier (CNT-...)
    pub id: EntityId,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub severity: Severity,

    pub program: String,

    /// Production areas the containment applies to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub areas: Vec<String>,

    /// Who owns the containment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Cluster this containment protects against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<EntityId>,

    #[serde(default = "default_containment_status")]
    pub status: Status,

    /// Start date (ISO-8601)
    pub start_date: String,

    /// Planned end date (ISO-8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changelog: Vec<ChangeLogEntry>,
}

fn default_containment_status() -> Status {
    Status::Active
}

impl Record for Containment {
    const PREFIX: EntityPrefix = EntityPrefix::Cnt;
    const NAME: &'static str = "containment";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn status(&self) -> Status {
        self.status
    }

    fn changelog(&self) -> &[ChangeLogEntry] {
        &self.changelog
    }

    fn changelog_mut(&mut self) -> &mut Vec<ChangeLogEntry> {
        &mut self.changelog
    }

    fn apply_updates(&mut self, updates: &FieldUpdates) {
        if let Some(status) = updates.status {
            self.status = status;
        }
        if let Some(owner) = &updates.assignee {
            self.owner = Some(owner.clone());
        }
    }
}

impl Filterable for Containment {
    fn program(&self) -> Option<&str> {
        Some(&self.program)
    }

    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn date(&self) -> Option<&str> {
        Some(&self.start_date)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Expire an active containment
pub fn expire(
    store: &Store<Containment>,
    id: &EntityId,
    user: &str,
    comment: &str,
) -> Result<Store<Containment>, WorkflowError> {
    if let Some(current) = store.get(id) {
        if current.status != Status::Active {
            return Err(WorkflowError::InvalidTransition {
                id: id.clone(),
                from: current.status,
                to: Status::Expired,
            });
        }
    }
    Ok(apply_changelog(
        store,
        id,
        LogEntry::new(user, "Expired", comment.trim()),
        &FieldUpdates::status(Status::Expired),
    ))
}
