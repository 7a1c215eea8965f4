//! Repair action entity - a concrete fix assigned to a team

use serde::{Deserialize, Serialize};

use crate::core::changelog::{apply_changelog, ChangeLogEntry, LogEntry};
use crate::core::discussion::DiscussionMessage;
use crate::core::entity::{Discussable, FieldUpdates, Record, Severity, Status};
use crate::core::filter::Filterable;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::store::Store;
use crate::core::workflow::WorkflowError;

/// A repair action raised against a cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairAction {
    /// Unique identifier (RA-...)
    pub id: EntityId,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Cluster the action addresses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<EntityId>,

    /// Person doing the work, once assigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    pub team: String,

    pub program: String,

    #[serde(default)]
    pub priority: Severity,

    #[serde(default)]
    pub status: Status,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,

    #[serde(default)]
    pub estimated_cost: f64,

    #[serde(default)]
    pub estimated_hours: f64,

    /// Creation date (ISO-8601)
    pub created: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changelog: Vec<ChangeLogEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discussion: Vec<DiscussionMessage>,
}

impl Record for RepairAction {
    const PREFIX: EntityPrefix = EntityPrefix::Ra;
    const NAME: &'static str = "repair action";

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
        if let Some(reason) = &updates.rejection_reason {
            self.rejection_reason = Some(reason.clone());
        }
        if let Some(assignee) = &updates.assignee {
            self.assignee = Some(assignee.clone());
        }
    }
}

impl Discussable for RepairAction {
    fn discussion(&self) -> &[DiscussionMessage] {
        &self.discussion
    }

    fn discussion_mut(&mut self) -> &mut Vec<DiscussionMessage> {
        &mut self.discussion
    }
}

impl Filterable for RepairAction {
    fn program(&self) -> Option<&str> {
        Some(&self.program)
    }

    fn team(&self) -> Option<&str> {
        Some(&self.team)
    }

    fn severity(&self) -> Option<Severity> {
        Some(self.priority)
    }

    fn cost(&self) -> Option<f64> {
        Some(self.estimated_cost)
    }

    fn date(&self) -> Option<&str> {
        Some(&self.created)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Assign a repair action to a person
pub fn assign(
    store: &Store<RepairAction>,
    id: &EntityId,
    user: &str,
    assignee: &str,
) -> Result<Store<RepairAction>, WorkflowError> {
    let assignee = assignee.trim();
    if assignee.is_empty() {
        return Err(WorkflowError::MissingAssignee);
    }
    Ok(apply_changelog(
        store,
        id,
        LogEntry::new(user, "Assigned", format!("Assigned to {}", assignee)),
        &FieldUpdates::none().with_assignee(assignee),
    ))
}
