//! Approval request entity - items waiting on a manager decision
//!
//! Requests are raised from clusters (or directly) and routed to a team.
//! Approving or rejecting a request takes it out of the pending queue; its
//! changelog and discussion stay with it.

use serde::{Deserialize, Serialize};

use crate::core::changelog::ChangeLogEntry;
use crate::core::discussion::DiscussionMessage;
use crate::core::entity::{Discussable, FieldUpdates, Record, Severity, Status};
use crate::core::filter::Filterable;
use crate::core::identity::{EntityId, EntityPrefix};

/// A request for manager approval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalRequest {
    /// Unique identifier (APR-...)
    pub id: EntityId,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Kind of request (e.g., "Process change", "Deviation")
    pub request_type: String,

    /// Who raised the request
    pub requested_by: String,

    /// Team the request is routed to
    pub team: String,

    pub program: String,

    #[serde(default)]
    pub severity: Severity,

    #[serde(default)]
    pub estimated_cost: f64,

    /// Submission date (ISO-8601)
    pub submitted: String,

    #[serde(default)]
    pub status: Status,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,

    /// Cluster the request originated from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<EntityId>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changelog: Vec<ChangeLogEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discussion: Vec<DiscussionMessage>,
}

impl Record for ApprovalRequest {
    const PREFIX: EntityPrefix = EntityPrefix::Apr;
    const NAME: &'static str = "approval request";

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
    }
}

impl Discussable for ApprovalRequest {
    fn discussion(&self) -> &[DiscussionMessage] {
        &self.discussion
    }

    fn discussion_mut(&mut self) -> &mut Vec<DiscussionMessage> {
        &mut self.discussion
    }
}

impl Filterable for ApprovalRequest {
    fn program(&self) -> Option<&str> {
        Some(&self.program)
    }

    fn team(&self) -> Option<&str> {
        Some(&self.team)
    }

    fn category(&self) -> Option<&str> {
        Some(&self.request_type)
    }

    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn cost(&self) -> Option<f64> {
        Some(self.estimated_cost)
    }

    fn date(&self) -> Option<&str> {
        Some(&self.submitted)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
