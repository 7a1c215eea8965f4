//! Issue cluster entity - grouped manufacturing issues sharing a suggested fix
//!
//! Clusters are the unit of work on the triage board. Each one gathers
//! similar issue reports, carries a (static) confidence score for the
//! suggested fix, and moves through the pending/approved/rejected workflow.

use serde::{Deserialize, Serialize};

use crate::core::changelog::ChangeLogEntry;
use crate::core::entity::{FieldUpdates, Percent, Record, Severity, Status, SubmissionType};
use crate::core::filter::Filterable;
use crate::core::identity::{EntityId, EntityPrefix};

/// A cluster of related issues
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueCluster {
    /// Unique identifier (CL-...)
    pub id: EntityId,

    /// Short title describing the shared failure
    pub title: String,

    /// Longer description of the pattern
    #[serde(default)]
    pub description: String,

    /// Worst severity among member issues
    #[serde(default)]
    pub severity: Severity,

    /// Product program the issues come from
    pub program: String,

    /// Failure category (e.g., "Welding", "Paint")
    pub category: String,

    /// Current workflow status
    #[serde(default)]
    pub status: Status,

    /// How the fix was routed for approval, once submitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_type: Option<SubmissionType>,

    /// Reason given when rejected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,

    /// Confidence in the suggested fix
    #[serde(default)]
    pub confidence: Percent,

    /// Number of issue reports in the cluster
    #[serde(default)]
    pub issue_count: u32,

    /// IDs of similar issues (may not resolve)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub similar_issues: Vec<String>,

    /// Proposed corrective action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,

    /// Estimated cost of the fix
    #[serde(default)]
    pub estimated_cost: f64,

    /// Creation date (ISO-8601)
    pub created: String,

    /// Tags for filtering
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Audit trail
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changelog: Vec<ChangeLogEntry>,
}

impl IssueCluster {
    /// Create a new pending cluster with required fields
    pub fn new(
        id: EntityId,
        title: impl Into<String>,
        severity: Severity,
        program: impl Into<String>,
        category: impl Into<String>,
        created: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            severity,
            program: program.into(),
            category: category.into(),
            status: Status::Pending,
            submission_type: None,
            rejection_reason: None,
            confidence: Percent::default(),
            issue_count: 0,
            similar_issues: Vec::new(),
            suggested_fix: None,
            estimated_cost: 0.0,
            created: created.into(),
            tags: Vec::new(),
            changelog: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.estimated_cost = cost;
        self
    }
}

impl Record for IssueCluster {
    const PREFIX: EntityPrefix = EntityPrefix::Cl;
    const NAME: &'static str = "cluster";

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
        if let Some(submission_type) = updates.submission_type {
            self.submission_type = Some(submission_type);
        }
    }
}

impl Filterable for IssueCluster {
    fn program(&self) -> Option<&str> {
        Some(&self.program)
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
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
