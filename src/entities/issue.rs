//! Issue ticket entity and the submission form it is created from

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::changelog::{ChangeLogEntry, LogEntry};
use crate::core::entity::{FieldUpdates, Record, Severity, Status};
use crate::core::filter::Filterable;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::workflow::actions;

/// Validation failure on the submission form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Issue submission form, as typed by the reporter
///
/// Also the shape of the saved draft, so every field is optional on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueForm {
    pub title: String,
    pub description: String,
    pub severity: Option<Severity>,
    pub program: String,
    pub category: String,
    pub part_number: Option<String>,
    pub production_line: Option<String>,
}

impl IssueForm {
    /// Check required fields, reporting every missing one at once
    pub fn validate(&self) -> Result<(), FormError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.program.trim().is_empty() {
            missing.push("program");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::MissingFields(missing))
        }
    }

    /// True when nothing has been entered yet
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

/// A submitted issue ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Unique identifier (ISS-...)
    pub id: EntityId,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub severity: Severity,

    pub program: String,

    #[serde(default)]
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_line: Option<String>,

    pub reported_by: String,

    /// Report date (ISO-8601)
    pub reported: String,

    #[serde(default = "default_issue_status")]
    pub status: Status,

    /// Cluster the issue was grouped into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<EntityId>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changelog: Vec<ChangeLogEntry>,
}

fn default_issue_status() -> Status {
    Status::Open
}

impl Issue {
    /// Create an open ticket from a validated form
    pub fn from_form(form: IssueForm, reporter: &str) -> Result<Self, FormError> {
        form.validate()?;

        let category = if form.category.trim().is_empty() {
            "Uncategorized".to_string()
        } else {
            form.category.trim().to_string()
        };

        Ok(Self {
            id: EntityId::new(EntityPrefix::Iss),
            title: form.title.trim().to_string(),
            description: form.description.trim().to_string(),
            severity: form.severity.unwrap_or_default(),
            program: form.program.trim().to_string(),
            category,
            part_number: form.part_number,
            production_line: form.production_line,
            reported_by: reporter.to_string(),
            reported: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            status: Status::Open,
            cluster_id: None,
            changelog: vec![LogEntry::new(reporter, actions::CREATED, "").stamp()],
        })
    }
}

impl Record for Issue {
    const PREFIX: EntityPrefix = EntityPrefix::Iss;
    const NAME: &'static str = "issue";

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
    }
}

impl Filterable for Issue {
    fn program(&self) -> Option<&str> {
        Some(&self.program)
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn date(&self) -> Option<&str> {
        Some(&self.reported)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
