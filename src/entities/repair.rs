//! Standard repair entity - approved, reusable fix procedures

use serde::{Deserialize, Serialize};

use crate::core::changelog::ChangeLogEntry;
use crate::core::entity::{FieldUpdates, Record, Status};
use crate::core::filter::Filterable;
use crate::core::identity::{EntityId, EntityPrefix};

/// A standard repair procedure in the repair library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardRepair {
    pub id: EntityId,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Failure category the repair applies to
    pub category: String,

    pub program: String,

    #[serde(default = "default_repair_status")]
    pub status: Status,

    /// Procedure steps, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,

    #[serde(default)]
    pub estimated_cost: f64,

    #[serde(default)]
    pub estimated_hours: f64,

    pub created: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changelog: Vec<ChangeLogEntry>,
}

fn default_repair_status() -> Status {
    Status::Active
}

impl Record for StandardRepair {
    const PREFIX: EntityPrefix = EntityPrefix::Sr;
    const NAME: &'static str = "standard repair";

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

impl Filterable for StandardRepair {
    fn program(&self) -> Option<&str> {
        Some(&self.program)
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
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
