//! Executive directive entity
//!
//! Directives can be tagged with the risk items they target. The tag is a
//! many-to-many reference, not ownership: a risk may be targeted by several
//! directives, and a targeted ID may not resolve at all.

use serde::{Deserialize, Serialize};

use crate::core::changelog::ChangeLogEntry;
use crate::core::entity::{FieldUpdates, Record, Severity, Status};
use crate::core::filter::Filterable;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::store::Store;
use crate::entities::risk::RiskItem;

/// An instruction issued by leadership
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    /// Unique identifier (DIR-...)
    pub id: EntityId,

    pub title: String,

    #[serde(default)]
    pub description: String,

    pub issued_by: String,

    /// Issue date (ISO-8601)
    pub issued: String,

    #[serde(default)]
    pub priority: Severity,

    /// Risk items this directive addresses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targeted_risks: Vec<EntityId>,

    #[serde(default = "default_directive_status")]
    pub status: Status,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changelog: Vec<ChangeLogEntry>,
}

fn default_directive_status() -> Status {
    Status::Active
}

impl Directive {
    /// Resolve targeted risks, dropping IDs that are not in `risks`
    pub fn resolve_targets<'a>(&self, risks: &'a Store<RiskItem>) -> Vec<&'a RiskItem> {
        self.targeted_risks
            .iter()
            .filter_map(|id| risks.get(id))
            .collect()
    }

    pub fn targets(&self, risk: &EntityId) -> bool {
        self.targeted_risks.contains(risk)
    }
}

impl Record for Directive {
    const PREFIX: EntityPrefix = EntityPrefix::Dir;
    const NAME: &'static str = "directive";

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

impl Filterable for Directive {
    fn severity(&self) -> Option<Severity> {
        Some(self.priority)
    }

    fn date(&self) -> Option<&str> {
        Some(&self.issued)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
