//! Cost/risk item entity and the executive exposure summary
//!
//! Risk items quantify the cost impact of a quality problem together with a
//! (static) probability. The summary rolls a filtered list up into the
//! figures shown on the cost-risk dashboard.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::changelog::ChangeLogEntry;
use crate::core::entity::{FieldUpdates, Percent, Record, Severity, Status};
use crate::core::filter::Filterable;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::store::Store;

/// A quantified cost/quality risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskItem {
    /// Unique identifier (RISK-...)
    pub id: EntityId,

    pub title: String,

    #[serde(default)]
    pub description: String,

    pub program: String,

    /// Risk category (e.g., "Warranty", "Scrap", "Recall")
    pub category: String,

    #[serde(default)]
    pub severity: Severity,

    /// Cost if the risk materialises
    pub cost_impact: f64,

    /// Likelihood the risk materialises
    #[serde(default)]
    pub probability: Percent,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    #[serde(default = "default_risk_status")]
    pub status: Status,

    /// Date identified (ISO-8601)
    pub identified: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changelog: Vec<ChangeLogEntry>,
}

fn default_risk_status() -> Status {
    Status::Open
}

impl RiskItem {
    /// Probability-weighted cost
    pub fn expected_cost(&self) -> f64 {
        self.cost_impact * self.probability.fraction()
    }
}

impl Record for RiskItem {
    const PREFIX: EntityPrefix = EntityPrefix::Risk;
    const NAME: &'static str = "risk";

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

impl Filterable for RiskItem {
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
        Some(self.cost_impact)
    }

    fn date(&self) -> Option<&str> {
        Some(&self.identified)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Roll-up of a risk list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RiskSummary {
    pub count: usize,
    /// Sum of cost impacts
    pub total_exposure: f64,
    /// Sum of probability-weighted costs
    pub expected_cost: f64,
    pub by_severity: BTreeMap<Severity, usize>,
    pub by_category: BTreeMap<String, f64>,
}

impl RiskSummary {
    pub fn from_store(store: &Store<RiskItem>) -> Self {
        store.iter().fold(Self::default(), |mut acc, risk| {
            acc.count += 1;
            acc.total_exposure += risk.cost_impact;
            acc.expected_cost += risk.expected_cost();
            *acc.by_severity.entry(risk.severity).or_insert(0) += 1;
            *acc.by_category.entry(risk.category.clone()).or_insert(0.0) += risk.cost_impact;
            acc
        })
    }
}
