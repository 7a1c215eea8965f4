//! Working session: one store per surface
//!
//! A session is built from seed data. Operations produce new stores, and the
//! caller swaps them in.

use crate::core::identity::EntityId;
use crate::core::seed::{self, files, SeedError};
use crate::core::store::Store;
use crate::core::workflow::WorkflowEngine;
use crate::entities::{
    ApprovalRequest, Containment, Directive, Issue, IssueCluster, RepairAction, RiskItem,
    StandardRepair,
};

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub clusters: Store<IssueCluster>,
    pub repairs: Store<StandardRepair>,
    pub containments: Store<Containment>,
    pub approvals: Store<ApprovalRequest>,
    pub repair_actions: Store<RepairAction>,
    pub directives: Store<Directive>,
    pub risks: Store<RiskItem>,
    pub issues: Store<Issue>,

    engine: WorkflowEngine,
}

impl Session {
    /// Build a session from the embedded seed data
    pub fn from_seed(engine: WorkflowEngine) -> Result<Self, SeedError> {
        Ok(Self {
            clusters: seed::load(files::CLUSTERS)?,
            repairs: seed::load(files::REPAIRS)?,
            containments: seed::load(files::CONTAINMENTS)?,
            approvals: seed::load(files::APPROVALS)?,
            repair_actions: seed::load(files::REPAIR_ACTIONS)?,
            directives: seed::load(files::DIRECTIVES)?,
            risks: seed::load(files::RISKS)?,
            issues: seed::load(files::ISSUES)?,
            engine,
        })
    }

    pub fn engine(&self) -> &WorkflowEngine {
        &self.engine
    }

    pub fn cluster(&self, id: &EntityId) -> Option<&IssueCluster> {
        self.clusters.get(id)
    }

    /// Cluster an approval request was raised from, if it still exists
    pub fn cluster_of(&self, request: &ApprovalRequest) -> Option<&IssueCluster> {
        request.cluster_id.as_ref().and_then(|id| self.cluster(id))
    }

    /// Risks targeted by a directive, skipping IDs with no risk record
    pub fn directive_risks(&self, directive: &Directive) -> Vec<&RiskItem> {
        directive.resolve_targets(&self.risks)
    }

    /// Directives that target a risk
    pub fn directives_for(&self, risk: &EntityId) -> Vec<&Directive> {
        self.directives.iter().filter(|d| d.targets(risk)).collect()
    }

    /// Containments opened against a cluster
    pub fn containments_for(&self, cluster: &EntityId) -> Vec<&Containment> {
        self.containments
            .iter()
            .filter(|c| c.cluster_id.as_ref() == Some(cluster))
            .collect()
    }

    pub fn submit_issue(&mut self, issue: Issue) {
        self.issues = self.issues.with_inserted(issue);
    }
}
