//! Small in-code data sets for unit tests

use crate::core::changelog::LogEntry;
use crate::core::entity::{Percent, Severity, Status};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::store::Store;
use crate::entities::{ApprovalRequest, IssueCluster, RiskItem};

pub fn cluster_id(suffix: &str) -> EntityId {
    EntityId::with_suffix(EntityPrefix::Cl, suffix)
}

pub fn request_id(suffix: &str) -> EntityId {
    EntityId::with_suffix(EntityPrefix::Apr, suffix)
}

/// Four clusters: 001 high/Alpha/Welding, 002 medium/Alpha/Machining,
/// 003 high/Beta/Paint, 004 low/Gamma/Electrical (approved)
pub fn sample_clusters() -> Store<IssueCluster> {
    let mut first = IssueCluster::new(
        cluster_id("001"),
        "Weld porosity on bracket seams",
        Severity::High,
        "Alpha",
        "Welding",
        "2024-01-15T08:30:00Z",
    )
    .with_description("Gas coverage drops at the end of long seams")
    .with_cost(12_000.0);
    first
        .changelog
        .push(LogEntry::new("System", "Created", "").stamp());

    Store::new([
        first,
        IssueCluster::new(
            cluster_id("002"),
            "Bore diameter drift",
            Severity::Medium,
            "Alpha",
            "Machining",
            "2024-02-10",
        )
        .with_cost(4_500.0),
        IssueCluster::new(
            cluster_id("003"),
            "Orange peel on door panels",
            Severity::High,
            "Beta",
            "Paint",
            "2024-03-05T14:00:00Z",
        )
        .with_cost(18_000.0),
        IssueCluster::new(
            cluster_id("004"),
            "Connector pin push-back",
            Severity::Low,
            "Gamma",
            "Electrical",
            "2024-03-20",
        )
        .with_status(Status::Approved),
    ])
}

fn risk(suffix: &str, severity: Severity, cost: f64, probability: u8) -> RiskItem {
    RiskItem {
        id: EntityId::with_suffix(EntityPrefix::Risk, suffix),
        title: format!("Risk {}", suffix),
        description: String::new(),
        program: "Alpha".to_string(),
        category: "Warranty".to_string(),
        severity,
        cost_impact: cost,
        probability: Percent::new(probability).unwrap(),
        owner: None,
        status: Status::Open,
        identified: "2024-01-01".to_string(),
        changelog: Vec::new(),
    }
}

/// Three risks costing 5000, 15000 and 25000
pub fn sample_risks() -> Store<RiskItem> {
    Store::new([
        risk("001", Severity::Low, 5_000.0, 50),
        risk("002", Severity::Medium, 15_000.0, 20),
        risk("003", Severity::High, 25_000.0, 40),
    ])
}

pub fn sample_requests() -> Store<ApprovalRequest> {
    let request = |suffix: &str, team: &str| ApprovalRequest {
        id: request_id(suffix),
        title: format!("Request {}", suffix),
        description: String::new(),
        request_type: "Process change".to_string(),
        requested_by: "Engineer".to_string(),
        team: team.to_string(),
        program: "Alpha".to_string(),
        severity: Severity::Medium,
        estimated_cost: 2_000.0,
        submitted: "2024-02-01".to_string(),
        status: Status::Pending,
        rejection_reason: None,
        cluster_id: Some(cluster_id("001")),
        changelog: Vec::new(),
        discussion: Vec::new(),
    };
    Store::new([request("001", "Quality"), request("002", "Manufacturing")])
}
