//! Entity type definitions

pub mod approval;
pub mod cluster;
pub mod containment;
pub mod directive;
pub mod issue;
pub mod repair;
pub mod repair_action;
pub mod risk;

pub use approval::ApprovalRequest;
pub use cluster::IssueCluster;
pub use containment::Containment;
pub use directive::Directive;
pub use issue::{FormError, Issue, IssueForm};
pub use repair::StandardRepair;
pub use repair_action::RepairAction;
pub use risk::{RiskItem, RiskSummary};
