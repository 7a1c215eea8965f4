//! Record trait and classification types shared by every entity kind

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::changelog::ChangeLogEntry;
use crate::core::discussion::DiscussionMessage;
use crate::core::identity::{EntityId, EntityPrefix};

/// Common capability of every auditable record
///
/// Entity kinds layer their own fields on top; the filter engine, the
/// changelog recorder and the workflow transitions only go through this trait.
pub trait Record: Clone {
    /// The ID prefix for this kind (e.g., `CL`, `APR`)
    const PREFIX: EntityPrefix;

    /// Singular display name (e.g., "cluster")
    const NAME: &'static str;

    /// Get the record's unique ID
    fn id(&self) -> &EntityId;

    /// Get the record's title
    fn title(&self) -> &str;

    /// Get the record's current status
    fn status(&self) -> Status;

    /// Audit trail, oldest first
    fn changelog(&self) -> &[ChangeLogEntry];

    /// Mutable access for the recorder; callers append, never rewrite
    fn changelog_mut(&mut self) -> &mut Vec<ChangeLogEntry>;

    /// Merge a field update set into this record
    ///
    /// Fields the kind does not carry are ignored.
    fn apply_updates(&mut self, updates: &FieldUpdates);
}

/// Records that carry a discussion thread (approval requests, repair actions)
pub trait Discussable: Record {
    fn discussion(&self) -> &[DiscussionMessage];

    fn discussion_mut(&mut self) -> &mut Vec<DiscussionMessage>;
}

/// Partial update applied alongside a changelog entry
///
/// Each `Some` field replaces the record's value; `None` leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldUpdates {
    pub status: Option<Status>,
    pub rejection_reason: Option<String>,
    pub submission_type: Option<SubmissionType>,
    pub assignee: Option<String>,
}

impl FieldUpdates {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn with_rejection_reason(mut self, reason: impl Into<String>) -> Self {
        self.rejection_reason = Some(reason.into());
        self
    }

    pub fn with_submission_type(mut self, submission_type: SubmissionType) -> Self {
        self.submission_type = Some(submission_type);
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Status values across all record kinds
///
/// Approval-style records use Pending/Approved/Rejected; containments use
/// Active/Expired; issues and repair actions use Open/InProgress/Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Pending,
    Approved,
    Rejected,
    Active,
    Expired,
    Open,
    InProgress,
    Completed,
}

impl Status {
    /// Terminal states accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Rejected | Status::Expired | Status::Completed)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Pending => write!(f, "pending"),
            Status::Approved => write!(f, "approved"),
            Status::Rejected => write!(f, "rejected"),
            Status::Active => write!(f, "active"),
            Status::Expired => write!(f, "expired"),
            Status::Open => write!(f, "open"),
            Status::InProgress => write!(f, "in_progress"),
            Status::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "approved" => Ok(Status::Approved),
            "rejected" => Ok(Status::Rejected),
            "active" => Ok(Status::Active),
            "expired" => Ok(Status::Expired),
            "open" | "new" => Ok(Status::Open),
            "in_progress" | "in-progress" | "inprogress" => Ok(Status::InProgress),
            "completed" | "done" | "closed" => Ok(Status::Completed),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

/// Severity of an issue, cluster or risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" | "minor" => Ok(Severity::Low),
            "medium" | "moderate" => Ok(Severity::Medium),
            "high" | "major" | "critical" => Ok(Severity::High),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// How a cluster's fix was routed for approval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionType {
    /// Normal review queue
    #[default]
    Standard,
    /// Fast-tracked review
    Expedited,
    /// Temporary deviation from the standard process
    Deviation,
}

impl std::fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionType::Standard => write!(f, "standard"),
            SubmissionType::Expedited => write!(f, "expedited"),
            SubmissionType::Deviation => write!(f, "deviation"),
        }
    }
}

impl FromStr for SubmissionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" | "normal" => Ok(SubmissionType::Standard),
            "expedited" | "urgent" => Ok(SubmissionType::Expedited),
            "deviation" => Ok(SubmissionType::Deviation),
            _ => Err(format!("Unknown submission type: {}", s)),
        }
    }
}

/// Whole percentage in 0..=100 (confidence scores, probabilities)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percent(u8);

impl Percent {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Result<Self, String> {
        if value > Self::MAX {
            Err(format!("Percentage must be between 0 and 100, got {}", value))
        } else {
            Ok(Self(value))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Value in 0.0..=1.0
    pub fn fraction(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl TryFrom<u8> for Percent {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Percent::new(value)
    }
}

impl From<Percent> for u8 {
    fn from(c: Percent) -> u8 {
        c.0
    }
}

impl std::fmt::Display for Percent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip_display_parse() {
        for status in [
            Status::Pending,
            Status::Approved,
            Status::Rejected,
            Status::Active,
            Status::Expired,
            Status::Open,
            Status::InProgress,
            Status::Completed,
        ] {
            assert_eq!(status.to_string().parse::<Status>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_terminal() {
        assert!(Status::Rejected.is_terminal());
        assert!(!Status::Approved.is_terminal());
        assert!(!Status::Pending.is_terminal());
    }

    #[test]
    fn test_severity_aliases() {
        assert_eq!("High".parse::<Severity>().unwrap(), Severity::High);
        assert_eq!("critical".parse::<Severity>().unwrap(), Severity::High);
        assert_eq!("minor".parse::<Severity>().unwrap(), Severity::Low);
        assert!("urgent".parse::<Severity>().is_err());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn test_percent_bounds() {
        assert_eq!(Percent::new(0).unwrap().value(), 0);
        assert_eq!(Percent::new(100).unwrap().value(), 100);
        assert!(Percent::new(101).is_err());
    }

    #[test]
    fn test_percent_rejects_out_of_range_on_deserialize() {
        assert!(serde_json::from_str::<Percent>("87").is_ok());
        assert!(serde_json::from_str::<Percent>("150").is_err());
    }

    #[test]
    fn test_field_updates_builder() {
        let updates = FieldUpdates::status(Status::Rejected).with_rejection_reason("bad fit");
        assert_eq!(updates.status, Some(Status::Rejected));
        assert_eq!(updates.rejection_reason.as_deref(), Some("bad fit"));
        assert!(!updates.is_empty());
        assert!(FieldUpdates::none().is_empty());
    }
}
