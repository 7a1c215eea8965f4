//! Workflow engine for status transitions and approvals
//!
//! Validates caller input and the status transition, then hands the update
//! to the changelog recorder. Validation failures are reported before any
//! record is touched. An unknown record ID is not an error: the store comes
//! back unchanged.

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::core::changelog::{apply_changelog, LogEntry};
use crate::core::entity::{FieldUpdates, Record, Status, SubmissionType};
use crate::core::filter::{filter, FilterCriteria, Filterable};
use crate::core::identity::EntityId;
use crate::core::selection::Selection;
use crate::core::store::Store;

/// Workflow configuration from the user config file
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Approvals must carry a non-blank comment (default: true)
    pub require_approval_comment: bool,

    /// Approving an already-approved record appends another entry (default: true)
    pub allow_reapproval: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            require_approval_comment: true,
            allow_reapproval: true,
        }
    }
}

/// Errors that can occur during workflow operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Invalid status transition for {id}: {from} -> {to}")]
    InvalidTransition {
        id: EntityId,
        from: Status,
        to: Status,
    },

    #[error("A rejection reason is required")]
    MissingReason,

    #[error("An approval comment is required")]
    MissingComment,

    #[error("A target team is required")]
    MissingTargetTeam,

    #[error("An assignee is required")]
    MissingAssignee,

    #[error("Message text is required")]
    EmptyMessage,

    #[error("No items selected")]
    NoSelection,
}

/// Audit action names written by the workflow
pub mod actions {
    pub const APPROVED: &str = "Approved";
    pub const REJECTED: &str = "Rejected";
    pub const SUBMITTED: &str = "Submitted for approval";
    pub const COMMENTED: &str = "Commented";
    pub const REPLIED: &str = "Replied";
    pub const CREATED: &str = "Created";
}

fn require(text: &str, err: WorkflowError) -> Result<&str, WorkflowError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(err)
    } else {
        Ok(trimmed)
    }
}

/// Workflow engine for managing status transitions
#[derive(Debug, Clone, Default)]
pub struct WorkflowEngine {
    config: WorkflowConfig,
}

impl WorkflowEngine {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Check if a status transition is valid
    pub fn is_valid_transition(&self, from: Status, to: Status) -> bool {
        match (from, to) {
            (Status::Pending, Status::Approved) | (Status::Pending, Status::Rejected) => true,
            // Submission annotations keep the record pending
            (Status::Pending, Status::Pending) => true,
            (Status::Approved, Status::Approved) => self.config.allow_reapproval,
            _ => false,
        }
    }

    /// Get allowed transitions from the current status
    pub fn allowed_transitions(&self, current: Status) -> Vec<Status> {
        match current {
            Status::Pending => vec![Status::Approved, Status::Rejected, Status::Pending],
            Status::Approved if self.config.allow_reapproval => vec![Status::Approved],
            _ => vec![],
        }
    }

    fn check_transition<T: Record>(
        &self,
        store: &Store<T>,
        id: &EntityId,
        to: Status,
    ) -> Result<bool, WorkflowError> {
        let Some(record) = store.get(id) else {
            warn!(record = %id, "no record with this id; store unchanged");
            return Ok(false);
        };
        let from = record.status();
        if !self.is_valid_transition(from, to) {
            return Err(WorkflowError::InvalidTransition {
                id: id.clone(),
                from,
                to,
            });
        }
        Ok(true)
    }

    /// Approve a pending record
    pub fn approve<T: Record>(
        &self,
        store: &Store<T>,
        id: &EntityId,
        user: &str,
        comment: &str,
    ) -> Result<Store<T>, WorkflowError> {
        let comment = if self.config.require_approval_comment {
            require(comment, WorkflowError::MissingComment)?
        } else {
            comment.trim()
        };
        if !self.check_transition(store, id, Status::Approved)? {
            return Ok(store.clone());
        }

        info!(record = %id, %user, "approved");
        Ok(apply_changelog(
            store,
            id,
            LogEntry::new(user, actions::APPROVED, comment),
            &FieldUpdates::status(Status::Approved),
        ))
    }

    /// Reject a pending record, storing the reason
    pub fn reject<T: Record>(
        &self,
        store: &Store<T>,
        id: &EntityId,
        user: &str,
        reason: &str,
    ) -> Result<Store<T>, WorkflowError> {
        let reason = require(reason, WorkflowError::MissingReason)?;
        if !self.check_transition(store, id, Status::Rejected)? {
            return Ok(store.clone());
        }

        info!(record = %id, %user, "rejected");
        Ok(apply_changelog(
            store,
            id,
            LogEntry::new(user, actions::REJECTED, reason),
            &FieldUpdates::status(Status::Rejected).with_rejection_reason(reason),
        ))
    }

    /// Route a pending record to a team for approval
    ///
    /// Sets the submission type; the status stays pending.
    pub fn submit_for_approval<T: Record>(
        &self,
        store: &Store<T>,
        id: &EntityId,
        user: &str,
        submission_type: SubmissionType,
        target_team: &str,
        comment: &str,
    ) -> Result<Store<T>, WorkflowError> {
        let team = require(target_team, WorkflowError::MissingTargetTeam)?;
        if !self.check_transition(store, id, Status::Pending)? {
            return Ok(store.clone());
        }

        let mut note = format!("Submitted to {} as {}", team, submission_type);
        if !comment.trim().is_empty() {
            note.push_str(": ");
            note.push_str(comment.trim());
        }

        info!(record = %id, %user, team, "submitted for approval");
        Ok(apply_changelog(
            store,
            id,
            LogEntry::new(user, actions::SUBMITTED, note),
            &FieldUpdates::none().with_submission_type(submission_type),
        ))
    }

    /// Reject every selected record with the same reason
    ///
    /// All-or-nothing: if any selected record cannot be rejected, nothing is.
    /// Selected IDs missing from the store are skipped.
    pub fn bulk_reject<T: Record>(
        &self,
        store: &Store<T>,
        selection: &Selection,
        user: &str,
        reason: &str,
    ) -> Result<Store<T>, WorkflowError> {
        let ids = selection.require_any()?;
        require(reason, WorkflowError::MissingReason)?;

        ids.iter()
            .try_fold(store.clone(), |acc, id| self.reject(&acc, id, user, reason))
    }

    /// Approve every selected record with the same comment
    pub fn bulk_approve<T: Record>(
        &self,
        store: &Store<T>,
        selection: &Selection,
        user: &str,
        comment: &str,
    ) -> Result<Store<T>, WorkflowError> {
        let ids = selection.require_any()?;

        ids.iter()
            .try_fold(store.clone(), |acc, id| self.approve(&acc, id, user, comment))
    }
}

/// Records still awaiting a decision
///
/// Approved and rejected records drop out of this view; their history stays
/// in the store.
pub fn pending<T: Filterable>(store: &Store<T>) -> Store<T> {
    filter(store, &FilterCriteria::new().status(Status::Pending))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{cluster_id, sample_clusters};

    fn engine() -> WorkflowEngine {
        WorkflowEngine::default()
    }

    #[test]
    fn test_valid_transitions() {
        let engine = engine();
        assert!(engine.is_valid_transition(Status::Pending, Status::Approved));
        assert!(engine.is_valid_transition(Status::Pending, Status::Rejected));
        assert!(engine.is_valid_transition(Status::Pending, Status::Pending));
        assert!(engine.is_valid_transition(Status::Approved, Status::Approved));

        assert!(!engine.is_valid_transition(Status::Rejected, Status::Approved));
        assert!(!engine.is_valid_transition(Status::Approved, Status::Rejected));
        assert!(!engine.is_valid_transition(Status::Rejected, Status::Rejected));
    }

    #[test]
    fn test_reapproval_can_be_disabled() {
        let engine = WorkflowEngine::new(WorkflowConfig {
            allow_reapproval: false,
            ..Default::default()
        });
        assert!(!engine.is_valid_transition(Status::Approved, Status::Approved));
        assert!(engine.allowed_transitions(Status::Approved).is_empty());
    }

    #[test]
    fn test_allowed_transitions() {
        let engine = engine();
        assert_eq!(
            engine.allowed_transitions(Status::Pending),
            vec![Status::Approved, Status::Rejected, Status::Pending]
        );
        assert_eq!(
            engine.allowed_transitions(Status::Approved),
            vec![Status::Approved]
        );
        assert!(engine.allowed_transitions(Status::Rejected).is_empty());
    }

    #[test]
    fn test_approve() {
        let store = sample_clusters();
        let id = cluster_id("001");
        let next = engine().approve(&store, &id, "U", "ok").unwrap();

        let cluster = next.get(&id).unwrap();
        assert_eq!(cluster.status, Status::Approved);
        assert_eq!(cluster.changelog.last().unwrap().action, actions::APPROVED);
    }

    #[test]
    fn test_approve_requires_comment() {
        let store = sample_clusters();
        let err = engine()
            .approve(&store, &cluster_id("001"), "U", "   ")
            .unwrap_err();
        assert_eq!(err, WorkflowError::MissingComment);
    }

    #[test]
    fn test_approve_comment_optional_when_configured() {
        let engine = WorkflowEngine::new(WorkflowConfig {
            require_approval_comment: false,
            ..Default::default()
        });
        let store = sample_clusters();
        assert!(engine.approve(&store, &cluster_id("001"), "U", "").is_ok());
    }

    #[test]
    fn test_reapprove_appends_another_entry() {
        let store = sample_clusters();
        let id = cluster_id("004");
        let before = store.get(&id).unwrap().changelog.len();
        let next = engine().approve(&store, &id, "U", "again").unwrap();
        assert_eq!(next.get(&id).unwrap().changelog.len(), before + 1);
        assert_eq!(next.get(&id).unwrap().status, Status::Approved);
    }

    #[test]
    fn test_reject_sets_reason() {
        let store = sample_clusters();
        let id = cluster_id("002");
        let next = engine()
            .reject(&store, &id, "Manager", "Root cause not confirmed")
            .unwrap();

        let cluster = next.get(&id).unwrap();
        assert_eq!(cluster.status, Status::Rejected);
        assert_eq!(
            cluster.rejection_reason.as_deref(),
            Some("Root cause not confirmed")
        );
        let last = cluster.changelog.last().unwrap();
        assert_eq!(last.action, actions::REJECTED);
        assert_eq!(last.comment, "Root cause not confirmed");
    }

    #[test]
    fn test_reject_requires_reason_and_leaves_store_alone() {
        let store = sample_clusters();
        let result = engine().reject(&store, &cluster_id("002"), "Manager", " \t");
        assert_eq!(result.unwrap_err(), WorkflowError::MissingReason);
        assert_eq!(
            store.get(&cluster_id("002")).unwrap().status,
            Status::Pending
        );
    }

    #[test]
    fn test_rejected_is_terminal() {
        let store = sample_clusters();
        let id = cluster_id("002");
        let rejected = engine().reject(&store, &id, "M", "no").unwrap();
        let err = engine().approve(&rejected, &id, "M", "yes").unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidTransition { .. }));
    }

    #[test]
    fn test_unknown_id_is_silent() {
        let store = sample_clusters();
        let next = engine()
            .approve(&store, &cluster_id("404"), "U", "ok")
            .unwrap();
        assert_eq!(next, store);
    }

    #[test]
    fn test_submit_for_approval() {
        let store = sample_clusters();
        let id = cluster_id("003");
        let next = engine()
            .submit_for_approval(
                &store,
                &id,
                "Engineer",
                SubmissionType::Expedited,
                "Paint Line",
                "line down",
            )
            .unwrap();

        let cluster = next.get(&id).unwrap();
        assert_eq!(cluster.status, Status::Pending);
        assert_eq!(cluster.submission_type, Some(SubmissionType::Expedited));
        let last = cluster.changelog.last().unwrap();
        assert_eq!(last.action, actions::SUBMITTED);
        assert_eq!(last.comment, "Submitted to Paint Line as expedited: line down");
    }

    #[test]
    fn test_submit_requires_team() {
        let store = sample_clusters();
        let err = engine()
            .submit_for_approval(
                &store,
                &cluster_id("003"),
                "E",
                SubmissionType::Standard,
                "",
                "",
            )
            .unwrap_err();
        assert_eq!(err, WorkflowError::MissingTargetTeam);
    }

    #[test]
    fn test_bulk_reject_empty_selection() {
        let store = sample_clusters();
        let err = engine()
            .bulk_reject(&store, &Selection::new(), "M", "dup")
            .unwrap_err();
        assert_eq!(err, WorkflowError::NoSelection);
    }

    #[test]
    fn test_bulk_reject_selected_only() {
        let store = sample_clusters();
        let selection = Selection::new()
            .toggle(&cluster_id("001"))
            .toggle(&cluster_id("003"));
        let next = engine()
            .bulk_reject(&store, &selection, "M", "duplicate")
            .unwrap();

        assert_eq!(next.get(&cluster_id("001")).unwrap().status, Status::Rejected);
        assert_eq!(next.get(&cluster_id("003")).unwrap().status, Status::Rejected);
        assert_eq!(next.get(&cluster_id("002")).unwrap().status, Status::Pending);
    }

    #[test]
    fn test_bulk_reject_is_all_or_nothing() {
        let store = sample_clusters();
        // CL-004 is approved and cannot be rejected
        let selection = Selection::select_all([cluster_id("001"), cluster_id("004")]);
        let result = engine().bulk_reject(&store, &selection, "M", "dup");
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_pending_view() {
        let store = sample_clusters();
        let next = engine()
            .approve(&store, &cluster_id("001"), "M", "ok")
            .unwrap();
        let queue = pending(&next);
        assert_eq!(queue.len(), 2);
        assert!(!queue.contains(&cluster_id("001")));
        // History kept in the full store
        assert!(next.contains(&cluster_id("001")));
    }
}
