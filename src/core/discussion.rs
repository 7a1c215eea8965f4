//! Discussion threads on approval requests and repair actions
//!
//! A thread is a list of top-level messages, each with a flat list of
//! replies. Replies cannot be replied to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::changelog::LogEntry;
use crate::core::entity::Discussable;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::store::Store;
use crate::core::workflow::{actions, WorkflowError};

/// Top-level message in a discussion thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscussionMessage {
    pub id: EntityId,
    pub user: String,
    pub timestamp: DateTime<Utc>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<Reply>,
}

/// Reply to a top-level message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub id: EntityId,
    pub user: String,
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

impl DiscussionMessage {
    fn new(user: &str, text: &str) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Msg),
            user: user.to_string(),
            timestamp: Utc::now(),
            text: text.to_string(),
            replies: Vec::new(),
        }
    }
}

impl Reply {
    fn new(user: &str, text: &str) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Msg),
            user: user.to_string(),
            timestamp: Utc::now(),
            text: text.to_string(),
        }
    }
}

fn message_text(text: &str) -> Result<&str, WorkflowError> {
    let text = text.trim();
    if text.is_empty() {
        Err(WorkflowError::EmptyMessage)
    } else {
        Ok(text)
    }
}

/// Post a new top-level message on a record's thread
///
/// Also appends a "Commented" changelog entry. Unknown record IDs leave the
/// store unchanged.
pub fn post_message<T: Discussable>(
    store: &Store<T>,
    id: &EntityId,
    user: &str,
    text: &str,
) -> Result<Store<T>, WorkflowError> {
    let text = message_text(text)?;

    let next = store.replaced(id, |old| {
        let mut record = old.clone();
        record.discussion_mut().push(DiscussionMessage::new(user, text));
        record
            .changelog_mut()
            .push(LogEntry::new(user, actions::COMMENTED, text).stamp());
        record
    });

    Ok(next.unwrap_or_else(|| {
        debug!(record = %id, "no record with this id; message dropped");
        store.clone()
    }))
}

/// Reply to an existing message on a record's thread
///
/// Unknown record or message IDs leave the store unchanged.
pub fn reply<T: Discussable>(
    store: &Store<T>,
    id: &EntityId,
    message_id: &EntityId,
    user: &str,
    text: &str,
) -> Result<Store<T>, WorkflowError> {
    let text = message_text(text)?;

    let has_message = store
        .get(id)
        .is_some_and(|r| r.discussion().iter().any(|m| &m.id == message_id));
    if !has_message {
        debug!(record = %id, message = %message_id, "no such message; reply dropped");
        return Ok(store.clone());
    }

    let next = store.replaced(id, |old| {
        let mut record = old.clone();
        if let Some(message) = record
            .discussion_mut()
            .iter_mut()
            .find(|m| &m.id == message_id)
        {
            message.replies.push(Reply::new(user, text));
        }
        record.changelog_mut().push(
            LogEntry::new(user, actions::REPLIED, format!("Re {}: {}", message_id, text)).stamp(),
        );
        record
    });

    Ok(next.unwrap_or_else(|| store.clone()))
}
