//! Core module - records, stores and the triage workflow

pub mod changelog;
pub mod config;
pub mod discussion;
pub mod draft;
pub mod entity;
pub mod filter;
pub mod identity;
pub mod seed;
pub mod selection;
pub mod session;
pub mod store;
pub mod workflow;

#[cfg(test)]
pub(crate) mod fixtures;

pub use changelog::{append_log, apply_changelog, ChangeLogEntry, LogEntry};
pub use config::{Config, ConfigError};
pub use discussion::{post_message, reply, DiscussionMessage, Reply};
pub use draft::{DraftError, DraftStore};
pub use entity::{Discussable, FieldUpdates, Percent, Record, Severity, Status, SubmissionType};
pub use filter::{filter, FilterCriteria, Filterable};
pub use identity::{EntityId, EntityPrefix, IdParseError};
pub use seed::SeedError;
pub use selection::Selection;
pub use session::Session;
pub use store::Store;
pub use workflow::{pending, WorkflowConfig, WorkflowEngine, WorkflowError};
