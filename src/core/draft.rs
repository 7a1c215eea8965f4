//! Local draft of the issue submission form
//!
//! Best effort: a missing or unreadable draft loads as `None`.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::entities::issue::IssueForm;

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Failed to write draft: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to encode draft: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A single JSON draft file
#[derive(Debug, Clone)]
pub struct DraftStore {
    path: PathBuf,
}

impl DraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, form: &IssueForm) -> Result<(), DraftError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(form)?;
        std::fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "draft saved");
        Ok(())
    }

    pub fn load(&self) -> Option<IssueForm> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read draft");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(form) => Some(form),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring corrupt draft");
                None
            }
        }
    }

    /// Remove the draft; clearing a missing draft succeeds
    pub fn clear(&self) -> Result<(), DraftError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
