//! Seed data - the records every session starts from
//!
//! The data lives as YAML under `seed/` and is compiled into the binary.

use rust_embed::Embed;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::entity::Record;
use crate::core::store::Store;

#[derive(Embed)]
#[folder = "seed/"]
struct SeedFiles;

/// Errors loading embedded seed data
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Seed file not found: {0}")]
    Missing(String),

    #[error("Seed file {0} is not valid UTF-8")]
    Encoding(String),

    #[error("Failed to parse seed file {file}: {message}")]
    Parse { file: String, message: String },
}

/// Seed file names, one per record kind
pub mod files {
    pub const CLUSTERS: &str = "clusters.yaml";
    pub const REPAIRS: &str = "repairs.yaml";
    pub const CONTAINMENTS: &str = "containments.yaml";
    pub const APPROVALS: &str = "approvals.yaml";
    pub const REPAIR_ACTIONS: &str = "repair_actions.yaml";
    pub const DIRECTIVES: &str = "directives.yaml";
    pub const RISKS: &str = "risks.yaml";
    pub const ISSUES: &str = "issues.yaml";
}

/// Load one seed file into a store
pub fn load<T: Record + DeserializeOwned>(file: &str) -> Result<Store<T>, SeedError> {
    let data = SeedFiles::get(file).ok_or_else(|| SeedError::Missing(file.to_string()))?;
    let content =
        std::str::from_utf8(&data.data).map_err(|_| SeedError::Encoding(file.to_string()))?;
    parse(content, file)
}

/// Parse a YAML list of records
pub fn parse<T: Record + DeserializeOwned>(content: &str, file: &str) -> Result<Store<T>, SeedError> {
    let records: Vec<T> = serde_yml::from_str(content).map_err(|e| SeedError::Parse {
        file: file.to_string(),
        message: e.to_string(),
    })?;
    Ok(Store::new(records))
}
