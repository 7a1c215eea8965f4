//! Entity identity - prefixed identifiers for every record kind
//!
//! IDs take the form `PREFIX-SUFFIX`. Seed records use short sequence
//! suffixes (`CL-001`); records created during a session use a ULID suffix
//! (`APR-01KCWY20F01B21V0G4E835NW3J`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Record kind encoded in the leading part of an ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityPrefix {
    /// Issue cluster
    Cl,
    /// Standard repair
    Sr,
    /// Containment action
    Cnt,
    /// Approval request
    Apr,
    /// Repair action
    Ra,
    /// Executive directive
    Dir,
    /// Cost/risk item
    Risk,
    /// Submitted issue ticket
    Iss,
    /// Changelog entry
    Log,
    /// Discussion message or reply
    Msg,
}

impl EntityPrefix {
    /// All prefixes, in display order
    pub fn all() -> &'static [EntityPrefix] {
        &[
            EntityPrefix::Cl,
            EntityPrefix::Sr,
            EntityPrefix::Cnt,
            EntityPrefix::Apr,
            EntityPrefix::Ra,
            EntityPrefix::Dir,
            EntityPrefix::Risk,
            EntityPrefix::Iss,
            EntityPrefix::Log,
            EntityPrefix::Msg,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::Cl => "CL",
            EntityPrefix::Sr => "SR",
            EntityPrefix::Cnt => "CNT",
            EntityPrefix::Apr => "APR",
            EntityPrefix::Ra => "RA",
            EntityPrefix::Dir => "DIR",
            EntityPrefix::Risk => "RISK",
            EntityPrefix::Iss => "ISS",
            EntityPrefix::Log => "LOG",
            EntityPrefix::Msg => "MSG",
        }
    }
}

impl fmt::Display for EntityPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityPrefix {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityPrefix::all()
            .iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| IdParseError::UnknownPrefix(s.to_string()))
    }
}

/// Errors from parsing an entity ID
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error("Invalid ID '{0}': expected PREFIX-SUFFIX")]
    MissingSeparator(String),

    #[error("Unknown entity prefix: {0}")]
    UnknownPrefix(String),

    #[error("Invalid ID '{0}': empty suffix")]
    EmptySuffix(String),
}

/// Unique, immutable identifier of a record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    prefix: EntityPrefix,
    suffix: String,
}

impl EntityId {
    /// Generate a fresh ID with a ULID suffix
    pub fn new(prefix: EntityPrefix) -> Self {
        Self {
            prefix,
            suffix: Ulid::new().to_string(),
        }
    }

    /// Build an ID from a known suffix (seed data, tests)
    pub fn with_suffix(prefix: EntityPrefix, suffix: impl Into<String>) -> Self {
        Self {
            prefix,
            suffix: suffix.into(),
        }
    }

    /// Parse `PREFIX-SUFFIX`
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        let (prefix, suffix) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingSeparator(s.to_string()))?;
        if suffix.is_empty() {
            return Err(IdParseError::EmptySuffix(s.to_string()));
        }
        Ok(Self {
            prefix: prefix.parse()?,
            suffix: suffix.to_string(),
        })
    }

    pub fn prefix(&self) -> EntityPrefix {
        self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.suffix)
    }
}

impl FromStr for EntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityId::parse(s)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        EntityId::parse(&s).map_err(serde::de::Error::custom)
    }
}
