//! CLI command implementations

pub mod action;
pub mod approval;
pub mod cluster;
pub mod completions;
pub mod containment;
pub mod directive;
pub mod issue;
pub mod repair;
pub mod risk;
