//! QAT: Quality Assurance Triage
//!
//! Filter, triage and approve manufacturing quality issues. Every change is
//! recorded in an append-only changelog on the affected record.

pub mod cli;
pub mod core;
pub mod entities;
