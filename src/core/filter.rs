//! Filter engine - conjunctive criteria over record collections
//!
//! Each criterion is either unset (matches everything) or concrete. All set
//! criteria must hold. Filtering is stable and never touches the input.
//! A set criterion on a field the record kind does not carry never matches.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::core::entity::{Record, Severity, Status};
use crate::core::store::Store;

/// Fields the filter engine can look at
///
/// Every accessor defaults to "not carried"; entity kinds override the ones
/// they have.
pub trait Filterable: Record {
    fn program(&self) -> Option<&str> {
        None
    }

    fn team(&self) -> Option<&str> {
        None
    }

    fn category(&self) -> Option<&str> {
        None
    }

    fn severity(&self) -> Option<Severity> {
        None
    }

    /// Cost figure used by min/max cost criteria
    fn cost(&self) -> Option<f64> {
        None
    }

    /// ISO-8601 date used by start/end criteria
    fn date(&self) -> Option<&str> {
        None
    }

    /// Extra text searched alongside the title
    fn description(&self) -> &str {
        ""
    }
}

/// Filter criteria, combined with logical AND
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Exact, case-sensitive program match
    pub program: Option<String>,
    /// Exact, case-sensitive team match
    pub team: Option<String>,
    /// Exact status match
    pub status: Option<Status>,
    /// Category must be one of these (empty = any)
    pub categories: BTreeSet<String>,
    /// Severity must be one of these (empty = any)
    pub severities: BTreeSet<Severity>,
    /// Inclusive lower cost bound
    pub min_cost: Option<f64>,
    /// Inclusive upper cost bound
    pub max_cost: Option<f64>,
    /// Inclusive start date
    pub start: Option<String>,
    /// Inclusive end date
    pub end: Option<String>,
    /// Case-insensitive substring over title and description
    pub search: Option<String>,
}

/// Trim text from form fields; blank means "not filtering"
fn non_blank(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = non_blank(program);
        self
    }

    pub fn team(mut self, team: impl Into<String>) -> Self {
        self.team = non_blank(team);
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        if let Some(c) = non_blank(category) {
            self.categories.insert(c);
        }
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severities.insert(severity);
        self
    }

    pub fn min_cost(mut self, min: f64) -> Self {
        self.min_cost = Some(min);
        self
    }

    pub fn max_cost(mut self, max: f64) -> Self {
        self.max_cost = Some(max);
        self
    }

    pub fn start(mut self, start: impl Into<String>) -> Self {
        self.start = non_blank(start);
        self
    }

    pub fn end(mut self, end: impl Into<String>) -> Self {
        self.end = non_blank(end);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = non_blank(text);
        self
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.program.is_none()
            && self.team.is_none()
            && self.status.is_none()
            && self.categories.is_empty()
            && self.severities.is_empty()
            && self.min_cost.is_none()
            && self.max_cost.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.search.is_none()
    }

    /// Check one record against every set criterion
    pub fn matches<T: Filterable>(&self, record: &T) -> bool {
        exact(self.program.as_deref(), record.program())
            && exact(self.team.as_deref(), record.team())
            && self.status.is_none_or(|s| record.status() == s)
            && member(&self.categories, record.category().map(str::to_string))
            && member(&self.severities, record.severity())
            && self.cost_matches(record.cost())
            && self.date_matches(record.date())
            && self.search_matches(record)
    }

    fn cost_matches(&self, cost: Option<f64>) -> bool {
        if self.min_cost.is_none() && self.max_cost.is_none() {
            return true;
        }
        let Some(cost) = cost else {
            return false;
        };
        self.min_cost.is_none_or(|min| cost >= min) && self.max_cost.is_none_or(|max| cost <= max)
    }

    fn date_matches(&self, date: Option<&str>) -> bool {
        if self.start.is_none() && self.end.is_none() {
            return true;
        }
        let Some(instant) = date.and_then(parse_instant) else {
            return false;
        };
        let after_start = match &self.start {
            Some(s) => parse_instant(s).is_some_and(|start| instant >= start),
            None => true,
        };
        let before_end = match &self.end {
            Some(e) => parse_instant(e).is_some_and(|end| instant <= end),
            None => true,
        };
        after_start && before_end
    }

    fn search_matches<T: Filterable>(&self, record: &T) -> bool {
        let Some(needle) = &self.search else {
            return true;
        };
        let needle = needle.trim().to_lowercase();
        record.title().to_lowercase().contains(&needle)
            || record.description().to_lowercase().contains(&needle)
    }
}

fn exact(criterion: Option<&str>, value: Option<&str>) -> bool {
    match criterion {
        None => true,
        Some(c) => value == Some(c),
    }
}

fn member<V: Ord>(set: &BTreeSet<V>, value: Option<V>) -> bool {
    set.is_empty() || value.is_some_and(|v| set.contains(&v))
}

/// Parse an ISO-8601 date or date-time into an absolute instant
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC) and
/// `YYYY-MM-DD` (midnight UTC). Anything else yields `None`.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Return the records matching `criteria`, in their original order
///
/// Matching records are shared with the input store.
pub fn filter<T: Filterable>(store: &Store<T>, criteria: &FilterCriteria) -> Store<T> {
    if criteria.is_empty() {
        return store.clone();
    }
    let items: Vec<Arc<T>> = store
        .shared()
        .iter()
        .filter(|r| criteria.matches(r.as_ref()))
        .cloned()
        .collect();
    Store::from_shared(items)
}
