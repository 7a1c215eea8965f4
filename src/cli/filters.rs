//! Filter flags shared by list commands
//!
//! Every flag maps onto one `FilterCriteria` field.

use clap::ValueEnum;

use crate::core::entity::{Severity, Status};
use crate::core::filter::FilterCriteria;

/// Status filter for list commands
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum StatusFilter {
    Pending,
    Approved,
    Rejected,
    Active,
    Expired,
    Open,
    InProgress,
    Completed,
    /// All statuses - default
    #[default]
    All,
}

impl StatusFilter {
    /// The status to filter on, `None` for all
    pub fn status(&self) -> Option<Status> {
        match self {
            StatusFilter::Pending => Some(Status::Pending),
            StatusFilter::Approved => Some(Status::Approved),
            StatusFilter::Rejected => Some(Status::Rejected),
            StatusFilter::Active => Some(Status::Active),
            StatusFilter::Expired => Some(Status::Expired),
            StatusFilter::Open => Some(Status::Open),
            StatusFilter::InProgress => Some(Status::InProgress),
            StatusFilter::Completed => Some(Status::Completed),
            StatusFilter::All => None,
        }
    }

    pub fn matches(&self, status: &Status) -> bool {
        self.status().is_none_or(|s| s == *status)
    }
}

/// Severity filter for list commands
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SeverityFilter {
    Low,
    Medium,
    High,
}

impl From<SeverityFilter> for Severity {
    fn from(filter: SeverityFilter) -> Self {
        match filter {
            SeverityFilter::Low => Severity::Low,
            SeverityFilter::Medium => Severity::Medium,
            SeverityFilter::High => Severity::High,
        }
    }
}

/// Filter and paging flags for list commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Filter by program (exact match)
    #[arg(long, short = 'p')]
    pub program: Option<String>,

    /// Filter by team (exact match)
    #[arg(long)]
    pub team: Option<String>,

    /// Filter by status
    #[arg(long, short = 's', default_value = "all")]
    pub status: StatusFilter,

    /// Filter by category (repeat or comma-separate for any of several)
    #[arg(long, short = 'c', value_delimiter = ',')]
    pub category: Vec<String>,

    /// Filter by severity (repeat or comma-separate for any of several)
    #[arg(long, value_delimiter = ',')]
    pub severity: Vec<SeverityFilter>,

    /// Minimum cost (inclusive)
    #[arg(long, value_name = "AMOUNT")]
    pub min_cost: Option<f64>,

    /// Maximum cost (inclusive)
    #[arg(long, value_name = "AMOUNT")]
    pub max_cost: Option<f64>,

    /// Earliest date, YYYY-MM-DD or ISO-8601 date-time (inclusive)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Latest date, YYYY-MM-DD or ISO-8601 date-time (inclusive)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Search in title and description (case-insensitive substring)
    #[arg(long)]
    pub search: Option<String>,

    /// Limit output to N items
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show count only, not the items
    #[arg(long)]
    pub count: bool,
}

impl FilterArgs {
    pub fn criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::new();
        if let Some(program) = &self.program {
            criteria = criteria.program(program);
        }
        if let Some(team) = &self.team {
            criteria = criteria.team(team);
        }
        if let Some(status) = self.status.status() {
            criteria = criteria.status(status);
        }
        for category in &self.category {
            criteria = criteria.category(category);
        }
        for severity in &self.severity {
            criteria = criteria.severity((*severity).into());
        }
        if let Some(min) = self.min_cost {
            criteria = criteria.min_cost(min);
        }
        if let Some(max) = self.max_cost {
            criteria = criteria.max_cost(max);
        }
        if let Some(from) = &self.from {
            criteria = criteria.start(from);
        }
        if let Some(to) = &self.to {
            criteria = criteria.end(to);
        }
        if let Some(search) = &self.search {
            criteria = criteria.search(search);
        }
        criteria
    }
}
