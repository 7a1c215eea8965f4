//! Command-line argument definitions

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    action::ActionCommands, approval::ApprovalCommands, cluster::ClusterCommands,
    completions::CompletionsArgs, containment::ContainmentCommands, directive::DirectiveCommands,
    issue::IssueCommands, repair::RepairCommands, risk::RiskCommands,
};

/// QAT - Quality Assurance Triage
///
/// Filter issue clusters, route them for approval, and track the
/// containments, repairs and risks that follow.
#[derive(Parser, Debug)]
#[command(name = "qat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output: OutputFormat,

    /// Name recorded in audit entries (overrides QAT_USER and config)
    #[arg(long, short = 'u', global = true)]
    pub user: Option<String>,
}

/// Output format for list and show commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Table for lists, detail view for single records
    #[default]
    Auto,
    /// Bordered table
    Table,
    Json,
    Yaml,
    Csv,
    /// IDs only, one per line
    Id,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Issue clusters: review, approve, reject, route
    #[command(subcommand)]
    Cluster(ClusterCommands),

    /// Approval requests and their discussions
    #[command(subcommand)]
    Approval(ApprovalCommands),

    /// Repair actions raised against clusters
    #[command(subcommand)]
    Action(ActionCommands),

    /// Standard repair catalog
    #[command(subcommand)]
    Repair(RepairCommands),

    /// Containment measures
    #[command(subcommand)]
    Containment(ContainmentCommands),

    /// Risk register
    #[command(subcommand)]
    Risk(RiskCommands),

    /// Executive directives
    #[command(subcommand)]
    Directive(DirectiveCommands),

    /// Issue tickets and the submission form
    #[command(subcommand)]
    Issue(IssueCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_opts_after_subcommand() {
        let cli = Cli::try_parse_from(["qat", "cluster", "list", "-o", "json", "--user", "QA"])
            .unwrap();
        assert_eq!(cli.global.output, OutputFormat::Json);
        assert_eq!(cli.global.user.as_deref(), Some("QA"));
    }
}
