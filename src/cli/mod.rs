//! CLI module - argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod context;
pub mod filters;
pub mod helpers;
pub mod table;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};
pub use filters::{FilterArgs, SeverityFilter, StatusFilter};

use miette::Result;

/// Run a parsed command line
pub fn dispatch(cli: Cli) -> Result<()> {
    let global = cli.global;
    match cli.command {
        Commands::Cluster(cmd) => commands::cluster::run(cmd, &global),
        Commands::Approval(cmd) => commands::approval::run(cmd, &global),
        Commands::Action(cmd) => commands::action::run(cmd, &global),
        Commands::Repair(cmd) => commands::repair::run(cmd, &global),
        Commands::Containment(cmd) => commands::containment::run(cmd, &global),
        Commands::Risk(cmd) => commands::risk::run(cmd, &global),
        Commands::Directive(cmd) => commands::directive::run(cmd, &global),
        Commands::Issue(cmd) => commands::issue::run(cmd, &global),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
