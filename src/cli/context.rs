//! Per-invocation state shared by every command

use console::style;
use miette::{IntoDiagnostic, Result};
use tracing::debug;

use crate::cli::table::{print_record, print_records, Tabular};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::entity::Record;
use crate::core::identity::EntityId;
use crate::core::store::Store;
use crate::core::workflow::WorkflowEngine;
use crate::core::{Config, Session};

/// Config, acting user and a fresh seeded session
pub struct Context {
    pub config: Config,
    pub user: String,
    pub output: OutputFormat,
    pub session: Session,
}

impl Context {
    pub fn open(global: &GlobalOpts) -> Result<Self> {
        let config = Config::load().into_diagnostic()?;
        let user = global
            .user
            .clone()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| config.user());
        let session =
            Session::from_seed(WorkflowEngine::new(config.workflow.clone())).into_diagnostic()?;

        debug!(%user, "session opened");
        Ok(Self {
            config,
            user,
            output: global.output,
            session,
        })
    }

    pub fn engine(&self) -> &WorkflowEngine {
        self.session.engine()
    }

    /// Report a changed record: a confirmation line, or the record itself
    /// for machine-readable formats
    pub fn report<T: Tabular>(&self, record: &T, message: &str) -> Result<()> {
        match self.output {
            OutputFormat::Auto | OutputFormat::Table => {
                println!("{} {}", style("✓").green(), message);
                Ok(())
            }
            format => print_record(record, format, |_| {}),
        }
    }

    /// Report several changed records
    ///
    /// Human formats get one confirmation line per record. Machine-readable
    /// formats get a single document holding every record.
    pub fn report_all<T: Tabular>(
        &self,
        records: &[&T],
        message: impl Fn(&T) -> String,
    ) -> Result<()> {
        match self.output {
            OutputFormat::Auto | OutputFormat::Table => {
                for record in records {
                    println!("{} {}", style("✓").green(), message(record));
                }
                Ok(())
            }
            format => print_records(records, format),
        }
    }
}

/// Look up a record the user named, failing with a readable message
pub fn find<'a, T: Record>(store: &'a Store<T>, id: &EntityId) -> Result<&'a T> {
    store
        .get(id)
        .ok_or_else(|| miette::miette!("No {} found with ID {}", T::NAME, id))
}
