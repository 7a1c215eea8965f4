//! `qat containment` command - Containment measures

use clap::Subcommand;
use miette::{IntoDiagnostic, Result};

use crate::cli::context::{find, Context};
use crate::cli::filters::FilterArgs;
use crate::cli::helpers::{parse_id, truncate_str};
use crate::cli::table::{print_records, Tabular};
use crate::cli::GlobalOpts;
use crate::core::filter::filter;
use crate::entities::containment::expire;
use crate::entities::Containment;

#[derive(Subcommand, Debug)]
pub enum ContainmentCommands {
    /// List containment measures with filtering
    List(ListArgs),

    /// End an active containment
    Expire(ExpireArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Only containments covering this area
    #[arg(long)]
    pub area: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ExpireArgs {
    /// Containment ID (e.g. CNT-001)
    pub id: String,

    /// Why the containment is no longer needed
    #[arg(long, short = 'm', default_value = "")]
    pub comment: String,
}

impl Tabular for Containment {
    const PLURAL: &'static str = "containments";

    fn headers() -> &'static [&'static str] {
        &[
            "id", "title", "severity", "program", "areas", "cluster", "status", "start", "end",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate_str(&self.title, 40),
            self.severity.to_string(),
            self.program.clone(),
            self.areas.join("; "),
            self.cluster_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".to_string()),
            self.status.to_string(),
            self.start_date.clone(),
            self.end_date.clone().unwrap_or_else(|| "-".to_string()),
        ]
    }
}

pub fn run(cmd: ContainmentCommands, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::open(global)?;
    match cmd {
        ContainmentCommands::List(args) => run_list(&ctx, args),
        ContainmentCommands::Expire(args) => run_expire(ctx, args),
    }
}

fn run_list(ctx: &Context, args: ListArgs) -> Result<()> {
    let visible = filter(&ctx.session.containments, &args.filter.criteria());
    let matching = visible.iter().filter(|c| {
        args.area
            .as_deref()
            .is_none_or(|area| c.areas.iter().any(|a| a == area))
    });

    if args.filter.count {
        println!("{}", matching.count());
        return Ok(());
    }

    let limit = args.filter.limit.unwrap_or(usize::MAX);
    let records: Vec<&Containment> = matching.take(limit).collect();
    print_records(&records, ctx.output)
}

fn run_expire(mut ctx: Context, args: ExpireArgs) -> Result<()> {
    let id = parse_id::<Containment>(&args.id)?;
    find(&ctx.session.containments, &id)?;

    let next = expire(&ctx.session.containments, &id, &ctx.user, &args.comment).into_diagnostic()?;
    ctx.session.containments = next;

    let containment = find(&ctx.session.containments, &id)?;
    ctx.report(containment, &format!("Expired {}", id))
}
