//! `qat cluster` command - Issue cluster triage

use clap::Subcommand;
use miette::{IntoDiagnostic, Result};

use crate::cli::context::{find, Context};
use crate::cli::filters::FilterArgs;
use crate::cli::helpers::{
    collect_ids, confirm, format_cost, parse_id, print_changelog, print_field, print_heading,
    print_text_block, styled_status, truncate_str,
};
use crate::cli::table::{print_record, print_records, Tabular};
use crate::cli::GlobalOpts;
use crate::core::entity::SubmissionType;
use crate::core::filter::filter;
use crate::core::selection::Selection;
use crate::entities::IssueCluster;

#[derive(Subcommand, Debug)]
pub enum ClusterCommands {
    /// List issue clusters with filtering
    List(ListArgs),

    /// Show a cluster's details and history
    Show(ShowArgs),

    /// Approve one or more pending clusters
    Approve(ApproveArgs),

    /// Reject one or more pending clusters
    Reject(RejectArgs),

    /// Route a pending cluster to a team for approval
    Submit(SubmitArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Cluster ID (e.g. CL-001)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct ApproveArgs {
    /// Cluster IDs to approve (accepts multiple, or - to read them from stdin)
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Approval comment
    #[arg(long, short = 'm', default_value = "")]
    pub comment: String,

    /// Skip confirmation prompt (needed when IDs are piped in or there is no terminal)
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(clap::Args, Debug)]
pub struct RejectArgs {
    /// Cluster IDs to reject (accepts multiple, or - to read them from stdin)
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Rejection reason (required)
    #[arg(long, short = 'r')]
    pub reason: String,

    /// Skip confirmation prompt (needed when IDs are piped in or there is no terminal)
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(clap::Args, Debug)]
pub struct SubmitArgs {
    /// Cluster ID
    pub id: String,

    /// Team that should review the fix
    #[arg(long, short = 't')]
    pub team: String,

    /// Submission type (standard/expedited/deviation)
    #[arg(long = "type", default_value = "standard")]
    pub submission_type: SubmissionType,

    /// Optional note for the reviewers
    #[arg(long, short = 'm', default_value = "")]
    pub comment: String,
}

impl Tabular for IssueCluster {
    const PLURAL: &'static str = "clusters";

    fn headers() -> &'static [&'static str] {
        &[
            "id", "title", "severity", "program", "category", "status", "confidence", "issues",
            "cost", "created",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate_str(&self.title, 40),
            self.severity.to_string(),
            self.program.clone(),
            self.category.clone(),
            self.status.to_string(),
            self.confidence.to_string(),
            self.issue_count.to_string(),
            format_cost(self.estimated_cost),
            self.created.chars().take(10).collect(),
        ]
    }
}

pub fn run(cmd: ClusterCommands, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::open(global)?;
    match cmd {
        ClusterCommands::List(args) => run_list(&ctx, args),
        ClusterCommands::Show(args) => run_show(&ctx, args),
        ClusterCommands::Approve(args) => run_approve(ctx, args),
        ClusterCommands::Reject(args) => run_reject(ctx, args),
        ClusterCommands::Submit(args) => run_submit(ctx, args),
    }
}

fn run_list(ctx: &Context, args: ListArgs) -> Result<()> {
    let visible = filter(&ctx.session.clusters, &args.filter.criteria());

    if args.filter.count {
        println!("{}", visible.len());
        return Ok(());
    }

    let limit = args.filter.limit.unwrap_or(usize::MAX);
    let records: Vec<&IssueCluster> = visible.iter().take(limit).collect();
    print_records(&records, ctx.output)
}

fn run_show(ctx: &Context, args: ShowArgs) -> Result<()> {
    let id = parse_id::<IssueCluster>(&args.id)?;
    let cluster = find(&ctx.session.clusters, &id)?;

    print_record(cluster, ctx.output, |c| {
        print_heading(&c.id, &c.title);
        print_field("Status", styled_status(c.status));
        print_field("Severity", c.severity);
        print_field("Program", &c.program);
        print_field("Category", &c.category);
        print_field("Confidence", c.confidence);
        print_field("Issues", c.issue_count);
        print_field("Est. cost", format_cost(c.estimated_cost));
        print_field("Created", &c.created);
        if let Some(kind) = c.submission_type {
            print_field("Submitted", kind);
        }
        if let Some(reason) = &c.rejection_reason {
            print_field("Rejected", reason);
        }
        if !c.similar_issues.is_empty() {
            print_field("Similar", c.similar_issues.join(", "));
        }
        if !c.tags.is_empty() {
            print_field("Tags", c.tags.join(", "));
        }
        print_text_block("Description", &c.description);
        if let Some(fix) = &c.suggested_fix {
            print_text_block("Suggested fix", fix);
        }

        let containments = ctx.session.containments_for(&c.id);
        if !containments.is_empty() {
            println!();
            println!("  Containments:");
            for containment in containments {
                println!(
                    "    {}  {} ({})",
                    containment.id, containment.title, containment.status
                );
            }
        }
        print_changelog(&c.changelog);
    })
}

fn selection_from(ids: &[String]) -> Result<Selection> {
    let ids = collect_ids(ids);
    if ids.is_empty() {
        return Err(miette::miette!("No cluster IDs given"));
    }
    ids.iter().map(|id| parse_id::<IssueCluster>(id)).collect()
}

fn run_approve(mut ctx: Context, args: ApproveArgs) -> Result<()> {
    let selection = selection_from(&args.ids)?;
    for id in selection.iter() {
        find(&ctx.session.clusters, id)?;
    }

    if selection.len() > 1
        && !confirm(
            &format!("Approve {} clusters as {}?", selection.len(), ctx.user),
            args.yes,
        )?
    {
        eprintln!("Aborted.");
        return Ok(());
    }

    let next = ctx
        .engine()
        .bulk_approve(&ctx.session.clusters, &selection, &ctx.user, &args.comment)
        .into_diagnostic()?;
    ctx.session.clusters = next;

    let approved = changed(&ctx, &selection)?;
    report_changed(&ctx, &approved, |c| format!("Approved {} as {}", c.id, ctx.user))
}

fn run_reject(mut ctx: Context, args: RejectArgs) -> Result<()> {
    let selection = selection_from(&args.ids)?;
    for id in selection.iter() {
        find(&ctx.session.clusters, id)?;
    }

    if selection.len() > 1
        && !confirm(
            &format!("Reject {} clusters as {}?", selection.len(), ctx.user),
            args.yes,
        )?
    {
        eprintln!("Aborted.");
        return Ok(());
    }

    let next = ctx
        .engine()
        .bulk_reject(&ctx.session.clusters, &selection, &ctx.user, &args.reason)
        .into_diagnostic()?;
    ctx.session.clusters = next;

    let rejected = changed(&ctx, &selection)?;
    report_changed(&ctx, &rejected, |c| {
        format!("Rejected {}: {}", c.id, args.reason.trim())
    })
}

fn changed<'a>(ctx: &'a Context, selection: &Selection) -> Result<Vec<&'a IssueCluster>> {
    selection
        .iter()
        .map(|id| find(&ctx.session.clusters, id))
        .collect()
}

/// A single ID reports one record; several report one list
fn report_changed(
    ctx: &Context,
    clusters: &[&IssueCluster],
    message: impl Fn(&IssueCluster) -> String,
) -> Result<()> {
    match clusters {
        [cluster] => ctx.report(*cluster, &message(*cluster)),
        _ => ctx.report_all(clusters, message),
    }
}

fn run_submit(mut ctx: Context, args: SubmitArgs) -> Result<()> {
    let id = parse_id::<IssueCluster>(&args.id)?;
    find(&ctx.session.clusters, &id)?;

    let next = ctx
        .engine()
        .submit_for_approval(
            &ctx.session.clusters,
            &id,
            &ctx.user,
            args.submission_type,
            &args.team,
            &args.comment,
        )
        .into_diagnostic()?;
    ctx.session.clusters = next;

    let cluster = find(&ctx.session.clusters, &id)?;
    ctx.report(
        cluster,
        &format!(
            "Submitted {} to {} as {}",
            id,
            args.team.trim(),
            args.submission_type
        ),
    )
}
