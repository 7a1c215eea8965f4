//! `qat approval` command - Approval requests and their discussions

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::context::{find, Context};
use crate::cli::filters::FilterArgs;
use crate::cli::helpers::{
    collect_ids, confirm, format_cost, parse_id, print_changelog, print_discussion, print_field,
    print_heading, print_text_block, styled_status, truncate_str,
};
use crate::cli::table::{print_record, print_records, Tabular};
use crate::cli::GlobalOpts;
use crate::core::discussion::{post_message, reply};
use crate::core::filter::filter;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::selection::Selection;
use crate::core::workflow::pending;
use crate::entities::ApprovalRequest;

#[derive(Subcommand, Debug)]
pub enum ApprovalCommands {
    /// List approval requests with filtering
    List(ListArgs),

    /// Show a request with its linked cluster, history and discussion
    Show(ShowArgs),

    /// Approve a pending request
    Approve(ApproveArgs),

    /// Reject a pending request
    Reject(RejectArgs),

    /// Reject several requests with one reason
    BulkReject(BulkRejectArgs),

    /// Post a message on a request's discussion
    Comment(CommentArgs),

    /// Reply to a message on a request's discussion
    Reply(ReplyArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Only requests still awaiting a decision
    #[arg(long)]
    pub pending: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Request ID (e.g. APR-001)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct ApproveArgs {
    /// Request ID
    pub id: String,

    /// Approval comment
    #[arg(long, short = 'm', default_value = "")]
    pub comment: String,
}

#[derive(clap::Args, Debug)]
pub struct RejectArgs {
    /// Request ID
    pub id: String,

    /// Rejection reason (required)
    #[arg(long, short = 'r')]
    pub reason: String,
}

#[derive(clap::Args, Debug)]
pub struct BulkRejectArgs {
    /// Request IDs to reject (accepts multiple, or - to read them from stdin)
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Rejection reason applied to every request (required)
    #[arg(long, short = 'r')]
    pub reason: String,

    /// Skip confirmation prompt (needed when IDs are piped in or there is no terminal)
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(clap::Args, Debug)]
pub struct CommentArgs {
    /// Request ID
    pub id: String,

    /// Message text
    pub text: String,
}

#[derive(clap::Args, Debug)]
pub struct ReplyArgs {
    /// Request ID
    pub id: String,

    /// Message being answered (e.g. MSG-0001)
    pub message: String,

    /// Reply text
    pub text: String,
}

impl Tabular for ApprovalRequest {
    const PLURAL: &'static str = "approval requests";

    fn headers() -> &'static [&'static str] {
        &[
            "id", "title", "type", "team", "program", "severity", "status", "cost", "submitted",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate_str(&self.title, 40),
            self.request_type.clone(),
            self.team.clone(),
            self.program.clone(),
            self.severity.to_string(),
            self.status.to_string(),
            format_cost(self.estimated_cost),
            self.submitted.chars().take(10).collect(),
        ]
    }
}

pub fn run(cmd: ApprovalCommands, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::open(global)?;
    match cmd {
        ApprovalCommands::List(args) => run_list(&ctx, args),
        ApprovalCommands::Show(args) => run_show(&ctx, args),
        ApprovalCommands::Approve(args) => run_approve(ctx, args),
        ApprovalCommands::Reject(args) => run_reject(ctx, args),
        ApprovalCommands::BulkReject(args) => run_bulk_reject(ctx, args),
        ApprovalCommands::Comment(args) => run_comment(ctx, args),
        ApprovalCommands::Reply(args) => run_reply(ctx, args),
    }
}

fn run_list(ctx: &Context, args: ListArgs) -> Result<()> {
    let base = if args.pending {
        pending(&ctx.session.approvals)
    } else {
        ctx.session.approvals.clone()
    };
    let visible = filter(&base, &args.filter.criteria());

    if args.filter.count {
        println!("{}", visible.len());
        return Ok(());
    }

    let limit = args.filter.limit.unwrap_or(usize::MAX);
    let records: Vec<&ApprovalRequest> = visible.iter().take(limit).collect();
    print_records(&records, ctx.output)
}

fn run_show(ctx: &Context, args: ShowArgs) -> Result<()> {
    let id = parse_id::<ApprovalRequest>(&args.id)?;
    let request = find(&ctx.session.approvals, &id)?;

    print_record(request, ctx.output, |r| {
        print_heading(&r.id, &r.title);
        print_field("Status", styled_status(r.status));
        print_field("Type", &r.request_type);
        print_field("Requested by", &r.requested_by);
        print_field("Team", &r.team);
        print_field("Program", &r.program);
        print_field("Severity", r.severity);
        print_field("Est. cost", format_cost(r.estimated_cost));
        print_field("Submitted", &r.submitted);
        if let Some(reason) = &r.rejection_reason {
            print_field("Rejected", reason);
        }
        match (&r.cluster_id, ctx.session.cluster_of(r)) {
            (Some(_), Some(cluster)) => {
                print_field("Cluster", format!("{} {}", cluster.id, cluster.title))
            }
            (Some(missing), None) => print_field(
                "Cluster",
                format!("{} {}", missing, style("(not found)").dim()),
            ),
            (None, _) => {}
        }
        print_text_block("Description", &r.description);
        print_changelog(&r.changelog);
        print_discussion(&r.discussion);
    })
}

fn run_approve(mut ctx: Context, args: ApproveArgs) -> Result<()> {
    let id = parse_id::<ApprovalRequest>(&args.id)?;
    find(&ctx.session.approvals, &id)?;

    let next = ctx
        .engine()
        .approve(&ctx.session.approvals, &id, &ctx.user, &args.comment)
        .into_diagnostic()?;
    ctx.session.approvals = next;

    let request = find(&ctx.session.approvals, &id)?;
    ctx.report(request, &format!("Approved {} as {}", id, ctx.user))
}

fn run_reject(mut ctx: Context, args: RejectArgs) -> Result<()> {
    let id = parse_id::<ApprovalRequest>(&args.id)?;
    find(&ctx.session.approvals, &id)?;

    let next = ctx
        .engine()
        .reject(&ctx.session.approvals, &id, &ctx.user, &args.reason)
        .into_diagnostic()?;
    ctx.session.approvals = next;

    let request = find(&ctx.session.approvals, &id)?;
    ctx.report(request, &format!("Rejected {}: {}", id, args.reason.trim()))
}

fn run_bulk_reject(mut ctx: Context, args: BulkRejectArgs) -> Result<()> {
    let ids = collect_ids(&args.ids);
    let selection: Selection = ids
        .iter()
        .map(|id| parse_id::<ApprovalRequest>(id))
        .collect::<Result<_>>()?;
    selection.require_any().into_diagnostic()?;
    for id in selection.iter() {
        find(&ctx.session.approvals, id)?;
    }

    eprintln!(
        "Rejecting {} request(s) as {}...",
        selection.len(),
        ctx.user
    );
    eprintln!("Reason: {}", args.reason.trim());
    if !confirm("Proceed?", args.yes)? {
        eprintln!("Aborted.");
        return Ok(());
    }

    let next = ctx
        .engine()
        .bulk_reject(&ctx.session.approvals, &selection, &ctx.user, &args.reason)
        .into_diagnostic()?;
    ctx.session.approvals = next;

    let rejected = selection
        .iter()
        .map(|id| find(&ctx.session.approvals, id))
        .collect::<Result<Vec<_>>>()?;
    ctx.report_all(&rejected, |r| format!("Rejected {}", r.id))
}

fn run_comment(mut ctx: Context, args: CommentArgs) -> Result<()> {
    let id = parse_id::<ApprovalRequest>(&args.id)?;
    find(&ctx.session.approvals, &id)?;

    let next = post_message(&ctx.session.approvals, &id, &ctx.user, &args.text).into_diagnostic()?;
    ctx.session.approvals = next;

    let request = find(&ctx.session.approvals, &id)?;
    ctx.report(request, &format!("Posted on {} as {}", id, ctx.user))
}

fn run_reply(mut ctx: Context, args: ReplyArgs) -> Result<()> {
    let id = parse_id::<ApprovalRequest>(&args.id)?;
    let message = EntityId::parse(args.message.trim()).map_err(|e| miette::miette!("{}", e))?;
    if message.prefix() != EntityPrefix::Msg {
        return Err(miette::miette!("{} is not a message ID", message));
    }

    let request = find(&ctx.session.approvals, &id)?;
    if !request.discussion.iter().any(|m| m.id == message) {
        return Err(miette::miette!("No message {} on {}", message, id));
    }

    let next = reply(&ctx.session.approvals, &id, &message, &ctx.user, &args.text)
        .into_diagnostic()?;
    ctx.session.approvals = next;

    let request = find(&ctx.session.approvals, &id)?;
    ctx.report(request, &format!("Replied to {} on {}", message, id))
}
