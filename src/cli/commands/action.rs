//! `qat action` command - Repair actions

use clap::Subcommand;
use miette::{IntoDiagnostic, Result};

use crate::cli::context::{find, Context};
use crate::cli::filters::FilterArgs;
use crate::cli::helpers::{
    format_cost, parse_id, print_changelog, print_discussion, print_field, print_heading,
    print_text_block, styled_status, truncate_str,
};
use crate::cli::table::{print_record, print_records, Tabular};
use crate::cli::GlobalOpts;
use crate::core::discussion::post_message;
use crate::core::filter::filter;
use crate::entities::repair_action::assign;
use crate::entities::RepairAction;

#[derive(Subcommand, Debug)]
pub enum ActionCommands {
    /// List repair actions with filtering
    List(ListArgs),

    /// Show a repair action's details, history and discussion
    Show(ShowArgs),

    /// Approve a pending repair action
    Approve(DecisionArgs),

    /// Reject a pending repair action
    Reject(DecisionArgs),

    /// Assign a repair action to a person
    Assign(AssignArgs),

    /// Post a message on a repair action's discussion
    Comment(CommentArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Only actions nobody is assigned to
    #[arg(long)]
    pub unassigned: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Repair action ID (e.g. RA-001)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct DecisionArgs {
    /// Repair action ID
    pub id: String,

    /// Approval comment or rejection reason
    #[arg(long, short = 'm', default_value = "")]
    pub comment: String,
}

#[derive(clap::Args, Debug)]
pub struct AssignArgs {
    /// Repair action ID
    pub id: String,

    /// Person taking the action
    pub assignee: String,
}

#[derive(clap::Args, Debug)]
pub struct CommentArgs {
    /// Repair action ID
    pub id: String,

    /// Message text
    pub text: String,
}

impl Tabular for RepairAction {
    const PLURAL: &'static str = "repair actions";

    fn headers() -> &'static [&'static str] {
        &[
            "id", "title", "cluster", "assignee", "team", "priority", "status", "cost", "due",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate_str(&self.title, 40),
            self.cluster_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".to_string()),
            self.assignee.clone().unwrap_or_else(|| "-".to_string()),
            self.team.clone(),
            self.priority.to_string(),
            self.status.to_string(),
            format_cost(self.estimated_cost),
            self.due_date.clone().unwrap_or_else(|| "-".to_string()),
        ]
    }
}

pub fn run(cmd: ActionCommands, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::open(global)?;
    match cmd {
        ActionCommands::List(args) => run_list(&ctx, args),
        ActionCommands::Show(args) => run_show(&ctx, args),
        ActionCommands::Approve(args) => run_approve(ctx, args),
        ActionCommands::Reject(args) => run_reject(ctx, args),
        ActionCommands::Assign(args) => run_assign(ctx, args),
        ActionCommands::Comment(args) => run_comment(ctx, args),
    }
}

fn run_list(ctx: &Context, args: ListArgs) -> Result<()> {
    let visible = filter(&ctx.session.repair_actions, &args.filter.criteria());
    let matching = visible
        .iter()
        .filter(|a| !args.unassigned || a.assignee.is_none());

    if args.filter.count {
        println!("{}", matching.count());
        return Ok(());
    }

    let limit = args.filter.limit.unwrap_or(usize::MAX);
    let records: Vec<&RepairAction> = matching.take(limit).collect();
    print_records(&records, ctx.output)
}

fn run_show(ctx: &Context, args: ShowArgs) -> Result<()> {
    let id = parse_id::<RepairAction>(&args.id)?;
    let action = find(&ctx.session.repair_actions, &id)?;

    print_record(action, ctx.output, |a| {
        print_heading(&a.id, &a.title);
        print_field("Status", styled_status(a.status));
        print_field("Priority", a.priority);
        print_field("Team", &a.team);
        print_field("Program", &a.program);
        print_field("Assignee", a.assignee.as_deref().unwrap_or("(unassigned)"));
        print_field("Est. cost", format_cost(a.estimated_cost));
        print_field("Est. hours", a.estimated_hours);
        print_field("Created", &a.created);
        if let Some(due) = &a.due_date {
            print_field("Due", due);
        }
        if let Some(cluster_id) = &a.cluster_id {
            let title = ctx
                .session
                .cluster(cluster_id)
                .map(|c| c.title.as_str())
                .unwrap_or("(not found)");
            print_field("Cluster", format!("{} {}", cluster_id, title));
        }
        if let Some(reason) = &a.rejection_reason {
            print_field("Rejected", reason);
        }
        print_text_block("Description", &a.description);
        print_changelog(&a.changelog);
        print_discussion(&a.discussion);
    })
}

fn run_approve(mut ctx: Context, args: DecisionArgs) -> Result<()> {
    let id = parse_id::<RepairAction>(&args.id)?;
    find(&ctx.session.repair_actions, &id)?;

    let next = ctx
        .engine()
        .approve(&ctx.session.repair_actions, &id, &ctx.user, &args.comment)
        .into_diagnostic()?;
    ctx.session.repair_actions = next;

    let action = find(&ctx.session.repair_actions, &id)?;
    ctx.report(action, &format!("Approved {} as {}", id, ctx.user))
}

fn run_reject(mut ctx: Context, args: DecisionArgs) -> Result<()> {
    let id = parse_id::<RepairAction>(&args.id)?;
    find(&ctx.session.repair_actions, &id)?;

    let next = ctx
        .engine()
        .reject(&ctx.session.repair_actions, &id, &ctx.user, &args.comment)
        .into_diagnostic()?;
    ctx.session.repair_actions = next;

    let action = find(&ctx.session.repair_actions, &id)?;
    ctx.report(action, &format!("Rejected {}: {}", id, args.comment.trim()))
}

fn run_assign(mut ctx: Context, args: AssignArgs) -> Result<()> {
    let id = parse_id::<RepairAction>(&args.id)?;
    find(&ctx.session.repair_actions, &id)?;

    let next =
        assign(&ctx.session.repair_actions, &id, &ctx.user, &args.assignee).into_diagnostic()?;
    ctx.session.repair_actions = next;

    let action = find(&ctx.session.repair_actions, &id)?;
    ctx.report(
        action,
        &format!("Assigned {} to {}", id, args.assignee.trim()),
    )
}

fn run_comment(mut ctx: Context, args: CommentArgs) -> Result<()> {
    let id = parse_id::<RepairAction>(&args.id)?;
    find(&ctx.session.repair_actions, &id)?;

    let next =
        post_message(&ctx.session.repair_actions, &id, &ctx.user, &args.text).into_diagnostic()?;
    ctx.session.repair_actions = next;

    let action = find(&ctx.session.repair_actions, &id)?;
    ctx.report(action, &format!("Posted on {} as {}", id, ctx.user))
}
