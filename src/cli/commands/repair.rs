//! `qat repair` command - Standard repair catalog

use clap::Subcommand;
use miette::Result;

use crate::cli::context::{find, Context};
use crate::cli::filters::FilterArgs;
use crate::cli::helpers::{
    format_cost, parse_id, print_field, print_heading, print_text_block, styled_status,
    truncate_str,
};
use crate::cli::table::{print_record, print_records, Tabular};
use crate::cli::GlobalOpts;
use crate::core::filter::filter;
use crate::entities::StandardRepair;

#[derive(Subcommand, Debug)]
pub enum RepairCommands {
    /// List standard repairs with filtering
    List(ListArgs),

    /// Show a standard repair and its steps
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Repair ID (e.g. SR-001)
    pub id: String,
}

impl Tabular for StandardRepair {
    const PLURAL: &'static str = "standard repairs";

    fn headers() -> &'static [&'static str] {
        &["id", "title", "category", "program", "status", "steps", "cost", "hours"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate_str(&self.title, 40),
            self.category.clone(),
            self.program.clone(),
            self.status.to_string(),
            self.steps.len().to_string(),
            format_cost(self.estimated_cost),
            self.estimated_hours.to_string(),
        ]
    }
}

pub fn run(cmd: RepairCommands, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::open(global)?;
    match cmd {
        RepairCommands::List(args) => run_list(&ctx, args),
        RepairCommands::Show(args) => run_show(&ctx, args),
    }
}

fn run_list(ctx: &Context, args: ListArgs) -> Result<()> {
    let visible = filter(&ctx.session.repairs, &args.filter.criteria());

    if args.filter.count {
        println!("{}", visible.len());
        return Ok(());
    }

    let limit = args.filter.limit.unwrap_or(usize::MAX);
    let records: Vec<&StandardRepair> = visible.iter().take(limit).collect();
    print_records(&records, ctx.output)
}

fn run_show(ctx: &Context, args: ShowArgs) -> Result<()> {
    let id = parse_id::<StandardRepair>(&args.id)?;
    let repair = find(&ctx.session.repairs, &id)?;

    print_record(repair, ctx.output, |r| {
        print_heading(&r.id, &r.title);
        print_field("Status", styled_status(r.status));
        print_field("Category", &r.category);
        print_field("Program", &r.program);
        print_field("Est. cost", format_cost(r.estimated_cost));
        print_field("Est. hours", r.estimated_hours);
        print_field("Created", &r.created);
        print_text_block("Description", &r.description);
        if !r.steps.is_empty() {
            println!();
            println!("  Steps:");
            for (n, step) in r.steps.iter().enumerate() {
                println!("    {}. {}", n + 1, step);
            }
        }
    })
}
