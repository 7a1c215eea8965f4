//! `qat directive` command - Executive directives

use clap::Subcommand;
use console::style;
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
use crate::entities::Directive;

#[derive(Subcommand, Debug)]
pub enum DirectiveCommands {
    /// List directives with filtering
    List(ListArgs),

    /// Show a directive and the risks it targets
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Directive ID (e.g. DIR-001)
    pub id: String,
}

impl Tabular for Directive {
    const PLURAL: &'static str = "directives";

    fn headers() -> &'static [&'static str] {
        &["id", "title", "issued by", "issued", "priority", "targets", "status"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate_str(&self.title, 40),
            self.issued_by.clone(),
            self.issued.clone(),
            self.priority.to_string(),
            self.targeted_risks.len().to_string(),
            self.status.to_string(),
        ]
    }
}

pub fn run(cmd: DirectiveCommands, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::open(global)?;
    match cmd {
        DirectiveCommands::List(args) => run_list(&ctx, args),
        DirectiveCommands::Show(args) => run_show(&ctx, args),
    }
}

fn run_list(ctx: &Context, args: ListArgs) -> Result<()> {
    let visible = filter(&ctx.session.directives, &args.filter.criteria());

    if args.filter.count {
        println!("{}", visible.len());
        return Ok(());
    }

    let limit = args.filter.limit.unwrap_or(usize::MAX);
    let records: Vec<&Directive> = visible.iter().take(limit).collect();
    print_records(&records, ctx.output)
}

fn run_show(ctx: &Context, args: ShowArgs) -> Result<()> {
    let id = parse_id::<Directive>(&args.id)?;
    let directive = find(&ctx.session.directives, &id)?;

    print_record(directive, ctx.output, |d| {
        print_heading(&d.id, &d.title);
        print_field("Status", styled_status(d.status));
        print_field("Issued by", &d.issued_by);
        print_field("Issued", &d.issued);
        print_field("Priority", d.priority);
        print_text_block("Description", &d.description);

        let resolved = ctx.session.directive_risks(d);
        println!();
        println!("  Targeted risks:");
        if d.targeted_risks.is_empty() {
            println!("    (none)");
        }
        for risk in &resolved {
            println!(
                "    {}  {}  {} at {}",
                risk.id,
                risk.title,
                format_cost(risk.cost_impact),
                risk.probability
            );
        }
        let missing = d.targeted_risks.len() - resolved.len();
        if missing > 0 {
            println!(
                "    {}",
                style(format!("{} targeted risk(s) not found", missing)).dim()
            );
        }
    })
}
