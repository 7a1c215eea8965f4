//! `qat risk` command - Risk register

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::context::{find, Context};
use crate::cli::filters::FilterArgs;
use crate::cli::helpers::{
    format_cost, parse_id, print_field, print_heading, print_text_block, styled_status,
    truncate_str,
};
use crate::cli::table::{print_record, print_records, Tabular};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::filter::filter;
use crate::entities::{RiskItem, RiskSummary};

#[derive(Subcommand, Debug)]
pub enum RiskCommands {
    /// List risks with filtering
    List(ListArgs),

    /// Show a risk and the directives targeting it
    Show(ShowArgs),

    /// Exposure and expected cost across the filtered risks
    Summary(SummaryArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Risk ID (e.g. RISK-001)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

impl Tabular for RiskItem {
    const PLURAL: &'static str = "risks";

    fn headers() -> &'static [&'static str] {
        &[
            "id", "title", "program", "category", "severity", "impact", "probability", "expected",
            "status",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate_str(&self.title, 40),
            self.program.clone(),
            self.category.clone(),
            self.severity.to_string(),
            format_cost(self.cost_impact),
            self.probability.to_string(),
            format_cost(self.expected_cost()),
            self.status.to_string(),
        ]
    }
}

pub fn run(cmd: RiskCommands, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::open(global)?;
    match cmd {
        RiskCommands::List(args) => run_list(&ctx, args),
        RiskCommands::Show(args) => run_show(&ctx, args),
        RiskCommands::Summary(args) => run_summary(&ctx, args),
    }
}

fn run_list(ctx: &Context, args: ListArgs) -> Result<()> {
    let visible = filter(&ctx.session.risks, &args.filter.criteria());

    if args.filter.count {
        println!("{}", visible.len());
        return Ok(());
    }

    let limit = args.filter.limit.unwrap_or(usize::MAX);
    let records: Vec<&RiskItem> = visible.iter().take(limit).collect();
    print_records(&records, ctx.output)
}

fn run_show(ctx: &Context, args: ShowArgs) -> Result<()> {
    let id = parse_id::<RiskItem>(&args.id)?;
    let risk = find(&ctx.session.risks, &id)?;

    print_record(risk, ctx.output, |r| {
        print_heading(&r.id, &r.title);
        print_field("Status", styled_status(r.status));
        print_field("Program", &r.program);
        print_field("Category", &r.category);
        print_field("Severity", r.severity);
        print_field("Impact", format_cost(r.cost_impact));
        print_field("Probability", r.probability);
        print_field("Expected", format_cost(r.expected_cost()));
        print_field("Owner", r.owner.as_deref().unwrap_or("-"));
        print_field("Identified", &r.identified);
        print_text_block("Description", &r.description);

        let directives = ctx.session.directives_for(&r.id);
        if !directives.is_empty() {
            println!();
            println!("  Targeted by:");
            for directive in directives {
                println!("    {}  {}", directive.id, directive.title);
            }
        }
    })
}

fn run_summary(ctx: &Context, args: SummaryArgs) -> Result<()> {
    let visible = filter(&ctx.session.risks, &args.filter.criteria());
    let summary = RiskSummary::from_store(&visible);

    match ctx.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&summary).into_diagnostic()?;
            print!("{}", yaml);
        }
        _ => {
            println!("{}", style("Risk Summary").bold());
            println!();
            print_field("Risks", summary.count);
            print_field("Exposure", format_cost(summary.total_exposure));
            print_field("Expected", format_cost(summary.expected_cost));

            println!();
            println!("  By severity:");
            for (severity, count) in summary.by_severity.iter().rev() {
                println!("    {:<10}{}", severity, count);
            }

            println!();
            println!("  Exposure by category:");
            for (category, cost) in &summary.by_category {
                println!("    {:<14}{}", category, format_cost(*cost));
            }
        }
    }
    Ok(())
}
