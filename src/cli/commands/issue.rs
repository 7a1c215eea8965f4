//! `qat issue` command - Issue tickets and the submission form

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::context::Context;
use crate::cli::filters::FilterArgs;
use crate::cli::helpers::{print_field, truncate_str};
use crate::cli::table::{print_records, Tabular};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::draft::DraftStore;
use crate::core::entity::Severity;
use crate::core::filter::filter;
use crate::entities::{Issue, IssueForm};

#[derive(Subcommand, Debug)]
pub enum IssueCommands {
    /// List issue tickets with filtering
    List(ListArgs),

    /// Submit a new issue, starting from the saved draft if there is one
    New(NewArgs),

    /// Show, update or clear the saved form draft
    Draft(DraftArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Form fields settable from the command line
#[derive(clap::Args, Debug, Default)]
pub struct FormArgs {
    /// Short summary of the problem
    #[arg(long)]
    pub title: Option<String>,

    /// What was observed
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Severity (low/medium/high)
    #[arg(long)]
    pub severity: Option<Severity>,

    /// Program the part belongs to
    #[arg(long, short = 'p')]
    pub program: Option<String>,

    /// Defect category
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Part number
    #[arg(long)]
    pub part: Option<String>,

    /// Production line where the issue was found
    #[arg(long)]
    pub line: Option<String>,
}

impl FormArgs {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.severity.is_none()
            && self.program.is_none()
            && self.category.is_none()
            && self.part.is_none()
            && self.line.is_none()
    }

    /// Overwrite form fields with the ones given on the command line
    fn apply(&self, form: &mut IssueForm) {
        if let Some(title) = &self.title {
            form.title = title.clone();
        }
        if let Some(description) = &self.description {
            form.description = description.clone();
        }
        if let Some(severity) = self.severity {
            form.severity = Some(severity);
        }
        if let Some(program) = &self.program {
            form.program = program.clone();
        }
        if let Some(category) = &self.category {
            form.category = category.clone();
        }
        if let Some(part) = &self.part {
            form.part_number = Some(part.clone());
        }
        if let Some(line) = &self.line {
            form.production_line = Some(line.clone());
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    #[command(flatten)]
    pub form: FormArgs,

    /// Use interactive wizard to fill in fields
    #[arg(long, short = 'i')]
    pub interactive: bool,

    /// Ignore any saved draft
    #[arg(long)]
    pub fresh: bool,
}

#[derive(clap::Args, Debug)]
pub struct DraftArgs {
    #[command(flatten)]
    pub form: FormArgs,

    /// Discard the saved draft
    #[arg(long, conflicts_with_all = ["title", "description", "severity", "program", "category", "part", "line"])]
    pub clear: bool,
}

impl Tabular for Issue {
    const PLURAL: &'static str = "issues";

    fn headers() -> &'static [&'static str] {
        &[
            "id", "title", "severity", "program", "category", "reported by", "status", "cluster",
            "reported",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate_str(&self.title, 40),
            self.severity.to_string(),
            self.program.clone(),
            self.category.clone(),
            self.reported_by.clone(),
            self.status.to_string(),
            self.cluster_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".to_string()),
            self.reported.chars().take(10).collect(),
        ]
    }
}

pub fn run(cmd: IssueCommands, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::open(global)?;
    match cmd {
        IssueCommands::List(args) => run_list(&ctx, args),
        IssueCommands::New(args) => run_new(ctx, args),
        IssueCommands::Draft(args) => run_draft(&ctx, args),
    }
}

fn drafts(ctx: &Context) -> DraftStore {
    DraftStore::new(ctx.config.draft_path())
}

fn run_list(ctx: &Context, args: ListArgs) -> Result<()> {
    let visible = filter(&ctx.session.issues, &args.filter.criteria());

    if args.filter.count {
        println!("{}", visible.len());
        return Ok(());
    }

    let limit = args.filter.limit.unwrap_or(usize::MAX);
    let records: Vec<&Issue> = visible.iter().take(limit).collect();
    print_records(&records, ctx.output)
}

fn run_new(mut ctx: Context, args: NewArgs) -> Result<()> {
    let drafts = drafts(&ctx);
    let mut form = if args.fresh {
        IssueForm::default()
    } else {
        drafts.load().unwrap_or_default()
    };
    args.form.apply(&mut form);

    if args.interactive {
        form = prompt_form(form)?;
    }

    let issue = match Issue::from_form(form.clone(), &ctx.user) {
        Ok(issue) => issue,
        Err(e) => {
            if !form.is_blank() {
                drafts.save(&form).into_diagnostic()?;
                eprintln!(
                    "{} Draft saved to {}",
                    style("!").yellow(),
                    drafts.path().display()
                );
            }
            return Err(miette::miette!("{}", e));
        }
    };

    drafts.clear().into_diagnostic()?;
    let id = issue.id.clone();
    ctx.session.submit_issue(issue);

    let submitted = ctx
        .session
        .issues
        .get(&id)
        .ok_or_else(|| miette::miette!("Issue {} was not recorded", id))?;
    ctx.report(submitted, &format!("Submitted {}", id))
}

fn run_draft(ctx: &Context, args: DraftArgs) -> Result<()> {
    let drafts = drafts(ctx);

    if args.clear {
        drafts.clear().into_diagnostic()?;
        println!("{} Draft cleared", style("✓").green());
        return Ok(());
    }

    let mut form = drafts.load().unwrap_or_default();
    if !args.form.is_empty() {
        args.form.apply(&mut form);
        drafts.save(&form).into_diagnostic()?;
    }

    match ctx.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&form).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&form).into_diagnostic()?;
            print!("{}", yaml);
        }
        _ => {
            if form.is_blank() {
                println!("No draft saved.");
                return Ok(());
            }
            let blank = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };
            println!("{}", style("Issue draft").bold());
            println!();
            print_field("Title", blank(&form.title));
            print_field("Description", blank(&form.description));
            print_field(
                "Severity",
                form.severity.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
            );
            print_field("Program", blank(&form.program));
            print_field("Category", blank(&form.category));
            print_field("Part", form.part_number.as_deref().unwrap_or("-"));
            print_field("Line", form.production_line.as_deref().unwrap_or("-"));
            if let Err(e) = form.validate() {
                println!();
                println!("  {}", style(e).yellow());
            }
        }
    }
    Ok(())
}

fn prompt_form(mut form: IssueForm) -> Result<IssueForm> {
    let theme = ColorfulTheme::default();

    let text = |prompt: &str, initial: &str| -> Result<String> {
        Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()
    };

    form.title = text("Title", &form.title)?;
    form.description = text("Description", &form.description)?;

    let severities = [Severity::Low, Severity::Medium, Severity::High];
    let current = form.severity.unwrap_or_default();
    let selection = Select::with_theme(&theme)
        .with_prompt("Severity")
        .items(&severities)
        .default(severities.iter().position(|s| *s == current).unwrap_or(1))
        .interact()
        .into_diagnostic()?;
    form.severity = severities.get(selection).copied();

    form.program = text("Program", &form.program)?;
    form.category = text("Category (optional)", &form.category)?;

    let part = text("Part number (optional)", form.part_number.as_deref().unwrap_or(""))?;
    form.part_number = Some(part).filter(|p| !p.trim().is_empty());
    let line = text(
        "Production line (optional)",
        form.production_line.as_deref().unwrap_or(""),
    )?;
    form.production_line = Some(line).filter(|l| !l.trim().is_empty());

    Ok(form)
}
