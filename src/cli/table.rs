//! List and record output in every supported format

use console::style;
use miette::{miette, IntoDiagnostic, Result};
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::OutputFormat;
use crate::core::entity::Record;

/// A record kind that can be shown as a table row
pub trait Tabular: Record + Serialize {
    /// Plural noun for messages ("clusters")
    const PLURAL: &'static str;

    fn headers() -> &'static [&'static str];

    /// One cell per header, in the same order
    fn row(&self) -> Vec<String>;
}

/// Print a list of records in the chosen format
pub fn print_records<T: Tabular>(records: &[&T], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Auto | OutputFormat::Table => {
            if records.is_empty() {
                println!("No {} found.", T::PLURAL);
                return Ok(());
            }
            println!("{}", render_table(records, format == OutputFormat::Table));
            println!();
            println!("{} {} found", style(records.len()).cyan(), T::PLURAL);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(records).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(records).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => {
            let csv = render_csv(records)?;
            print!("{}", csv);
        }
        OutputFormat::Id => {
            for record in records {
                println!("{}", record.id());
            }
        }
    }
    Ok(())
}

/// Print one record; `detail` renders the human view
pub fn print_record<T: Tabular>(
    record: &T,
    format: OutputFormat,
    detail: impl FnOnce(&T),
) -> Result<()> {
    match format {
        OutputFormat::Auto => detail(record),
        OutputFormat::Table | OutputFormat::Csv => print_records(&[record], format)?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(record).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(record).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Id => println!("{}", record.id()),
    }
    Ok(())
}

pub fn render_table<T: Tabular>(records: &[&T], bordered: bool) -> String {
    let mut builder = Builder::default();
    builder.push_record(T::headers().iter().map(|h| h.to_uppercase()));
    for record in records {
        builder.push_record(record.row());
    }

    let mut table = builder.build();
    if bordered {
        table.with(Style::rounded());
    } else {
        table.with(Style::blank());
    }
    table.to_string()
}

pub fn render_csv<T: Tabular>(records: &[&T]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(T::headers()).into_diagnostic()?;
    for record in records {
        writer.write_record(record.row()).into_diagnostic()?;
    }
    let bytes = writer.into_inner().map_err(|e| miette!("{}", e))?;
    String::from_utf8(bytes).into_diagnostic()
}
