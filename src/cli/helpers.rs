//! Shared helper functions for CLI commands

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};
use std::io::{self, BufRead, IsTerminal};

use crate::core::changelog::ChangeLogEntry;
use crate::core::discussion::DiscussionMessage;
use crate::core::entity::{Record, Status};
use crate::core::identity::EntityId;

/// Parse a user-supplied ID, checking it names the expected record kind
pub fn parse_id<T: Record>(input: &str) -> Result<EntityId> {
    let id = EntityId::parse(input.trim()).map_err(|e| miette::miette!("{}", e))?;
    if id.prefix() != T::PREFIX {
        return Err(miette::miette!(
            "{} is not a {} ID (expected {}-...)",
            id,
            T::NAME,
            T::PREFIX
        ));
    }
    Ok(id)
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Whole-currency amount with thousands separators
pub fn format_cost(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if whole < 0 {
        format!("-${}", out)
    } else {
        format!("${}", out)
    }
}

pub fn styled_status(status: Status) -> String {
    let text = status.to_string();
    match status {
        Status::Approved | Status::Completed => style(text).green().to_string(),
        Status::Rejected | Status::Expired => style(text).red().to_string(),
        Status::Pending | Status::InProgress => style(text).yellow().to_string(),
        Status::Active | Status::Open => style(text).cyan().to_string(),
    }
}

/// Read IDs from stdin, one per line, if stdin is piped
pub fn read_ids_from_stdin() -> Option<Vec<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return None;
    }

    let ids: Vec<String> = stdin
        .lock()
        .lines()
        .map_while(|line| line.ok())
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    if ids.is_empty() {
        None
    } else {
        Some(ids)
    }
}

/// IDs from the command line, or from stdin when the only argument is `-`
pub fn collect_ids(args: &[String]) -> Vec<String> {
    if args.len() == 1 && args[0] == "-" {
        return read_ids_from_stdin().unwrap_or_default();
    }
    args.to_vec()
}

/// Ask before a bulk change; `--yes` skips the prompt
///
/// Refuses when no terminal is attached to answer.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if !io::stdin().is_terminal() {
        return Err(miette::miette!(
            "Refusing to prompt without a terminal; pass --yes to confirm"
        ));
    }
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .into_diagnostic()
}

/// Heading line of a detail view
pub fn print_heading(id: &EntityId, title: &str) {
    println!("{} {}", style(id).cyan(), style(title).bold());
    println!();
}

pub fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<13}{}", format!("{}:", label), value);
}

pub fn print_text_block(label: &str, text: &str) {
    if text.trim().is_empty() {
        return;
    }
    println!();
    println!("  {}", style(format!("{}:", label)).dim());
    for line in text.lines() {
        println!("    {}", line);
    }
}

pub fn print_changelog(entries: &[ChangeLogEntry]) {
    println!();
    println!("{}", style("History").bold().underlined());
    if entries.is_empty() {
        println!("  (none)");
        return;
    }
    for entry in entries {
        let when = entry.timestamp.format("%Y-%m-%d %H:%M");
        if entry.comment.is_empty() {
            println!("  {}  {}  {}", style(when).dim(), entry.action, entry.user);
        } else {
            println!(
                "  {}  {}  {}: {}",
                style(when).dim(),
                entry.action,
                entry.user,
                entry.comment
            );
        }
    }
}

pub fn print_discussion(messages: &[DiscussionMessage]) {
    println!();
    println!("{}", style("Discussion").bold().underlined());
    if messages.is_empty() {
        println!("  (no messages)");
        return;
    }
    for message in messages {
        println!(
            "  {} {} {}",
            style(&message.id).dim(),
            style(&message.user).cyan(),
            message.text
        );
        for reply in &message.replies {
            println!(
                "      {} {} {}",
                style(&reply.id).dim(),
                style(&reply.user).cyan(),
                reply.text
            );
        }
    }
}
