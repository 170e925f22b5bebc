//! Robot-mode output (JSON and Markdown).
//!
//! JSON output is always wrapped in a [`RobotOutput`] envelope so scripts can
//! rely on `schemaVersion`, `command` and `data`.

use std::fmt::Write as _;

use serde::Serialize;

use super::{AccountList, AccountRow, ExportReport, GroupSummary, MutationReport};
use crate::core::models::RobotOutput;
use crate::error::Result;

/// Render any serializable value as JSON.
pub fn render_json<T: Serialize + ?Sized>(output: &T) -> Result<String> {
    Ok(serde_json::to_string(output)?)
}

/// Render any serializable value as pretty JSON.
pub fn render_json_pretty<T: Serialize + ?Sized>(output: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(output)?)
}

/// Wrap `data` in an envelope for `command` and render it.
pub fn render_envelope<T: Serialize + ?Sized>(command: &str, data: &T, pretty: bool) -> Result<String> {
    let output = RobotOutput::new(command, data);
    if pretty {
        render_json_pretty(&output)
    } else {
        render_json(&output)
    }
}

/// Escape a value for a Markdown table cell.
fn md_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn md_table(rows: &[AccountRow]) -> String {
    let mut out = String::from("| ID | Name | Email | Username | Password | Group |\n");
    out.push_str("|---|---|---|---|---|---|\n");
    for row in rows {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} |",
            md_cell(&row.id),
            md_cell(&row.name),
            md_cell(&row.email),
            md_cell(&row.username),
            md_cell(&row.password),
            md_cell(&row.group),
        );
    }
    out
}

/// Render `list` as Markdown.
#[must_use]
pub fn render_list_md(list: &AccountList) -> String {
    let mut out = String::from("## Accounts\n\n");
    let _ = writeln!(out, "- shown: {}", list.accounts.len());
    let _ = writeln!(out, "- total: {}", list.total);
    let _ = writeln!(out, "- group: {}", list.group);
    if !list.search.is_empty() {
        let _ = writeln!(out, "- search: {}", list.search);
    }
    out.push('\n');
    if !list.accounts.is_empty() {
        out.push_str(&md_table(&list.accounts));
    }
    out
}

/// Render a mutation result as Markdown.
#[must_use]
pub fn render_mutation_md(report: &MutationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "- summary: {}", report.summary);
    if let Some(id) = &report.id {
        let _ = writeln!(out, "- id: {id}");
    }
    let _ = writeln!(out, "- found: {}", report.found);
    let _ = writeln!(out, "- affected: {}", report.affected);
    let _ = writeln!(out, "- total: {}", report.total);
    let _ = writeln!(out, "- synced: {}", report.synced);
    if !report.accounts.is_empty() {
        out.push('\n');
        out.push_str(&md_table(&report.accounts));
    }
    out
}

/// Render an export result as Markdown.
#[must_use]
pub fn render_export_md(report: &ExportReport) -> String {
    format!(
        "## Export\n\n- format: {} ({})\n- path: {}\n- bytes: {}\n- accounts: {}\n",
        report.format, report.media_type, report.path, report.bytes, report.accounts
    )
}

/// Render the known groups as Markdown.
#[must_use]
pub fn render_groups_md(groups: &[GroupSummary]) -> String {
    let mut out = String::from("## Groups\n\n");
    for group in groups {
        let marker = if group.built_in { "" } else { " (custom)" };
        let _ = writeln!(out, "- {}{}: {}", group.name, marker, group.count);
    }
    out
}
