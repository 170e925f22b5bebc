//! Human-readable output.
//!
//! Plain aligned tables, styled with `colored` unless color is disabled.

use colored::Colorize;

use super::{AccountList, AccountRow, ExportReport, GroupSummary, MutationReport};

const COLUMN_GAP: &str = "  ";

const HEADINGS: [&str; 6] = ["ID", "Name", "Email", "Username", "Password", "Group"];

#[derive(Debug, Clone, Copy)]
enum Tone {
    Header,
    Muted,
    Accent,
    Success,
    Warning,
}

fn paint(text: &str, tone: Tone, no_color: bool) -> String {
    if no_color {
        return text.to_string();
    }
    match tone {
        Tone::Header => text.bold().to_string(),
        Tone::Muted => text.dimmed().to_string(),
        Tone::Accent => text.cyan().to_string(),
        Tone::Success => text.green().to_string(),
        Tone::Warning => text.yellow().bold().to_string(),
    }
}

/// `1 account`, `3 accounts`.
pub(crate) fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn cells(row: &AccountRow) -> [&str; 6] {
    [
        row.id.as_str(),
        row.name.as_str(),
        row.email.as_str(),
        row.username.as_str(),
        row.password.as_str(),
        row.group.as_str(),
    ]
}

/// Aligned table of account rows. The last column is not padded.
fn render_table(rows: &[AccountRow], no_color: bool) -> String {
    let mut widths = HEADINGS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(cells(row)) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let last = HEADINGS.len() - 1;
    let pad = |text: &str, column: usize| -> String {
        if column == last {
            text.to_string()
        } else {
            format!("{text:<width$}", width = widths[column])
        }
    };

    let mut out = String::new();

    let header: Vec<String> = HEADINGS
        .into_iter()
        .enumerate()
        .map(|(i, h)| paint(&pad(h, i), Tone::Header, no_color))
        .collect();
    out.push_str(&header.join(COLUMN_GAP));
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&paint(&rule.join(COLUMN_GAP), Tone::Muted, no_color));
    out.push('\n');

    for row in rows {
        let line: Vec<String> = cells(row)
            .into_iter()
            .enumerate()
            .map(|(i, cell)| {
                let padded = pad(cell, i);
                match i {
                    0 => paint(&padded, Tone::Muted, no_color),
                    5 => paint(&padded, Tone::Accent, no_color),
                    _ => padded,
                }
            })
            .collect();
        out.push_str(&line.join(COLUMN_GAP));
        out.push('\n');
    }

    out
}

/// Render the `list` result.
#[must_use]
pub fn render_list(list: &AccountList, no_color: bool) -> String {
    if list.accounts.is_empty() {
        return if list.total == 0 {
            "No accounts yet. Run `burner add` to generate some.\n".to_string()
        } else {
            format!(
                "No accounts match (group: {}, search: \"{}\").\n",
                list.group, list.search
            )
        };
    }

    let mut out = render_table(&list.accounts, no_color);
    out.push('\n');
    let mut footer = format!(
        "Showing {} of {}",
        list.accounts.len(),
        plural(list.total, "account")
    );
    if !list.passwords_visible {
        footer.push_str(" (passwords hidden, use --show-passwords)");
    }
    out.push_str(&paint(&footer, Tone::Muted, no_color));
    out.push('\n');
    out
}

/// Render a mutation result.
#[must_use]
pub fn render_mutation(report: &MutationReport, no_color: bool) -> String {
    let tone = if report.found { Tone::Success } else { Tone::Warning };
    let mut out = paint(&report.summary, tone, no_color);
    out.push('\n');

    if !report.accounts.is_empty() {
        out.push('\n');
        out.push_str(&render_table(&report.accounts, no_color));
    }

    if !report.synced {
        out.push('\n');
        out.push_str(&paint(
            "Warning: accounts could not be saved to disk (see log for details).",
            Tone::Warning,
            no_color,
        ));
        out.push('\n');
    }
    out
}

/// Render an export result.
#[must_use]
pub fn render_export(report: &ExportReport, no_color: bool) -> String {
    let summary = format!(
        "Exported {} to {} ({} bytes, {})",
        plural(report.accounts, "account"),
        report.path,
        report.bytes,
        report.format
    );
    let mut out = paint(&summary, Tone::Success, no_color);
    out.push('\n');
    out
}

/// Render the known groups with their account counts.
#[must_use]
pub fn render_groups(groups: &[GroupSummary], no_color: bool) -> String {
    let width = groups
        .iter()
        .map(|g| g.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for group in groups {
        let name = format!("{:<width$}", group.name);
        out.push_str(&paint(&name, Tone::Accent, no_color));
        out.push_str(COLUMN_GAP);
        out.push_str(&plural(group.count, "account"));
        if !group.built_in {
            out.push(' ');
            out.push_str(&paint("(custom)", Tone::Muted, no_color));
        }
        out.push('\n');
    }
    out
}
