//! Output rendering for human and robot modes.
//!
//! Command handlers build one of the report types below and hand it to the
//! matching `render_*` function, which dispatches on [`OutputFormat`].

pub mod error;
pub mod human;
pub mod robot;

use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::core::models::{Account, Group};
use crate::error::Result;

/// Placeholder character for hidden passwords.
pub const MASK_CHAR: char = '*';

/// Mask a password, keeping its length visible.
#[must_use]
pub fn mask_password(password: &str) -> String {
    std::iter::repeat_n(MASK_CHAR, password.chars().count()).collect()
}

/// One account as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub group: String,
}

impl AccountRow {
    /// Presentation copy of `account`; the password is masked unless
    /// `show_password` is set.
    #[must_use]
    pub fn new(account: &Account, show_password: bool) -> Self {
        Self {
            id: account.id.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            username: account.username.clone(),
            password: if show_password {
                account.password.clone()
            } else {
                mask_password(&account.password)
            },
            group: account.group.to_string(),
        }
    }
}

/// Rows for a slice of account references.
#[must_use]
pub fn rows<'a>(accounts: impl IntoIterator<Item = &'a Account>, show_passwords: bool) -> Vec<AccountRow> {
    accounts
        .into_iter()
        .map(|a| AccountRow::new(a, show_passwords))
        .collect()
}

/// Result of `list`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountList {
    pub accounts: Vec<AccountRow>,
    /// Accounts in the store before filtering.
    pub total: usize,
    pub group: String,
    pub search: String,
    pub passwords_visible: bool,
}

/// Result of a mutating command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationReport {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// False when the command named an unknown id.
    pub found: bool,
    /// Accounts created, changed, or removed.
    pub affected: usize,
    /// Accounts in the store afterwards.
    pub total: usize,
    /// Whether the snapshot write succeeded.
    pub synced: bool,
    /// Accounts worth showing after the change (new or edited ones).
    pub accounts: Vec<AccountRow>,
}

/// Result of `export`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub format: String,
    pub media_type: String,
    pub path: String,
    pub bytes: usize,
    pub accounts: usize,
}

/// One entry of `groups`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub name: String,
    pub built_in: bool,
    pub count: usize,
}

impl GroupSummary {
    /// Count the accounts in each known group.
    ///
    /// Groups that only appear on stored accounts (e.g. a custom group since
    /// removed from config) are appended after the known ones.
    #[must_use]
    pub fn tally(groups: &[Group], accounts: &[Account]) -> Vec<Self> {
        let mut all: Vec<&Group> = groups.iter().collect();
        for account in accounts {
            if !all.contains(&&account.group) {
                all.push(&account.group);
            }
        }
        all.into_iter()
            .map(|group| Self {
                name: group.to_string(),
                built_in: group.is_built_in(),
                count: accounts.iter().filter(|a| &a.group == group).count(),
            })
            .collect()
    }
}

/// Render the `list` result.
pub fn render_list(list: &AccountList, format: OutputFormat, pretty: bool, no_color: bool) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(human::render_list(list, no_color)),
        OutputFormat::Json => robot::render_envelope("list", list, pretty),
        OutputFormat::Md => Ok(robot::render_list_md(list)),
    }
}

/// Render a mutation result.
pub fn render_mutation(
    command: &str,
    report: &MutationReport,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(human::render_mutation(report, no_color)),
        OutputFormat::Json => robot::render_envelope(command, report, pretty),
        OutputFormat::Md => Ok(robot::render_mutation_md(report)),
    }
}

/// Render an export result.
pub fn render_export(report: &ExportReport, format: OutputFormat, pretty: bool, no_color: bool) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(human::render_export(report, no_color)),
        OutputFormat::Json => robot::render_envelope("export", report, pretty),
        OutputFormat::Md => Ok(robot::render_export_md(report)),
    }
}

/// Render the known groups.
pub fn render_groups(groups: &[GroupSummary], format: OutputFormat, pretty: bool, no_color: bool) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(human::render_groups(groups, no_color)),
        OutputFormat::Json => robot::render_envelope("groups", groups, pretty),
        OutputFormat::Md => Ok(robot::render_groups_md(groups)),
    }
}
