//! Account commands: add, list, set, refresh, regenerate, delete, clear.

use super::{Context, emit};
use crate::cli::args::{DeleteArgs, ListArgs, RefreshArgs, SetArgs};
use crate::core::models::{AccountField, CredentialField};
use crate::core::query::GroupFilter;
use crate::error::Result;
use crate::render::{self, AccountList, MutationReport, human::plural, rows};
use crate::storage::config::ResolvedConfig;

fn not_found(id: &str) -> String {
    format!("No account with id '{id}'. Nothing changed.")
}

/// Render and print a mutation report.
fn finish(command: &str, report: &MutationReport, ctx: &Context) -> Result<()> {
    if !report.found {
        tracing::info!(command, id = ?report.id, "No matching account");
    }
    let output = render::render_mutation(
        command,
        report,
        ctx.config.format,
        ctx.config.pretty,
        ctx.no_color(),
    )?;
    emit(&output);
    Ok(())
}

/// Report for a single-account command.
fn single(ctx: &Context, id: &str, found: bool, summary: String) -> MutationReport {
    MutationReport {
        summary: if found { summary } else { not_found(id) },
        id: Some(id.to_string()),
        found,
        affected: usize::from(found),
        total: ctx.store.len(),
        synced: ctx.store.is_synced(),
        accounts: rows(ctx.store.get(id), ctx.config.show_passwords),
    }
}

/// Resolve a `--group` argument into a filter.
///
/// Known groups match case-insensitively. Anything else is taken verbatim so
/// accounts carrying a group no longer in config can still be found.
fn group_filter(name: &str, config: &ResolvedConfig) -> GroupFilter {
    match GroupFilter::parse(name) {
        GroupFilter::All => GroupFilter::All,
        GroupFilter::Only(group) => {
            GroupFilter::Only(config.lookup_group(name).unwrap_or(group))
        }
    }
}

/// `burner add`
pub fn add(ctx: &mut Context) -> Result<()> {
    let count = ctx.config.batch_size;
    let before = ctx.store.len();
    let created = rows(&ctx.store.add_batch(count)?[before..], ctx.config.show_passwords);

    let report = MutationReport {
        summary: format!(
            "Added {} ({} total).",
            plural(created.len(), "account"),
            ctx.store.len()
        ),
        id: None,
        found: true,
        affected: created.len(),
        total: ctx.store.len(),
        synced: ctx.store.is_synced(),
        accounts: created,
    };
    finish("add", &report, ctx)
}

/// `burner list`
pub fn list(args: &ListArgs, ctx: &Context) -> Result<()> {
    let group = args
        .group
        .as_deref()
        .map_or(GroupFilter::All, |name| group_filter(name, &ctx.config));
    let search = args.search.clone().unwrap_or_default();
    let show = ctx.config.show_passwords;

    let hits = ctx.store.filter(&group, &search);
    tracing::debug!(%group, search = %search, shown = hits.len(), "Filtered accounts");

    let list = AccountList {
        accounts: rows(hits, show),
        total: ctx.store.len(),
        group: group.to_string(),
        search,
        passwords_visible: show,
    };
    let output = render::render_list(&list, ctx.config.format, ctx.config.pretty, ctx.no_color())?;
    emit(&output);
    Ok(())
}

/// `burner set <ID> <FIELD> <VALUE>`
pub fn set(args: &SetArgs, ctx: &mut Context) -> Result<()> {
    let field = AccountField::from_cli_name(&args.field)?;
    let value = if field == AccountField::Group {
        ctx.config.lookup_group(&args.value)?.to_string()
    } else {
        args.value.clone()
    };

    let found = ctx.store.update_field(&args.id, field, value);
    let report = single(ctx, &args.id, found, format!("Updated {field} of {}.", args.id));
    finish("set", &report, ctx)
}

/// `burner refresh <ID> <FIELD>`
pub fn refresh(args: &RefreshArgs, ctx: &mut Context) -> Result<()> {
    let field = CredentialField::from_cli_name(&args.field)?;
    let found = ctx.store.regenerate_field(&args.id, field);
    let report = single(
        ctx,
        &args.id,
        found,
        format!("Regenerated {} of {}.", AccountField::from(field), args.id),
    );
    finish("refresh", &report, ctx)
}

/// `burner regenerate`
pub fn regenerate(ctx: &mut Context) -> Result<()> {
    let count = ctx.store.regenerate_all().len();
    let report = MutationReport {
        summary: format!("Regenerated credentials for {}.", plural(count, "account")),
        id: None,
        found: true,
        affected: count,
        total: count,
        synced: ctx.store.is_synced(),
        accounts: rows(ctx.store.accounts(), ctx.config.show_passwords),
    };
    finish("regenerate", &report, ctx)
}

/// `burner delete <ID>`
pub fn delete(args: &DeleteArgs, ctx: &mut Context) -> Result<()> {
    let found = ctx.store.delete_one(&args.id);
    let report = single(ctx, &args.id, found, format!("Deleted account {}.", args.id));
    finish("delete", &report, ctx)
}

/// `burner clear`
pub fn clear(ctx: &mut Context) -> Result<()> {
    let count = ctx.store.len();
    ctx.store.delete_all();
    let report = MutationReport {
        summary: format!("Deleted {}.", plural(count, "account")),
        id: None,
        found: true,
        affected: count,
        total: 0,
        synced: ctx.store.is_synced(),
        accounts: Vec::new(),
    };
    finish("clear", &report, ctx)
}
