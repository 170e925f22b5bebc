//! Groups command implementation.

use super::{Context, emit};
use crate::error::Result;
use crate::render::{self, GroupSummary};

/// List built-in and custom groups with account counts.
pub fn execute(ctx: &Context) -> Result<()> {
    let groups = GroupSummary::tally(&ctx.config.groups, ctx.store.accounts());
    let output = render::render_groups(&groups, ctx.config.format, ctx.config.pretty, ctx.no_color())?;
    emit(&output);
    Ok(())
}
