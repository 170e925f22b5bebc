//! Export command implementation.

use super::{Context, emit};
use crate::cli::args::ExportArgs;
use crate::core::export::{DirectorySink, ExportFormat, ExportSink};
use crate::error::Result;
use crate::render::{self, ExportReport};

/// Execute the export command.
pub fn execute(args: &ExportArgs, ctx: &Context) -> Result<()> {
    let format = ExportFormat::from_cli_name(&args.file_format)?;
    tracing::debug!(%format, accounts = ctx.store.len(), "Starting export");

    let artifact = ctx.store.export(format)?;
    let mut sink = DirectorySink::new(&ctx.config.export_dir);
    let path = sink.save(&artifact)?;

    let report = ExportReport {
        format: format.to_string(),
        media_type: format.media_type().to_string(),
        path: path.display().to_string(),
        bytes: artifact.bytes.len(),
        accounts: ctx.store.len(),
    };
    let output = render::render_export(&report, ctx.config.format, ctx.config.pretty, ctx.no_color())?;
    emit(&output);
    Ok(())
}
