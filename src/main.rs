//! burner - disposable account generator
//!
//! CLI entry point.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use clap::Parser;
use std::process::ExitCode;

use burner::cli::{self as commands, Cli};
use burner::core::logging;
use burner::storage::config::ResolvedConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = cli
        .log_level
        .as_deref()
        .and_then(logging::LogLevel::from_arg)
        .or_else(logging::parse_log_level_from_env)
        .unwrap_or_default();
    let log_format = if cli.json_output {
        logging::LogFormat::Json
    } else {
        logging::parse_log_format_from_env().unwrap_or_default()
    };
    let log_file = logging::parse_log_file_from_env();
    logging::init(log_level, log_format, log_file, cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.error_code(), "{e}");
            let no_color = !burner::util::env::should_use_color(cli.no_color);
            let output = burner::render::error::render_error(
                &e,
                cli.effective_format(),
                no_color,
                cli.pretty,
            );
            eprintln!("{output}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> burner::Result<()> {
    let Some(command) = &cli.command else {
        print_quickstart();
        return Ok(());
    };
    let config = ResolvedConfig::resolve(cli)?;
    commands::dispatch(command, config)
}

/// Print quickstart help when no command is given.
fn print_quickstart() {
    println!(
        r"burner - disposable account generator

Generate throwaway account records and export them.

USAGE:
    burner [OPTIONS] <COMMAND>

COMMANDS:
    add         Generate new accounts
    list        Show accounts, optionally filtered
    set         Edit one field of an account
    refresh     Regenerate one credential of an account
    regenerate  Regenerate credentials for every account
    delete      Remove one account
    clear       Remove every account
    export      Write all accounts to JSON, PDF, or XLSX
    groups      Show known groups with account counts

QUICK START:
    burner add --count 5              # Generate five accounts
    burner list --group shopping      # Accounts in one group
    burner list --show-passwords      # Reveal passwords
    burner export pdf -o ~/exports    # Write disposable_accounts.pdf

ROBOT MODE (for AI agents):
    burner list --json                # JSON output
    burner list --format md           # Markdown output

For more help: burner --help
"
    );
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
}
