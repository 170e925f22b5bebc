//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Generate and manage throwaway account credentials.
#[derive(Parser, Debug)]
#[command(name = "burner")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // === Global flags ===
    /// Output format [default: human]
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Shorthand for --format json
    #[arg(long, global = true)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log level
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Emit JSONL logs to stderr
    #[arg(long, global = true)]
    pub json_output: bool,

    /// Verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the account snapshot
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

impl Cli {
    /// Output format from flags alone, before config is consulted.
    #[must_use]
    pub fn effective_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format.unwrap_or_default()
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a batch of new accounts
    Add(AddArgs),

    /// List accounts, optionally filtered
    List(ListArgs),

    /// Overwrite one field of an account
    Set(SetArgs),

    /// Regenerate one credential of an account
    Refresh(RefreshArgs),

    /// Regenerate email, username and password of every account
    Regenerate(RegenerateArgs),

    /// Delete one account
    Delete(DeleteArgs),

    /// Delete every account
    Clear,

    /// Export all accounts to a file
    Export(ExportArgs),

    /// List known groups
    Groups,
}

impl Commands {
    /// `--password-length` given to this command, if any.
    #[must_use]
    pub const fn password_length(&self) -> Option<usize> {
        match self {
            Self::Add(args) => args.password_length,
            Self::Refresh(args) => args.password_length,
            Self::Regenerate(args) => args.password_length,
            _ => None,
        }
    }

    /// Canonical name used in robot output envelopes.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Refresh(_) => "refresh",
            Self::Regenerate(_) => "regenerate",
            Self::Delete(_) => "delete",
            Self::Clear => "clear",
            Self::Export(_) => "export",
            Self::Groups => "groups",
        }
    }
}

/// Arguments for the `add` command.
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Number of accounts to create [default: config batch_size]
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub count: Option<usize>,

    /// Password length (8-24)
    #[arg(long, value_name = "N")]
    pub password_length: Option<usize>,
}

/// Arguments for the `list` command.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only show this group ("All" shows every group)
    #[arg(short, long, value_name = "GROUP")]
    pub group: Option<String>,

    /// Case-insensitive search on name, email, username and group
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Show passwords instead of masking them
    #[arg(long)]
    pub show_passwords: bool,
}

/// Arguments for the `set` command.
#[derive(Parser, Debug)]
pub struct SetArgs {
    /// Account id
    pub id: String,

    /// Field to overwrite (name, email, username, password, group)
    pub field: String,

    /// New value
    pub value: String,
}

/// Arguments for the `refresh` command.
#[derive(Parser, Debug)]
pub struct RefreshArgs {
    /// Account id
    pub id: String,

    /// Credential to regenerate (email, username, password)
    pub field: String,

    /// Password length (8-24)
    #[arg(long, value_name = "N")]
    pub password_length: Option<usize>,
}

/// Arguments for the `regenerate` command.
#[derive(Parser, Debug)]
pub struct RegenerateArgs {
    /// Password length (8-24)
    #[arg(long, value_name = "N")]
    pub password_length: Option<usize>,
}

/// Arguments for the `delete` command.
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Account id
    pub id: String,
}

/// Arguments for the `export` command.
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// File format (json, pdf, xlsx)
    #[arg(value_name = "FORMAT", default_value = "json")]
    pub file_format: String,

    /// Directory to write the file into [default: config output_dir or .]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Human,
    /// JSON output
    Json,
    /// Markdown output
    Md,
}
