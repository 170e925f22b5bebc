//! CLI argument parsing and command dispatch.

pub mod accounts;
pub mod args;
pub mod export;
pub mod groups;

pub use args::{Cli, Commands, OutputFormat};

use crate::core::generator::FieldGenerator;
use crate::core::store::AccountStore;
use crate::error::Result;
use crate::storage::config::ResolvedConfig;
use crate::storage::kv::FileKvStore;

/// Resolved settings plus the store they point at.
pub struct Context {
    pub config: ResolvedConfig,
    pub store: AccountStore<FileKvStore>,
}

impl Context {
    /// Open the file-backed store under the configured data directory.
    #[must_use]
    pub fn open(config: ResolvedConfig) -> Self {
        let generator =
            FieldGenerator::from_entropy().with_password_length(config.password_length);
        let storage = FileKvStore::new(&config.data_dir);
        tracing::debug!(path = %storage.dir().display(), "Opening account store");
        let store = AccountStore::open(storage, generator);
        Self { config, store }
    }

    /// Whether output should be styled.
    #[must_use]
    pub fn no_color(&self) -> bool {
        self.config.no_color || !crate::util::env::should_use_color(false)
    }
}

/// Run one command against a freshly opened store.
pub fn dispatch(command: &Commands, config: ResolvedConfig) -> Result<()> {
    let mut ctx = Context::open(config);
    tracing::debug!(command = command.name(), accounts = ctx.store.len(), "Dispatching");

    match command {
        Commands::Add(_) => accounts::add(&mut ctx),
        Commands::List(args) => accounts::list(args, &ctx),
        Commands::Set(args) => accounts::set(args, &mut ctx),
        Commands::Refresh(args) => accounts::refresh(args, &mut ctx),
        Commands::Regenerate(_) => accounts::regenerate(&mut ctx),
        Commands::Delete(args) => accounts::delete(args, &mut ctx),
        Commands::Clear => accounts::clear(&mut ctx),
        Commands::Export(args) => export::execute(args, &ctx),
        Commands::Groups => groups::execute(&ctx),
    }
}

/// Print rendered output, ending with exactly one newline.
pub(crate) fn emit(output: &str) {
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
}
