//! Configuration file loading and management.
//!
//! Loads configuration from:
//! - Linux: `~/.config/burner/config.toml`
//! - macOS: `~/Library/Application Support/com.burner.burner/config.toml`
//! - Windows: `%APPDATA%/burner/burner/config/config.toml`
//!
//! ## Precedence
//!
//! Settings are resolved with the following precedence (highest first):
//! 1. CLI flags
//! 2. Environment variables
//! 3. Config file
//! 4. Built-in defaults
//!
//! ## Environment Variables
//!
//! - `BURNER_CONFIG`: Override config file path
//! - `BURNER_DATA_DIR`: Directory holding the account snapshot
//! - `BURNER_PASSWORD_LENGTH`: Password length for generated accounts (8-24)
//! - `BURNER_FORMAT`: Output format (human, json, md)
//! - `BURNER_NO_COLOR` or `NO_COLOR`: Disable colors (1, true, yes)
//! - `BURNER_PRETTY`: Pretty-print JSON output (1, true, yes)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::cli::args::{Cli, Commands, OutputFormat};
use crate::core::models::{Group, PasswordLength};
pub use crate::core::store::MAX_BATCH_SIZE;
use crate::error::{BurnerError, Result};

// =============================================================================
// Environment Variable Names
// =============================================================================

/// Environment variable to override config file path.
pub const ENV_CONFIG: &str = "BURNER_CONFIG";
/// Environment variable for the data directory.
pub const ENV_DATA_DIR: &str = "BURNER_DATA_DIR";
/// Environment variable for the generated password length.
pub const ENV_PASSWORD_LENGTH: &str = "BURNER_PASSWORD_LENGTH";
/// Environment variable for output format.
pub const ENV_FORMAT: &str = "BURNER_FORMAT";
/// Environment variable to disable colors.
pub const ENV_NO_COLOR: &str = "BURNER_NO_COLOR";
/// Standard environment variable to disable colors.
pub const ENV_NO_COLOR_STD: &str = "NO_COLOR";
/// Environment variable for pretty JSON output.
pub const ENV_PRETTY: &str = "BURNER_PRETTY";

/// Default number of accounts created by `add`.
pub const DEFAULT_BATCH_SIZE: usize = 1;

/// Environment lookup used during resolution.
type Env<'a> = &'a dyn Fn(&str) -> Option<String>;

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Fully resolved configuration after merging CLI, env vars, and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Output format.
    pub format: OutputFormat,
    /// Whether to disable colored output.
    pub no_color: bool,
    /// Whether to pretty-print JSON output.
    pub pretty: bool,
    /// Length of newly generated passwords.
    pub password_length: PasswordLength,
    /// Accounts created by `add` when no count is given.
    pub batch_size: usize,
    /// Directory holding the account snapshot.
    pub data_dir: PathBuf,
    /// Directory exports are written to.
    pub export_dir: PathBuf,
    /// Whether `list` shows passwords unmasked.
    pub show_passwords: bool,
    /// Built-in groups followed by configured custom groups.
    pub groups: Vec<Group>,
    /// Config file that was consulted (it may not exist).
    pub config_path: PathBuf,
    /// Source of each setting for debugging.
    pub sources: ConfigSources,
}

/// Tracks the source of each configuration value.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub format: ConfigSource,
    pub no_color: ConfigSource,
    pub pretty: ConfigSource,
    pub password_length: ConfigSource,
    pub batch_size: ConfigSource,
    pub data_dir: ConfigSource,
    pub export_dir: ConfigSource,
    pub show_passwords: ConfigSource,
}

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Value from CLI flag.
    Cli,
    /// Value from environment variable.
    Env,
    /// Value from config file.
    ConfigFile,
    /// Built-in default.
    #[default]
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI flag"),
            Self::Env => write!(f, "environment variable"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl ResolvedConfig {
    /// Resolve final configuration from CLI args, the process environment,
    /// and the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but is invalid, or if any
    /// flag or environment value is out of range.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        Self::resolve_with(cli, &|key: &str| std::env::var(key).ok())
    }

    /// Like [`resolve`](Self::resolve) with an explicit environment lookup.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    pub fn resolve_with(cli: &Cli, env: Env<'_>) -> Result<Self> {
        let config_path = env(ENV_CONFIG)
            .filter(|p| !p.trim().is_empty())
            .map_or_else(Config::config_path, PathBuf::from);
        let config = Config::load_from(&config_path)?;
        config.validate()?;

        let mut sources = ConfigSources::default();

        let format = Self::resolve_format(cli, &config, env, &mut sources.format)?;
        let no_color = Self::resolve_no_color(cli, &config, env, &mut sources.no_color);
        let pretty = Self::resolve_pretty(cli, &config, env, &mut sources.pretty);
        let password_length =
            Self::resolve_password_length(cli, &config, env, &mut sources.password_length)?;
        let batch_size = Self::resolve_batch_size(cli, &config, &mut sources.batch_size)?;
        let data_dir = Self::resolve_data_dir(cli, &config, env, &mut sources.data_dir);
        let export_dir = Self::resolve_export_dir(cli, &config, &mut sources.export_dir);
        let show_passwords =
            Self::resolve_show_passwords(cli, &config, &mut sources.show_passwords);

        let resolved = Self {
            format,
            no_color,
            pretty,
            password_length,
            batch_size,
            data_dir,
            export_dir,
            show_passwords,
            groups: config.known_groups(),
            config_path,
            sources,
        };
        tracing::debug!(
            format = ?resolved.format,
            data_dir = %resolved.data_dir.display(),
            password_length = resolved.password_length.get(),
            password_length_source = %resolved.sources.password_length,
            "Resolved configuration"
        );
        Ok(resolved)
    }

    /// Match `name` against the known groups (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`BurnerError::InvalidGroup`] listing the valid groups.
    pub fn lookup_group(&self, name: &str) -> Result<Group> {
        self.groups
            .iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(name.trim()))
            .cloned()
            .ok_or_else(|| BurnerError::InvalidGroup {
                name: name.to_string(),
                valid: self
                    .groups
                    .iter()
                    .map(Group::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    fn resolve_format(
        cli: &Cli,
        config: &Config,
        env: Env<'_>,
        source: &mut ConfigSource,
    ) -> Result<OutputFormat> {
        // 1. CLI --json / --format
        if cli.json {
            *source = ConfigSource::Cli;
            return Ok(OutputFormat::Json);
        }
        if let Some(format) = cli.format {
            *source = ConfigSource::Cli;
            return Ok(format);
        }

        // 2. Environment variable
        if let Some(format_env) = env(ENV_FORMAT) {
            *source = ConfigSource::Env;
            return Self::parse_format(&format_env);
        }

        // 3. Config file
        if let Some(ref format_str) = config.output.format {
            *source = ConfigSource::ConfigFile;
            return Self::parse_format(format_str);
        }

        // 4. Default
        *source = ConfigSource::Default;
        Ok(OutputFormat::Human)
    }

    /// Parse a format string into `OutputFormat`.
    fn parse_format(s: &str) -> Result<OutputFormat> {
        match s.trim().to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Md),
            _ => Err(BurnerError::Config(format!(
                "Invalid format '{s}'. Valid formats: human, json, md"
            ))),
        }
    }

    fn resolve_no_color(
        cli: &Cli,
        config: &Config,
        env: Env<'_>,
        source: &mut ConfigSource,
    ) -> bool {
        if cli.no_color {
            *source = ConfigSource::Cli;
            return true;
        }

        if env(ENV_NO_COLOR).is_some_and(|v| is_truthy(&v)) || env(ENV_NO_COLOR_STD).is_some() {
            *source = ConfigSource::Env;
            return true;
        }

        // Inverted: `color = false` means no_color.
        if !config.output.color {
            *source = ConfigSource::ConfigFile;
            return true;
        }

        *source = ConfigSource::Default;
        false
    }

    fn resolve_pretty(cli: &Cli, config: &Config, env: Env<'_>, source: &mut ConfigSource) -> bool {
        if cli.pretty {
            *source = ConfigSource::Cli;
            return true;
        }

        if env(ENV_PRETTY).is_some_and(|v| is_truthy(&v)) {
            *source = ConfigSource::Env;
            return true;
        }

        if config.output.pretty {
            *source = ConfigSource::ConfigFile;
            return true;
        }

        *source = ConfigSource::Default;
        false
    }

    fn resolve_password_length(
        cli: &Cli,
        config: &Config,
        env: Env<'_>,
        source: &mut ConfigSource,
    ) -> Result<PasswordLength> {
        // 1. --password-length on add/refresh/regenerate
        if let Some(length) = cli.command.as_ref().and_then(Commands::password_length) {
            *source = ConfigSource::Cli;
            return PasswordLength::new(length);
        }

        // 2. Environment variable
        if let Some(value) = env(ENV_PASSWORD_LENGTH) {
            *source = ConfigSource::Env;
            let length = value.trim().parse::<usize>().map_err(|_| BurnerError::ConfigInvalid {
                key: ENV_PASSWORD_LENGTH.to_string(),
                value: value.clone(),
                message: "expected a whole number".to_string(),
            })?;
            return PasswordLength::new(length);
        }

        // 3. Config file (already validated)
        if config.generator.password_length != PasswordLength::DEFAULT.get() {
            *source = ConfigSource::ConfigFile;
            return PasswordLength::new(config.generator.password_length);
        }

        *source = ConfigSource::Default;
        Ok(PasswordLength::DEFAULT)
    }

    fn resolve_batch_size(
        cli: &Cli,
        config: &Config,
        source: &mut ConfigSource,
    ) -> Result<usize> {
        if let Some(Commands::Add(args)) = &cli.command {
            if let Some(count) = args.count {
                if !(1..=MAX_BATCH_SIZE).contains(&count) {
                    return Err(BurnerError::InvalidBatchSize(count));
                }
                *source = ConfigSource::Cli;
                return Ok(count);
            }
        }

        if config.generator.batch_size != DEFAULT_BATCH_SIZE {
            *source = ConfigSource::ConfigFile;
            return Ok(config.generator.batch_size);
        }

        *source = ConfigSource::Default;
        Ok(DEFAULT_BATCH_SIZE)
    }

    fn resolve_data_dir(
        cli: &Cli,
        config: &Config,
        env: Env<'_>,
        source: &mut ConfigSource,
    ) -> PathBuf {
        if let Some(dir) = &cli.data_dir {
            *source = ConfigSource::Cli;
            return dir.clone();
        }

        if let Some(dir) = env(ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
            *source = ConfigSource::Env;
            return PathBuf::from(dir);
        }

        if let Some(dir) = &config.storage.data_dir {
            *source = ConfigSource::ConfigFile;
            return dir.clone();
        }

        *source = ConfigSource::Default;
        AppPaths::new().data
    }

    fn resolve_export_dir(cli: &Cli, config: &Config, source: &mut ConfigSource) -> PathBuf {
        if let Some(Commands::Export(args)) = &cli.command {
            if let Some(dir) = &args.output {
                *source = ConfigSource::Cli;
                return dir.clone();
            }
        }

        if let Some(dir) = &config.export.output_dir {
            *source = ConfigSource::ConfigFile;
            return dir.clone();
        }

        *source = ConfigSource::Default;
        PathBuf::from(".")
    }

    fn resolve_show_passwords(cli: &Cli, config: &Config, source: &mut ConfigSource) -> bool {
        if let Some(Commands::List(args)) = &cli.command {
            if args.show_passwords {
                *source = ConfigSource::Cli;
                return true;
            }
        }

        if config.output.show_passwords {
            *source = ConfigSource::ConfigFile;
            return true;
        }

        *source = ConfigSource::Default;
        false
    }
}

/// Check if an environment value is truthy.
fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// =============================================================================
// Config file
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Credential generation settings.
    pub generator: GeneratorConfig,
    /// Extra groups.
    pub groups: GroupsConfig,
    /// Snapshot storage.
    pub storage: StorageConfig,
    /// Export defaults.
    pub export: ExportConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// Credential generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Length of generated passwords (8-24).
    pub password_length: usize,
    /// Accounts created by `add` without `--count`.
    pub batch_size: usize,
}

/// Custom groups beyond the built-ins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupsConfig {
    pub custom: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the account snapshot.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default directory for `export`.
    pub output_dir: Option<PathBuf>,
}

/// Output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (human, json, md).
    pub format: Option<String>,
    /// Whether to use colors in output.
    pub color: bool,
    /// Whether to pretty-print JSON output.
    pub pretty: bool,
    /// Whether `list` shows passwords by default.
    pub show_passwords: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            password_length: PasswordLength::DEFAULT.get(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            pretty: false,
            show_passwords: false,
        }
    }
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific path.
    ///
    /// Returns default config if the file doesn't exist.
    /// Returns error only if the file exists but is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        tracing::debug!(?path, "Loading config file");
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| BurnerError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| BurnerError::Config(format!("Failed to serialize config: {e}")))?;

        crate::storage::kv::write_atomic(path, content.as_bytes())?;
        tracing::debug!(?path, "Config file saved");
        Ok(())
    }

    /// Get the config file path.
    #[must_use]
    pub fn config_path() -> PathBuf {
        AppPaths::new().config_file()
    }

    /// Built-in groups followed by custom groups, in config order.
    #[must_use]
    pub fn known_groups(&self) -> Vec<Group> {
        Group::BUILT_IN
            .iter()
            .cloned()
            .chain(self.groups.custom.iter().map(|name| Group::from(name.trim())))
            .collect()
    }

    /// Validate configuration values.
    ///
    /// Checks that:
    /// - Password length is within 8-24
    /// - Batch size is within 1-100
    /// - Output format is valid (human, json, md)
    /// - Custom group names are non-empty and unique, are not `All`, and do not
    ///   shadow a built-in
    pub fn validate(&self) -> Result<()> {
        let length = self.generator.password_length;
        if PasswordLength::new(length).is_err() {
            return Err(BurnerError::ConfigInvalid {
                key: "generator.password_length".to_string(),
                value: length.to_string(),
                message: format!(
                    "must be between {} and {}",
                    PasswordLength::MIN,
                    PasswordLength::MAX
                ),
            });
        }

        let batch = self.generator.batch_size;
        if batch == 0 || batch > MAX_BATCH_SIZE {
            return Err(BurnerError::ConfigInvalid {
                key: "generator.batch_size".to_string(),
                value: batch.to_string(),
                message: format!("must be between 1 and {MAX_BATCH_SIZE}"),
            });
        }

        if let Some(format) = &self.output.format {
            if !["human", "json", "md"].contains(&format.as_str()) {
                return Err(BurnerError::ConfigInvalid {
                    key: "output.format".to_string(),
                    value: format.clone(),
                    message: "valid formats: human, json, md".to_string(),
                });
            }
        }

        let mut seen: Vec<String> = Group::BUILT_IN
            .iter()
            .map(|g| g.as_str().to_lowercase())
            .collect();
        for name in &self.groups.custom {
            let trimmed = name.trim();
            let invalid = |message: &str| BurnerError::ConfigInvalid {
                key: "groups.custom".to_string(),
                value: name.clone(),
                message: message.to_string(),
            };
            if trimmed.is_empty() {
                return Err(invalid("group names must not be empty"));
            }
            if trimmed == "All" {
                return Err(invalid("\"All\" is reserved for the list filter"));
            }
            let key = trimmed.to_lowercase();
            if seen.contains(&key) {
                return Err(invalid("duplicate group name"));
            }
            seen.push(key);
        }

        Ok(())
    }
}
