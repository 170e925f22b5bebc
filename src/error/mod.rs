//! Error types for burner.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! ## Error Taxonomy
//!
//! Errors are categorized into five main categories:
//! - **Configuration**: Config file parsing, validation, or missing values
//! - **Input**: Invalid arguments passed to store or CLI operations
//! - **Storage**: Problems reading or writing persisted state
//! - **Export**: Failures while encoding or saving an export artifact
//! - **Internal**: Unexpected errors, bugs, or unclassified issues
//!
//! Each error has a stable error code (e.g., `BURNER-C001`) for programmatic handling.
//!
//! Note that the account store itself never surfaces persistence failures;
//! they are logged at the store boundary. The storage variants here are
//! produced by the key-value collaborators and consumed by the store.

use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// High-level error categories for classification and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Configuration issues (parse errors, invalid values).
    Configuration,
    /// Invalid input (batch size, password length, field or group names).
    Input,
    /// Persisted state could not be read or written.
    Storage,
    /// Export encoding or saving failed.
    Export,
    /// Internal errors (bugs, unexpected state, unclassified).
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Configuration => "Configuration error",
            Self::Input => "Input error",
            Self::Storage => "Storage error",
            Self::Export => "Export error",
            Self::Internal => "Internal error",
        }
    }

    /// Returns a short code prefix for this category.
    #[must_use]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            Self::Configuration => "C",
            Self::Input => "I",
            Self::Storage => "S",
            Self::Export => "E",
            Self::Internal => "X",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

// =============================================================================
// Exit Codes
// =============================================================================

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Unexpected failure
    GeneralError = 1,
    /// Invalid arguments or configuration
    ParseError = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as Self
    }
}

/// Main error type for burner operations.
#[derive(Error, Debug)]
pub enum BurnerError {
    // ==========================================================================
    // Configuration errors (Category: Configuration)
    // ==========================================================================
    /// Generic configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Error parsing configuration file.
    #[error("config parse error at {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// Invalid value in configuration.
    #[error("invalid config value for '{key}': {message}")]
    ConfigInvalid {
        key: String,
        value: String,
        message: String,
    },

    // ==========================================================================
    // Input errors (Category: Input)
    // ==========================================================================
    /// Batch size outside `1..=MAX_BATCH_SIZE`.
    #[error("batch size must be between 1 and {max}, got {0}", max = crate::core::store::MAX_BATCH_SIZE)]
    InvalidBatchSize(usize),

    /// Password length outside the supported range.
    #[error("password length must be between {min} and {max}, got {length}")]
    InvalidPasswordLength { length: usize, min: usize, max: usize },

    /// Unknown account field name.
    #[error("unknown field '{0}'. Valid fields: name, email, username, password, group")]
    InvalidField(String),

    /// Group not in the configured set.
    #[error("unknown group '{name}'. Valid groups: {valid}")]
    InvalidGroup { name: String, valid: String },

    /// Unknown export format name.
    #[error("unknown export format '{0}'. Valid formats: json, pdf, xlsx")]
    InvalidExportFormat(String),

    // ==========================================================================
    // Storage errors (Category: Storage)
    // ==========================================================================
    /// Key-value collaborator failed.
    #[error("storage error for key '{key}': {message}")]
    Storage { key: String, message: String },

    // ==========================================================================
    // Export errors (Category: Export)
    // ==========================================================================
    /// Encoding an export document failed.
    #[error("failed to export {format}: {message}")]
    Export { format: String, message: String },

    /// Spreadsheet encoder error.
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    // ==========================================================================
    // I/O errors (Category: Internal)
    // ==========================================================================
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BurnerError {
    /// Map error to exit code.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_)
            | Self::ConfigParse { .. }
            | Self::ConfigInvalid { .. }
            | Self::InvalidBatchSize(_)
            | Self::InvalidPasswordLength { .. }
            | Self::InvalidField(_)
            | Self::InvalidGroup { .. }
            | Self::InvalidExportFormat(_) => ExitCode::ParseError,

            Self::Storage { .. }
            | Self::Export { .. }
            | Self::Xlsx(_)
            | Self::Io(_)
            | Self::Json(_) => ExitCode::GeneralError,
        }
    }

    /// Returns the error category for classification and routing.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) | Self::ConfigParse { .. } | Self::ConfigInvalid { .. } => {
                ErrorCategory::Configuration
            }

            Self::InvalidBatchSize(_)
            | Self::InvalidPasswordLength { .. }
            | Self::InvalidField(_)
            | Self::InvalidGroup { .. }
            | Self::InvalidExportFormat(_) => ErrorCategory::Input,

            Self::Storage { .. } => ErrorCategory::Storage,

            Self::Export { .. } | Self::Xlsx(_) => ErrorCategory::Export,

            Self::Io(_) | Self::Json(_) => ErrorCategory::Internal,
        }
    }

    /// Returns a stable error code for programmatic handling.
    ///
    /// Format: `BURNER-{category}{number}`.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "BURNER-C001",
            Self::ConfigParse { .. } => "BURNER-C002",
            Self::ConfigInvalid { .. } => "BURNER-C003",

            Self::InvalidBatchSize(_) => "BURNER-I001",
            Self::InvalidPasswordLength { .. } => "BURNER-I002",
            Self::InvalidField(_) => "BURNER-I003",
            Self::InvalidGroup { .. } => "BURNER-I004",
            Self::InvalidExportFormat(_) => "BURNER-I005",

            Self::Storage { .. } => "BURNER-S001",

            Self::Export { .. } => "BURNER-E001",
            Self::Xlsx(_) => "BURNER-E002",

            Self::Io(_) => "BURNER-X001",
            Self::Json(_) => "BURNER-X002",
        }
    }

    /// Short hint shown under the error message in human output.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Config(_) | Self::ConfigParse { .. } | Self::ConfigInvalid { .. } => Some(
                "Check the config file (BURNER_CONFIG overrides its location).".to_string(),
            ),
            Self::InvalidBatchSize(_) => Some("Try: burner add --count 1".to_string()),
            Self::InvalidPasswordLength { min, max, .. } => {
                Some(format!("Pick a length from {min} to {max}, e.g. --password-length 12"))
            }
            Self::InvalidGroup { .. } => Some(
                "Run `burner groups` to see valid groups, or add one under [groups] custom."
                    .to_string(),
            ),
            Self::Storage { .. } | Self::Io(_) => {
                Some("Check file permissions and available disk space.".to_string())
            }
            _ => None,
        }
    }
}

/// Result type alias for burner operations.
pub type Result<T> = std::result::Result<T, BurnerError>;

// =============================================================================
// Tests
// =============================================================================
