//! Core data models.
//!
//! These types are the account record, its field names, and the robot
//! output envelope. The JSON shape of [`Account`] is the persisted snapshot
//! format, so field names must not change.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BurnerError, Result};

// =============================================================================
// Group
// =============================================================================

/// Category label used to partition and filter accounts.
///
/// The four built-in groups are always available. Additional groups come
/// from configuration and are carried as [`Group::Custom`]. Serialized as
/// its display string, so any group name found in a snapshot loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Group {
    #[default]
    General,
    SocialMedia,
    Shopping,
    Forums,
    Custom(String),
}

impl Group {
    /// Built-in groups in display order.
    pub const BUILT_IN: &'static [Self] =
        &[Self::General, Self::SocialMedia, Self::Shopping, Self::Forums];

    /// Display name, also the persisted value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::General => "General",
            Self::SocialMedia => "Social Media",
            Self::Shopping => "Shopping",
            Self::Forums => "Forums",
            Self::Custom(name) => name,
        }
    }

    /// Whether this is one of the built-in groups.
    #[must_use]
    pub const fn is_built_in(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl From<String> for Group {
    fn from(value: String) -> Self {
        match value.as_str() {
            "General" => Self::General,
            "Social Media" => Self::SocialMedia,
            "Shopping" => Self::Shopping,
            "Forums" => Self::Forums,
            _ => Self::Custom(value),
        }
    }
}

impl From<&str> for Group {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Group> for String {
    fn from(group: Group) -> Self {
        match group {
            Group::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Account
// =============================================================================

/// A generated disposable account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Opaque identifier, unique within the store. Never reassigned.
    pub id: String,
    /// Editable display label.
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub group: Group,
}

impl Account {
    /// Default display name for the account at 1-based `position`.
    #[must_use]
    pub fn default_name(position: usize) -> String {
        format!("Account {position}")
    }

    /// Read a field as a string slice.
    #[must_use]
    pub fn field(&self, field: AccountField) -> &str {
        match field {
            AccountField::Name => &self.name,
            AccountField::Email => &self.email,
            AccountField::Username => &self.username,
            AccountField::Password => &self.password,
            AccountField::Group => self.group.as_str(),
        }
    }

    /// Replace exactly one field.
    pub fn set_field(&mut self, field: AccountField, value: String) {
        match field {
            AccountField::Name => self.name = value,
            AccountField::Email => self.email = value,
            AccountField::Username => self.username = value,
            AccountField::Password => self.password = value,
            AccountField::Group => self.group = Group::from(value),
        }
    }
}

// =============================================================================
// Field names
// =============================================================================

/// Fields a caller may overwrite. `id` is deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountField {
    Name,
    Email,
    Username,
    Password,
    Group,
}

impl AccountField {
    /// All editable fields, in export column order.
    pub const ALL: &'static [Self] = &[
        Self::Name,
        Self::Email,
        Self::Username,
        Self::Password,
        Self::Group,
    ];

    /// CLI/JSON name.
    #[must_use]
    pub const fn cli_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Username => "username",
            Self::Password => "password",
            Self::Group => "group",
        }
    }

    /// Column heading used in tables and exports.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Username => "Username",
            Self::Password => "Password",
            Self::Group => "Group",
        }
    }

    /// Parse from CLI argument (case-insensitive).
    pub fn from_cli_name(name: &str) -> Result<Self> {
        let lower = name.to_lowercase();
        Self::ALL
            .iter()
            .find(|f| f.cli_name() == lower)
            .copied()
            .ok_or_else(|| BurnerError::InvalidField(name.to_string()))
    }
}

impl fmt::Display for AccountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

/// The generated credential subset of [`AccountField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialField {
    Email,
    Username,
    Password,
}

impl CredentialField {
    pub const ALL: &'static [Self] = &[Self::Email, Self::Username, Self::Password];

    /// Parse from CLI argument (case-insensitive).
    pub fn from_cli_name(name: &str) -> Result<Self> {
        match AccountField::from_cli_name(name)? {
            AccountField::Email => Ok(Self::Email),
            AccountField::Username => Ok(Self::Username),
            AccountField::Password => Ok(Self::Password),
            AccountField::Name | AccountField::Group => {
                Err(BurnerError::InvalidField(name.to_string()))
            }
        }
    }
}

impl From<CredentialField> for AccountField {
    fn from(field: CredentialField) -> Self {
        match field {
            CredentialField::Email => Self::Email,
            CredentialField::Username => Self::Username,
            CredentialField::Password => Self::Password,
        }
    }
}

// =============================================================================
// Password length
// =============================================================================

/// Validated password length in `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PasswordLength(usize);

impl PasswordLength {
    pub const MIN: usize = 8;
    pub const MAX: usize = 24;
    pub const DEFAULT: Self = Self(12);

    /// Validate a length.
    pub const fn new(length: usize) -> Result<Self> {
        if length < Self::MIN || length > Self::MAX {
            return Err(BurnerError::InvalidPasswordLength {
                length,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(length))
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for PasswordLength {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// =============================================================================
// Robot Output
// =============================================================================

/// Envelope for JSON output consumed by scripts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotOutput<T> {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub command: String,
    pub data: T,
    pub errors: Vec<String>,
}

impl<T> RobotOutput<T> {
    /// Create a new robot output envelope.
    pub fn new(command: impl Into<String>, data: T) -> Self {
        Self {
            schema_version: "burner.v1".to_string(),
            generated_at: Utc::now(),
            command: command.into(),
            data,
            errors: Vec::new(),
        }
    }
}
