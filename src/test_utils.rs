//! Test utilities for burner.
//!
//! Provides shared helpers, test data factories, and assertion macros
//! for use across all test modules.
//!
//! # Usage
//!
//! ```rust,ignore
//! use burner::test_utils::*;
//!
//! let store = seeded_store(3);
//! let account = make_test_account("id-1", "Account 1", Group::Shopping);
//! let dir = TestDir::new();
//! dir.create_file("config.toml", &make_test_config_toml());
//! ```

use std::fs;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};

use crate::core::generator::FieldGenerator;
use crate::core::models::{Account, Group};
use crate::core::store::AccountStore;
use crate::storage::kv::MemoryKvStore;

// =============================================================================
// Test Data Factories
// =============================================================================

/// Create an account with fixed credentials.
///
/// # Examples
///
/// ```rust,ignore
/// use burner::test_utils::make_test_account;
///
/// let account = make_test_account("id-1", "Account 1", Group::General);
/// assert_eq!(account.email, "abcd1234@gmail.com");
/// ```
#[must_use]
pub fn make_test_account(id: &str, name: &str, group: Group) -> Account {
    Account {
        id: id.to_string(),
        name: name.to_string(),
        email: "abcd1234@gmail.com".to_string(),
        username: "redfox12".to_string(),
        password: "Pa$$w0rd1234".to_string(),
        group,
    }
}

/// Create `count` accounts cycling through the built-in groups.
///
/// Ids are `id-1`, `id-2`, ... and names follow the default
/// `Account N` pattern.
#[must_use]
pub fn make_test_accounts(count: usize) -> Vec<Account> {
    (1..=count)
        .map(|n| {
            let group = Group::BUILT_IN[(n - 1) % Group::BUILT_IN.len()].clone();
            let mut account = make_test_account(&format!("id-{n}"), &format!("Account {n}"), group);
            account.email = format!("user{n:04}@gmail.com");
            account.username = format!("user{n}");
            account
        })
        .collect()
}

/// Serialize accounts the way the store persists them.
///
/// # Panics
///
/// Panics if serialization fails.
#[must_use]
pub fn make_test_snapshot_json(accounts: &[Account]) -> String {
    serde_json::to_string(accounts).expect("Failed to serialize accounts")
}

/// In-memory store with a deterministic generator and `count` generated
/// accounts.
///
/// # Panics
///
/// Panics if the batch cannot be generated.
#[must_use]
pub fn seeded_store(count: usize) -> AccountStore<MemoryKvStore> {
    let mut store = AccountStore::open(MemoryKvStore::new(), FieldGenerator::seeded(42));
    if count > 0 {
        store.add_batch(count).expect("Failed to generate accounts");
    }
    store
}

// =============================================================================
// Test Directory
// =============================================================================

/// Isolated temporary directory for tests, removed on drop.
///
/// # Examples
///
/// ```rust,ignore
/// use burner::test_utils::TestDir;
///
/// let dir = TestDir::new();
/// dir.create_file("config.toml", "[generator]\npassword_length = 16");
/// assert!(dir.file_exists("config.toml"));
/// ```
pub struct TestDir {
    inner: tempfile::TempDir,
}

impl TestDir {
    /// Create a new isolated temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the temporary directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Create a file in the temporary directory with the given content.
    ///
    /// Creates parent directories as needed.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be created or written.
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.inner.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        let mut file = fs::File::create(&path).expect("Failed to create test file");
        file.write_all(content.as_bytes())
            .expect("Failed to write test file");
    }

    /// Read a file from the temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read_file(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.inner.path().join(name))
    }

    /// Check if a file exists in the temporary directory.
    #[must_use]
    pub fn file_exists(&self, name: &str) -> bool {
        self.inner.path().join(name).exists()
    }

    /// Get the full path to a file in the temporary directory.
    #[must_use]
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.inner.path().join(name)
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Assertion Macros
// =============================================================================

/// Assert that a string contains a substring.
///
/// # Examples
///
/// ```rust,ignore
/// use burner::assert_contains;
///
/// let text = "Hello, world!";
/// assert_contains!(text, "world");
/// ```
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        let haystack = $haystack;
        let needle = $needle;
        assert!(
            haystack.contains(needle),
            "Expected string to contain {:?}\n\nActual string:\n{:?}",
            needle,
            haystack
        );
    };
    ($haystack:expr, $needle:expr, $($arg:tt)*) => {
        let haystack = $haystack;
        let needle = $needle;
        assert!(
            haystack.contains(needle),
            $($arg)*
        );
    };
}

/// Assert that a string does NOT contain a substring.
///
/// # Examples
///
/// ```rust,ignore
/// use burner::assert_not_contains;
///
/// let text = "Hello, world!";
/// assert_not_contains!(text, "goodbye");
/// ```
#[macro_export]
macro_rules! assert_not_contains {
    ($haystack:expr, $needle:expr) => {
        let haystack = $haystack;
        let needle = $needle;
        assert!(
            !haystack.contains(needle),
            "Expected string NOT to contain {:?}\n\nActual string:\n{:?}",
            needle,
            haystack
        );
    };
    ($haystack:expr, $needle:expr, $($arg:tt)*) => {
        let haystack = $haystack;
        let needle = $needle;
        assert!(
            !haystack.contains(needle),
            $($arg)*
        );
    };
}

/// Assert that a string is valid JSON.
///
/// # Examples
///
/// ```rust,ignore
/// use burner::assert_json_valid;
///
/// let json = r#"{"key": "value"}"#;
/// assert_json_valid!(json);
/// ```
#[macro_export]
macro_rules! assert_json_valid {
    ($json:expr) => {
        let json = $json;
        match serde_json::from_str::<serde_json::Value>(json) {
            Ok(_) => {}
            Err(e) => {
                panic!(
                    "Expected valid JSON, but parsing failed: {}\n\nJSON string:\n{}",
                    e, json
                );
            }
        }
    };
}

/// Assert that a string contains ANSI escape codes (has colors/formatting).
///
/// # Examples
///
/// ```rust,ignore
/// use burner::assert_ansi_codes;
///
/// let colored = "\x1b[31mred text\x1b[0m";
/// assert_ansi_codes!(colored);
/// ```
#[macro_export]
macro_rules! assert_ansi_codes {
    ($text:expr) => {
        let text = $text;
        assert!(
            text.contains('\x1b') || text.contains('\u{001b}'),
            "Expected string to contain ANSI escape codes, but none found.\n\nActual string:\n{:?}",
            text
        );
    };
}

/// Assert that a string does NOT contain ANSI escape codes.
///
/// # Examples
///
/// ```rust,ignore
/// use burner::assert_no_ansi_codes;
///
/// let plain = "plain text";
/// assert_no_ansi_codes!(plain);
/// ```
#[macro_export]
macro_rules! assert_no_ansi_codes {
    ($text:expr) => {
        let text = $text;
        assert!(
            !text.contains('\x1b') && !text.contains('\u{001b}'),
            "Expected string to NOT contain ANSI escape codes.\n\nActual string:\n{:?}",
            text
        );
    };
}

// =============================================================================
// Test Helpers
// =============================================================================

/// Create sample config TOML content for testing.
#[must_use]
pub fn make_test_config_toml() -> String {
    r#"[generator]
password_length = 16
batch_size = 3

[groups]
custom = ["Gaming", "Work"]

[output]
format = "human"
color = true
pretty = false
show_passwords = false
"#
    .to_string()
}

// =============================================================================
// Tests for Test Utilities
// =============================================================================
