//! Shared helpers for integration tests.
//!
//! - `log_capture`: in-process tracing capture for library tests
//! - [`TestEnv`]: isolated data/config directories for driving the binary
#![allow(dead_code)]

pub mod log_capture;

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// Isolated environment for one CLI test.
///
/// The snapshot lives in `<root>/data` and the config file (if any) at
/// `<root>/config.toml`. Commands built from it never see the user's real
/// directories.
pub struct TestEnv {
    root: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Same as [`new`](Self::new) with a config file written up front.
    pub fn with_config(toml: &str) -> Self {
        let env = Self::new();
        fs::write(env.config_path(), toml).expect("failed to write config");
        env
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.path().join("data")
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.path().join("config.toml")
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir().join("disposableAccounts.json")
    }

    /// A `burner` invocation wired to this environment.
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("burner").expect("burner binary");
        cmd.current_dir(self.root.path())
            .env("BURNER_DATA_DIR", self.data_dir())
            .env("BURNER_CONFIG", self.config_path())
            .env("NO_COLOR", "1")
            .env_remove("BURNER_FORMAT")
            .env_remove("BURNER_PASSWORD_LENGTH")
            .env_remove("BURNER_PRETTY")
            .env_remove("BURNER_LOG");
        cmd
    }

    /// Run `args` with `--json` and return the parsed envelope.
    pub fn json(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .args(args)
            .arg("--json")
            .output()
            .expect("failed to run burner");
        assert!(
            output.status.success(),
            "burner {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
    }

    /// Accounts currently persisted on disk.
    pub fn snapshot(&self) -> Vec<Value> {
        let content = fs::read_to_string(self.snapshot_path()).expect("snapshot should exist");
        serde_json::from_str(&content).expect("snapshot should be a JSON array")
    }

    /// Id of the persisted account at `index`.
    pub fn id_at(&self, index: usize) -> String {
        self.snapshot()[index]["id"]
            .as_str()
            .expect("id should be a string")
            .to_string()
    }
}
