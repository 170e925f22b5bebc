//! Integration tests for logging format initialization.
//!
//! `init` installs a global subscriber at most once; later calls must be
//! harmless no-ops whatever the format.

use burner::core::logging::{self, LogFormat, LogLevel};

#[test]
fn log_format_human() {
    logging::init(LogLevel::Debug, LogFormat::Human, None, false);
}

#[test]
fn log_format_json() {
    logging::init(LogLevel::Debug, LogFormat::Json, None, false);
}

#[test]
fn log_format_compact_verbose() {
    logging::init(LogLevel::Warn, LogFormat::Compact, None, true);
}

#[test]
fn log_file_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("burner.log");
    logging::init(LogLevel::Info, LogFormat::Json, Some(path.clone()), false);
    assert!(path.exists());
}
