//! Key-value storage collaborators.
//!
//! The account store persists one JSON document under one fixed key. This
//! module provides the trait the store talks to plus two implementations:
//! - [`FileKvStore`]: one file per key, written atomically (temp file + rename)
//! - [`MemoryKvStore`]: process-local map, for tests and embedding

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{BurnerError, Result};

/// Minimal string key-value store.
///
/// Implementations must make `set` all-or-nothing: after a failed `set`,
/// `get` returns the previous value.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

// =============================================================================
// File-backed store
// =============================================================================

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    /// Store rooted at `dir`. The directory is created lazily on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path backing `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error(key, &e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| storage_error(key, &e))?;
        write_atomic(&self.path_for(key), value.as_bytes()).map_err(|e| storage_error(key, &e))
    }
}

fn storage_error(key: &str, err: &std::io::Error) -> BurnerError {
    BurnerError::Storage {
        key: key.to_string(),
        message: err.to_string(),
    }
}

/// Write bytes atomically using temp file + rename.
/// This prevents corruption if the process is interrupted during write.
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> std::io::Result<()> {
    // Create temp file in same directory (required for atomic rename)
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let temp_path = parent.join(format!(
        ".{}.tmp.{}",
        path.file_name().and_then(|n| n.to_str()).unwrap_or("data"),
        std::process::id()
    ));

    {
        let mut file = std::fs::File::create(&temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
    }

    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}

// =============================================================================
// In-memory store
// =============================================================================

/// Process-local store.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: HashMap<String, String>,
}

impl MemoryKvStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, e.g. with a legacy or corrupt snapshot.
    #[must_use]
    pub fn with_entry(mut self, key: &str, value: impl Into<String>) -> Self {
        self.entries.insert(key.to_string(), value.into());
        self
    }

    /// Raw value under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
