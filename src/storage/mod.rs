//! Configuration, paths, and the key-value collaborators the store persists to.

pub mod config;
pub mod kv;
pub mod paths;

pub use config::{
    Config, ConfigSource, ConfigSources, ENV_CONFIG, ENV_DATA_DIR, ENV_FORMAT, ENV_NO_COLOR,
    ENV_NO_COLOR_STD, ENV_PASSWORD_LENGTH, ENV_PRETTY, ResolvedConfig,
};
pub use kv::{FileKvStore, KeyValueStore, MemoryKvStore};
pub use paths::AppPaths;
