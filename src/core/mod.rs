//! Account model, generation, storage semantics and export.

pub mod export;
pub mod generator;
pub mod logging;
pub mod models;
pub mod query;
pub mod store;

pub use export::{DirectorySink, ExportArtifact, ExportFormat, ExportSink, TableDocument};
pub use generator::FieldGenerator;
pub use models::{Account, AccountField, CredentialField, Group, PasswordLength, RobotOutput};
pub use query::GroupFilter;
pub use store::{AccountStore, MAX_BATCH_SIZE, STORAGE_KEY};
