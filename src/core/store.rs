//! Account lifecycle: create, edit, regenerate, delete, persist.
//!
//! [`AccountStore`] owns the ordered account sequence. Every mutating
//! operation ends with a full-snapshot write of the whole sequence under
//! [`STORAGE_KEY`]. Persistence failures are logged here and never reach the
//! caller; [`AccountStore::is_synced`] reports whether the last write landed.
//!
//! The store is single-owner: all mutations take `&mut self`, so no
//! operation can observe another half-applied. Callers sharing a store
//! across threads wrap it in a `Mutex`.

use std::collections::HashSet;

use rand::Rng;
use rand::rngs::StdRng;

use crate::core::export::{self, ExportArtifact, ExportFormat};
use crate::core::generator::FieldGenerator;
use crate::core::models::{Account, AccountField, CredentialField, Group, PasswordLength};
use crate::core::query::{self, GroupFilter};
use crate::error::{BurnerError, Result};
use crate::storage::kv::KeyValueStore;

/// Key under which the snapshot is persisted.
pub const STORAGE_KEY: &str = "disposableAccounts";

/// Largest number of accounts one [`AccountStore::add_batch`] call creates.
pub const MAX_BATCH_SIZE: usize = 100;

/// Ordered, persisted collection of accounts.
pub struct AccountStore<S, R = StdRng> {
    accounts: Vec<Account>,
    storage: S,
    generator: FieldGenerator<R>,
    synced: bool,
}

impl<S: KeyValueStore, R: Rng> AccountStore<S, R> {
    /// Create a store over `storage` and load whatever snapshot it holds.
    pub fn open(storage: S, generator: FieldGenerator<R>) -> Self {
        let mut store = Self {
            accounts: Vec::new(),
            storage,
            generator,
            synced: true,
        };
        store.load();
        store
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current sequence in insertion order.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Whether the in-memory sequence matches what was last persisted.
    #[must_use]
    pub const fn is_synced(&self) -> bool {
        self.synced
    }

    #[must_use]
    pub const fn password_length(&self) -> PasswordLength {
        self.generator.password_length()
    }

    /// Length used for passwords generated from now on.
    pub fn set_password_length(&mut self, length: PasswordLength) {
        self.generator.set_password_length(length);
    }

    /// The storage collaborator.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Display subset for a group filter and search term.
    #[must_use]
    pub fn filter(&self, group: &GroupFilter, search: &str) -> Vec<&Account> {
        query::filter(&self.accounts, group, search)
    }

    /// Export the full, unfiltered sequence.
    ///
    /// # Errors
    /// Propagates encoder failures.
    pub fn export(&self, format: ExportFormat) -> Result<ExportArtifact> {
        export::export(&self.accounts, format)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Replace the in-memory sequence with the persisted snapshot.
    ///
    /// A missing key, unreadable storage, or malformed snapshot yields an
    /// empty sequence.
    pub fn load(&mut self) -> &[Account] {
        match read_snapshot(&self.storage) {
            Ok(accounts) => {
                tracing::debug!(count = accounts.len(), "Loaded accounts");
                self.accounts = accounts;
                self.synced = true;
            }
            Err(e) => {
                tracing::warn!(error = %e, key = STORAGE_KEY, "Discarding unreadable snapshot");
                self.accounts = Vec::new();
                self.synced = false;
            }
        }
        &self.accounts
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.accounts)
            .map_err(BurnerError::from)
            .and_then(|json| self.storage.set(STORAGE_KEY, &json));
        match result {
            Ok(()) => {
                tracing::debug!(count = self.accounts.len(), "Saved accounts");
                self.synced = true;
            }
            Err(e) => {
                tracing::error!(error = %e, key = STORAGE_KEY, "Failed to save accounts");
                self.synced = false;
            }
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append `count` freshly generated accounts.
    ///
    /// New accounts are named `Account <n>` from their position, grouped as
    /// General, and get fresh credentials.
    ///
    /// # Errors
    /// Returns [`BurnerError::InvalidBatchSize`] when `count` is zero or
    /// above [`MAX_BATCH_SIZE`]; the store is left untouched and nothing is
    /// written.
    pub fn add_batch(&mut self, count: usize) -> Result<&[Account]> {
        if !(1..=MAX_BATCH_SIZE).contains(&count) {
            return Err(BurnerError::InvalidBatchSize(count));
        }

        let start = self.accounts.len();
        for index in 0..count {
            let account = Account {
                id: self.fresh_id(),
                name: Account::default_name(start + index + 1),
                email: self.generator.generate_email(),
                username: self.generator.generate_username(),
                password: self.generator.generate(CredentialField::Password),
                group: Group::General,
            };
            self.accounts.push(account);
        }

        tracing::debug!(count, total = self.accounts.len(), "Added accounts");
        self.persist();
        Ok(&self.accounts)
    }

    /// Overwrite one field of the account with `id`.
    ///
    /// Returns whether an account matched. An unknown id changes nothing.
    pub fn update_field(&mut self, id: &str, field: AccountField, value: impl Into<String>) -> bool {
        let found = match self.accounts.iter_mut().find(|a| a.id == id) {
            Some(account) => {
                account.set_field(field, value.into());
                true
            }
            None => false,
        };
        tracing::debug!(id, %field, found, "Updated field");
        self.persist();
        found
    }

    /// Replace one credential of the account with `id` by a fresh value.
    ///
    /// Returns whether an account matched.
    pub fn regenerate_field(&mut self, id: &str, field: CredentialField) -> bool {
        let found = match self.accounts.iter_mut().find(|a| a.id == id) {
            Some(account) => {
                let value = self.generator.generate(field);
                account.set_field(field.into(), value);
                true
            }
            None => false,
        };
        tracing::debug!(id, field = %AccountField::from(field), found, "Regenerated field");
        self.persist();
        found
    }

    /// Fresh email, username and password for every account.
    ///
    /// Ids, names and groups are untouched.
    pub fn regenerate_all(&mut self) -> &[Account] {
        for account in &mut self.accounts {
            for &field in CredentialField::ALL {
                let value = self.generator.generate(field);
                account.set_field(field.into(), value);
            }
        }
        tracing::debug!(count = self.accounts.len(), "Regenerated all accounts");
        self.persist();
        &self.accounts
    }

    /// Remove the account with `id`. Returns whether one was removed.
    pub fn delete_one(&mut self, id: &str) -> bool {
        let before = self.accounts.len();
        self.accounts.retain(|a| a.id != id);
        let removed = self.accounts.len() != before;
        tracing::debug!(id, removed, "Deleted account");
        self.persist();
        removed
    }

    /// Remove every account.
    pub fn delete_all(&mut self) {
        let count = self.accounts.len();
        self.accounts.clear();
        tracing::debug!(count, "Deleted all accounts");
        self.persist();
    }

    /// A UUID-formatted id not used by any current account.
    fn fresh_id(&mut self) -> String {
        loop {
            let id = uuid::Builder::from_random_bytes(self.generator.random_bytes())
                .into_uuid()
                .to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

/// Parse the persisted snapshot. Missing key is an empty sequence.
fn read_snapshot(storage: &impl KeyValueStore) -> Result<Vec<Account>> {
    let Some(content) = storage.get(STORAGE_KEY)? else {
        return Ok(Vec::new());
    };
    let accounts: Vec<Account> = serde_json::from_str(&content)?;

    let mut seen = HashSet::with_capacity(accounts.len());
    if let Some(dup) = accounts.iter().find(|a| !seen.insert(a.id.as_str())) {
        return Err(BurnerError::Storage {
            key: STORAGE_KEY.to_string(),
            message: format!("duplicate account id '{}'", dup.id),
        });
    }

    Ok(accounts)
}
