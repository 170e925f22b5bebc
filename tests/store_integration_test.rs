//! File-backed store behavior across reopen cycles.

use burner::core::generator::FieldGenerator;
use burner::core::models::{AccountField, CredentialField, Group, PasswordLength};
use burner::core::query::GroupFilter;
use burner::core::store::{AccountStore, STORAGE_KEY};
use burner::storage::kv::{FileKvStore, KeyValueStore};
use burner::{TestDir, make_test_accounts, make_test_snapshot_json};

fn open(dir: &TestDir, seed: u64) -> AccountStore<FileKvStore> {
    AccountStore::open(FileKvStore::new(dir.path()), FieldGenerator::seeded(seed))
}

#[test]
fn snapshot_lives_under_fixed_key() {
    let dir = TestDir::new();
    let mut store = open(&dir, 1);
    store.add_batch(2).unwrap();

    assert!(dir.file_exists(&format!("{STORAGE_KEY}.json")));
    let raw: serde_json::Value =
        serde_json::from_str(&dir.read_file("disposableAccounts.json").unwrap()).unwrap();
    assert_eq!(raw.as_array().unwrap().len(), 2);
    assert_eq!(raw[0]["name"], "Account 1");
    assert_eq!(raw[0]["group"], "General");
}

#[test]
fn reopened_store_sees_every_mutation() {
    let dir = TestDir::new();
    let mut store = open(&dir, 1);
    store.add_batch(3).unwrap();
    let id = store.accounts()[1].id.clone();
    assert!(store.update_field(&id, AccountField::Group, "Shopping"));
    assert!(store.update_field(&id, AccountField::Name, "Newsletter"));

    let reopened = open(&dir, 2);
    assert_eq!(reopened.accounts(), store.accounts());
    let account = reopened.get(&id).unwrap();
    assert_eq!(account.name, "Newsletter");
    assert_eq!(account.group, Group::Shopping);
}

#[test]
fn second_account_is_named_by_position() {
    let dir = TestDir::new();
    open(&dir, 1).add_batch(1).unwrap();

    let mut store = open(&dir, 2);
    let added = store.add_batch(1).unwrap();
    assert_eq!(added.len(), 2);
    assert_eq!(added[1].name, "Account 2");
    assert_ne!(added[0].id, added[1].id);
}

#[test]
fn names_follow_position_after_deletion() {
    let dir = TestDir::new();
    let mut store = open(&dir, 1);
    store.add_batch(3).unwrap();
    let first = store.accounts()[0].id.clone();
    assert!(store.delete_one(&first));

    let added = store.add_batch(1).unwrap();
    // Two remain, so the newcomer is the third by position.
    assert_eq!(added[2].name, "Account 3");
}

#[test]
fn regenerate_field_changes_only_that_field() {
    let dir = TestDir::new();
    let mut store = open(&dir, 1);
    store.set_password_length(PasswordLength::new(20).unwrap());
    store.add_batch(1).unwrap();
    let before = store.accounts()[0].clone();

    assert!(store.regenerate_field(&before.id, CredentialField::Password));
    let after = open(&dir, 9).accounts()[0].clone();
    assert_ne!(after.password, before.password);
    assert_eq!(after.password.chars().count(), 20);
    assert_eq!(after.email, before.email);
    assert_eq!(after.username, before.username);
}

#[test]
fn delete_all_persists_empty_sequence() {
    let dir = TestDir::new();
    let mut store = open(&dir, 1);
    store.add_batch(4).unwrap();
    store.delete_all();

    assert!(open(&dir, 2).is_empty());
    assert_eq!(dir.read_file("disposableAccounts.json").unwrap(), "[]");
}

#[test]
fn prepared_snapshot_loads_and_filters() {
    let dir = TestDir::new();
    dir.create_file(
        "disposableAccounts.json",
        &make_test_snapshot_json(&make_test_accounts(8)),
    );

    let store = open(&dir, 1);
    assert_eq!(store.len(), 8);
    let shopping = store.filter(&GroupFilter::Only(Group::Shopping), "");
    assert_eq!(shopping.len(), 2);
    let hits = store.filter(&GroupFilter::All, "USER0007");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "id-7");
}

#[test]
fn unknown_group_names_survive_a_round_trip() {
    let dir = TestDir::new();
    let mut accounts = make_test_accounts(1);
    accounts[0].group = Group::from("Retired");
    dir.create_file("disposableAccounts.json", &make_test_snapshot_json(&accounts));

    let mut store = open(&dir, 1);
    assert_eq!(store.accounts()[0].group, Group::Custom("Retired".to_string()));
    store.add_batch(1).unwrap();

    let raw = FileKvStore::new(dir.path()).get(STORAGE_KEY).unwrap().unwrap();
    assert!(raw.contains("\"Retired\""));
}
