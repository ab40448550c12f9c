//! Integration tests for mdbf-config crate.

use mdbf_common::test_utils::{config_fixtures, create_temp_dir, write_config};
use mdbf_config::{read_config, AdminSet, ConfigError, ConfigLocator, Fingerprint};
use mdbf_common::UserId;
use proptest::prelude::*;
use serde_yaml::{Mapping, Value};

#[tokio::test]
async fn test_locate_read_and_fingerprint() {
    let dir = create_temp_dir();
    write_config(dir.path(), "config.yaml", config_fixtures::filter_config_yaml());

    let path = ConfigLocator::new(dir.path()).locate().unwrap();
    let document = read_config(&path).await.unwrap();

    let admins = AdminSet::from_document(&document).unwrap();
    assert!(admins.contains(UserId(1)));

    let first = document.fingerprint().unwrap();
    let again = read_config(&path).await.unwrap().fingerprint().unwrap();
    assert_eq!(first, again);
}

#[tokio::test]
async fn test_edit_changes_document_fingerprint_and_section_fingerprint() {
    let dir = create_temp_dir();
    let path = write_config(dir.path(), "config.yml", config_fixtures::filter_config_yaml());
    let before = read_config(&path).await.unwrap();

    write_config(dir.path(), "config.yml", config_fixtures::filter_config_yaml_extended());
    let after = read_config(&path).await.unwrap();

    assert_ne!(before.fingerprint().unwrap(), after.fingerprint().unwrap());
    assert_ne!(
        Fingerprint::of(&before.section(Some("filter"))).unwrap(),
        Fingerprint::of(&after.section(Some("filter"))).unwrap()
    );
}

#[tokio::test]
async fn test_config_errors_are_distinct() {
    let dir = create_temp_dir();
    let locator = ConfigLocator::new(dir.path());
    assert!(matches!(locator.locate(), Err(ConfigError::NotFound { .. })));

    write_config(dir.path(), "config.yml", "admins: [1]\n");
    write_config(dir.path(), "config.yaml", "admins: [1]\n");
    assert!(matches!(locator.locate(), Err(ConfigError::Ambiguous { found }) if found.len() == 2));

    let bad = write_config(dir.path(), "config.txt", "admins: [1]\n");
    assert!(matches!(
        read_config(&bad).await,
        Err(ConfigError::UnsupportedExtension { .. })
    ));
}

#[test]
fn test_error_messages_name_the_problem() {
    let dir = create_temp_dir();
    let err = ConfigLocator::new(dir.path()).locate().unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("No configuration found"));
    assert!(message.contains("config.yml, config.yaml, config.toml"));
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::String),
    ]
}

fn tree() -> impl Strategy<Value = Vec<(String, Value)>> {
    let nested = leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4).prop_map(mapping),
        ]
    });
    prop::collection::btree_map("[a-z]{1,6}", nested, 1..6).prop_map(|m| m.into_iter().collect())
}

fn mapping(entries: impl IntoIterator<Item = (String, Value)>) -> Value {
    Value::Mapping(
        entries
            .into_iter()
            .map(|(k, v)| (Value::String(k), v))
            .collect::<Mapping>(),
    )
}

/// Same value with the entries of every mapping, at every depth, reversed.
fn reversed(value: &Value) -> Value {
    match value {
        Value::Mapping(m) => Value::Mapping(
            m.iter()
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .map(|(k, v)| (k.clone(), reversed(v)))
                .collect(),
        ),
        Value::Sequence(items) => Value::Sequence(items.iter().map(reversed).collect()),
        other => other.clone(),
    }
}

proptest! {
    #[test]
    fn prop_fingerprint_ignores_key_order(entries in tree()) {
        let forward = mapping(entries);
        let backward = reversed(&forward);
        prop_assert_eq!(Fingerprint::of(&forward).unwrap(), Fingerprint::of(&backward).unwrap());
    }

    #[test]
    fn prop_fingerprint_detects_leaf_change(entries in tree(), replacement in leaf()) {
        let original = mapping(entries.clone());
        let mut changed_entries = entries;
        prop_assume!(changed_entries[0].1 != replacement);
        changed_entries[0].1 = replacement;
        let changed = mapping(changed_entries);
        prop_assert_ne!(Fingerprint::of(&original).unwrap(), Fingerprint::of(&changed).unwrap());
    }
}
