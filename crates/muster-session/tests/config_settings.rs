#![allow(missing_docs)]

use std::time::Duration;

use muster_core::{CatalogError, PoolId};
use muster_session::{
    DEFAULT_IDLE_TIMEOUT_MS, DEFAULT_INBOUND_QUEUE_CAPACITY, load_runtime_settings,
};

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("tempdir is available");
    let settings =
        load_runtime_settings(dir.path().join("absent.yaml")).expect("defaults load");

    let config = settings.session_runtime_config();
    assert_eq!(
        config.idle_timeout,
        Duration::from_millis(DEFAULT_IDLE_TIMEOUT_MS)
    );
    assert_eq!(config.inbound_queue_capacity, DEFAULT_INBOUND_QUEUE_CAPACITY);

    let catalog = settings.role_catalog().expect("stock catalog builds");
    assert_eq!(catalog.role_count(), 5);
    assert_eq!(catalog.placeholder_label(), "Filled");
    assert_eq!(catalog.pool_capacity(&PoolId::from("damage")), 3);
}

#[test]
fn partial_file_overrides_named_fields_only() {
    let dir = tempfile::tempdir().expect("tempdir is available");
    let path = dir.path().join("settings.yaml");
    std::fs::write(
        &path,
        "session:\n  idle_timeout_ms: 30000\ncatalog:\n  placeholder_label: Reserved\n",
    )
    .expect("settings file writes");

    let settings = load_runtime_settings(&path).expect("settings load");
    let config = settings.session_runtime_config();
    assert_eq!(config.idle_timeout, Duration::from_millis(30_000));
    assert_eq!(config.inbound_queue_capacity, DEFAULT_INBOUND_QUEUE_CAPACITY);

    let catalog = settings.role_catalog().expect("catalog builds");
    assert_eq!(catalog.placeholder_label(), "Reserved");
    assert_eq!(catalog.pool_capacity(&PoolId::from("damage")), 3);
}

#[test]
fn damage_pool_capacity_is_configurable() {
    let dir = tempfile::tempdir().expect("tempdir is available");
    let path = dir.path().join("settings.yaml");
    std::fs::write(&path, "catalog:\n  damage_pool_capacity: 2\n")
        .expect("settings file writes");

    let settings = load_runtime_settings(&path).expect("settings load");
    let catalog = settings.role_catalog().expect("catalog builds");
    assert_eq!(catalog.pool_capacity(&PoolId::from("damage")), 2);
}

#[test]
fn zero_damage_pool_capacity_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir is available");
    let path = dir.path().join("settings.yaml");
    std::fs::write(&path, "catalog:\n  damage_pool_capacity: 0\n")
        .expect("settings file writes");

    let settings = load_runtime_settings(&path).expect("settings load");
    assert_eq!(
        settings.role_catalog().unwrap_err(),
        CatalogError::ZeroCapacity("damage".to_string())
    );
}

#[test]
fn malformed_yaml_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir is available");
    let path = dir.path().join("settings.yaml");
    std::fs::write(&path, "session: [\n").expect("settings file writes");

    assert!(load_runtime_settings(&path).is_err());
}
