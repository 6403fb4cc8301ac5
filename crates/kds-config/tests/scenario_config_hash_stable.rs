//! Scenario: config hash is stable across loads and key order.
//!
//! # Invariant under test
//!
//! The same merged config always hashes the same; reordering keys does not
//! change the hash; changing a value does.

use kds_config::{load_layered_yaml, load_layered_yaml_from_strings};
use std::io::Write;

const BASE_YAML: &str = r#"
store:
  id_prefix: "ORD"
  initial_efficiency: 94.0
sim:
  seed: 42
  order_probability: 0.1
"#;

const BASE_YAML_REORDERED: &str = r#"
sim:
  order_probability: 0.1
  seed: 42
store:
  initial_efficiency: 94.0
  id_prefix: "ORD"
"#;

const OVERLAY_YAML: &str = r#"
sim:
  seed: 7
"#;

#[test]
fn same_input_same_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.config_hash.len(), 64);
}

#[test]
fn key_order_does_not_change_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML_REORDERED]).unwrap();
    assert_eq!(a.canonical_json, b.canonical_json);
    assert_eq!(a.config_hash, b.config_hash);
}

#[test]
fn different_values_differ() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();
    assert_ne!(a.config_hash, b.config_hash);
}

#[test]
fn overlay_wins_and_base_survives() {
    let loaded = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();
    let cfg = loaded.settings().unwrap();
    assert_eq!(cfg.sim.seed, 7);
    assert_eq!(cfg.sim.order_probability, 0.1);
    assert_eq!(cfg.store.initial_efficiency, 94.0);
    // untouched sections fall back to defaults
    assert_eq!(cfg.timer.tick_interval_ms, 1000);
}

#[test]
fn files_load_like_strings() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.yaml");
    let overlay = dir.path().join("overlay.yaml");
    std::fs::File::create(&base)
        .unwrap()
        .write_all(BASE_YAML.as_bytes())
        .unwrap();
    std::fs::File::create(&overlay)
        .unwrap()
        .write_all(OVERLAY_YAML.as_bytes())
        .unwrap();

    let from_files = load_layered_yaml(&[
        base.to_str().unwrap(),
        overlay.to_str().unwrap(),
    ])
    .unwrap();
    let from_strings = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();
    assert_eq!(from_files.config_hash, from_strings.config_hash);
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.yaml");
    let err = load_layered_yaml(&[missing.to_str().unwrap()]).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read yaml path"));
}

#[test]
fn empty_document_uses_defaults() {
    let loaded = load_layered_yaml_from_strings(&[""]).unwrap();
    assert_eq!(loaded.canonical_json, "{}");
    let cfg = loaded.settings().unwrap();
    assert_eq!(cfg, kds_config::KdsConfig::default());
}

#[test]
fn invalid_values_fail_settings() {
    let loaded = load_layered_yaml_from_strings(&["sim:\n  order_probability: 2.0\n"]).unwrap();
    let err = loaded.settings().unwrap_err().to_string();
    assert!(err.contains("CONFIG_INVALID"), "{err}");
}
