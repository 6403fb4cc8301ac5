//! Scenario: unknown config keys are reported, and rejected under Fail.
//!
//! # Invariant under test
//!
//! A leaf nothing reads (typo or stale key) shows up in the report; the Fail
//! policy turns it into an error naming the key.

use kds_config::{load_layered_yaml_from_strings, report_unused_keys, UnusedKeyPolicy};

const CLEAN: &str = r#"
store:
  id_prefix: "KDS"
timer:
  tick_interval_ms: 500
sim:
  seed: 1
  auto_advance: false
"#;

const WITH_TYPO: &str = r#"
sim:
  seed: 1
  order_probabilty: 0.3
kitchen:
  name: "Main"
"#;

#[test]
fn clean_config_reports_nothing() {
    let loaded = load_layered_yaml_from_strings(&[CLEAN]).unwrap();
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail).unwrap();
    assert!(report.is_clean());
}

#[test]
fn warn_mode_lists_unused_leaves() {
    let loaded = load_layered_yaml_from_strings(&[WITH_TYPO]).unwrap();
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn).unwrap();
    assert_eq!(
        report.unused_leaf_pointers,
        vec![
            "/kitchen/name".to_string(),
            "/sim/order_probabilty".to_string(),
        ]
    );
}

#[test]
fn fail_mode_rejects_unused_leaves() {
    let loaded = load_layered_yaml_from_strings(&[WITH_TYPO]).unwrap();
    let err = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("CONFIG_UNUSED_KEYS"), "{msg}");
    assert!(msg.contains("/sim/order_probabilty"), "{msg}");
}
