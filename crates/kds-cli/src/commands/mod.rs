//! Command handler modules for kds.
//!
//! Shared helpers live here; the simulation driver lives in its own module.

pub mod simulate;

use anyhow::{bail, Result};
use kds_config::LoadedConfig;

/// Load layered config, or the all-defaults config when no paths are given.
pub fn load_config(paths: &[String]) -> Result<LoadedConfig> {
    if paths.is_empty() {
        return kds_config::load_layered_yaml_from_strings(&[]);
    }
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    kds_config::load_layered_yaml(&path_refs)
}

#[derive(Debug, PartialEq, Eq)]
pub struct CountdownOut {
    pub remaining_secs: i64,
    pub display: String,
    pub overdue: bool,
}

pub fn countdown(due: i64, created: i64, now: i64) -> Result<CountdownOut> {
    if due < 0 {
        bail!("--due must be >= 0, got {due}");
    }
    let remaining = kds_timer::remaining_secs(due, created, now);
    let overdue = kds_timer::elapsed_secs(created, now) >= due;
    let display = if overdue {
        "OVERDUE".to_string()
    } else {
        kds_timer::format_mm_ss(remaining)
    };
    Ok(CountdownOut {
        remaining_secs: remaining,
        display,
        overdue,
    })
}
