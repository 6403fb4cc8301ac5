//! Typed config sections.
//!
//! Every field has a default, so an empty document is a valid config.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KdsConfig {
    pub store: StoreSection,
    pub timer: TimerSection,
    pub sim: SimSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub id_prefix: String,
    pub initial_efficiency: f64,
    pub event_capacity: usize,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            id_prefix: "ORD".to_string(),
            initial_efficiency: 100.0,
            event_capacity: 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerSection {
    pub tick_interval_ms: u64,
}

impl Default for TimerSection {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSection {
    pub seed: u64,
    /// Chance of a new order on each feed opportunity.
    pub order_probability: f64,
    pub urgent_probability: f64,
    pub feed_every_secs: u64,
    pub stats_every_secs: u64,
    pub advance_every_secs: u64,
    /// Preparation budget given to simulated orders.
    pub prep_secs: i64,
    pub auto_advance: bool,
}

impl Default for SimSection {
    fn default() -> Self {
        Self {
            seed: 42,
            order_probability: 0.1,
            urgent_probability: 0.1,
            feed_every_secs: 5,
            stats_every_secs: 30,
            advance_every_secs: 60,
            prep_secs: 900,
            auto_advance: true,
        }
    }
}

impl KdsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.store.id_prefix.trim().is_empty() {
            bail!("CONFIG_INVALID: store.id_prefix must not be blank");
        }
        if !self.store.initial_efficiency.is_finite() {
            bail!("CONFIG_INVALID: store.initial_efficiency must be finite");
        }
        if self.store.event_capacity == 0 {
            bail!("CONFIG_INVALID: store.event_capacity must be > 0");
        }
        if self.timer.tick_interval_ms == 0 {
            bail!("CONFIG_INVALID: timer.tick_interval_ms must be > 0");
        }
        for (name, p) in [
            ("sim.order_probability", self.sim.order_probability),
            ("sim.urgent_probability", self.sim.urgent_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                bail!("CONFIG_INVALID: {name} must be within [0, 1], got {p}");
            }
        }
        for (name, secs) in [
            ("sim.feed_every_secs", self.sim.feed_every_secs),
            ("sim.stats_every_secs", self.sim.stats_every_secs),
            ("sim.advance_every_secs", self.sim.advance_every_secs),
        ] {
            if secs == 0 {
                bail!("CONFIG_INVALID: {name} must be > 0");
            }
        }
        if self.sim.prep_secs < 0 {
            bail!("CONFIG_INVALID: sim.prep_secs must be >= 0");
        }
        Ok(())
    }
}
