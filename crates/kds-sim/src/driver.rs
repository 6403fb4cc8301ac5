use anyhow::{bail, Result};
use kds_orders::{OrderStore, StoreConfig};
use kds_schemas::{Clock, LogicalClock};
use kds_timer::TimerEngine;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::crew::crew_pass;
use crate::menu::random_order;

/// Simulator knobs. Intervals are in simulated seconds and must be > 0.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub seed: u64,
    pub order_probability: f64,
    pub urgent_probability: f64,
    pub feed_every_secs: u64,
    pub stats_every_secs: u64,
    pub advance_every_secs: u64,
    pub timer_every_secs: u64,
    pub prep_secs: i64,
    pub auto_advance: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            order_probability: 0.1,
            urgent_probability: 0.1,
            feed_every_secs: 5,
            stats_every_secs: 30,
            advance_every_secs: 60,
            timer_every_secs: 1,
            prep_secs: 900,
            auto_advance: true,
        }
    }
}

impl SimConfig {
    /// Reject knobs the RNG or the schedule cannot honour.
    pub fn validate(&self) -> Result<()> {
        for (name, p) in [
            ("order_probability", self.order_probability),
            ("urgent_probability", self.urgent_probability),
        ] {
            // NaN fails `contains` too.
            if !(0.0..=1.0).contains(&p) {
                bail!("CONFIG_INVALID: {name} must be within [0, 1], got {p}");
            }
        }
        for (name, secs) in [
            ("feed_every_secs", self.feed_every_secs),
            ("stats_every_secs", self.stats_every_secs),
            ("advance_every_secs", self.advance_every_secs),
            ("timer_every_secs", self.timer_every_secs),
        ] {
            if secs == 0 {
                bail!("CONFIG_INVALID: {name} must be > 0");
            }
        }
        if self.prep_secs < 0 {
            bail!("CONFIG_INVALID: prep_secs must be >= 0");
        }
        Ok(())
    }
}

/// What happened during one simulated second.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    pub now: i64,
    pub created: Option<String>,
    pub advanced: Vec<String>,
    pub dispatched: Vec<String>,
    pub overdue: Vec<String>,
    /// New efficiency when a drift was applied this second.
    pub efficiency: Option<f64>,
}

/// Totals across a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimSummary {
    pub steps: u64,
    pub created: u64,
    pub advanced: u64,
    pub dispatched: u64,
    pub overdue: u64,
}

/// Deterministic kitchen simulation on a logical clock.
///
/// Same seed and config, same sequence of store calls, same events.
pub struct Simulation {
    store: OrderStore,
    timer: TimerEngine,
    clock: LogicalClock,
    cfg: SimConfig,
    rng: StdRng,
    elapsed: u64,
}

impl Simulation {
    pub fn new(store_cfg: StoreConfig, cfg: SimConfig, start: i64) -> Result<Self> {
        cfg.validate()?;
        let clock = LogicalClock::new(start);
        let store = OrderStore::new(store_cfg, clock.clone());
        let timer = TimerEngine::new(store.clone(), clock.clone());
        info!(seed = cfg.seed, start, "simulation initialised");
        Ok(Self {
            store,
            timer,
            clock,
            rng: StdRng::seed_from_u64(cfg.seed),
            cfg,
            elapsed: 0,
        })
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    /// Advance one simulated second and run whatever is due.
    pub fn step(&mut self) -> StepReport {
        let now = self.clock.advance(1);
        self.elapsed += 1;
        let mut report = StepReport {
            now,
            ..StepReport::default()
        };

        if self.due(self.cfg.feed_every_secs) && self.rng.gen_bool(self.cfg.order_probability) {
            let input =
                random_order(&mut self.rng, self.cfg.prep_secs, self.cfg.urgent_probability);
            match self.store.create_order(input) {
                Ok(o) => report.created = Some(o.id),
                Err(e) => warn!(error = %e, "simulated order rejected"),
            }
        }

        if self.cfg.auto_advance && self.due(self.cfg.advance_every_secs) {
            let crew = crew_pass(&self.store);
            report.advanced = crew.advanced;
            report.dispatched = crew.dispatched;
        }

        if self.due(self.cfg.stats_every_secs) {
            let delta: f64 = self.rng.gen_range(-1.0..1.0);
            let stats = self.store.update_efficiency(delta);
            debug!(delta, efficiency = stats.efficiency, "efficiency drift");
            report.efficiency = Some(stats.efficiency);
        }

        if self.due(self.cfg.timer_every_secs) {
            report.overdue = self.timer.tick(now).newly_overdue;
        }

        report
    }

    /// Run `steps` simulated seconds, handing each report to `on_step`.
    pub fn run<F>(&mut self, steps: u64, mut on_step: F) -> SimSummary
    where
        F: FnMut(&StepReport),
    {
        let mut summary = SimSummary::default();
        for _ in 0..steps {
            let r = self.step();
            summary.steps += 1;
            summary.created += u64::from(r.created.is_some());
            summary.advanced += r.advanced.len() as u64;
            summary.dispatched += r.dispatched.len() as u64;
            summary.overdue += r.overdue.len() as u64;
            on_step(&r);
        }
        info!(
            steps = summary.steps,
            created = summary.created,
            dispatched = summary.dispatched,
            overdue = summary.overdue,
            "simulation finished"
        );
        summary
    }

    fn due(&self, every: u64) -> bool {
        every > 0 && self.elapsed % every == 0
    }
}
