//! `kds simulate`: seeded simulation with a printed event log.

use anyhow::{Context, Result};
use chrono::Utc;
use kds_config::{report_unused_keys, KdsConfig, UnusedKeyPolicy};
use kds_orders::StoreConfig;
use kds_schemas::KitchenEvent;
use kds_sim::{SimConfig, Simulation};
use tracing::{info, warn};
use uuid::Uuid;

pub struct SimulateArgs {
    pub ticks: u64,
    pub config_paths: Vec<String>,
    pub seed: Option<u64>,
    pub json: bool,
    pub strict: bool,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let loaded = super::load_config(&args.config_paths)?;
    let policy = if args.strict {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    let report = report_unused_keys(&loaded.config_json, policy)?;
    for key in &report.unused_leaf_pointers {
        warn!(key = %key, "unused config key");
    }

    let mut cfg = loaded.settings().context("invalid simulation config")?;
    if let Some(seed) = args.seed {
        cfg.sim.seed = seed;
    }

    let run_id = Uuid::new_v4();
    println!("run_id={}", run_id);
    println!("config_hash={}", loaded.config_hash);
    println!("seed={}", cfg.sim.seed);
    println!("started_at_utc={}", Utc::now().to_rfc3339());
    info!(%run_id, config_hash = %loaded.config_hash, ticks = args.ticks, "simulation start");

    let mut sim = Simulation::new(store_config(&cfg), sim_config(&cfg), 0)?;
    let mut sub = sim.store().subscribe();

    let mut print_err: Option<anyhow::Error> = None;
    let summary = sim.run(args.ticks, |step| {
        if print_err.is_some() {
            return;
        }
        for ev in sub.drain() {
            match render(step.now, &ev, args.json) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    print_err = Some(e);
                    return;
                }
            }
        }
    });
    if let Some(e) = print_err {
        return Err(e);
    }

    let stats = sim.store().get_stats();
    println!(
        "summary steps={} created={} advanced={} dispatched={} overdue={}",
        summary.steps, summary.created, summary.advanced, summary.dispatched, summary.overdue
    );
    println!(
        "stats total_orders={} active_orders={} revenue={} efficiency={:.1}",
        stats.total_orders, stats.active_orders, stats.revenue, stats.efficiency
    );
    Ok(())
}

fn store_config(cfg: &KdsConfig) -> StoreConfig {
    StoreConfig {
        id_prefix: cfg.store.id_prefix.clone(),
        initial_efficiency: cfg.store.initial_efficiency,
        event_capacity: cfg.store.event_capacity,
    }
}

fn sim_config(cfg: &KdsConfig) -> SimConfig {
    let s = &cfg.sim;
    SimConfig {
        seed: s.seed,
        order_probability: s.order_probability,
        urgent_probability: s.urgent_probability,
        feed_every_secs: s.feed_every_secs,
        stats_every_secs: s.stats_every_secs,
        advance_every_secs: s.advance_every_secs,
        // Simulated time moves in whole seconds.
        timer_every_secs: cfg.timer.tick_interval_ms.div_ceil(1000).max(1),
        prep_secs: s.prep_secs,
        auto_advance: s.auto_advance,
    }
}

fn render(now: i64, ev: &KitchenEvent, json: bool) -> Result<String> {
    if json {
        let mut v = serde_json::to_value(ev).context("event serialize failed")?;
        if let Some(obj) = v.as_object_mut() {
            obj.insert("at".to_string(), serde_json::json!(now));
        }
        return Ok(v.to_string());
    }

    let line = match ev {
        KitchenEvent::OrderCreated { order_id } => format!("[{now}] order_created {order_id}"),
        KitchenEvent::OrderStatusChanged { order_id, from, to } => {
            format!("[{now}] order_status_changed {order_id} {from}->{to}")
        }
        KitchenEvent::OrderOverdue { order_id } => format!("[{now}] order_overdue {order_id}"),
        KitchenEvent::OrderRemoved { order_id } => format!("[{now}] order_removed {order_id}"),
        KitchenEvent::StatsUpdated { stats, .. } => format!(
            "[{now}] stats_updated total={} active={} revenue={} efficiency={:.1}",
            stats.total_orders, stats.active_orders, stats.revenue, stats.efficiency
        ),
    };
    Ok(line)
}
