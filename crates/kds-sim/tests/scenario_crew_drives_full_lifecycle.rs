//! Scenario: simulated orders travel the whole lifecycle.
//!
//! # Invariant under test
//!
//! With auto-advance on, orders created by the feed are prepared, readied
//! and dispatched through the store, and the aggregates stay consistent with
//! the active set the whole way.

use kds_orders::StoreConfig;
use kds_schemas::{KitchenEvent, OrderStatus};
use kds_sim::{SimConfig, Simulation};

#[test]
fn orders_reach_dispatch_and_aggregates_hold() {
    let cfg = SimConfig {
        order_probability: 1.0,
        feed_every_secs: 120,
        advance_every_secs: 20,
        ..SimConfig::default()
    };
    let store_cfg = StoreConfig {
        event_capacity: 4096,
        ..StoreConfig::default()
    };
    let mut sim = Simulation::new(store_cfg, cfg, 0).unwrap();
    let mut sub = sim.store().subscribe();

    let store = sim.store().clone();
    let summary = sim.run(1_200, |_| {
        let stats = store.get_stats();
        assert_eq!(stats.active_orders, store.list_orders(None).len() as u64);
    });

    assert_eq!(summary.created, 10);
    assert!(summary.dispatched >= 9, "{summary:?}");
    // Crew keeps up, so nothing runs past the 900s budget.
    assert_eq!(summary.overdue, 0);

    let events = sub.drain();
    let removed: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            KitchenEvent::OrderRemoved { order_id } => Some(order_id.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(removed.len() as u64, summary.dispatched);
    for id in removed {
        assert_eq!(store.get_order(id).unwrap().status, OrderStatus::Dispatched);
    }
}

#[test]
fn idle_crew_lets_orders_go_overdue_once() {
    let cfg = SimConfig {
        order_probability: 1.0,
        feed_every_secs: 100,
        prep_secs: 30,
        auto_advance: false,
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(StoreConfig::default(), cfg, 0).unwrap();
    let summary = sim.run(250, |_| {});

    // Orders at t=100 and t=200, each due 30s later.
    assert_eq!(summary.created, 2);
    assert_eq!(summary.overdue, 2);
    assert!(sim.store().list_orders(None).iter().all(|o| o.overdue));
}
