//! Scenario: an 8-minute order goes overdue exactly once.
//!
//! # Invariant under test
//!
//! Order created at t=0 with `due_in_secs = 480`:
//! - t=300: remaining 180s (`03:00`), not overdue, no event
//! - t=481: flagged overdue, exactly one `OrderOverdue`
//! - t=600, t=700: nothing new is emitted, flag stays set

use kds_orders::OrderStore;
use kds_schemas::{KitchenEvent, LogicalClock, NewOrder, Platform, Station};
use kds_timer::{format_mm_ss, remaining_secs, Countdown, TimerEngine};

#[test]
fn overdue_fires_exactly_once() {
    let clock = LogicalClock::new(0);
    let store = OrderStore::with_clock(clock.clone());
    let engine = TimerEngine::new(store.clone(), clock.clone());

    let order = store
        .create_order(
            NewOrder::new(
                "Rahul Sharma",
                ["Butter Chicken", "Naan", "Rice"],
                520,
                Station::Curry,
                Platform::Swiggy,
            )
            .due_in(480),
        )
        .unwrap();
    let mut sub = store.subscribe();

    // t=300
    clock.set(300);
    let report = engine.tick_now();
    assert!(report.newly_overdue.is_empty());
    let snap = store.get_order(&order.id).unwrap();
    assert!(!snap.overdue);
    assert_eq!(remaining_secs(snap.due_in_secs, snap.created_at, 300), 180);
    assert_eq!(format_mm_ss(180), "03:00");
    assert_eq!(Countdown::for_order(&snap, 300).to_string(), "03:00");
    assert!(sub.drain().is_empty());

    // t=481
    clock.set(481);
    let report = engine.tick_now();
    assert_eq!(report.newly_overdue, vec![order.id.clone()]);
    assert!(store.get_order(&order.id).unwrap().overdue);
    assert_eq!(
        sub.drain(),
        vec![KitchenEvent::OrderOverdue {
            order_id: order.id.clone()
        }]
    );

    // t=600, t=700
    for t in [600, 700] {
        clock.set(t);
        assert!(engine.tick_now().newly_overdue.is_empty());
        assert!(store.get_order(&order.id).unwrap().overdue);
    }
    assert!(sub.drain().is_empty(), "overdue must not re-fire");
}

#[test]
fn repeated_ticks_at_same_time_are_idempotent() {
    let clock = LogicalClock::new(1_000);
    let store = OrderStore::with_clock(clock.clone());
    let engine = TimerEngine::new(store.clone(), clock);

    for due in [10, 20, 30] {
        store
            .create_order(
                NewOrder::new(
                    "Ananya Singh",
                    ["Pasta Arrabiata"],
                    350,
                    Station::Pizza,
                    Platform::Zomato,
                )
                .due_in(due),
            )
            .unwrap();
    }

    assert_eq!(engine.tick(1_020).newly_overdue, vec!["ORD-001", "ORD-002"]);
    assert!(engine.tick(1_020).newly_overdue.is_empty());
    assert_eq!(engine.tick(1_030).newly_overdue, vec!["ORD-003"]);
    assert!(engine.tick(5_000).newly_overdue.is_empty());
}
