//! The order store handle.
//!
//! # Invariants
//!
//! - **Single writer.** All state lives behind one mutex; every operation
//!   takes it for its whole read-validate-write sequence.
//! - **Events follow commits.** Events are published after the mutation has
//!   been fully applied and before the lock is released, so bus order equals
//!   commit order and a subscriber that queries the store on receipt always
//!   sees the committed state.
//! - **Errors are side-effect free.** A failed operation publishes nothing and
//!   changes nothing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use kds_schemas::{Clock, DailyStats, KitchenEvent, NewOrder, Order, Station};
use tracing::{info, warn};

use crate::bus::{EventBus, Subscription, DEFAULT_EVENT_CAPACITY};
use crate::state::{Applied, KitchenState};
use crate::view::OrderView;
use crate::StoreError;

/// Construction parameters for an [`OrderStore`].
#[derive(Clone, Debug, PartialEq)]
pub struct StoreConfig {
    pub id_prefix: String,
    pub initial_efficiency: f64,
    /// Events buffered per subscriber before the slowest one starts losing events.
    pub event_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            id_prefix: "ORD".to_string(),
            initial_efficiency: 100.0,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

/// Cloneable (Arc) handle to one kitchen's orders and daily stats.
#[derive(Clone)]
pub struct OrderStore {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<KitchenState>,
    bus: EventBus,
    clock: Arc<dyn Clock>,
}

impl OrderStore {
    pub fn new<C: Clock + 'static>(cfg: StoreConfig, clock: C) -> Self {
        info!(
            id_prefix = %cfg.id_prefix,
            initial_efficiency = cfg.initial_efficiency,
            "order store initialised"
        );
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(KitchenState::new(cfg.id_prefix, cfg.initial_efficiency)),
                bus: EventBus::new(cfg.event_capacity),
                clock: Arc::new(clock),
            }),
        }
    }

    /// Store with default config.
    pub fn with_clock<C: Clock + 'static>(clock: C) -> Self {
        Self::new(StoreConfig::default(), clock)
    }

    /// Current time according to the store's clock.
    pub fn now(&self) -> i64 {
        self.inner.clock.now()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    pub fn create_order(&self, input: NewOrder) -> Result<Order, StoreError> {
        let mut st = self.lock();
        let now = self.inner.clock.now();
        let applied = st.create(input, now).inspect_err(log_rejection)?;
        info!(
            order_id = %applied.order.id,
            customer = %applied.order.customer,
            platform = %applied.order.platform,
            "new order"
        );
        Ok(self.commit(&st, applied))
    }

    /// Move an order one step forward (`New → Preparing → Ready`).
    pub fn advance_status(&self, order_id: &str) -> Result<Order, StoreError> {
        let mut st = self.lock();
        let applied = st.advance(order_id).inspect_err(log_rejection)?;
        Ok(self.commit(&st, applied))
    }

    /// Dispatch a `Ready` order: it leaves the active set for good.
    pub fn remove_order(&self, order_id: &str) -> Result<Order, StoreError> {
        let mut st = self.lock();
        let applied = st.dispatch(order_id).inspect_err(log_rejection)?;
        info!(order_id, "order dispatched");
        Ok(self.commit(&st, applied))
    }

    /// Apply an efficiency delta from the analytics side. Returns the new stats.
    pub fn update_efficiency(&self, delta: f64) -> DailyStats {
        let mut st = self.lock();
        for ev in st.adjust_efficiency(delta) {
            self.inner.bus.publish(ev);
        }
        st.stats().clone()
    }

    /// Flag every active, not-yet-flagged order matching `pred` as overdue.
    ///
    /// One lock, one pass. Returns the ids flagged by this call.
    pub fn mark_overdue<F>(&self, pred: F) -> Vec<String>
    where
        F: FnMut(&Order) -> bool,
    {
        let mut st = self.lock();
        let events = st.flag_overdue(pred);
        let mut flagged = Vec::with_capacity(events.len());
        for ev in events {
            if let KitchenEvent::OrderOverdue { order_id } = &ev {
                warn!(order_id = %order_id, "order overdue");
                flagged.push(order_id.clone());
            }
            self.inner.bus.publish(ev);
        }
        flagged
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn list_orders(&self, station: Option<Station>) -> OrderView {
        let st = self.lock();
        OrderView::new(st.active().to_vec(), station)
    }

    pub fn get_order(&self, order_id: &str) -> Result<Order, StoreError> {
        self.lock()
            .get(order_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(order_id.to_string()))
    }

    pub fn get_stats(&self) -> DailyStats {
        self.lock().stats().clone()
    }

    /// Last `n` active orders, newest first.
    pub fn recent_orders(&self, n: usize) -> Vec<Order> {
        self.lock().active().iter().rev().take(n).cloned().collect()
    }

    // -----------------------------------------------------------------------
    // Subscriptions
    // -----------------------------------------------------------------------

    pub fn subscribe(&self) -> Subscription {
        self.inner.bus.subscribe()
    }

    pub fn unsubscribe(&self, sub: Subscription) {
        drop(sub);
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.bus.subscriber_count()
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    // Mutations validate before writing, so a panic elsewhere never leaves a
    // half-written state behind the poison flag.
    fn lock(&self) -> MutexGuard<'_, KitchenState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // Takes the guard to prove the lock is still held while publishing.
    fn commit(&self, _guard: &MutexGuard<'_, KitchenState>, applied: Applied) -> Order {
        for ev in applied.events {
            self.inner.bus.publish(ev);
        }
        applied.order
    }
}

fn log_rejection(err: &StoreError) {
    warn!(kind = err.kind(), error = %err, "store operation rejected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use kds_schemas::{LogicalClock, OrderStatus, Platform};

    fn store() -> (OrderStore, LogicalClock) {
        let clock = LogicalClock::new(0);
        (OrderStore::with_clock(clock.clone()), clock)
    }

    fn curry() -> NewOrder {
        NewOrder::new(
            "Rahul Sharma",
            ["Butter Chicken", "Naan", "Rice"],
            520,
            Station::Curry,
            Platform::Swiggy,
        )
        .due_in(480)
    }

    #[test]
    fn created_at_comes_from_clock() {
        let (s, clock) = store();
        clock.advance(42);
        let o = s.create_order(curry()).unwrap();
        assert_eq!(o.created_at, 42);
    }

    #[test]
    fn update_efficiency_publishes_clamped_stats_without_order() {
        let (s, _) = store();
        let mut sub = s.subscribe();

        let stats = s.update_efficiency(-12.5);
        assert_eq!(stats.efficiency, 87.5);
        let stats = s.update_efficiency(40.0);
        assert_eq!(stats.efficiency, 100.0);
        s.update_efficiency(f64::INFINITY);

        let events = sub.drain();
        assert_eq!(events.len(), 2, "non-finite delta must not publish");
        for (ev, expected) in events.iter().zip([87.5, 100.0]) {
            match ev {
                KitchenEvent::StatsUpdated { order_id, stats } => {
                    assert_eq!(order_id, &None);
                    assert_eq!(stats.efficiency, expected);
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert_eq!(s.get_stats().efficiency, 100.0);
    }

    #[test]
    fn failed_operation_publishes_nothing() {
        let (s, _) = store();
        let mut sub = s.subscribe();
        assert!(s.advance_status("ORD-404").is_err());
        assert!(s.create_order(curry().due_in(-1)).is_err());
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn recent_orders_is_newest_first() {
        let (s, _) = store();
        for _ in 0..7 {
            s.create_order(curry()).unwrap();
        }
        let ids: Vec<String> = s.recent_orders(5).into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["ORD-007", "ORD-006", "ORD-005", "ORD-004", "ORD-003"]);
    }

    #[test]
    fn get_order_finds_dispatched_history() {
        let (s, _) = store();
        let id = s.create_order(curry()).unwrap().id;
        s.advance_status(&id).unwrap();
        s.advance_status(&id).unwrap();
        s.remove_order(&id).unwrap();
        assert_eq!(s.get_order(&id).unwrap().status, OrderStatus::Dispatched);
        assert!(s.list_orders(None).is_empty());
        assert_eq!(s.get_order("ORD-999"), Err(StoreError::NotFound("ORD-999".to_string())));
    }

    #[test]
    fn unsubscribe_drops_receiver() {
        let (s, _) = store();
        let sub = s.subscribe();
        assert_eq!(s.subscriber_count(), 1);
        s.unsubscribe(sub);
        assert_eq!(s.subscriber_count(), 0);
    }
}
