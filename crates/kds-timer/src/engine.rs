use std::sync::Arc;
use std::time::Duration;

use kds_orders::OrderStore;
use kds_schemas::Clock;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::countdown::is_overdue_at;

/// Outcome of one tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub now: i64,
    /// Ids flagged overdue by this tick (empty on repeat ticks).
    pub newly_overdue: Vec<String>,
}

/// Periodic overdue detector.
///
/// Holds no order data of its own: each tick is a single
/// read-and-maybe-flag pass over the store under the store's lock.
#[derive(Clone)]
pub struct TimerEngine {
    store: OrderStore,
    clock: Arc<dyn Clock>,
}

impl TimerEngine {
    pub fn new<C: Clock + 'static>(store: OrderStore, clock: C) -> Self {
        Self {
            store,
            clock: Arc::new(clock),
        }
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    /// Detect orders whose budget has run out at `now`.
    ///
    /// Idempotent: ticking again at the same or a later time never re-emits
    /// `OrderOverdue` for an order already flagged.
    pub fn tick(&self, now: i64) -> TickReport {
        let newly_overdue = self.store.mark_overdue(|o| is_overdue_at(o, now));
        debug!(now, flagged = newly_overdue.len(), "timer tick");
        TickReport { now, newly_overdue }
    }

    pub fn tick_now(&self) -> TickReport {
        self.tick(self.clock.now())
    }

    /// Tick on a real interval until the handle is aborted.
    pub fn spawn(self, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                self.tick_now();
            }
        })
    }
}
