//! Kitchen state and its pure mutations.
//!
//! `KitchenState` holds the active orders, the dispatched history, the daily
//! aggregates and the id counter. Every mutation validates first and only then
//! writes, so an `Err` leaves the state untouched. Each successful mutation
//! returns the events it implies; publishing them is the store's job.
//!
//! No IO, no clock, no locking. The caller supplies `now`.

use std::collections::HashMap;

use kds_schemas::{
    clamp_efficiency, DailyStats, KitchenEvent, NewOrder, Order, OrderStatus, Priority,
};
use tracing::{debug, warn};

use crate::ids::OrderIdGen;
use crate::lifecycle::{self, LifecycleAction};
use crate::StoreError;

/// Result of a successful order mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    /// The order after the mutation.
    pub order: Order,
    /// Events to publish, in order.
    pub events: Vec<KitchenEvent>,
}

#[derive(Debug, Clone)]
pub struct KitchenState {
    ids: OrderIdGen,
    /// Creation order.
    active: Vec<Order>,
    dispatched: HashMap<String, Order>,
    stats: DailyStats,
}

impl KitchenState {
    pub fn new(id_prefix: impl Into<String>, initial_efficiency: f64) -> Self {
        Self {
            ids: OrderIdGen::new(id_prefix),
            active: Vec::new(),
            dispatched: HashMap::new(),
            stats: DailyStats::new(initial_efficiency),
        }
    }

    pub fn stats(&self) -> &DailyStats {
        &self.stats
    }

    pub fn active(&self) -> &[Order] {
        &self.active
    }

    /// Active orders first, then the dispatched history.
    pub fn get(&self, order_id: &str) -> Option<&Order> {
        self.active
            .iter()
            .find(|o| o.id == order_id)
            .or_else(|| self.dispatched.get(order_id))
    }

    pub fn dispatched_count(&self) -> usize {
        self.dispatched.len()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    pub fn create(&mut self, input: NewOrder, now: i64) -> Result<Applied, StoreError> {
        validate(&input)?;
        let revenue = self
            .stats
            .revenue
            .checked_add(input.total)
            .ok_or_else(|| StoreError::InvalidOrder("total overflows daily revenue".to_string()))?;

        let order = Order {
            id: self.ids.next_id(),
            customer: input.customer,
            items: input.items,
            total: input.total,
            status: OrderStatus::New,
            station: input.station,
            priority: input.priority,
            platform: input.platform,
            created_at: now,
            due_in_secs: input.due_in_secs,
            overdue: false,
        };

        self.stats.total_orders += 1;
        self.stats.active_orders += 1;
        self.stats.revenue = revenue;
        self.active.push(order.clone());

        debug!(
            order_id = %order.id,
            station = %order.station,
            total = order.total,
            "order created"
        );

        Ok(Applied {
            events: vec![
                KitchenEvent::OrderCreated {
                    order_id: order.id.clone(),
                },
                self.stats_event(Some(&order.id)),
            ],
            order,
        })
    }

    pub fn advance(&mut self, order_id: &str) -> Result<Applied, StoreError> {
        let idx = self.active_index(order_id)?;
        let from = self.active[idx].status;
        let to = lifecycle::advance_action(from)
            .and_then(|action| lifecycle::apply(from, action))
            .map_err(|_| StoreError::InvalidTransition {
                order_id: order_id.to_string(),
                from,
                action: "advance",
            })?;

        let order = &mut self.active[idx];
        order.status = to;
        order.priority = lifecycle::derived_priority(to, order.priority);

        debug!(order_id, %from, %to, "order advanced");

        Ok(Applied {
            order: order.clone(),
            events: vec![KitchenEvent::OrderStatusChanged {
                order_id: order_id.to_string(),
                from,
                to,
            }],
        })
    }

    pub fn dispatch(&mut self, order_id: &str) -> Result<Applied, StoreError> {
        let idx = self.active_index(order_id)?;
        let from = self.active[idx].status;
        let to = lifecycle::apply(from, LifecycleAction::Dispatch).map_err(|e| {
            StoreError::InvalidTransition {
                order_id: order_id.to_string(),
                from,
                action: e.action,
            }
        })?;

        let mut order = self.active.remove(idx);
        order.status = to;
        order.priority = Priority::Ready;
        self.stats.active_orders = self.stats.active_orders.saturating_sub(1);
        self.dispatched.insert(order.id.clone(), order.clone());

        debug!(order_id, "order dispatched");

        Ok(Applied {
            events: vec![
                KitchenEvent::OrderRemoved {
                    order_id: order.id.clone(),
                },
                self.stats_event(Some(&order.id)),
            ],
            order,
        })
    }

    /// Add `delta` to efficiency and clamp into `[0, 100]`.
    ///
    /// A non-finite delta changes nothing and produces no event.
    pub fn adjust_efficiency(&mut self, delta: f64) -> Vec<KitchenEvent> {
        if !delta.is_finite() {
            warn!(delta, "ignoring non-finite efficiency delta");
            return Vec::new();
        }
        self.stats.efficiency = clamp_efficiency(self.stats.efficiency + delta);
        vec![self.stats_event(None)]
    }

    /// Set the sticky overdue flag on every active order matching `pred`.
    ///
    /// Orders already flagged are skipped, so each order yields at most one
    /// `OrderOverdue` over its lifetime. The flag is never cleared here or
    /// anywhere else.
    pub fn flag_overdue<F>(&mut self, mut pred: F) -> Vec<KitchenEvent>
    where
        F: FnMut(&Order) -> bool,
    {
        let mut events = Vec::new();
        for order in self.active.iter_mut() {
            if order.overdue || !pred(order) {
                continue;
            }
            order.overdue = true;
            events.push(KitchenEvent::OrderOverdue {
                order_id: order.id.clone(),
            });
        }
        events
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn active_index(&self, order_id: &str) -> Result<usize, StoreError> {
        if let Some(idx) = self.active.iter().position(|o| o.id == order_id) {
            return Ok(idx);
        }
        if self.dispatched.contains_key(order_id) {
            return Err(StoreError::TerminalState(order_id.to_string()));
        }
        Err(StoreError::NotFound(order_id.to_string()))
    }

    fn stats_event(&self, order_id: Option<&str>) -> KitchenEvent {
        KitchenEvent::StatsUpdated {
            order_id: order_id.map(str::to_string),
            stats: self.stats.clone(),
        }
    }
}

fn validate(input: &NewOrder) -> Result<(), StoreError> {
    let reject = |reason: &str| -> Result<(), StoreError> {
        Err(StoreError::InvalidOrder(reason.to_string()))
    };

    if input.customer.trim().is_empty() {
        return reject("customer must not be empty");
    }
    if input.items.is_empty() {
        return reject("items must not be empty");
    }
    if input.items.iter().any(|i| i.trim().is_empty()) {
        return reject("items must not contain blank entries");
    }
    if input.total < 0 {
        return reject("total must be non-negative");
    }
    if input.due_in_secs < 0 {
        return reject("due_in_secs must be non-negative");
    }
    if input.priority == Priority::Ready {
        return reject("priority ready is derived from status and cannot be requested");
    }
    Ok(())
}
