use serde::{Deserialize, Serialize};

use crate::{DailyStats, OrderStatus};

/// Domain events published by the order store after a mutation commits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KitchenEvent {
    OrderCreated {
        order_id: String,
    },
    OrderStatusChanged {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },
    /// Fires at most once per order.
    OrderOverdue {
        order_id: String,
    },
    OrderRemoved {
        order_id: String,
    },
    StatsUpdated {
        /// Order whose mutation moved the aggregates; `None` for efficiency updates.
        order_id: Option<String>,
        stats: DailyStats,
    },
}

impl KitchenEvent {
    /// The order this event is about, if any.
    pub fn order_id(&self) -> Option<&str> {
        match self {
            Self::OrderCreated { order_id }
            | Self::OrderStatusChanged { order_id, .. }
            | Self::OrderOverdue { order_id }
            | Self::OrderRemoved { order_id } => Some(order_id),
            Self::StatsUpdated { order_id, .. } => order_id.as_deref(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::OrderCreated { .. } => "order_created",
            Self::OrderStatusChanged { .. } => "order_status_changed",
            Self::OrderOverdue { .. } => "order_overdue",
            Self::OrderRemoved { .. } => "order_removed",
            Self::StatsUpdated { .. } => "stats_updated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_as_tagged_objects() {
        let ev = KitchenEvent::OrderStatusChanged {
            order_id: "ORD-002".to_string(),
            from: OrderStatus::Preparing,
            to: OrderStatus::Ready,
        };
        let v = serde_json::to_value(&ev).unwrap();
        assert_eq!(v["type"], "order_status_changed");
        assert_eq!(v["from"], "preparing");
        assert_eq!(v["to"], "ready");
        assert_eq!(ev.kind(), "order_status_changed");
    }

    #[test]
    fn stats_event_order_id_is_optional() {
        let ev = KitchenEvent::StatsUpdated {
            order_id: None,
            stats: DailyStats::default(),
        };
        assert_eq!(ev.order_id(), None);

        let ev = KitchenEvent::OrderOverdue {
            order_id: "ORD-003".to_string(),
        };
        assert_eq!(ev.order_id(), Some("ORD-003"));
    }
}
