//! kds-schemas
//!
//! Shared data model for the kitchen display core:
//! - orders, stations, platforms, daily aggregates
//! - the domain event published to subscribers
//! - the clock abstraction (logical seconds, never wall time in tests)

mod clock;
mod events;
mod types;

pub use clock::{Clock, LogicalClock, SystemClock};
pub use events::KitchenEvent;
pub use types::{
    clamp_efficiency, DailyStats, NewOrder, Order, OrderStatus, Platform, Priority, Station,
    UnknownVariant, EFFICIENCY_MAX, EFFICIENCY_MIN,
};
