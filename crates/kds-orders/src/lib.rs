//! kds-orders
//!
//! The order store: authoritative owner of every order and of the daily
//! aggregates.
//! - explicit lifecycle state machine (`New → Preparing → Ready → Dispatched`)
//! - aggregates updated in the same critical section as the order they follow
//! - domain events published on a bounded broadcast bus after each commit
//!
//! Pure deterministic core (`KitchenState`) wrapped by a locking handle
//! (`OrderStore`). Time comes from an injected `Clock`.

mod bus;
mod error;
mod ids;
mod state;
mod store;
mod view;

pub mod lifecycle;

pub use bus::{EventBus, Subscription, DEFAULT_EVENT_CAPACITY};
pub use error::StoreError;
pub use ids::OrderIdGen;
pub use state::{Applied, KitchenState};
pub use store::{OrderStore, StoreConfig};
pub use view::{Iter, OrderView};
