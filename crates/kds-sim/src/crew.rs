//! Simulated kitchen staff.
//!
//! Each pass dispatches every `Ready` order, then moves the oldest unfinished
//! order one step forward. Passes go through the public store API only, so
//! they obey the same lifecycle rules as any other writer.

use kds_orders::OrderStore;
use kds_schemas::OrderStatus;
use tracing::debug;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CrewReport {
    pub dispatched: Vec<String>,
    pub advanced: Vec<String>,
}

pub fn crew_pass(store: &OrderStore) -> CrewReport {
    let mut report = CrewReport::default();
    let view = store.list_orders(None);

    for o in view.iter().filter(|o| o.status == OrderStatus::Ready) {
        match store.remove_order(&o.id) {
            Ok(_) => report.dispatched.push(o.id.clone()),
            // Another writer got there first.
            Err(e) => debug!(order_id = %o.id, error = %e, "crew dispatch skipped"),
        }
    }

    let next = view
        .iter()
        .find(|o| matches!(o.status, OrderStatus::New | OrderStatus::Preparing));
    if let Some(o) = next {
        match store.advance_status(&o.id) {
            Ok(after) => {
                debug!(order_id = %after.id, status = %after.status, "crew advanced order");
                report.advanced.push(after.id);
            }
            Err(e) => debug!(order_id = %o.id, error = %e, "crew advance skipped"),
        }
    }

    report
}
