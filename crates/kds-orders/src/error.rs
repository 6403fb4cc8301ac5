use std::fmt;

use kds_schemas::OrderStatus;

/// Errors returned synchronously by [`OrderStore`](crate::OrderStore) operations.
///
/// Every variant is an input or programming error on the caller's side; none
/// of them is transient, so callers should never retry blindly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Creation input rejected before any state was touched.
    InvalidOrder(String),
    /// No active or dispatched order has this id.
    NotFound(String),
    /// The order is already `Dispatched`.
    TerminalState(String),
    /// The action is not legal from the order's current status.
    InvalidTransition {
        order_id: String,
        from: OrderStatus,
        action: &'static str,
    },
}

impl StoreError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidOrder(_) => "INVALID_ORDER",
            Self::NotFound(_) => "NOT_FOUND",
            Self::TerminalState(_) => "TERMINAL_STATE",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOrder(reason) => write!(f, "invalid order: {reason}"),
            Self::NotFound(id) => write!(f, "order not found: {id}"),
            Self::TerminalState(id) => write!(f, "order {id} is already dispatched"),
            Self::InvalidTransition {
                order_id,
                from,
                action,
            } => write!(f, "illegal transition for {order_id}: {from} + {action}"),
        }
    }
}

impl std::error::Error for StoreError {}
