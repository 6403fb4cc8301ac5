//! Order lifecycle state machine.
//!
//! ```text
//!             BeginPreparing         MarkReady           Dispatch
//!    New  ────────────────► Preparing ────────► Ready ────────► Dispatched (term.)
//! ```
//!
//! Exactly one forward step per action. Nothing skips a stage, nothing moves
//! backwards, and `Dispatched` accepts no further actions. `advance_status`
//! walks the first two edges; the last edge belongs to `remove_order` only.

use std::fmt;

use kds_schemas::{OrderStatus, Priority};

/// Actions that move an order along its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    BeginPreparing,
    MarkReady,
    Dispatch,
}

impl LifecycleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BeginPreparing => "begin_preparing",
            Self::MarkReady => "mark_ready",
            Self::Dispatch => "dispatch",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action was applied to a status that does not accept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalTransition {
    pub from: OrderStatus,
    pub action: &'static str,
}

impl IllegalTransition {
    /// `true` when the order had already left the kitchen.
    pub fn is_terminal(&self) -> bool {
        self.from.is_terminal()
    }
}

impl fmt::Display for IllegalTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal lifecycle transition: {} + {}", self.from, self.action)
    }
}

impl std::error::Error for IllegalTransition {}

/// Apply `action` to `from` and return the resulting status.
pub fn apply(from: OrderStatus, action: LifecycleAction) -> Result<OrderStatus, IllegalTransition> {
    use LifecycleAction::*;
    use OrderStatus::*;

    match (from, action) {
        (New, BeginPreparing) => Ok(Preparing),
        (Preparing, MarkReady) => Ok(Ready),
        (Ready, Dispatch) => Ok(Dispatched),
        (from, action) => Err(IllegalTransition {
            from,
            action: action.as_str(),
        }),
    }
}

/// The action `advance_status` performs from `from`.
///
/// `Ready` has no advance action: it leaves the kitchen through dispatch.
pub fn advance_action(from: OrderStatus) -> Result<LifecycleAction, IllegalTransition> {
    match from {
        OrderStatus::New => Ok(LifecycleAction::BeginPreparing),
        OrderStatus::Preparing => Ok(LifecycleAction::MarkReady),
        OrderStatus::Ready | OrderStatus::Dispatched => Err(IllegalTransition {
            from,
            action: "advance",
        }),
    }
}

/// Priority shown for an order in `status` that was created with `requested`.
pub fn derived_priority(status: OrderStatus, requested: Priority) -> Priority {
    match status {
        OrderStatus::Ready | OrderStatus::Dispatched => Priority::Ready,
        OrderStatus::New | OrderStatus::Preparing => requested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LifecycleAction::*;
    use OrderStatus::*;

    #[test]
    fn forward_path_is_linear() {
        assert_eq!(apply(New, BeginPreparing).unwrap(), Preparing);
        assert_eq!(apply(Preparing, MarkReady).unwrap(), Ready);
        assert_eq!(apply(Ready, Dispatch).unwrap(), Dispatched);
    }

    #[test]
    fn skipping_a_stage_is_illegal() {
        let err = apply(New, MarkReady).unwrap_err();
        assert_eq!(err.from, New);
        assert_eq!(err.action, "mark_ready");
        assert!(apply(New, Dispatch).is_err());
        assert!(apply(Preparing, Dispatch).is_err());
    }

    #[test]
    fn reversing_is_illegal() {
        assert!(apply(Ready, BeginPreparing).is_err());
        assert!(apply(Ready, MarkReady).is_err());
        assert!(apply(Preparing, BeginPreparing).is_err());
    }

    #[test]
    fn dispatched_accepts_nothing() {
        for action in [BeginPreparing, MarkReady, Dispatch] {
            let err = apply(Dispatched, action).unwrap_err();
            assert!(err.is_terminal());
        }
    }

    #[test]
    fn advance_stops_at_ready() {
        assert_eq!(advance_action(New).unwrap(), BeginPreparing);
        assert_eq!(advance_action(Preparing).unwrap(), MarkReady);

        let err = advance_action(Ready).unwrap_err();
        assert!(!err.is_terminal());
        let err = advance_action(Dispatched).unwrap_err();
        assert!(err.is_terminal());
    }

    #[test]
    fn ready_forces_ready_priority() {
        assert_eq!(derived_priority(New, Priority::Urgent), Priority::Urgent);
        assert_eq!(derived_priority(Preparing, Priority::Normal), Priority::Normal);
        assert_eq!(derived_priority(Ready, Priority::Urgent), Priority::Ready);
    }
}
