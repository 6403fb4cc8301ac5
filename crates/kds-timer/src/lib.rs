//! kds-timer
//!
//! Countdown and overdue detection for the kitchen display.
//! - remaining time is a pure function of logical time (no in-place countdown)
//! - overdue is a sticky flag, set once, never cleared
//! - one `OrderOverdue` event per order, however many ticks pass the deadline
//!
//! The engine reads and flags through the order store; it owns no order data.

mod countdown;
mod engine;

pub use countdown::{
    elapsed_secs, format_mm_ss, format_time_ago, is_overdue_at, remaining_secs, time_remaining,
    Countdown,
};
pub use engine::{TickReport, TimerEngine};
