//! Countdown arithmetic.
//!
//! Everything here is a pure function of `(due_in_secs, created_at, now)`.
//! Nothing counts down in place, so repeated calls with the same inputs
//! always agree and there is no drift to accumulate.

use std::fmt;

use kds_schemas::{Order, OrderStatus};

/// Seconds elapsed since `created_at`. A `now` before creation counts as zero.
pub fn elapsed_secs(created_at: i64, now: i64) -> i64 {
    now.saturating_sub(created_at).max(0)
}

/// `max(0, due_in_secs - elapsed)`.
pub fn remaining_secs(due_in_secs: i64, created_at: i64, now: i64) -> i64 {
    due_in_secs
        .saturating_sub(elapsed_secs(created_at, now))
        .max(0)
}

/// `mm:ss`, minutes padded to two digits (they may run past 99).
pub fn format_mm_ss(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Remaining preparation time for an order. `Ready` and later read zero.
pub fn time_remaining(order: &Order, now: i64) -> i64 {
    match order.status {
        OrderStatus::Ready | OrderStatus::Dispatched => 0,
        OrderStatus::New | OrderStatus::Preparing => {
            remaining_secs(order.due_in_secs, order.created_at, now)
        }
    }
}

/// Whether the preparation budget has run out while the order is still being
/// worked on. Only `New` and `Preparing` orders can become overdue.
pub fn is_overdue_at(order: &Order, now: i64) -> bool {
    matches!(order.status, OrderStatus::New | OrderStatus::Preparing)
        && elapsed_secs(order.created_at, now) >= order.due_in_secs
}

/// What a ticket's timer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Running { remaining_secs: i64 },
    Overdue,
    Ready,
}

impl Countdown {
    pub fn for_order(order: &Order, now: i64) -> Self {
        match order.status {
            OrderStatus::Ready | OrderStatus::Dispatched => Countdown::Ready,
            OrderStatus::New | OrderStatus::Preparing => {
                let remaining = time_remaining(order, now);
                if order.overdue || remaining == 0 {
                    Countdown::Overdue
                } else {
                    Countdown::Running {
                        remaining_secs: remaining,
                    }
                }
            }
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Running { remaining_secs } => f.write_str(&format_mm_ss(*remaining_secs)),
            Countdown::Overdue => f.write_str("OVERDUE"),
            Countdown::Ready => f.write_str("Ready"),
        }
    }
}

/// Age label for the live feed: `Just now`, `12m ago`, `3h ago`.
pub fn format_time_ago(created_at: i64, now: i64) -> String {
    let minutes = elapsed_secs(created_at, now) / 60;
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    format!("{}h ago", minutes / 60)
}
