//! Time sources.
//!
//! The store and timer never read the wall clock directly. Every timestamp is
//! a logical second supplied by a [`Clock`]. Tests and the simulator drive a
//! [`LogicalClock`] by hand; [`SystemClock`] exists for real-time runs.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Source of "now" in logical seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> i64 {
        (**self).now()
    }
}

/// Hand-advanced clock. Cloning shares the same underlying time.
#[derive(Clone, Debug, Default)]
pub struct LogicalClock {
    now: Arc<AtomicI64>,
}

impl LogicalClock {
    pub fn new(start: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start)),
        }
    }

    /// Jump to `t`. Moving backwards is ignored so time stays monotonic.
    pub fn set(&self, t: i64) {
        self.now.fetch_max(t, Ordering::SeqCst);
    }

    /// Advance by `secs` (negative values are ignored) and return the new time.
    pub fn advance(&self, secs: i64) -> i64 {
        let step = secs.max(0);
        self.now.fetch_add(step, Ordering::SeqCst) + step
    }
}

impl Clock for LogicalClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// UTC epoch seconds.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}
