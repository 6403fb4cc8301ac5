//! Order id allocation.
//!
//! Ids look like `ORD-001`: a configurable prefix plus a counter that only
//! moves forward. The counter is never rewound, so an id is never handed out
//! twice during the lifetime of a store, even after the order is dispatched.

/// Monotonic id generator. Not `Sync`; the store keeps it behind its lock.
#[derive(Clone, Debug)]
pub struct OrderIdGen {
    prefix: String,
    next: u64,
}

impl OrderIdGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }

    /// Allocate the next id.
    pub fn next_id(&mut self) -> String {
        let n = self.next;
        self.next += 1;
        format!("{}-{:03}", self.prefix, n)
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}
