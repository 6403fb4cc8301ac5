//! In-process event bus.
//!
//! A bounded `tokio::sync::broadcast` channel. Publishing never blocks the
//! writer: a subscriber that falls more than `capacity` events behind skips
//! the oldest ones and gets a warning in the log.

use kds_schemas::KitchenEvent;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tracing::warn;

pub const DEFAULT_EVENT_CAPACITY: usize = 1024;

#[derive(Clone, Debug)]
pub struct EventBus {
    tx: broadcast::Sender<KitchenEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish to every live subscriber. Having none is not an error.
    pub fn publish(&self, ev: KitchenEvent) {
        let _ = self.tx.send(ev);
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

/// One subscriber's view of the event stream. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    rx: broadcast::Receiver<KitchenEvent>,
}

impl Subscription {
    /// Next buffered event, or `None` if nothing is pending.
    pub fn try_next(&mut self) -> Option<KitchenEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(ev) => return Some(ev),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "event subscriber lagged; oldest events dropped");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    /// Wait for the next event. `None` once the store is gone.
    pub async fn next(&mut self) -> Option<KitchenEvent> {
        loop {
            match self.rx.recv().await {
                Ok(ev) => return Some(ev),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "event subscriber lagged; oldest events dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Everything currently buffered, oldest first.
    pub fn drain(&mut self) -> Vec<KitchenEvent> {
        std::iter::from_fn(|| self.try_next()).collect()
    }

    pub fn into_stream(self) -> impl Stream<Item = KitchenEvent> + Send + 'static {
        BroadcastStream::new(self.rx).filter_map(|r| match r {
            Ok(ev) => Some(ev),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                warn!(skipped, "event stream lagged; oldest events dropped");
                None
            }
        })
    }
}
