//! Subscriber handle
//!
//! A [`Subscription`] owns everything one consumer needs: the replay prefix
//! captured at subscribe time and a live broadcast receiver. Consumers call
//! [`recv`](Subscription::recv) in a loop; dropping the handle (or calling
//! [`close`](Subscription::close)) unregisters it from the hub and releases
//! its delivery queue.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

use super::snapshot::Snapshot;

/// A live registration of one consumer against the hub
pub struct Subscription {
    /// Snapshots captured from the replay buffer at subscribe time
    replay: VecDeque<Snapshot>,

    /// Live delivery queue; `None` once closed
    rx: Option<broadcast::Receiver<Snapshot>>,

    /// Hub-side subscriber counter, decremented on close
    subscriber_count: Arc<AtomicU32>,
}

impl Subscription {
    pub(super) fn new(
        replay: VecDeque<Snapshot>,
        rx: broadcast::Receiver<Snapshot>,
        subscriber_count: Arc<AtomicU32>,
    ) -> Self {
        Self {
            replay,
            rx: Some(rx),
            subscriber_count,
        }
    }

    /// Receive the next snapshot
    ///
    /// Delivers the replay prefix first (oldest to newest), then live
    /// snapshots in publish order. If this subscriber fell behind its queue
    /// capacity, the oldest unread snapshots are skipped and delivery
    /// resumes from the oldest retained one. Returns `None` once the
    /// subscription is closed or the hub has been dropped.
    pub async fn recv(&mut self) -> Option<Snapshot> {
        if let Some(snapshot) = self.replay.pop_front() {
            return Some(snapshot);
        }

        let rx = self.rx.as_mut()?;
        loop {
            match rx.recv().await {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed = missed, "Subscriber lagged, oldest snapshots dropped");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Number of replayed snapshots not yet consumed
    pub fn replay_remaining(&self) -> usize {
        self.replay.len()
    }

    /// Whether the subscription still delivers snapshots
    pub fn is_active(&self) -> bool {
        self.rx.is_some()
    }

    /// Unsubscribe from the hub
    ///
    /// Idempotent. Ceases all further delivery (replayed snapshots
    /// included), releases the delivery queue, and unregisters from the
    /// hub's subscriber count. Dropping the subscription has the same
    /// effect.
    pub fn close(&mut self) {
        if self.rx.take().is_some() {
            self.replay.clear();
            let prev = self.subscriber_count.fetch_sub(1, Ordering::Relaxed);
            tracing::debug!(subscribers = prev.saturating_sub(1), "Subscriber removed");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.close();
    }
}
