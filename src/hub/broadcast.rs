//! Stats hub implementation
//!
//! The central publication point: one producer, many independent
//! subscribers, each receiving the replay prefix followed by every snapshot
//! published while it stays live.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};

use super::config::HubConfig;
use super::replay::ReplayBuffer;
use super::snapshot::Snapshot;
use super::subscription::Subscription;

/// Mutable hub state, guarded by the hub's lock
struct HubShared {
    /// Recent snapshots for late joiners
    replay: ReplayBuffer,

    /// Broadcast sender for fan-out to subscribers
    tx: broadcast::Sender<Snapshot>,
}

/// Multicast snapshot hub with bounded replay
///
/// Thread-safe via `RwLock`. `publish` takes the write lock and `subscribe`
/// the read lock, so a subscriber's replay capture and its live receiver
/// are created atomically with respect to publishes: the replay-then-live
/// sequence never misses or duplicates a snapshot.
pub struct StatsHub {
    shared: RwLock<HubShared>,

    /// Number of active subscriptions
    subscriber_count: Arc<AtomicU32>,

    /// Total snapshots ever published
    published: AtomicU64,

    config: HubConfig,
}

impl StatsHub {
    /// Create a hub with default configuration
    pub fn new() -> Self {
        Self::with_config(HubConfig::default())
    }

    /// Create a hub with custom configuration
    pub fn with_config(config: HubConfig) -> Self {
        let (tx, _) = broadcast::channel(config.channel_capacity);

        Self {
            shared: RwLock::new(HubShared {
                replay: ReplayBuffer::with_capacity(config.replay_capacity),
                tx,
            }),
            subscriber_count: Arc::new(AtomicU32::new(0)),
            published: AtomicU64::new(0),
            config,
        }
    }

    /// Get the hub configuration
    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// Publish a snapshot to all active subscribers
    ///
    /// Appends to the replay buffer (evicting the oldest entry past
    /// capacity) and enqueues the snapshot into every subscriber's delivery
    /// queue. Never blocks on slow subscribers: a full queue drops that
    /// subscriber's oldest unread snapshot only. Returns the number of live
    /// delivery queues the snapshot was placed into.
    pub async fn publish(&self, snapshot: Snapshot) -> usize {
        let mut shared = self.shared.write().await;

        shared.replay.push(snapshot.clone());

        // send() errors only when there are no receivers, which is not a
        // failure for a broadcast
        let delivered = shared.tx.send(snapshot).unwrap_or(0);
        self.published.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(receivers = delivered, "Snapshot published");
        delivered
    }

    /// Register a new subscriber
    ///
    /// The subscription first yields the current replay buffer contents
    /// (oldest to newest, at most `replay_capacity` snapshots), then all
    /// snapshots published while it remains live. Subscriptions are
    /// independent: each gets the full replay-then-live sequence.
    pub async fn subscribe(&self) -> Subscription {
        let shared = self.shared.read().await;

        let rx = shared.tx.subscribe();
        let replay = shared.replay.catchup();

        let count = self.subscriber_count.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            subscribers = count,
            replayed = replay.len(),
            "Subscriber added"
        );

        Subscription::new(replay, rx, Arc::clone(&self.subscriber_count))
    }

    /// Number of active subscriptions
    pub fn subscriber_count(&self) -> u32 {
        self.subscriber_count.load(Ordering::Relaxed)
    }

    /// Total snapshots ever published
    pub fn published_count(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    /// Get hub statistics
    pub async fn stats(&self) -> HubStats {
        let shared = self.shared.read().await;

        HubStats {
            subscribers: self.subscriber_count(),
            replayable: shared.replay.len(),
            published: self.published_count(),
        }
    }
}

impl Default for StatsHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics for a hub
#[derive(Debug, Clone)]
pub struct HubStats {
    /// Number of active subscriptions
    pub subscribers: u32,
    /// Snapshots currently available for replay
    pub replayable: usize,
    /// Total snapshots ever published
    pub published: u64,
}
