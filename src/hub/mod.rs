//! Multicast stats broadcasting
//!
//! The hub is a single publication point with many independent readers. It
//! uses `tokio::sync::broadcast` for efficient fan-out and keeps a bounded
//! replay buffer so late joiners see recent history before live updates.
//!
//! # Architecture
//!
//! ```text
//!                       Arc<StatsHub>
//!                 ┌───────────────────────┐
//!                 │ shared: RwLock<       │
//!                 │   HubShared {         │
//!                 │     replay,           │
//!                 │     tx: broadcast::Tx,│
//!                 │   }                   │
//!                 │ >                     │
//!                 └──────────┬────────────┘
//!                            │
//!        ┌───────────────────┼───────────────────┐
//!        │                   │                   │
//!        ▼                   ▼                   ▼
//!   [Generator]        [Subscription]      [Subscription]
//!   hub.publish()      recv()              recv()
//! ```
//!
//! # Ordering
//!
//! `publish` runs under the write lock, `subscribe` under the read lock, so
//! a new subscription's replay capture can never interleave with a publish:
//! every subscriber observes the replay prefix followed by all later
//! snapshots, in publish order, with no gap and no duplicate.
//!
//! # Slow subscribers
//!
//! Each subscription has its own bounded delivery queue. A subscriber that
//! falls more than the queue capacity behind loses its own oldest unread
//! snapshots and continues from the oldest retained one; the publisher and
//! all other subscribers are unaffected.

pub mod broadcast;
pub mod config;
pub mod replay;
pub mod snapshot;
pub mod subscription;

pub use broadcast::{HubStats, StatsHub};
pub use config::HubConfig;
pub use replay::ReplayBuffer;
pub use snapshot::Snapshot;
pub use subscription::Subscription;
