//! # userhub
//!
//! Live user-directory streaming library: a periodic stats producer feeding
//! a multicast broadcast hub with bounded replay, plus a set of
//! stream-composition pipelines (pacing, projection, fallback, retry, zip,
//! merge, concat) over an in-memory user store.
//!
//! The crate is transport-agnostic: everything is exposed as async methods,
//! channels and subscription handles, ready to be adapted to SSE/WebSocket
//! endpoints by an embedding server.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use userhub::{RandomSampler, StatsGenerator, StatsHub, UserService, UserStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(UserStore::seeded());
//!     let hub = Arc::new(StatsHub::new());
//!
//!     // Background snapshot producer, one snapshot every 2s
//!     let generator = StatsGenerator::new(Arc::clone(&store), Arc::clone(&hub), RandomSampler);
//!     let ticker = generator.spawn();
//!
//!     // Each subscriber independently gets replay-then-live snapshots
//!     let mut subscription = hub.subscribe().await;
//!     while let Some(snapshot) = subscription.recv().await {
//!         println!("{snapshot}");
//!     }
//!
//!     // Request-scoped pipelines over the same store
//!     let service = UserService::new(store);
//!     let mut users = service.stream_all().await;
//!     while let Some(user) = users.recv().await {
//!         println!("{}", user.name);
//!     }
//!
//!     ticker.abort();
//! }
//! ```

pub mod error;
pub mod hub;
pub mod service;
pub mod stats;
pub mod store;

pub use error::{Error, Result};
pub use hub::{HubConfig, HubStats, ReplayBuffer, Snapshot, StatsHub, Subscription};
pub use service::{
    PipelineEvent, PipelineObserver, RecordingObserver, ServiceConfig, TracingObserver,
    UserService, ROLE_LABELS,
};
pub use stats::{ActiveSampler, GeneratorConfig, RandomSampler, SequenceSampler, StatsGenerator};
pub use store::{User, UserStore, UserSummary};
