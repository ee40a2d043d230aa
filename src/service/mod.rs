//! Stream composition over the user store
//!
//! Pull-based, request-scoped pipelines: each call draws fresh data from
//! the store and returns either a value or a paced sequence. Paced
//! sequences are delivered through bounded `mpsc` channels fed by spawned
//! producer tasks; dropping the receiver cancels the producer, so an
//! abandoned consumer leaves no orphaned timers behind.
//!
//! Pipeline-local failure conditions (not-found, retry exhaustion) are
//! recovered inside the pipeline and surfaced to an observability hook
//! instead of the caller; see [`events`].

pub mod config;
pub mod events;
pub mod users;

pub use config::ServiceConfig;
pub use events::{PipelineEvent, PipelineObserver, RecordingObserver, TracingObserver};
pub use users::{UserService, ROLE_LABELS};
