//! Stats snapshot value type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point-in-time view of the user population
///
/// Immutable once created; cheap to clone. `active_count` never exceeds
/// `total_count` (enforced at construction).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
    /// Users considered active at that moment
    pub active_count: u64,
    /// Users stored at that moment
    pub total_count: u64,
}

impl Snapshot {
    /// Create a snapshot with an explicit timestamp
    ///
    /// `active_count` is clamped to `total_count`.
    pub fn new(timestamp: DateTime<Utc>, active_count: u64, total_count: u64) -> Self {
        Self {
            timestamp,
            active_count: active_count.min(total_count),
            total_count,
        }
    }

    /// Create a snapshot stamped with the current time
    pub fn now(active_count: u64, total_count: u64) -> Self {
        Self::new(Utc::now(), active_count, total_count)
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} active / {} total at {}",
            self.active_count, self.total_count, self.timestamp
        )
    }
}
