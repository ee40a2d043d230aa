//! Service configuration

use std::time::Duration;

/// Pacing and retry options for [`UserService`](super::UserService)
///
/// The delays simulate network/processing latency on an otherwise
/// instantaneous in-memory store.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Delay applied to a found single-user lookup
    pub lookup_delay: Duration,

    /// Delay before each element of a full scan
    pub scan_delay: Duration,

    /// Delay before each element of a name search
    pub search_delay: Duration,

    /// Delay for summary pipelines (paced and per-element variants)
    pub summary_delay: Duration,

    /// Pacing of the fast partition in the merged view
    pub fast_delay: Duration,

    /// Pacing of the slow partition in the merged view
    pub slow_delay: Duration,

    /// Pacing of the first partition in the concatenated view
    pub concat_first_delay: Duration,

    /// Pacing of the second partition in the concatenated view
    pub concat_second_delay: Duration,

    /// Number of users in the first partition of the merged/concatenated views
    pub partition_size: usize,

    /// Retries after the first failed lookup in the retry pipeline
    pub retry_attempts: u32,

    /// Capacity of the delivery channel behind each paced sequence
    pub channel_capacity: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            lookup_delay: Duration::from_millis(100),
            scan_delay: Duration::from_millis(200),
            search_delay: Duration::from_millis(150),
            summary_delay: Duration::from_millis(100),
            fast_delay: Duration::from_millis(50),
            slow_delay: Duration::from_millis(200),
            concat_first_delay: Duration::from_millis(50),
            concat_second_delay: Duration::from_millis(30),
            partition_size: 2,
            retry_attempts: 3,
            channel_capacity: 16,
        }
    }
}

impl ServiceConfig {
    /// Set the single-lookup delay
    pub fn lookup_delay(mut self, delay: Duration) -> Self {
        self.lookup_delay = delay;
        self
    }

    /// Set the full-scan pacing
    pub fn scan_delay(mut self, delay: Duration) -> Self {
        self.scan_delay = delay;
        self
    }

    /// Set the name-search pacing
    pub fn search_delay(mut self, delay: Duration) -> Self {
        self.search_delay = delay;
        self
    }

    /// Set the summary pipeline delay
    pub fn summary_delay(mut self, delay: Duration) -> Self {
        self.summary_delay = delay;
        self
    }

    /// Set the merged-view partition pacings
    pub fn merge_delays(mut self, fast: Duration, slow: Duration) -> Self {
        self.fast_delay = fast;
        self.slow_delay = slow;
        self
    }

    /// Set the concatenated-view partition pacings
    pub fn concat_delays(mut self, first: Duration, second: Duration) -> Self {
        self.concat_first_delay = first;
        self.concat_second_delay = second;
        self
    }

    /// Set the first-partition size for merged/concatenated views
    pub fn partition_size(mut self, size: usize) -> Self {
        self.partition_size = size;
        self
    }

    /// Set the retry budget of the retry pipeline
    pub fn retry_attempts(mut self, attempts: u32) -> Self {
        self.retry_attempts = attempts;
        self
    }

    /// Set the paced-sequence channel capacity
    ///
    /// Values below 1 are raised to 1.
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }
}
