//! Hub configuration

/// Configuration options for [`StatsHub`](super::StatsHub)
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Number of snapshots kept for replay to new subscribers
    pub replay_capacity: usize,

    /// Per-subscriber delivery queue capacity
    ///
    /// A subscriber lagging more than this many snapshots behind loses its
    /// oldest unread ones.
    pub channel_capacity: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            replay_capacity: 10,
            channel_capacity: 64,
        }
    }
}

impl HubConfig {
    /// Set the replay buffer capacity
    pub fn replay_capacity(mut self, capacity: usize) -> Self {
        self.replay_capacity = capacity;
        self
    }

    /// Set the per-subscriber delivery queue capacity
    ///
    /// `tokio::sync::broadcast` requires a non-zero capacity; values below 1
    /// are raised to 1.
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HubConfig::default();

        assert_eq!(config.replay_capacity, 10);
        assert_eq!(config.channel_capacity, 64);
    }

    #[test]
    fn test_builder_chaining() {
        let config = HubConfig::default().replay_capacity(3).channel_capacity(8);

        assert_eq!(config.replay_capacity, 3);
        assert_eq!(config.channel_capacity, 8);
    }

    #[test]
    fn test_channel_capacity_floor() {
        let config = HubConfig::default().channel_capacity(0);

        assert_eq!(config.channel_capacity, 1);
    }
}
