//! Replay buffer for late-joiner support
//!
//! When a new subscriber joins an ongoing broadcast, it first receives the
//! most recent snapshots so it has context before live updates arrive. The
//! buffer holds at most `capacity` snapshots; publishing past capacity
//! evicts the oldest entry.

use std::collections::VecDeque;

use super::snapshot::Snapshot;

/// Bounded ring of the most recent snapshots
#[derive(Debug)]
pub struct ReplayBuffer {
    /// Maximum number of retained snapshots
    capacity: usize,
    /// Retained snapshots, oldest first
    entries: VecDeque<Snapshot>,
}

impl ReplayBuffer {
    /// Create a buffer retaining at most `capacity` snapshots
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a snapshot, evicting the oldest entry past capacity
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Copy out the retained snapshots, oldest to newest
    pub fn catchup(&self) -> VecDeque<Snapshot> {
        self.entries.clone()
    }

    /// Number of retained snapshots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the buffer holds no snapshots
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of retained snapshots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all retained snapshots
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(active: u64) -> Snapshot {
        Snapshot::now(active, 100)
    }

    #[test]
    fn test_push_below_capacity() {
        let mut buffer = ReplayBuffer::with_capacity(3);

        buffer.push(snap(1));
        buffer.push(snap(2));

        assert_eq!(buffer.len(), 2);
        let actives: Vec<u64> = buffer.catchup().iter().map(|s| s.active_count).collect();
        assert_eq!(actives, [1, 2]);
    }

    #[test]
    fn test_evicts_oldest_past_capacity() {
        let mut buffer = ReplayBuffer::with_capacity(3);

        for i in 1..=5 {
            buffer.push(snap(i));
        }

        assert_eq!(buffer.len(), 3);
        let actives: Vec<u64> = buffer.catchup().iter().map(|s| s.active_count).collect();
        assert_eq!(actives, [3, 4, 5]);
    }

    #[test]
    fn test_zero_capacity_retains_nothing() {
        let mut buffer = ReplayBuffer::with_capacity(0);

        buffer.push(snap(1));

        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 0);
    }

    #[test]
    fn test_clear() {
        let mut buffer = ReplayBuffer::with_capacity(3);
        buffer.push(snap(1));
        buffer.push(snap(2));

        buffer.clear();

        assert!(buffer.is_empty());
    }
}
