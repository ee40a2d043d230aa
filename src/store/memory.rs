//! In-memory store implementation
//!
//! Thread-safe via `RwLock`. Read-heavy workloads (scans from multiple
//! concurrent pipelines, count queries from the stats generator) benefit
//! from the concurrent read access.

use std::collections::BTreeMap;

use tokio::sync::RwLock;

use super::user::User;

/// Concurrency-safe in-memory user store
///
/// Entries are kept in a `BTreeMap` so that full scans iterate in ascending
/// id order. Values are cloned out on read; callers never hold references
/// into the map.
pub struct UserStore {
    users: RwLock<BTreeMap<String, User>>,
}

impl UserStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a store pre-populated with the demo fixture users
    pub fn seeded() -> Self {
        let mut users = BTreeMap::new();
        for user in [
            User::new("1", "Alice", "alice@example.com"),
            User::new("2", "Bob", "bob@example.com"),
            User::new("3", "Charlie", "charlie@example.com"),
            User::new("4", "Dave", "dave@example.com"),
        ] {
            users.insert(user.id.clone(), user);
        }

        Self {
            users: RwLock::new(users),
        }
    }

    /// Look up a single user by id
    pub async fn find_by_id(&self, id: &str) -> Option<User> {
        self.users.read().await.get(id).cloned()
    }

    /// Return all users in ascending id order
    pub async fn find_all(&self) -> Vec<User> {
        self.users.read().await.values().cloned().collect()
    }

    /// Insert or replace a user, keyed by its id
    ///
    /// Returns the stored value.
    pub async fn save(&self, user: User) -> User {
        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user.clone());

        tracing::debug!(id = %user.id, total = users.len(), "User saved");
        user
    }

    /// Remove a user by id
    ///
    /// Returns `true` if an entry was removed.
    pub async fn delete(&self, id: &str) -> bool {
        let removed = self.users.write().await.remove(id).is_some();
        if removed {
            tracing::debug!(id = %id, "User deleted");
        }
        removed
    }

    /// Return all users whose name contains the given fragment
    ///
    /// Matching is case-sensitive; results keep store iteration order.
    pub async fn find_by_name_containing(&self, fragment: &str) -> Vec<User> {
        self.users
            .read()
            .await
            .values()
            .filter(|u| u.name.contains(fragment))
            .cloned()
            .collect()
    }

    /// Number of stored users
    pub async fn count(&self) -> u64 {
        self.users.read().await.len() as u64
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
