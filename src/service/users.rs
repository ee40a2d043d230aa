//! User service pipelines

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::error::{Error, Result};
use crate::store::{User, UserStore, UserSummary};

use super::config::ServiceConfig;
use super::events::{PipelineEvent, PipelineObserver, TracingObserver};

/// Role labels zipped against the user sequence
pub const ROLE_LABELS: [&str; 4] = ["Admin", "Editor", "Viewer", "Guest"];

/// Stream-composition service over the user store
///
/// Every method is request-scoped: it reads the store at call time and
/// returns either a value or a freshly spawned paced sequence. The service
/// is cheap to share (`Arc` it) and holds no per-request state.
pub struct UserService {
    store: Arc<UserStore>,
    observer: Arc<dyn PipelineObserver>,
    config: ServiceConfig,
}

impl UserService {
    /// Create a service with default configuration and tracing observer
    pub fn new(store: Arc<UserStore>) -> Self {
        Self::with_config(store, ServiceConfig::default())
    }

    /// Create a service with custom configuration
    pub fn with_config(store: Arc<UserStore>, config: ServiceConfig) -> Self {
        Self {
            store,
            observer: Arc::new(TracingObserver),
            config,
        }
    }

    /// Replace the pipeline observer
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Get the service configuration
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    // --- CRUD pass-throughs ---

    /// Store a new user
    pub async fn create_user(&self, user: User) -> User {
        self.store.save(user).await
    }

    /// Update the user stored under `id`
    ///
    /// The path id wins over whatever id the payload carries.
    pub async fn update_user(&self, id: &str, mut user: User) -> User {
        user.id = id.to_string();
        self.store.save(user).await
    }

    /// Delete a user; returns whether an entry was removed
    pub async fn delete_user(&self, id: &str) -> bool {
        self.store.delete(id).await
    }

    // --- Delayed lookups and paced enumerations ---

    /// Point lookup with simulated latency
    ///
    /// A found value is delivered after `lookup_delay`; an absent result
    /// resolves immediately.
    pub async fn get_user(&self, id: &str) -> Option<User> {
        let user = self.store.find_by_id(id).await;
        if user.is_some() {
            tokio::time::sleep(self.config.lookup_delay).await;
        }
        user
    }

    /// Full scan, one element per `scan_delay`, store order preserved
    pub async fn stream_all(&self) -> mpsc::Receiver<User> {
        let users = self.store.find_all().await;
        self.paced(users, self.config.scan_delay)
    }

    /// Users whose name contains `fragment`, paced by `search_delay`
    ///
    /// Matching is case-sensitive.
    pub async fn search_by_name(&self, fragment: &str) -> mpsc::Receiver<User> {
        let users = self.store.find_by_name_containing(fragment).await;
        self.paced(users, self.config.search_delay)
    }

    // --- Projection ---

    /// Single-user projection; no simulated latency
    pub async fn get_summary(&self, id: &str) -> Option<UserSummary> {
        self.store
            .find_by_id(id)
            .await
            .map(|user| UserSummary::from_user(&user))
    }

    /// Paced projection of the full scan
    pub async fn stream_summaries(&self) -> mpsc::Receiver<UserSummary> {
        let summaries: Vec<UserSummary> = self
            .store
            .find_all()
            .await
            .into_iter()
            .map(UserSummary::from)
            .collect();
        self.paced(summaries, self.config.summary_delay)
    }

    /// Per-element delayed projection
    ///
    /// Every element independently waits `summary_delay` before being
    /// projected and emitted, all concurrently: the whole sequence
    /// completes after roughly one delay, and emission order follows
    /// completion, not store order.
    pub async fn stream_summaries_slow(&self) -> mpsc::Receiver<UserSummary> {
        let (tx, rx) = mpsc::channel(self.config.channel_capacity);
        let users = self.store.find_all().await;
        let delay = self.config.summary_delay;

        for user in users {
            let tx = tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = tx.send(UserSummary::from(user)).await;
            });
        }

        rx
    }

    // --- Recovery pipelines ---

    /// Lookup that substitutes a fixed default on absence
    ///
    /// Never fails: a missing id raises `UserNotFound` internally, which is
    /// recovered to [`User::fallback_default`]. The observer sees either a
    /// `Resolved` or a `Recovered` event.
    pub async fn get_user_or_default(&self, id: &str) -> User {
        match self.lookup_required(id).await {
            Ok(user) => {
                self.observer.on_event(PipelineEvent::Resolved {
                    pipeline: "fallback",
                    id: id.to_string(),
                });
                user
            }
            Err(e) => {
                tracing::info!(error = %e, "Substituting default user");
                self.observer.on_event(PipelineEvent::Recovered {
                    pipeline: "fallback",
                    id: id.to_string(),
                });
                User::fallback_default()
            }
        }
    }

    /// Lookup retried on absence, with an error-indicator fallback
    ///
    /// The whole fetch is re-run up to `retry_attempts` times after the
    /// first failure, immediately and without backoff. A lookup that still
    /// fails returns [`User::retry_exhausted`] rather than an error. The
    /// observer sees one `Retried` event per retry and a final
    /// `RetryExhausted` if none succeeded.
    pub async fn get_user_with_retry(&self, id: &str) -> User {
        if let Ok(user) = self.lookup_required(id).await {
            self.observer.on_event(PipelineEvent::Resolved {
                pipeline: "retry",
                id: id.to_string(),
            });
            return user;
        }

        for attempt in 1..=self.config.retry_attempts {
            self.observer.on_event(PipelineEvent::Retried {
                pipeline: "retry",
                id: id.to_string(),
                attempt,
            });

            if let Ok(user) = self.lookup_required(id).await {
                self.observer.on_event(PipelineEvent::Resolved {
                    pipeline: "retry",
                    id: id.to_string(),
                });
                return user;
            }
        }

        tracing::warn!(
            id = %id,
            attempts = self.config.retry_attempts,
            "Lookup failed after retries"
        );
        self.observer.on_event(PipelineEvent::RetryExhausted {
            pipeline: "retry",
            id: id.to_string(),
            attempts: self.config.retry_attempts,
        });
        User::retry_exhausted()
    }

    async fn lookup_required(&self, id: &str) -> Result<User> {
        self.store
            .find_by_id(id)
            .await
            .ok_or_else(|| Error::UserNotFound(id.to_string()))
    }

    // --- Combinators ---

    /// Zip users (store order) with the fixed role labels
    ///
    /// See [`zip_with_roles`](Self::zip_with_roles).
    pub async fn users_with_roles(&self) -> Vec<String> {
        self.zip_with_roles(&ROLE_LABELS).await
    }

    /// Zip users (store order) positionally with arbitrary role labels
    ///
    /// Combination stops at the shorter of the two sequences. Each pair is
    /// formatted as `"{name} as {role}"`.
    pub async fn zip_with_roles(&self, roles: &[&str]) -> Vec<String> {
        self.store
            .find_all()
            .await
            .iter()
            .zip(roles.iter())
            .map(|(user, role)| format!("{} as {}", user.name, role))
            .collect()
    }

    /// Interleave two partitions of the store by arrival time
    ///
    /// The first `partition_size` users are paced at `fast_delay`, the
    /// remainder at `slow_delay`, both feeding the same channel: whichever
    /// element's timer fires first is delivered first.
    pub async fn merged(&self) -> mpsc::Receiver<User> {
        let (first, second) = self.partitions().await;
        let (tx, rx) = mpsc::channel(self.config.channel_capacity);

        spawn_paced(first, self.config.fast_delay, tx.clone());
        spawn_paced(second, self.config.slow_delay, tx);

        rx
    }

    /// Append the second partition after the first
    ///
    /// All of the first partition's elements (paced at
    /// `concat_first_delay`) are delivered before any of the second's
    /// (paced at `concat_second_delay`), regardless of relative pacing.
    pub async fn concatenated(&self) -> mpsc::Receiver<User> {
        let (first, second) = self.partitions().await;
        let (tx, rx) = mpsc::channel(self.config.channel_capacity);
        let first_delay = self.config.concat_first_delay;
        let second_delay = self.config.concat_second_delay;

        tokio::spawn(async move {
            if send_all_paced(first, first_delay, &tx).await {
                send_all_paced(second, second_delay, &tx).await;
            }
        });

        rx
    }

    /// Split the store (iteration order) at `partition_size`
    async fn partitions(&self) -> (Vec<User>, Vec<User>) {
        let mut first = self.store.find_all().await;
        let split = self.config.partition_size.min(first.len());
        let second = first.split_off(split);
        (first, second)
    }

    /// Spawn a producer pacing `items` into a fresh channel
    fn paced<T: Send + 'static>(&self, items: Vec<T>, delay: Duration) -> mpsc::Receiver<T> {
        let (tx, rx) = mpsc::channel(self.config.channel_capacity);
        spawn_paced(items, delay, tx);
        rx
    }
}

/// Send each item after `delay`, stopping when the receiver is gone
///
/// Returns `true` if every item was delivered.
async fn send_all_paced<T: Send + 'static>(
    items: Vec<T>,
    delay: Duration,
    tx: &mpsc::Sender<T>,
) -> bool {
    for item in items {
        tokio::time::sleep(delay).await;
        if tx.send(item).await.is_err() {
            // receiver dropped; stop pacing
            return false;
        }
    }
    true
}

fn spawn_paced<T: Send + 'static>(items: Vec<T>, delay: Duration, tx: mpsc::Sender<T>) {
    tokio::spawn(async move {
        send_all_paced(items, delay, &tx).await;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::events::RecordingObserver;
    use tokio::time::Instant;

    fn service() -> UserService {
        UserService::new(Arc::new(UserStore::seeded()))
    }

    fn observed_service() -> (UserService, Arc<RecordingObserver>) {
        let observer = Arc::new(RecordingObserver::new());
        let service = service().with_observer(Arc::clone(&observer) as Arc<dyn PipelineObserver>);
        (service, observer)
    }

    async fn collect<T>(mut rx: mpsc::Receiver<T>) -> Vec<T> {
        let mut out = Vec::new();
        while let Some(item) = rx.recv().await {
            out.push(item);
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_user_delays_found_value() {
        let service = service();

        let started = Instant::now();
        let user = service.get_user("1").await.unwrap();

        assert_eq!(user.name, "Alice");
        assert_eq!(started.elapsed(), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_user_absent_resolves_immediately() {
        let service = service();

        let started = Instant::now();
        assert!(service.get_user("999").await.is_none());
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_lookup_observes_update() {
        let service = service();

        assert_eq!(service.get_user("1").await.unwrap().name, "Alice");

        service
            .update_user("1", User::new("ignored", "Alicia", "alicia@example.com"))
            .await;

        let updated = service.get_user("1").await.unwrap();
        assert_eq!(updated.id, "1");
        assert_eq!(updated.name, "Alicia");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_all_paced_in_store_order() {
        let service = service();

        let started = Instant::now();
        let users = collect(service.stream_all().await).await;

        let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);
        assert_eq!(started.elapsed(), Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_by_name() {
        let service = service();

        let hits = collect(service.search_by_name("li").await).await;
        let names: Vec<&str> = hits.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Charlie"]);

        assert!(collect(service.search_by_name("zzz").await).await.is_empty());
    }

    #[tokio::test]
    async fn test_get_summary() {
        let service = service();

        let summary = service.get_summary("2").await.unwrap();
        assert_eq!(summary.id, "2");
        assert_eq!(summary.name, "Bob");

        assert!(service.get_summary("999").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_summaries_paced() {
        let service = service();

        let summaries = collect(service.stream_summaries().await).await;
        let ids: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_summaries_slow_is_concurrent() {
        let service = service();

        let started = Instant::now();
        let summaries = collect(service.stream_summaries_slow().await).await;

        // Four elements, each delayed 100ms concurrently: the whole
        // sequence completes after one delay, not four
        assert_eq!(summaries.len(), 4);
        assert_eq!(started.elapsed(), Duration::from_millis(100));

        let mut ids: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, ["1", "2", "3", "4"]);
    }

    #[tokio::test]
    async fn test_fallback_present() {
        let (service, observer) = observed_service();

        let user = service.get_user_or_default("1").await;
        assert_eq!(user.name, "Alice");

        assert_eq!(
            observer.events(),
            [PipelineEvent::Resolved {
                pipeline: "fallback",
                id: "1".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_fallback_absent_substitutes_default() {
        let (service, observer) = observed_service();

        let user = service.get_user_or_default("999").await;
        assert_eq!(user, User::fallback_default());

        assert_eq!(
            observer.events(),
            [PipelineEvent::Recovered {
                pipeline: "fallback",
                id: "999".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_retry_present_resolves_without_retries() {
        let (service, observer) = observed_service();

        let user = service.get_user_with_retry("2").await;
        assert_eq!(user.name, "Bob");

        assert_eq!(
            observer.events(),
            [PipelineEvent::Resolved {
                pipeline: "retry",
                id: "2".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_retry_exhausts_exact_attempt_count() {
        let (service, observer) = observed_service();

        let user = service.get_user_with_retry("999").await;
        assert_eq!(user, User::retry_exhausted());

        // One initial attempt plus exactly three retries
        assert_eq!(
            observer.events(),
            [
                PipelineEvent::Retried {
                    pipeline: "retry",
                    id: "999".to_string(),
                    attempt: 1,
                },
                PipelineEvent::Retried {
                    pipeline: "retry",
                    id: "999".to_string(),
                    attempt: 2,
                },
                PipelineEvent::Retried {
                    pipeline: "retry",
                    id: "999".to_string(),
                    attempt: 3,
                },
                PipelineEvent::RetryExhausted {
                    pipeline: "retry",
                    id: "999".to_string(),
                    attempts: 3,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_retry_zero_budget_goes_straight_to_exhausted() {
        let observer = Arc::new(RecordingObserver::new());
        let service = UserService::with_config(
            Arc::new(UserStore::seeded()),
            ServiceConfig::default().retry_attempts(0),
        )
        .with_observer(Arc::clone(&observer) as Arc<dyn PipelineObserver>);

        let user = service.get_user_with_retry("404").await;
        assert_eq!(user, User::retry_exhausted());
        assert_eq!(
            observer.events(),
            [PipelineEvent::RetryExhausted {
                pipeline: "retry",
                id: "404".to_string(),
                attempts: 0,
            }]
        );
    }

    #[tokio::test]
    async fn test_zip_equal_lengths() {
        let service = service();

        let pairs = service.users_with_roles().await;
        assert_eq!(
            pairs,
            [
                "Alice as Admin",
                "Bob as Editor",
                "Charlie as Viewer",
                "Dave as Guest",
            ]
        );
    }

    #[tokio::test]
    async fn test_zip_truncates_to_shorter_roles() {
        let service = service();

        let pairs = service.zip_with_roles(&["Admin", "Editor", "Viewer"]).await;
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[2], "Charlie as Viewer");
    }

    #[tokio::test]
    async fn test_zip_truncates_to_shorter_users() {
        let store = Arc::new(UserStore::new());
        let service = UserService::new(Arc::clone(&store));
        store.save(User::new("1", "Alice", "a@example.com")).await;
        store.save(User::new("2", "Bob", "b@example.com")).await;

        let pairs = service.users_with_roles().await;
        assert_eq!(pairs, ["Alice as Admin", "Bob as Editor"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_merged_fast_partition_arrives_first() {
        let service = UserService::with_config(
            Arc::new(UserStore::seeded()),
            ServiceConfig::default()
                .merge_delays(Duration::from_millis(50), Duration::from_millis(200)),
        );

        // Fast partition: 1@50ms, 2@100ms; slow partition: 3@200ms, 4@400ms
        let users = collect(service.merged().await).await;
        let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_merged_interleaves_by_arrival() {
        let service = UserService::with_config(
            Arc::new(UserStore::seeded()),
            ServiceConfig::default()
                .merge_delays(Duration::from_millis(50), Duration::from_millis(80)),
        );

        // Arrivals: 1@50, 3@80, 2@100, 4@160
        let users = collect(service.merged().await).await;
        let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["1", "3", "2", "4"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concat_order_independent_of_pacing() {
        // First partition much slower than the second: concat still
        // delivers the whole first partition before the second
        let service = UserService::with_config(
            Arc::new(UserStore::seeded()),
            ServiceConfig::default()
                .concat_delays(Duration::from_millis(200), Duration::from_millis(30)),
        );

        let users = collect(service.concatenated().await).await;
        let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_partition_covers_whole_store() {
        let service = UserService::with_config(
            Arc::new(UserStore::seeded()),
            ServiceConfig::default().partition_size(10),
        );

        // Oversized first partition: everything merges from the fast lane
        let users = collect(service.merged().await).await;
        assert_eq!(users.len(), 4);
    }

    #[tokio::test]
    async fn test_crud_round_trip() {
        let service = service();

        let eve = service
            .create_user(User::new("5", "Eve", "eve@example.com"))
            .await;
        assert_eq!(eve.id, "5");
        assert_eq!(service.get_user("5").await.unwrap().name, "Eve");

        assert!(service.delete_user("5").await);
        assert!(service.get_user("5").await.is_none());
        assert!(!service.delete_user("5").await);
    }
}
