//! Periodic snapshot generator

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::error::{Error, Result};
use crate::hub::{Snapshot, StatsHub};
use crate::store::UserStore;

use super::sampler::ActiveSampler;

/// Configuration options for [`StatsGenerator`]
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Time between snapshots
    pub interval: Duration,

    /// How long a single tick may wait on the store query before the tick
    /// is skipped
    pub query_timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            query_timeout: Duration::from_secs(1),
        }
    }
}

impl GeneratorConfig {
    /// Set the snapshot interval
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the per-tick query timeout
    pub fn query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }
}

/// Periodic producer of user-count snapshots
///
/// Owns its sampler; consumed by [`spawn`](StatsGenerator::spawn), which
/// moves the generator onto a background task. Abort the returned handle to
/// stop generation.
pub struct StatsGenerator<S: ActiveSampler> {
    store: Arc<UserStore>,
    hub: Arc<StatsHub>,
    sampler: S,
    config: GeneratorConfig,
}

impl<S: ActiveSampler> StatsGenerator<S> {
    /// Create a generator with default configuration
    pub fn new(store: Arc<UserStore>, hub: Arc<StatsHub>, sampler: S) -> Self {
        Self::with_config(store, hub, sampler, GeneratorConfig::default())
    }

    /// Create a generator with custom configuration
    pub fn with_config(
        store: Arc<UserStore>,
        hub: Arc<StatsHub>,
        sampler: S,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            store,
            hub,
            sampler,
            config,
        }
    }

    /// Get the generator configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run a single generation cycle
    ///
    /// Counts the stored users (bounded by the query timeout), derives an
    /// active count, and publishes the snapshot. Returns the published
    /// snapshot, or `Error::StatsQueryUnavailable` if the store query timed
    /// out, in which case nothing is published.
    pub async fn tick_once(&mut self) -> Result<Snapshot> {
        let total = tokio::time::timeout(self.config.query_timeout, self.store.count())
            .await
            .map_err(|_| Error::StatsQueryUnavailable)?;

        let active = self.sampler.sample(total).min(total);
        let snapshot = Snapshot::new(Utc::now(), active, total);

        self.hub.publish(snapshot.clone()).await;
        Ok(snapshot)
    }

    /// Spawn the periodic generation loop
    ///
    /// Emits one snapshot per interval. A failed tick is logged at warn and
    /// skipped; the next scheduled tick proceeds independently. Returns a
    /// handle that can be used to abort the loop.
    pub fn spawn(mut self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.config.interval);
            // interval's first tick completes immediately; consume it so
            // the first snapshot lands one full interval after spawn
            ticker.tick().await;

            loop {
                ticker.tick().await;

                match self.tick_once().await {
                    Ok(snapshot) => {
                        tracing::debug!(
                            active = snapshot.active_count,
                            total = snapshot.total_count,
                            "Generated stats"
                        );
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Stats tick skipped");
                    }
                }
            }
        })
    }
}
