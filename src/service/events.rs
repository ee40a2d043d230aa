//! Pipeline observability hook
//!
//! The fallback and retry pipelines recover from failures internally, so
//! their callers never see what happened. The observer hook makes those
//! transitions visible: the service reports an event at each defined
//! transition point (resolved, recovered, retried, retry exhausted) and the
//! installed [`PipelineObserver`] decides what to do with it.

use std::sync::Mutex;

/// A transition inside a recovery pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// The lookup produced a value
    Resolved {
        /// Pipeline name ("fallback" or "retry")
        pipeline: &'static str,
        /// Requested user id
        id: String,
    },
    /// The lookup failed and the fallback value was substituted
    Recovered {
        /// Pipeline name
        pipeline: &'static str,
        /// Requested user id
        id: String,
    },
    /// A failed lookup is being retried
    Retried {
        /// Pipeline name
        pipeline: &'static str,
        /// Requested user id
        id: String,
        /// Retry number, starting at 1
        attempt: u32,
    },
    /// All retries failed; the error-indicator value was substituted
    RetryExhausted {
        /// Pipeline name
        pipeline: &'static str,
        /// Requested user id
        id: String,
        /// Number of retries performed
        attempts: u32,
    },
}

/// Receiver of pipeline events
pub trait PipelineObserver: Send + Sync {
    /// Called at each pipeline transition point
    fn on_event(&self, event: PipelineEvent);
}

/// Default observer: logs every event via `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_event(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::Resolved { pipeline, id } => {
                tracing::debug!(pipeline = pipeline, id = %id, "Pipeline resolved");
            }
            PipelineEvent::Recovered { pipeline, id } => {
                tracing::info!(pipeline = pipeline, id = %id, "Pipeline recovered with fallback");
            }
            PipelineEvent::Retried {
                pipeline,
                id,
                attempt,
            } => {
                tracing::debug!(pipeline = pipeline, id = %id, attempt = attempt, "Pipeline retrying");
            }
            PipelineEvent::RetryExhausted {
                pipeline,
                id,
                attempts,
            } => {
                tracing::warn!(
                    pipeline = pipeline,
                    id = %id,
                    attempts = attempts,
                    "Pipeline retries exhausted"
                );
            }
        }
    }
}

/// Observer that collects events in memory
///
/// Useful in tests to assert on the exact transition sequence.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<PipelineEvent>>,
}

impl RecordingObserver {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy out the recorded events in arrival order
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl PipelineObserver for RecordingObserver {
    fn on_event(&self, event: PipelineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer_collects_in_order() {
        let observer = RecordingObserver::new();

        observer.on_event(PipelineEvent::Retried {
            pipeline: "retry",
            id: "9".to_string(),
            attempt: 1,
        });
        observer.on_event(PipelineEvent::RetryExhausted {
            pipeline: "retry",
            id: "9".to_string(),
            attempts: 1,
        });

        let events = observer.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], PipelineEvent::Retried { attempt: 1, .. }));
        assert!(matches!(
            events[1],
            PipelineEvent::RetryExhausted { attempts: 1, .. }
        ));
    }
}
