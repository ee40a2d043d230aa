//! Periodic stats generation
//!
//! A single producer on a timer: every interval it counts the stored users,
//! derives an active-user figure from a pluggable sampler, and publishes
//! the resulting snapshot to the hub. A failed tick is logged and skipped;
//! the schedule itself never stops.

pub mod generator;
pub mod sampler;

pub use generator::{GeneratorConfig, StatsGenerator};
pub use sampler::{ActiveSampler, RandomSampler, SequenceSampler};
