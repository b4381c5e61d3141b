//! Domain Entities - Core business objects
//!
//! These entities have no external dependencies and contain only
//! business logic.

use crate::domain::value_objects::Utilization;

/// Load status reported by the upstream browser worker.
///
/// Produced fresh by every successful scrape and replaced wholesale by the
/// next one. Optional fields are `None` when the upstream variant does not
/// report them; absence is never treated as zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PressureSnapshot {
    /// Sessions currently running
    pub running: u64,
    /// Sessions waiting in the queue
    pub queued: u64,
    /// Concurrency capacity
    pub max_concurrent: Option<u64>,
    /// Queue capacity
    pub max_queued: Option<u64>,
    /// CPU utilization as a fraction
    pub cpu: Option<f64>,
    /// Memory utilization as a fraction
    pub memory: Option<f64>,
    /// Sessions recently rejected for lack of capacity
    pub recently_rejected: Option<u64>,
    /// Whether the worker currently accepts new sessions
    pub available: Option<bool>,
}

impl PressureSnapshot {
    /// Snapshot carrying only the two mandatory counters.
    pub fn new(running: u64, queued: u64) -> Self {
        Self {
            running,
            queued,
            ..Default::default()
        }
    }

    /// Running sessions as a percentage of `max_concurrent`.
    pub fn concurrent_utilization(&self) -> Option<Utilization> {
        Utilization::from_ratio(self.running, self.max_concurrent)
    }

    /// Queued sessions as a percentage of `max_queued`.
    pub fn queued_utilization(&self) -> Option<Utilization> {
        Utilization::from_ratio(self.queued, self.max_queued)
    }
}
