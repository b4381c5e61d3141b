//! Metrics Store Port
//!
//! Defines the interface for holding the published gauges.

use crate::domain::entities::PressureSnapshot;

/// Store for the exporter's gauges.
///
/// This is an outbound port. The scrape service writes every outcome into
/// it and reads back the rendered body it serves.
pub trait MetricsStore: Send + Sync {
    /// Apply a successful scrape. Absent fields keep their previous value.
    fn apply(&self, snapshot: &PressureSnapshot);

    /// Record a failed scrape without touching the last-known values.
    fn mark_down(&self);

    /// Render every gauge in the store's exposition format.
    fn render(&self) -> String;

    /// Content type of the body returned by `render`.
    fn content_type(&self) -> &'static str;
}
