//! Pressure Source Port
//!
//! Defines the interface for fetching the upstream worker's load status.

use crate::domain::entities::PressureSnapshot;
use crate::domain::errors::ScrapeError;
use crate::domain::value_objects::TargetUrl;
use async_trait::async_trait;

/// Source of pressure snapshots.
///
/// This is an outbound port. Implementations perform exactly one upstream
/// request per call, without retries or caching, and must bound the call
/// with a timeout.
#[async_trait]
pub trait PressureSource: Send + Sync {
    /// Fetch a fresh snapshot from the given target.
    async fn fetch(&self, target: &TargetUrl) -> Result<PressureSnapshot, ScrapeError>;
}
