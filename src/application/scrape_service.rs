//! Scrape Service - Application Layer
//!
//! Orchestrates one metrics request: fetch pressure from upstream,
//! update the registry, render the exposition body.
//!
//! A failed upstream fetch never fails the request. It is logged and
//! the registry's last-known values are served instead.

use crate::domain::entities::PressureSnapshot;
use crate::domain::errors::ScrapeError;
use crate::domain::ports::{MetricsStore, PressureSource};
use crate::domain::value_objects::TargetUrl;
use std::sync::Arc;

/// Request-driven scrape pipeline.
///
/// There is no background polling: every call to [`ScrapeService::scrape`]
/// issues exactly one upstream request against the target resolved at
/// startup.
pub struct ScrapeService {
    source: Arc<dyn PressureSource>,
    registry: Arc<dyn MetricsStore>,
    target: TargetUrl,
}

impl ScrapeService {
    pub fn new(
        source: Arc<dyn PressureSource>,
        registry: Arc<dyn MetricsStore>,
        target: TargetUrl,
    ) -> Self {
        Self {
            source,
            registry,
            target,
        }
    }

    pub fn target(&self) -> &TargetUrl {
        &self.target
    }

    pub fn registry(&self) -> &dyn MetricsStore {
        self.registry.as_ref()
    }

    /// Fetch once and apply the result to the registry.
    ///
    /// On failure `browser_up` drops to 0 and every other gauge keeps its
    /// previous value.
    pub async fn refresh(&self) -> Result<PressureSnapshot, ScrapeError> {
        match self.source.fetch(&self.target).await {
            Ok(snapshot) => {
                self.registry.apply(&snapshot);
                tracing::debug!(
                    running = snapshot.running,
                    queued = snapshot.queued,
                    "scraped browser pressure"
                );
                Ok(snapshot)
            }
            Err(e) => {
                self.registry.mark_down();
                tracing::error!(
                    target_url = %self.target,
                    kind = e.kind(),
                    error = %e,
                    "failed to scrape browser pressure"
                );
                Err(e)
            }
        }
    }

    /// Refresh, then render the registry. Always yields a full body.
    pub async fn scrape(&self) -> String {
        // Failures are already logged by refresh
        let _ = self.refresh().await;
        self.registry.render()
    }
}
