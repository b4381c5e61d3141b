//! Browser Pressure Exporter Library
//!
//! Scrapes a browser worker's `/pressure` endpoint on demand and
//! republishes it as Prometheus gauges. Exposed as a library for
//! integration tests.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use adapters::inbound::MetricsServer;
pub use adapters::outbound::{Gauge, HttpPressureClient, InterfaceScanner, MetricRegistry};
pub use application::{resolve, ScrapeService};
pub use config::{load_config, load_dotenv, Config, UpstreamSource};
pub use domain::entities::PressureSnapshot;
pub use domain::errors::{ConfigError, ScrapeError};
pub use domain::ports::{LocalAddressProvider, MetricsStore, PressureSource};
pub use domain::value_objects::TargetUrl;
