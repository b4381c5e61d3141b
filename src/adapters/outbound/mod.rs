mod http_pressure_client;
mod interface_scanner;
mod prometheus_registry;

pub use http_pressure_client::{parse_pressure, HttpPressureClient, MAX_BODY_BYTES};
pub use interface_scanner::InterfaceScanner;
pub use prometheus_registry::{Gauge, MetricRegistry, CONTENT_TYPE};
