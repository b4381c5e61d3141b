//! Domain Layer
//!
//! Pressure snapshots, utilization rules, error taxonomy and ports.
//! Free of I/O.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod value_objects;

pub use entities::PressureSnapshot;
pub use errors::{ConfigError, ScrapeError};
pub use value_objects::{TargetUrl, Utilization};
