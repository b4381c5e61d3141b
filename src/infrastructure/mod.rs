//! Infrastructure Layer
//!
//! Process-level concerns: logging setup and signal-driven shutdown.

pub mod logging;
pub mod shutdown;

pub use logging::{debug_requested, init_logging};
pub use shutdown::shutdown_signal;
