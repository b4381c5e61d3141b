mod local_address;
mod metrics_store;
mod pressure_source;

pub use local_address::LocalAddressProvider;
pub use metrics_store::MetricsStore;
pub use pressure_source::PressureSource;
