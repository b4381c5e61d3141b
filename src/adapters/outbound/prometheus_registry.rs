//! Prometheus Metric Registry
//!
//! Holds the exporter's gauges and renders them in Prometheus text
//! exposition format.

use crate::domain::entities::PressureSnapshot;
use crate::domain::ports::MetricsStore;
use parking_lot::Mutex;

/// Content type of the rendered exposition body.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

const GAUGE_COUNT: usize = 11;

/// Every gauge the exporter publishes, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gauge {
    Running,
    Queued,
    ConcurrentUtilization,
    QueuedUtilization,
    MaxConcurrent,
    MaxQueued,
    Cpu,
    Memory,
    RecentlyRejected,
    Available,
    Up,
}

impl Gauge {
    pub const ALL: [Gauge; GAUGE_COUNT] = [
        Gauge::Running,
        Gauge::Queued,
        Gauge::ConcurrentUtilization,
        Gauge::QueuedUtilization,
        Gauge::MaxConcurrent,
        Gauge::MaxQueued,
        Gauge::Cpu,
        Gauge::Memory,
        Gauge::RecentlyRejected,
        Gauge::Available,
        Gauge::Up,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Running => "browser_running",
            Self::Queued => "browser_queued",
            Self::ConcurrentUtilization => "browser_concurrent_utilization",
            Self::QueuedUtilization => "browser_queued_utilization",
            Self::MaxConcurrent => "browser_max_concurrent",
            Self::MaxQueued => "browser_max_queued",
            Self::Cpu => "browser_cpu",
            Self::Memory => "browser_memory",
            Self::RecentlyRejected => "browser_recently_rejected",
            Self::Available => "browser_available",
            Self::Up => "browser_up",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            Self::Running => "Number of browser sessions currently running",
            Self::Queued => "Number of browser sessions waiting in the queue",
            Self::ConcurrentUtilization => "Running sessions as a percentage of max concurrency",
            Self::QueuedUtilization => "Queued sessions as a percentage of max queue length",
            Self::MaxConcurrent => "Maximum number of concurrent sessions",
            Self::MaxQueued => "Maximum number of queued sessions",
            Self::Cpu => "CPU utilization reported by the browser worker",
            Self::Memory => "Memory utilization reported by the browser worker",
            Self::RecentlyRejected => "Number of sessions recently rejected",
            Self::Available => "Whether the browser worker accepts new sessions (1) or not (0)",
            Self::Up => "Whether the last pressure scrape succeeded (1) or failed (0)",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

type GaugeValues = [f64; GAUGE_COUNT];

/// Last-write-wins gauge state.
///
/// All values start at zero. A single lock guards the whole set, so a
/// snapshot is applied atomically and `render` never observes a mix of
/// two snapshots.
pub struct MetricRegistry {
    values: Mutex<GaugeValues>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self {
            values: Mutex::new([0.0; GAUGE_COUNT]),
        }
    }

    /// Current value of a gauge.
    pub fn get(&self, gauge: Gauge) -> f64 {
        self.values.lock()[gauge.index()]
    }
}

impl MetricsStore for MetricRegistry {
    /// Utilizations whose capacity is absent or zero keep their previous
    /// value too.
    fn apply(&self, snapshot: &PressureSnapshot) {
        let mut values = self.values.lock();

        let mut set = |gauge: Gauge, value: Option<f64>| {
            if let Some(v) = value.filter(|v| v.is_finite()) {
                values[gauge.index()] = v;
            }
        };

        set(Gauge::Running, Some(snapshot.running as f64));
        set(Gauge::Queued, Some(snapshot.queued as f64));
        set(
            Gauge::ConcurrentUtilization,
            snapshot.concurrent_utilization().map(|u| u.value()),
        );
        set(
            Gauge::QueuedUtilization,
            snapshot.queued_utilization().map(|u| u.value()),
        );
        set(Gauge::MaxConcurrent, snapshot.max_concurrent.map(|v| v as f64));
        set(Gauge::MaxQueued, snapshot.max_queued.map(|v| v as f64));
        set(Gauge::Cpu, snapshot.cpu);
        set(Gauge::Memory, snapshot.memory);
        set(
            Gauge::RecentlyRejected,
            snapshot.recently_rejected.map(|v| v as f64),
        );
        set(Gauge::Available, snapshot.available.map(bool_to_f64));
        set(Gauge::Up, Some(1.0));
    }

    /// Only `browser_up` changes.
    fn mark_down(&self) {
        self.values.lock()[Gauge::Up.index()] = 0.0;
    }

    /// Render all gauges in Prometheus text format.
    fn render(&self) -> String {
        let values = *self.values.lock();

        let mut output = String::with_capacity(2048);
        for gauge in Gauge::ALL {
            output.push_str(&format!("# HELP {} {}\n", gauge.name(), gauge.help()));
            output.push_str(&format!("# TYPE {} gauge\n", gauge.name()));
            output.push_str(&format!(
                "{} {}\n",
                gauge.name(),
                format_value(values[gauge.index()])
            ));
        }
        output
    }

    fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn bool_to_f64(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

fn format_value(value: f64) -> String {
    if value.is_finite() {
        format!("{}", value)
    } else {
        "0".to_string()
    }
}
