//! browser-pressure-exporter
//!
//! Composition root: loads configuration, resolves the upstream target
//! once, and serves `/metrics`.

use browser_pressure_exporter::infrastructure::{debug_requested, init_logging, shutdown_signal};
use browser_pressure_exporter::{
    load_config, load_dotenv, resolve, HttpPressureClient, InterfaceScanner, MetricRegistry,
    MetricsServer, ScrapeService,
};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env goes first so it can also set DEBUG
    let dotenv = load_dotenv();
    init_logging(debug_requested());

    match dotenv {
        Ok(Some(path)) => tracing::debug!("loaded environment from {}", path.display()),
        Ok(None) => tracing::debug!("no .env file found, using process environment"),
        Err(e) => tracing::warn!("failed to load .env file: {}", e),
    }

    // Load configuration from environment
    let cfg = load_config()?;

    // Configuration errors stop us before the listener binds
    cfg.validate()?;
    let target = resolve(&cfg, &InterfaceScanner::new())?;

    tracing::info!(
        "starting browser-pressure-exporter target={} listen={} timeout={}s",
        target,
        cfg.listen_addr(),
        cfg.timeout_secs
    );

    // ===== COMPOSITION ROOT =====
    let client = Arc::new(HttpPressureClient::new(Duration::from_secs(cfg.timeout_secs))?);
    let registry = Arc::new(MetricRegistry::new());
    let service = Arc::new(ScrapeService::new(client, registry, target));

    let server = MetricsServer::new(cfg.listen_addr(), service);
    server.run(shutdown_signal()).await
}
