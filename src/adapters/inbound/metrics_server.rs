//! Metrics HTTP Server
//!
//! Serves `GET /metrics` in Prometheus text format. Each request
//! triggers one upstream scrape; the response is 200 whether or not
//! that scrape succeeded.

use crate::application::ScrapeService;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Build the exporter's router.
pub fn router(service: Arc<ScrapeService>) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// HTTP listener for the metrics endpoint.
pub struct MetricsServer {
    listen_addr: String,
    service: Arc<ScrapeService>,
}

impl MetricsServer {
    pub fn new(listen_addr: String, service: Arc<ScrapeService>) -> Self {
        Self {
            listen_addr,
            service,
        }
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run<F>(&self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!("metrics endpoint listening on {}", self.listen_addr);
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, router(self.service.clone()))
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("metrics endpoint stopped");
        Ok(())
    }
}

// Handler functions

async fn metrics_handler(State(service): State<Arc<ScrapeService>>) -> impl IntoResponse {
    let body = service.scrape().await;
    let content_type = service.registry().content_type();
    (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body)
}
