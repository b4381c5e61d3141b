//! HTTP Pressure Client
//!
//! Implements PressureSource by calling the browser worker's
//! `/pressure` endpoint over HTTP.

use crate::domain::entities::PressureSnapshot;
use crate::domain::errors::ScrapeError;
use crate::domain::ports::PressureSource;
use crate::domain::value_objects::TargetUrl;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Largest upstream body accepted. A pressure report is a few hundred bytes.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Response body of the upstream pressure endpoint.
#[derive(Debug, Deserialize)]
struct PressureResponse {
    pressure: Option<PressureBody>,
}

/// The `pressure` object. Only `running` and `queued` are mandatory;
/// some upstream variants omit the rest.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PressureBody {
    running: u64,
    queued: u64,
    max_concurrent: Option<u64>,
    max_queued: Option<u64>,
    cpu: Option<f64>,
    memory: Option<f64>,
    recently_rejected: Option<u64>,
    is_available: Option<bool>,
}

impl From<PressureBody> for PressureSnapshot {
    fn from(body: PressureBody) -> Self {
        Self {
            running: body.running,
            queued: body.queued,
            max_concurrent: body.max_concurrent,
            max_queued: body.max_queued,
            cpu: body.cpu,
            memory: body.memory,
            recently_rejected: body.recently_rejected,
            available: body.is_available,
        }
    }
}

/// Parse an upstream response body into a snapshot.
pub fn parse_pressure(body: &[u8]) -> Result<PressureSnapshot, ScrapeError> {
    let response: PressureResponse = serde_json::from_slice(body)
        .map_err(|e| ScrapeError::MalformedResponse(e.to_string()))?;

    response
        .pressure
        .map(PressureSnapshot::from)
        .ok_or_else(|| ScrapeError::MalformedResponse("missing pressure field".to_string()))
}

/// Pressure source backed by a `reqwest` client with a fixed timeout.
pub struct HttpPressureClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpPressureClient {
    /// Create a client whose every request is bounded by `timeout`.
    ///
    /// Redirects are not followed, so a 3xx upstream reports as
    /// `UpstreamStatus`.
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The URL is stripped from the cause because it may carry the token.
    fn transport_error(&self, e: reqwest::Error) -> ScrapeError {
        if e.is_timeout() {
            ScrapeError::Unreachable(format!("timed out after {:?}", self.timeout))
        } else {
            ScrapeError::Unreachable(error_chain(&e.without_url()))
        }
    }
}

fn body_too_large() -> ScrapeError {
    ScrapeError::MalformedResponse(format!("body exceeds {} bytes", MAX_BODY_BYTES))
}

/// Render an error with its causes, `outer: inner: root`.
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

#[async_trait]
impl PressureSource for HttpPressureClient {
    async fn fetch(&self, target: &TargetUrl) -> Result<PressureSnapshot, ScrapeError> {
        let mut resp = self
            .client
            .get(target.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::UpstreamStatus(status.as_u16()));
        }

        if resp
            .content_length()
            .is_some_and(|len| len > MAX_BODY_BYTES as u64)
        {
            return Err(body_too_large());
        }

        // Chunked bodies carry no length, so the cap is enforced while reading
        let mut body = Vec::new();
        while let Some(chunk) = resp.chunk().await.map_err(|e| self.transport_error(e))? {
            if body.len() + chunk.len() > MAX_BODY_BYTES {
                return Err(body_too_large());
            }
            body.extend_from_slice(&chunk);
        }
        parse_pressure(&body)
    }
}
