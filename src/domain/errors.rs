//! Domain Errors
//!
//! Configuration errors abort startup. Scrape errors are recoverable and
//! only ever degrade the exporter to serving last-known values.

/// Fatal configuration errors, raised before the listener binds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing upstream address: set BROWSER_URL, or BROWSER_PORT with an optional BROWSER_HOST")]
    MissingUpstream,
    #[error("invalid upstream address {url:?}: {reason}")]
    InvalidUpstreamUrl { url: String, reason: String },
    #[error("no local address available: BROWSER_HOST is unset and no non-loopback IPv4 interface was found")]
    NoLocalAddress,
    #[error("BROWSER_TIMEOUT_SECS must be greater than zero")]
    InvalidTimeout,
}

/// Failure of a single upstream pressure scrape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScrapeError {
    /// Connection refused, DNS failure, timeout or any other transport error.
    #[error("upstream unreachable: {0}")]
    Unreachable(String),
    /// Upstream answered with a non-2xx status.
    #[error("upstream returned HTTP {0}")]
    UpstreamStatus(u16),
    /// Body is not JSON, or lacks a well-formed `pressure` object.
    #[error("malformed pressure response: {0}")]
    MalformedResponse(String),
}

impl ScrapeError {
    /// Short stable label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unreachable(_) => "unreachable",
            Self::UpstreamStatus(_) => "upstream_status",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }
}
