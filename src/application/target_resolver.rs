//! Target Resolver
//!
//! Turns the upstream configuration into the pressure endpoint URL.
//! Called once at startup; the result is reused for the process lifetime.

use crate::config::{Config, UpstreamSource};
use crate::domain::errors::ConfigError;
use crate::domain::ports::LocalAddressProvider;
use crate::domain::value_objects::TargetUrl;
use reqwest::Url;

/// Path of the upstream pressure status endpoint.
pub const PRESSURE_PATH: &str = "/pressure";

/// Resolve the upstream pressure endpoint from configuration.
///
/// The configured path is replaced by [`PRESSURE_PATH`]. Existing query
/// parameters are kept, except `token`, which is set from the configured
/// token. A missing token is logged as a warning and is not an error.
pub fn resolve(
    config: &Config,
    local: &dyn LocalAddressProvider,
) -> Result<TargetUrl, ConfigError> {
    let base = match &config.upstream {
        None => return Err(ConfigError::MissingUpstream),
        Some(UpstreamSource::Url(url)) => url.clone(),
        Some(UpstreamSource::HostPort { host, port }) => {
            let host = match host {
                Some(h) if h.contains(':') && !h.starts_with('[') => format!("[{}]", h),
                Some(h) => h.clone(),
                None => {
                    let ip = local
                        .first_non_loopback_ipv4()
                        .ok_or(ConfigError::NoLocalAddress)?;
                    tracing::info!("BROWSER_HOST not set, using local address {}", ip);
                    ip.to_string()
                }
            };
            format!("http://{}:{}", host, port)
        }
    };

    let invalid = |reason: String| ConfigError::InvalidUpstreamUrl {
        url: base.clone(),
        reason,
    };

    let mut url = Url::parse(&base).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }

    url.set_path(PRESSURE_PATH);

    match config.token.as_deref() {
        Some(token) => {
            let retained: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(k, _)| k != "token")
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            url.query_pairs_mut()
                .clear()
                .extend_pairs(retained)
                .append_pair("token", token);
        }
        None => {
            tracing::warn!("BROWSER_TOKEN is not set, scraping upstream without a token");
        }
    }

    Ok(TargetUrl::new(String::from(url)))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_test::traced_test;

    struct FixedAddress {
        addr: Option<Ipv4Addr>,
        calls: AtomicUsize,
    }

    impl FixedAddress {
        fn new(addr: Option<Ipv4Addr>) -> Self {
            Self {
                addr,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl LocalAddressProvider for FixedAddress {
        fn first_non_loopback_ipv4(&self) -> Option<Ipv4Addr> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.addr
        }
    }

    fn config_with(upstream: Option<UpstreamSource>, token: Option<&str>) -> Config {
        Config {
            upstream,
            token: token.map(str::to_string),
            ..Config::default()
        }
    }

    fn url_source(url: &str) -> Option<UpstreamSource> {
        Some(UpstreamSource::Url(url.to_string()))
    }

    #[test]
    fn test_missing_upstream() {
        let cfg = config_with(None, Some("t"));
        let result = resolve(&cfg, &FixedAddress::new(None));
        assert_eq!(result, Err(ConfigError::MissingUpstream));
    }

    #[test]
    fn test_url_with_token() {
        let cfg = config_with(url_source("http://browser:3000"), Some("s3cret"));
        let target = resolve(&cfg, &FixedAddress::new(None)).unwrap();
        assert_eq!(target.as_str(), "http://browser:3000/pressure?token=s3cret");
    }

    #[test]
    fn test_path_is_replaced() {
        let cfg = config_with(url_source("https://browser.example.com/some/path"), Some("t"));
        let target = resolve(&cfg, &FixedAddress::new(None)).unwrap();
        assert_eq!(
            target.as_str(),
            "https://browser.example.com/pressure?token=t"
        );
    }

    #[test]
    fn test_existing_token_is_overridden() {
        let cfg = config_with(
            url_source("http://browser:3000/?region=eu&token=old"),
            Some("new"),
        );
        let target = resolve(&cfg, &FixedAddress::new(None)).unwrap();
        assert_eq!(
            target.as_str(),
            "http://browser:3000/pressure?region=eu&token=new"
        );
    }

    #[test]
    fn test_token_is_encoded() {
        let cfg = config_with(url_source("http://browser:3000"), Some("a b&c"));
        let target = resolve(&cfg, &FixedAddress::new(None)).unwrap();
        assert_eq!(target.as_str(), "http://browser:3000/pressure?token=a+b%26c");
    }

    #[test]
    #[traced_test]
    fn test_missing_token_warns() {
        let cfg = config_with(url_source("http://browser:3000"), None);
        let target = resolve(&cfg, &FixedAddress::new(None)).unwrap();
        assert_eq!(target.as_str(), "http://browser:3000/pressure");
        assert!(logs_contain("BROWSER_TOKEN is not set"));
    }

    #[test]
    fn test_invalid_url() {
        let cfg = config_with(url_source("not a url"), None);
        let result = resolve(&cfg, &FixedAddress::new(None));
        assert!(matches!(result, Err(ConfigError::InvalidUpstreamUrl { .. })));
    }

    #[test]
    fn test_unsupported_scheme() {
        let cfg = config_with(url_source("ftp://browser:21"), None);
        let result = resolve(&cfg, &FixedAddress::new(None));
        match result {
            Err(ConfigError::InvalidUpstreamUrl { url, reason }) => {
                assert_eq!(url, "ftp://browser:21");
                assert!(reason.contains("ftp"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_host_port_with_host() {
        let cfg = config_with(
            Some(UpstreamSource::HostPort {
                host: Some("10.1.2.3".to_string()),
                port: 3000,
            }),
            Some("t"),
        );
        let local = FixedAddress::new(Some(Ipv4Addr::new(192, 168, 0, 9)));
        let target = resolve(&cfg, &local).unwrap();
        assert_eq!(target.as_str(), "http://10.1.2.3:3000/pressure?token=t");
        assert_eq!(local.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_host_port_ipv6_host() {
        let cfg = config_with(
            Some(UpstreamSource::HostPort {
                host: Some("::1".to_string()),
                port: 3000,
            }),
            None,
        );
        let target = resolve(&cfg, &FixedAddress::new(None)).unwrap();
        assert_eq!(target.as_str(), "http://[::1]:3000/pressure");
    }

    #[test]
    fn test_host_port_falls_back_to_local_address() {
        let cfg = config_with(
            Some(UpstreamSource::HostPort {
                host: None,
                port: 3000,
            }),
            Some("t"),
        );
        let local = FixedAddress::new(Some(Ipv4Addr::new(192, 168, 0, 9)));
        let target = resolve(&cfg, &local).unwrap();
        assert_eq!(target.as_str(), "http://192.168.0.9:3000/pressure?token=t");
        assert_eq!(local.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_host_port_no_local_address() {
        let cfg = config_with(
            Some(UpstreamSource::HostPort {
                host: None,
                port: 3000,
            }),
            Some("t"),
        );
        let result = resolve(&cfg, &FixedAddress::new(None));
        assert_eq!(result, Err(ConfigError::NoLocalAddress));
    }
}
