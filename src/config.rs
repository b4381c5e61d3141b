use crate::domain::errors::ConfigError;
use std::path::{Path, PathBuf};

/// Where the upstream browser worker lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamSource {
    /// Full base URL, e.g. `http://browser:3000`
    Url(String),
    /// Host and port; a missing host falls back to local interface discovery
    HostPort { host: Option<String>, port: u16 },
}

#[derive(Debug, Clone)]
pub struct Config {
    // Listener
    pub listen_host: String,
    pub listen_port: u16,

    // Upstream
    pub upstream: Option<UpstreamSource>,
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_host: "0.0.0.0".to_string(),
            listen_port: 5000,
            upstream: None,
            token: None,
            timeout_secs: 5,
        }
    }
}

impl Config {
    /// Address the metrics listener binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.listen_host, self.listen_port)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream.is_none() {
            return Err(ConfigError::MissingUpstream);
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }
}

/// Load a `.env` file from the working directory or one of its parents
/// into the process environment.
///
/// Variables already set in the environment are not overridden. Returns
/// the loaded path, or `None` when there is no file.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Load a specific env file. Returns `false` when the file does not exist.
pub fn load_dotenv_from(path: &Path) -> Result<bool, dotenvy::Error> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e),
    }
}

/// Load configuration from the process environment.
pub fn load_config() -> anyhow::Result<Config> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Load configuration through an arbitrary variable lookup.
///
/// Empty values count as unset. Unparseable numbers fall back to their
/// defaults with a warning; required settings are checked by
/// [`Config::validate`], not here.
pub fn load_config_from<F>(lookup: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let defaults = Config::default();

    let listen_host = var("LISTEN_HOST").unwrap_or(defaults.listen_host);
    let listen_port = parse_or("PORT", var("PORT"), defaults.listen_port);

    let upstream = match (var("BROWSER_URL"), var("BROWSER_PORT")) {
        (Some(url), _) => Some(UpstreamSource::Url(url)),
        (None, Some(port)) => Some(UpstreamSource::HostPort {
            host: var("BROWSER_HOST"),
            port: port
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid BROWSER_PORT {:?}: {}", port, e))?,
        }),
        (None, None) => None,
    };

    let token = var("BROWSER_TOKEN");
    let timeout_secs = parse_or(
        "BROWSER_TIMEOUT_SECS",
        var("BROWSER_TIMEOUT_SECS"),
        defaults.timeout_secs,
    );

    Ok(Config {
        listen_host,
        listen_port,
        upstream,
        token,
        timeout_secs,
    })
}

fn parse_or<T: std::str::FromStr + Copy>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("{} has invalid value {:?}, using default", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        load_config_from(|key| env.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.listen_port, 5000);
        assert_eq!(cfg.listen_host, "0.0.0.0");
        assert_eq!(cfg.timeout_secs, 5);
        assert!(cfg.upstream.is_none());
    }

    #[test]
    fn test_load_config_defaults() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.listen_port, 5000);
        assert_eq!(cfg.listen_addr(), "0.0.0.0:5000");
        assert!(cfg.upstream.is_none());
        assert!(cfg.token.is_none());
    }

    #[test]
    fn test_load_config_with_url_and_token() {
        let cfg = load(&[
            ("PORT", "9100"),
            ("BROWSER_URL", "http://browser:3000"),
            ("BROWSER_TOKEN", "s3cret"),
        ])
        .unwrap();
        assert_eq!(cfg.listen_port, 9100);
        assert_eq!(
            cfg.upstream,
            Some(UpstreamSource::Url("http://browser:3000".to_string()))
        );
        assert_eq!(cfg.token.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_url_takes_precedence_over_host_port() {
        let cfg = load(&[
            ("BROWSER_URL", "http://browser:3000"),
            ("BROWSER_HOST", "10.0.0.1"),
            ("BROWSER_PORT", "4000"),
        ])
        .unwrap();
        assert!(matches!(cfg.upstream, Some(UpstreamSource::Url(_))));
    }

    #[test]
    fn test_load_config_host_port() {
        let cfg = load(&[("BROWSER_HOST", "10.0.0.1"), ("BROWSER_PORT", "4000")]).unwrap();
        assert_eq!(
            cfg.upstream,
            Some(UpstreamSource::HostPort {
                host: Some("10.0.0.1".to_string()),
                port: 4000,
            })
        );
    }

    #[test]
    fn test_load_config_port_without_host() {
        let cfg = load(&[("BROWSER_PORT", "3000")]).unwrap();
        assert_eq!(
            cfg.upstream,
            Some(UpstreamSource::HostPort {
                host: None,
                port: 3000,
            })
        );
    }

    #[test]
    fn test_host_alone_is_not_an_upstream() {
        let cfg = load(&[("BROWSER_HOST", "10.0.0.1")]).unwrap();
        assert!(cfg.upstream.is_none());
    }

    #[test]
    fn test_invalid_browser_port_is_error() {
        assert!(load(&[("BROWSER_PORT", "http")]).is_err());
    }

    #[test]
    fn test_empty_values_are_unset() {
        let cfg = load(&[("BROWSER_URL", ""), ("BROWSER_TOKEN", "  ")]).unwrap();
        assert!(cfg.upstream.is_none());
        assert!(cfg.token.is_none());
    }

    #[test]
    fn test_load_config_parse_error_uses_default() {
        let cfg = load(&[("PORT", "not_a_number"), ("BROWSER_TIMEOUT_SECS", "x")]).unwrap();
        assert_eq!(cfg.listen_port, 5000);
        assert_eq!(cfg.timeout_secs, 5);
    }

    #[test]
    fn test_load_config_with_listen_host() {
        let cfg = load(&[("LISTEN_HOST", "127.0.0.1"), ("PORT", "9000")]).unwrap();
        assert_eq!(cfg.listen_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn test_dotenv_file_populates_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "EXPORTER_DOTENV_TEST_TOKEN=from-file\n").unwrap();

        assert!(load_dotenv_from(&path).unwrap());
        assert_eq!(
            std::env::var("EXPORTER_DOTENV_TEST_TOKEN").as_deref(),
            Ok("from-file")
        );
    }

    #[test]
    fn test_dotenv_does_not_override_environment() {
        std::env::set_var("EXPORTER_DOTENV_TEST_KEEP", "from-env");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "EXPORTER_DOTENV_TEST_KEEP=from-file\n").unwrap();

        assert!(load_dotenv_from(&path).unwrap());
        assert_eq!(
            std::env::var("EXPORTER_DOTENV_TEST_KEEP").as_deref(),
            Ok("from-env")
        );
    }

    #[test]
    fn test_dotenv_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!load_dotenv_from(&dir.path().join(".env")).unwrap());
    }

    #[test]
    fn test_dotenv_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "NOT VALID LINE 'unterminated\n").unwrap();

        assert!(load_dotenv_from(&path).is_err());
    }

    #[test]
    fn test_validate_missing_upstream() {
        let cfg = Config::default();
        assert_eq!(cfg.validate(), Err(ConfigError::MissingUpstream));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let cfg = Config {
            upstream: Some(UpstreamSource::Url("http://b".to_string())),
            timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidTimeout));
    }

    #[test]
    fn test_validate_ok() {
        let cfg = Config {
            upstream: Some(UpstreamSource::Url("http://b".to_string())),
            ..Config::default()
        };
        assert!(cfg.validate().is_ok());
    }
}
