use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const ENV_PREFIX: &str = "M3U";

const DEFAULT_SOURCE_URL: &str = "http://example.com/playlist.m3u";
const DEFAULT_HOSTPORT: &str = "localhost:8000";
const DEFAULT_UPDATE_HOURS: u64 = 2;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
const MAX_UPDATE_HOURS: u64 = 24 * 365;
const MAX_FETCH_TIMEOUT_SECS: u64 = 3600;

/// Service configuration
///
/// Keys map one to one onto `M3U_`-prefixed environment variables, so
/// `M3U_SOURCE_URL`, `M3U_HOSTPORT` and `M3U_UPDATEHOURS` keep their
/// historical names. The listen address is read from `M3U_LISTEN_HOST` and
/// `M3U_LISTEN_PORT`; plain `M3U_PORT` is left alone since Kubernetes sets it
/// to `tcp://ip:port` for a Service named `m3u`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Upstream playlist location
    #[serde(default = "default_source_url")]
    pub source_url: String,
    /// host:port written into rewritten stream URLs
    #[serde(default = "default_hostport")]
    pub hostport: String,
    /// Hours between refresh cycles
    #[serde(default = "default_update_hours", rename = "updatehours")]
    pub update_hours: u64,
    /// Listening IP address
    #[serde(default = "default_host", rename = "listen_host")]
    pub host: String,
    /// Listening port
    #[serde(default = "default_port", rename = "listen_port")]
    pub port: u16,
    /// Upper bound for a single playlist download
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_hostport() -> String {
    DEFAULT_HOSTPORT.to_string()
}

fn default_update_hours() -> u64 {
    DEFAULT_UPDATE_HOURS
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            hostport: default_hostport(),
            update_hours: default_update_hours(),
            host: default_host(),
            port: default_port(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from an optional TOML file and the process environment
    pub fn load(config_file: &str) -> AppResult<Self> {
        Self::load_with_env(
            config_file,
            ::config::Environment::with_prefix(ENV_PREFIX),
        )
    }

    /// Load configuration with an explicit environment source
    ///
    /// Precedence, lowest first: defaults, file, environment.
    pub fn load_with_env(config_file: &str, env: ::config::Environment) -> AppResult<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(config_file).required(false))
            .add_source(env)
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> AppResult<()> {
        let url = Url::parse(&self.source_url).map_err(|e| {
            AppError::configuration(format!("invalid source_url '{}': {}", self.source_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::configuration(format!(
                "source_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if !(1..=MAX_UPDATE_HOURS).contains(&self.update_hours) {
            return Err(AppError::configuration(format!(
                "updatehours must be between 1 and {}, got {}",
                MAX_UPDATE_HOURS, self.update_hours
            )));
        }

        if !(1..=MAX_FETCH_TIMEOUT_SECS).contains(&self.fetch_timeout_secs) {
            return Err(AppError::configuration(format!(
                "fetch_timeout_secs must be between 1 and {}, got {}",
                MAX_FETCH_TIMEOUT_SECS, self.fetch_timeout_secs
            )));
        }

        if self.hostport.trim().is_empty() {
            return Err(AppError::configuration("hostport must not be empty"));
        }

        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.update_hours * 60 * 60)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn listen_addr(&self) -> AppResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                AppError::configuration(format!(
                    "invalid listen address {}:{}: {}",
                    self.host, self.port, e
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(vars: &[(&str, &str)]) -> ::config::Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ::config::Environment::with_prefix(ENV_PREFIX).source(Some(source))
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = Config::load_with_env("does-not-exist.toml", env_from(&[])).unwrap();
        assert_eq!(config.source_url, "http://example.com/playlist.m3u");
        assert_eq!(config.hostport, "localhost:8000");
        assert_eq!(config.update_hours, 2);
        assert_eq!(config.port, 8000);
        assert_eq!(config.refresh_interval(), Duration::from_secs(7200));
    }

    #[test]
    fn test_environment_overrides() {
        let config = Config::load_with_env(
            "does-not-exist.toml",
            env_from(&[
                ("M3U_SOURCE_URL", "https://iptv.example.org/list.m3u"),
                ("M3U_HOSTPORT", "media.lan:9000"),
                ("M3U_UPDATEHOURS", "6"),
            ]),
        )
        .unwrap();

        assert_eq!(config.source_url, "https://iptv.example.org/list.m3u");
        assert_eq!(config.hostport, "media.lan:9000");
        assert_eq!(config.update_hours, 6);
    }

    #[test]
    fn test_zero_update_hours_rejected() {
        let result = Config::load_with_env(
            "does-not-exist.toml",
            env_from(&[("M3U_UPDATEHOURS", "0")]),
        );
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[test]
    fn test_zero_fetch_timeout_rejected() {
        let result = Config::load_with_env(
            "does-not-exist.toml",
            env_from(&[("M3U_FETCH_TIMEOUT_SECS", "0")]),
        );
        assert!(matches!(result, Err(AppError::Configuration { .. })));

        let config = Config {
            fetch_timeout_secs: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AppError::Configuration { .. })
        ));

        let config = Config {
            fetch_timeout_secs: 5,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.fetch_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_listen_address_from_environment() {
        let config = Config::load_with_env(
            "does-not-exist.toml",
            env_from(&[
                ("M3U_LISTEN_HOST", "127.0.0.1"),
                ("M3U_LISTEN_PORT", "9100"),
            ]),
        )
        .unwrap();
        assert_eq!(config.listen_addr().unwrap().to_string(), "127.0.0.1:9100");
    }

    #[test]
    fn test_kubernetes_service_link_port_ignored() {
        let config = Config::load_with_env(
            "does-not-exist.toml",
            env_from(&[
                ("M3U_PORT", "tcp://10.0.0.12:8000"),
                ("M3U_SERVICE_HOST", "10.0.0.12"),
            ]),
        )
        .unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_non_http_source_rejected() {
        let config = Config {
            source_url: "ftp://example.com/list.m3u".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            source_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_listen_addr() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 9999,
            ..Config::default()
        };
        assert_eq!(config.listen_addr().unwrap().to_string(), "127.0.0.1:9999");
    }
}
