//! User service client configuration.
//!
//! The base URL is composed as `http://{host}:{port}{path}`, matching how
//! the upstream service is deployed behind its own context path. Values
//! come from the gateway's configuration file or from environment
//! variables.

use serde::{Deserialize, Serialize};
use url::Url;

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the upstream user service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserServiceConfig {
    /// Hostname or IP address of the user service.
    pub host: String,
    /// TCP port of the user service.
    pub port: u16,
    /// Context path prepended to every endpoint, e.g. `/api/v1/user`.
    pub path: String,
    /// Overall timeout for one request, in seconds.
    pub timeout_secs: u64,
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 80,
            path: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl UserServiceConfig {
    /// Override fields from any `USER_SERVICE_*` variables that are set.
    ///
    /// Variables: `USER_SERVICE_HOST`, `USER_SERVICE_PORT`,
    /// `USER_SERVICE_PATH`, `USER_SERVICE_TIMEOUT_SECS`.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = std::env::var("USER_SERVICE_HOST") {
            self.host = host;
        }
        if let Some(port) = env_parse("USER_SERVICE_PORT")? {
            self.port = port;
        }
        if let Ok(path) = std::env::var("USER_SERVICE_PATH") {
            self.path = path;
        }
        if let Some(timeout) = env_parse("USER_SERVICE_TIMEOUT_SECS")? {
            self.timeout_secs = timeout;
        }
        Ok(())
    }

    /// Create a configuration pointing at a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `uri` is not an `http://host:port` URL.
    pub fn local_mock(uri: &str, path: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(uri).map_err(|e| ConfigError::InvalidUrl(uri.to_string(), e.to_string()))?;
        let host = url
            .host_str()
            .ok_or_else(|| ConfigError::InvalidUrl(uri.to_string(), "missing host".to_string()))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| ConfigError::InvalidUrl(uri.to_string(), "missing port".to_string()))?;
        Ok(Self {
            host: host.to_string(),
            port,
            path: path.to_string(),
            timeout_secs: 5,
        })
    }

    /// Compose and validate the base URL every endpoint is appended to.
    ///
    /// The returned string never ends with `/`. Also rejects a zero timeout.
    pub fn base_url(&self) -> Result<String, ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingHost);
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "timeout_secs".to_string(),
                self.timeout_secs.to_string(),
            ));
        }
        let path = self.path.trim_end_matches('/');
        let raw = if path.is_empty() || path.starts_with('/') {
            format!("http://{}:{}{}", self.host, self.port, path)
        } else {
            format!("http://{}:{}/{}", self.host, self.port, path)
        };
        Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(raw.clone(), e.to_string()))?;
        Ok(raw)
    }
}

fn env_parse<T: std::str::FromStr>(var: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(var.to_string(), raw)),
        Err(_) => Ok(None),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("user service host must not be empty")]
    MissingHost,
    #[error("invalid URL {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid value for {0}: {1:?}")]
    InvalidValue(String, String),
}
