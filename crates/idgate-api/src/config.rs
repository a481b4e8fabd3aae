//! # Gateway Configuration
//!
//! Resolution order, later sources overriding earlier ones:
//!
//! 1. Built-in defaults.
//! 2. A YAML file (`-f/--config`, else `etc/idgate.yaml` when present).
//! 3. Environment variables.
//!
//! ```yaml
//! host: 0.0.0.0
//! port: 8080
//! services:
//!   user_service:
//!     host: 127.0.0.1
//!     port: 80
//!     path: /api/v1/user
//!     timeout_secs: 30
//! auth:
//!   unauthorized_code: 401
//! metrics:
//!   enabled: false
//! ```

use std::path::{Path, PathBuf};

use idgate_user_client::UserServiceConfig;
use serde::{Deserialize, Serialize};

/// Config file read when no path is given and the file exists.
pub const DEFAULT_CONFIG_PATH: &str = "etc/idgate.yaml";

/// Top-level gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    pub services: ServicesConfig,
    pub auth: AuthSettings,
    pub metrics: MetricsSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            services: ServicesConfig::default(),
            auth: AuthSettings::default(),
            metrics: MetricsSettings::default(),
        }
    }
}

/// Upstream services the gateway talks to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub user_service: UserServiceConfig,
}

/// Authentication settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Envelope code used for every authentication rejection.
    pub unauthorized_code: i64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            unauthorized_code: 401,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    /// Install the Prometheus recorder and serve `GET /metrics`.
    pub enabled: bool,
}

impl AppConfig {
    /// Load configuration from defaults, an optional YAML file, and the
    /// process environment.
    ///
    /// With `path == None`, [`DEFAULT_CONFIG_PATH`] is read if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match resolve_path(path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        config.services.user_service.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse YAML text. An empty document yields the defaults.
    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Apply the gateway's own variables (`HOST`, `PORT`,
    /// `AUTH_UNAUTHORIZED_CODE`, `METRICS_ENABLED`) read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = parse_var(&lookup, "PORT")? {
            self.port = port;
        }
        if let Some(code) = parse_var(&lookup, "AUTH_UNAUTHORIZED_CODE")? {
            self.auth.unauthorized_code = code;
        }
        if let Some(enabled) = parse_var(&lookup, "METRICS_ENABLED")? {
            self.metrics.enabled = enabled;
        }
        Ok(())
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue("host".into(), self.host.clone()));
        }
        self.services.user_service.base_url()?;
        Ok(())
    }
}

fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            default.exists().then(|| default.to_path_buf())
        }
    }
}

fn parse_var<T, F>(lookup: &F, var: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(var.to_string(), raw)),
        None => Ok(None),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid value for {0}: {1:?}")]
    InvalidValue(String, String),
    #[error(transparent)]
    UserService(#[from] idgate_user_client::ConfigError),
}
