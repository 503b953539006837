//! Service configuration with TOML file support.

use std::path::PathBuf;

use gauss_utils::LogFormat;
use serde::{Deserialize, Serialize};

use crate::ServiceError;

/// Configuration for the poll service and its HTTP front end.
///
/// Loaded from a TOML file via [`ServiceConfig::from_toml_file`] or built in code
/// (e.g. for tests). Every field has a default, so an empty file is valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Directory holding the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Filter used when `RUST_LOG` is unset: "info", "debug,gauss_tally=trace", ...
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Header carrying the authenticated email, set by the reverse proxy.
    #[serde(default = "default_identity_email_header")]
    pub identity_email_header: String,

    /// Header carrying the display name, set by the reverse proxy.
    #[serde(default = "default_identity_name_header")]
    pub identity_name_header: String,

    /// Serve Prometheus metrics on `/metrics`.
    #[serde(default)]
    pub enable_metrics: bool,

    /// Answer CORS preflights for any origin.
    #[serde(default)]
    pub cors_allow_any: bool,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./gauss_data")
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_identity_email_header() -> String {
    "x-auth-request-email".to_string()
}

fn default_identity_name_header() -> String {
    "x-auth-request-user".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ServiceError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ServiceError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ServiceError> {
        toml::from_str(s).map_err(|e| ServiceError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, ServiceError> {
        toml::to_string_pretty(self).map_err(|e| ServiceError::Config(e.to_string()))
    }

    /// `bind_address:port`, ready for a TCP listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            bind_address: default_bind_address(),
            port: default_port(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            identity_email_header: default_identity_email_header(),
            identity_name_header: default_identity_name_header(),
            enable_metrics: false,
            cors_allow_any: false,
        }
    }
}
