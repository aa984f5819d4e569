//! Decoder service configuration module.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FTA_QR_PORT=9000                                                   │
//! │     FTA_QR_REQUEST_TIMEOUT_SECS=5                                      │
//! │                                                                         │
//! │  2. TOML Config File (optional)                                        │
//! │     $FTA_QR_CONFIG, default ./decoder.toml                             │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     0.0.0.0:8080, 10s timeout, 64 KiB body limit                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # decoder.toml
//! bind_addr = "127.0.0.1"
//! port = 8080
//! request_timeout_secs = 10
//! max_body_bytes = 65536
//! log_filter = "info,fta_qr=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "FTA_QR";

/// Environment variable naming the config file.
pub const CONFIG_PATH_VAR: &str = "FTA_QR_CONFIG";

/// Config file used when `FTA_QR_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "decoder.toml";

/// Smallest accepted body limit. A five-field payload is a few hundred bytes.
const MIN_BODY_BYTES: usize = 1024;

/// Decoder service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Interface to bind
    pub bind_addr: String,

    /// HTTP port
    pub port: u16,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Max request body size in bytes
    pub max_body_bytes: usize,

    /// Default tracing filter, overridden by RUST_LOG
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            bind_addr: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 10,
            max_body_bytes: 64 * 1024,
            log_filter: "info,fta_qr=debug,tower_http=info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the default file location and environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    /// Load configuration from `path` (if it exists) and environment.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let defaults = ServiceConfig::default();

        let settings = ::config::Config::builder()
            .set_default("bind_addr", defaults.bind_addr)?
            .set_default("port", defaults.port as i64)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
            .set_default("max_body_bytes", defaults.max_body_bytes as i64)?
            .set_default("log_filter", defaults.log_filter)?
            .add_source(::config::File::with_name(path).required(false))
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: ServiceConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue("port".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("request_timeout_secs".to_string()));
        }
        if self.max_body_bytes < MIN_BODY_BYTES {
            return Err(ConfigError::InvalidValue("max_body_bytes".to_string()));
        }
        Ok(())
    }

    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to load config: {0}")]
    Load(#[from] ::config::ConfigError),
}
