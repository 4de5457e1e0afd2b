//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML config
//! file. Every section has defaults so an empty file is a valid config.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::codec::Format;

/// Root configuration for the dashboard backend.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Outbound admin API client settings.
    pub gateway: GatewayConfig,

    /// Plugin template data source.
    pub templates: TemplatesConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Request limits.
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:5180").
    pub bind_address: String,

    /// Total time allowed for one dashboard request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5180".to_string(),
            request_timeout_secs: 60,
        }
    }
}

/// Admin API client settings. Hot-reloadable.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GatewayConfig {
    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Timeout for one admin API call in seconds.
    pub timeout_secs: u64,

    /// Header carrying the API key.
    pub key_header: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 5,
            timeout_secs: 15,
            key_header: "X-API-KEY".to_string(),
        }
    }
}

/// Plugin template catalog source.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Data file replacing the builtin catalog. Builtin when unset.
    pub path: Option<PathBuf>,

    /// Encoding of the data file.
    pub format: Format,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9091".to_string(),
        }
    }
}

/// Request limits for the dashboard API.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum request body size in bytes (uploaded configuration documents).
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 8 * 1024 * 1024, // 8MB
        }
    }
}
