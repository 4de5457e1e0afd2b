//! Gateway client error shape.

use thiserror::Error;

use crate::codec::ParseError;

/// Failure of an operation against the admin API.
///
/// Every variant's message is suitable for direct display to the operator.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Base URL or API key not supplied; no call was attempted.
    #[error("gateway configuration missing: {0} is not set")]
    ConfigurationMissing(&'static str),

    /// The admin endpoint could not be reached.
    #[error("failed to reach the gateway admin API: {0}")]
    Transport(String),

    /// The admin endpoint answered with a non-2xx status.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// A document (uploaded or returned by the gateway) did not decode.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl GatewayError {
    /// HTTP status carried by an upstream failure.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            GatewayError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GatewayError::Transport("request timed out".to_string())
        } else {
            GatewayError::Transport(e.to_string())
        }
    }
}

impl From<url::ParseError> for GatewayError {
    fn from(e: url::ParseError) -> Self {
        GatewayError::Transport(format!("invalid admin URL: {}", e))
    }
}
