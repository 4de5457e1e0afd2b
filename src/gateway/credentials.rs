//! Admin endpoint credentials.

use serde::Deserialize;
use std::fmt;

use crate::gateway::error::GatewayError;

/// Base URL and API key of a gateway's admin API.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    /// e.g. `http://127.0.0.1:9180/apisix/admin`
    pub base_url: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Fail with `ConfigurationMissing` if either value is blank.
    pub fn ensure_present(&self) -> Result<(), GatewayError> {
        if self.base_url.trim().is_empty() {
            return Err(GatewayError::ConfigurationMissing("base URL"));
        }
        if self.api_key.trim().is_empty() {
            return Err(GatewayError::ConfigurationMissing("API key"));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
