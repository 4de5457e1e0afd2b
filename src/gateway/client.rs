//! HTTP client for the admin API.
//!
//! # Responsibilities
//! - Build the target URL from base URL + path (query string preserved)
//! - Attach the API key header and JSON body
//! - Map transport failures and non-2xx answers to `GatewayError`
//! - Wrap non-JSON bodies so callers always receive JSON

use std::time::{Duration, Instant};

use reqwest::header::{HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use url::Url;

use crate::config::GatewayConfig;
use crate::gateway::credentials::Credentials;
use crate::gateway::error::GatewayError;
use crate::observability::metrics;

/// Body fields consulted, in order, for an upstream error message.
const ERROR_MESSAGE_FIELDS: [&str; 3] = ["error_msg", "message", "error"];

/// Status and parsed body of an admin API answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatewayResponse {
    #[serde(skip)]
    pub status: StatusCode,
    pub body: Value,
}

/// Client for a gateway's admin API.
///
/// Holds no credentials: base URL and key are passed with every call.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    key_header: String,
}

impl GatewayClient {
    /// Create a client from the gateway settings.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            key_header: config.key_header.clone(),
        })
    }

    /// Header carrying the API key.
    pub fn key_header(&self) -> &str {
        &self.key_header
    }

    /// Perform a call and fail on any non-2xx answer.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        credentials: &Credentials,
        body: Option<&Value>,
    ) -> Result<GatewayResponse, GatewayError> {
        let (status, text) = self.send(method, path, credentials, body).await?;
        if !status.is_success() {
            let message = error_message(status, &text);
            tracing::debug!(status = status.as_u16(), message = %message, "Admin API returned an error");
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                message,
            });
        }
        Ok(GatewayResponse {
            status,
            body: parse_body(&text),
        })
    }

    /// Perform a call and relay whatever status the gateway answered with.
    ///
    /// Only missing credentials and transport failures are errors.
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        credentials: &Credentials,
        body: Option<&Value>,
    ) -> Result<GatewayResponse, GatewayError> {
        let (status, text) = self.send(method, path, credentials, body).await?;
        Ok(GatewayResponse {
            status,
            body: parse_body(&text),
        })
    }

    /// Connectivity check: `true` when listing routes succeeds.
    pub async fn check_connection(&self, credentials: &Credentials) -> bool {
        match self.call(Method::GET, "routes", credentials, None).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Connection check failed");
                false
            }
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        credentials: &Credentials,
        body: Option<&Value>,
    ) -> Result<(StatusCode, String), GatewayError> {
        credentials.ensure_present()?;
        let url = target_url(&credentials.base_url, path)?;

        tracing::debug!(method = %method, url = %url, "Calling admin API");

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(self.key_header.as_str(), credentials.api_key.as_str())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(USER_AGENT, concat!("gateway-dashboard/", env!("CARGO_PKG_VERSION")));
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body).map_err(crate::codec::ParseError::from)?);
        }

        let start = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_admin_call(method.as_str(), 0, start);
                tracing::warn!(method = %method, error = %e, "Admin API unreachable");
                return Err(e.into());
            }
        };

        let status = response.status();
        let text = response.text().await?;
        metrics::record_admin_call(method.as_str(), status.as_u16(), start);
        Ok((status, text))
    }
}

/// Join the base URL and a path, keeping any query string on the path.
pub fn target_url(base_url: &str, path: &str) -> Result<Url, GatewayError> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Ok(Url::parse(&joined)?)
}

/// Parse a response body, wrapping non-JSON text as `{"message": text}`.
pub fn parse_body(text: &str) -> Value {
    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) if text.is_empty() => json!({ "message": "Empty response" }),
        Err(_) => json!({ "message": text }),
    }
}

/// Best-effort human-readable message for a non-2xx answer.
pub fn error_message(status: StatusCode, text: &str) -> String {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|body| {
            ERROR_MESSAGE_FIELDS.iter().find_map(|field| {
                body.get(field)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
            })
        })
        .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_url_joins_and_keeps_query() {
        let url = target_url("http://gw:9180/apisix/admin/", "/routes?page=2&page_size=10").unwrap();
        assert_eq!(url.as_str(), "http://gw:9180/apisix/admin/routes?page=2&page_size=10");

        let url = target_url("http://gw:9180/apisix/admin", "upstreams/u1").unwrap();
        assert_eq!(url.path(), "/apisix/admin/upstreams/u1");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_target_url_rejects_garbage() {
        assert!(matches!(target_url("not a url", "routes"), Err(GatewayError::Transport(_))));
    }

    #[test]
    fn test_parse_body_wraps_plain_text() {
        assert_eq!(parse_body("OK"), json!({"message": "OK"}));
        assert_eq!(parse_body(""), json!({"message": "Empty response"}));
        assert_eq!(parse_body("{\"total\": 0}"), json!({"total": 0}));
    }

    #[test]
    fn test_error_message_field_precedence() {
        let status = StatusCode::BAD_REQUEST;
        assert_eq!(
            error_message(status, r#"{"message": "m", "error_msg": "invalid configuration"}"#),
            "invalid configuration"
        );
        assert_eq!(error_message(status, r#"{"message": "not found"}"#), "not found");
        assert_eq!(error_message(status, r#"{"error": "boom"}"#), "boom");
    }

    #[test]
    fn test_error_message_fallback() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"),
            "request failed with status 502"
        );
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"error_msg": 404}"#),
            "request failed with status 404"
        );
    }
}
