//! Mapping of failures to dashboard API responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::codec::ParseError;
use crate::gateway::GatewayError;

impl GatewayError {
    /// Status returned to the dashboard UI for this failure.
    pub fn http_status(&self) -> StatusCode {
        match self {
            GatewayError::ConfigurationMissing(_) => StatusCode::BAD_REQUEST,
            GatewayError::Transport(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            GatewayError::Parse(ParseError::Io { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Parse(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "Request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// `{"error": message}` response with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            GatewayError::ConfigurationMissing("API key").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::Transport("connection refused".into()).http_status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            GatewayError::Upstream { status: 404, message: "not found".into() }.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            GatewayError::Parse(ParseError::NotAMapping("a string")).http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
