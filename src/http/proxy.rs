//! Pass-through proxy to the gateway admin API.
//!
//! `ANY /api/proxy/{*path}` is forwarded to `<x-apisix-url>/<path>?<query>`
//! with the key from `x-apisix-key` attached. The gateway's status is relayed
//! as-is and its body always comes back as JSON.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::gateway::GatewayError;
use crate::http::error::error_response;
use crate::http::request;
use crate::http::server::AppState;

/// Forward one dashboard call to the admin API.
pub async fn proxy_handler(
    State(state): State<AppState>,
    Path(path): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let credentials = request::credentials(&headers);
    if credentials.ensure_present().is_err() {
        return error_response(StatusCode::BAD_REQUEST, "Missing APISIX configuration");
    }

    let target = match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path,
    };

    let payload = if body.is_empty() {
        None
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => Some(value),
            Err(e) => {
                return error_response(StatusCode::BAD_REQUEST, format!("invalid JSON body: {}", e))
            }
        }
    };

    tracing::debug!(method = %method, path = %target, "Proxying admin API call");

    let client = state.gateway.load_full();
    match client
        .forward(method, &target, &credentials, payload.as_ref())
        .await
    {
        Ok(response) => (response.status, Json(response.body)).into_response(),
        Err(e @ GatewayError::ConfigurationMissing(_)) => {
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => {
            tracing::error!(path = %target, error = %e, "Proxy error");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
