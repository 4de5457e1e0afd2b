//! Dashboard API handlers: catalogs, import/export, reconciliation.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::codec::{self, Format};
use crate::gateway::{ApplyReport, GatewayError};
use crate::http::error::error_response;
use crate::http::request;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::reconcile::{self, ChangeSummary};
use crate::templates::{self, Recipe};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

/// Offline comparison of two uploaded documents.
#[derive(Debug, Deserialize)]
pub struct DiffRequest {
    #[serde(default)]
    pub format: Format,
    pub current: String,
    pub candidate: String,
}

/// A candidate document to compare against (or push to) the live gateway.
#[derive(Debug, Deserialize)]
pub struct CandidateRequest {
    #[serde(default)]
    pub format: Format,
    pub candidate: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: Format,
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub summary: ChangeSummary,
    pub report: ApplyReport,
}

pub async fn get_status() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

pub async fn list_templates(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.templates.names().into_iter().map(str::to_owned).collect())
}

pub async fn get_template(State(state): State<AppState>, Path(plugin): Path<String>) -> Response {
    match state.templates.template_for(&plugin) {
        Some(payload) => Json(payload.clone()).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("no template for plugin '{}'", plugin),
        ),
    }
}

pub async fn list_recipes() -> Json<&'static [Recipe]> {
    Json(templates::recipes())
}

pub async fn get_recipe(Path(id): Path<String>) -> Response {
    match templates::recipe(&id) {
        Some(recipe) => Json(recipe).into_response(),
        None => error_response(StatusCode::NOT_FOUND, format!("no recipe '{}'", id)),
    }
}

/// Compare two uploaded documents without touching any gateway.
pub async fn diff_documents(
    Json(req): Json<DiffRequest>,
) -> Result<Json<ChangeSummary>, GatewayError> {
    let current = codec::decode(&req.current, req.format)?;
    let candidate = codec::decode(&req.candidate, req.format)?;

    let summary = reconcile::diff(&current, &candidate);
    metrics::record_changes(&summary);
    tracing::info!(
        added = summary.added,
        updated = summary.updated,
        deleted = summary.deleted,
        "Compared uploaded documents"
    );
    Ok(Json(summary))
}

/// Export the live configuration as text.
pub async fn export_config(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let credentials = request::credentials(&headers);
    let client = state.gateway.load_full();

    let snapshot = client.fetch_snapshot(&credentials).await?;
    let text = codec::encode(&snapshot, query.format)?;

    Ok(([(header::CONTENT_TYPE, query.format.content_type())], text).into_response())
}

/// Diff the live configuration against a candidate document.
pub async fn plan_config(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CandidateRequest>,
) -> Result<Json<ChangeSummary>, GatewayError> {
    let credentials = request::credentials(&headers);
    let candidate = codec::decode(&req.candidate, req.format)?;
    let client = state.gateway.load_full();

    let current = client.fetch_snapshot(&credentials).await?;
    let summary = reconcile::diff(&current, &candidate);
    metrics::record_changes(&summary);
    tracing::info!(
        added = summary.added,
        updated = summary.updated,
        deleted = summary.deleted,
        "Planned changes against live gateway"
    );
    Ok(Json(summary))
}

/// Diff against the live configuration and push every change.
pub async fn apply_config(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CandidateRequest>,
) -> Result<Json<ApplyResponse>, GatewayError> {
    let credentials = request::credentials(&headers);
    let candidate = codec::decode(&req.candidate, req.format)?;
    let client = state.gateway.load_full();

    let current = client.fetch_snapshot(&credentials).await?;
    let summary = reconcile::diff(&current, &candidate);
    metrics::record_changes(&summary);

    let report = client.apply(&credentials, &summary).await?;
    tracing::info!(
        applied = report.applied,
        skipped = report.skipped,
        "Applied candidate configuration"
    );
    Ok(Json(ApplyResponse { summary, report }))
}

/// Connectivity check against the gateway named in the headers.
pub async fn health(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    let credentials = request::credentials(&headers);
    let reachable = state.gateway.load_full().check_connection(&credentials).await;
    Json(json!({ "reachable": reachable }))
}
