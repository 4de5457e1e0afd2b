//! Pushing accepted changes back to the gateway.
//!
//! Upserts go first, referenced collections before the ones that reference
//! them (upstreams before services before routes). Deletions follow in the
//! reverse order so nothing is removed while still referenced.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::gateway::client::GatewayClient;
use crate::gateway::credentials::Credentials;
use crate::gateway::error::GatewayError;
use crate::reconcile::{Change, ChangeKind, ChangeSummary};
use crate::resources::Collection;

/// Collection order for additions and updates.
const UPSERT_ORDER: [Collection; 6] = [
    Collection::Upstreams,
    Collection::Services,
    Collection::Ssls,
    Collection::Consumers,
    Collection::GlobalRules,
    Collection::Routes,
];

/// Outcome of an apply run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplyReport {
    /// Changes accepted by the gateway.
    pub applied: usize,
    /// Deletions skipped because the resource had no identity to address.
    pub skipped: usize,
    /// Detail line of every applied change, in the order sent.
    pub details: Vec<String>,
}

/// One admin API call realizing a change.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminRequest<'a> {
    pub method: Method,
    pub path: String,
    pub body: Option<&'a Value>,
}

impl<'a> AdminRequest<'a> {
    /// The call for a change, or `None` if it cannot be addressed.
    pub fn for_change(change: &'a Change) -> Option<Self> {
        let collection = change.collection;
        match (change.kind, change.identity.as_deref()) {
            (ChangeKind::Add | ChangeKind::Update, _) if collection == Collection::Consumers => {
                Some(Self::new(Method::PUT, collection.name().to_string(), Some(&change.resource)))
            }
            (ChangeKind::Add | ChangeKind::Update, Some(id)) => Some(Self::new(
                Method::PUT,
                item_path(collection, id),
                Some(&change.resource),
            )),
            (ChangeKind::Add | ChangeKind::Update, None) => {
                Some(Self::new(Method::POST, collection.name().to_string(), Some(&change.resource)))
            }
            (ChangeKind::Delete, Some(id)) => {
                Some(Self::new(Method::DELETE, item_path(collection, id), None))
            }
            (ChangeKind::Delete, None) => None,
        }
    }

    fn new(method: Method, path: String, body: Option<&'a Value>) -> Self {
        Self { method, path, body }
    }
}

/// Changes in the order they must be sent.
pub fn ordered(summary: &ChangeSummary) -> Vec<&Change> {
    let upserts = UPSERT_ORDER.iter().flat_map(|collection| {
        summary
            .changes
            .iter()
            .filter(move |c| c.collection == *collection && c.kind != ChangeKind::Delete)
    });
    let deletes = UPSERT_ORDER.iter().rev().flat_map(|collection| {
        summary
            .changes
            .iter()
            .filter(move |c| c.collection == *collection && c.kind == ChangeKind::Delete)
    });
    upserts.chain(deletes).collect()
}

impl GatewayClient {
    /// Send every change in `summary` to the gateway.
    ///
    /// Stops at the first failed call and returns its error.
    pub async fn apply(
        &self,
        credentials: &Credentials,
        summary: &ChangeSummary,
    ) -> Result<ApplyReport, GatewayError> {
        credentials.ensure_present()?;

        let mut report = ApplyReport::default();
        for change in ordered(summary) {
            let Some(request) = AdminRequest::for_change(change) else {
                tracing::warn!(change = %change, "Skipping deletion of a resource without identity");
                report.skipped += 1;
                continue;
            };

            if let Err(e) = self
                .call(request.method.clone(), &request.path, credentials, request.body)
                .await
            {
                tracing::error!(
                    change = %change,
                    applied = report.applied,
                    error = %e,
                    "Apply stopped"
                );
                return Err(e);
            }

            tracing::info!(change = %change, "Applied");
            report.applied += 1;
            report.details.push(change.to_string());
        }

        Ok(report)
    }
}

fn item_path(collection: Collection, identity: &str) -> String {
    let segment: String = url::form_urlencoded::byte_serialize(identity.as_bytes())
        .collect::<String>()
        .replace('+', "%20");
    format!("{}/{}", collection.name(), segment)
}
