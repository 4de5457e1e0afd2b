//! Fetching the live configuration of a gateway.

use reqwest::Method;
use serde_json::Value;

use crate::codec::ParseError;
use crate::gateway::client::GatewayClient;
use crate::gateway::credentials::Credentials;
use crate::gateway::error::GatewayError;
use crate::resources::{Collection, ConfigurationSet, Resource};

/// Fields the gateway stamps on every object; never part of a declared config.
const SERVER_MANAGED_FIELDS: [&str; 2] = ["create_time", "update_time"];

impl GatewayClient {
    /// Read every collection from the admin API into a configuration set.
    pub async fn fetch_snapshot(
        &self,
        credentials: &Credentials,
    ) -> Result<ConfigurationSet, GatewayError> {
        credentials.ensure_present()?;

        let mut set = ConfigurationSet::default();
        for collection in Collection::ALL {
            let response = self
                .call(Method::GET, collection.name(), credentials, None)
                .await?;
            let items = list_items(&response.body).map_err(|e| {
                tracing::warn!(collection = %collection, error = %e, "Unexpected list response");
                e
            })?;
            tracing::debug!(collection = %collection, count = items.len(), "Fetched collection");
            set.set_items(collection, items);
        }

        tracing::info!(resources = set.len(), "Fetched live configuration snapshot");
        Ok(set)
    }
}

/// Extract the resources from an admin API list response.
///
/// Accepts `{"list": [...]}` and the older `{"node": {"nodes": [...]}}`
/// shape; an empty object in place of the array means no items.
pub fn list_items(body: &Value) -> Result<Vec<Resource>, ParseError> {
    let entries = body
        .get("list")
        .or_else(|| body.get("node").and_then(|node| node.get("nodes")));

    match entries {
        Some(Value::Array(items)) => Ok(items.iter().map(unwrap_entry).collect()),
        Some(Value::Object(map)) if map.is_empty() => Ok(Vec::new()),
        Some(Value::Null) => Ok(Vec::new()),
        _ => Err(ParseError::Shape(
            "admin API list response has neither `list` nor `node.nodes`".to_string(),
        )),
    }
}

fn unwrap_entry(entry: &Value) -> Resource {
    let mut resource = entry.get("value").cloned().unwrap_or_else(|| entry.clone());
    if let Value::Object(fields) = &mut resource {
        for field in SERVER_MANAGED_FIELDS {
            fields.shift_remove(field);
        }
    }
    resource
}
