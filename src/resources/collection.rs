//! Collection names and the identity policy applied to each.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// One of the gateway's configuration collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Routes,
    Upstreams,
    Services,
    Consumers,
    Ssls,
    GlobalRules,
}

impl Collection {
    /// Every collection carried by a configuration set, in document order.
    pub const ALL: [Collection; 6] = [
        Collection::Routes,
        Collection::Upstreams,
        Collection::Services,
        Collection::Consumers,
        Collection::Ssls,
        Collection::GlobalRules,
    ];

    /// Collections compared by the reconciliation engine, in report order.
    ///
    /// `global_rules` is not part of this list.
    pub const RECONCILED: [Collection; 5] = [
        Collection::Routes,
        Collection::Upstreams,
        Collection::Services,
        Collection::Consumers,
        Collection::Ssls,
    ];

    /// Name used both as the document key and the admin API path segment.
    pub fn name(self) -> &'static str {
        match self {
            Collection::Routes => "routes",
            Collection::Upstreams => "upstreams",
            Collection::Services => "services",
            Collection::Consumers => "consumers",
            Collection::Ssls => "ssls",
            Collection::GlobalRules => "global_rules",
        }
    }

    /// Field holding a resource's identity within this collection.
    pub fn identity_field(self) -> &'static str {
        match self {
            Collection::Consumers => "username",
            _ => "id",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("unknown collection '{}'", s))
    }
}

/// Resolve a resource's identity under the collection's policy.
///
/// String identities are returned as-is and numeric ones in decimal form.
/// Anything else (missing field, empty string, nested value, non-mapping
/// resource) has no identity.
pub fn identity_of(resource: &Value, collection: Collection) -> Option<String> {
    match resource.get(collection.identity_field())? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identity_policy() {
        assert_eq!(Collection::Consumers.identity_field(), "username");
        for c in Collection::ALL.into_iter().filter(|c| *c != Collection::Consumers) {
            assert_eq!(c.identity_field(), "id");
        }
    }

    #[test]
    fn test_identity_of_uses_collection_field() {
        let both = json!({"id": "r1", "username": "alice"});
        assert_eq!(identity_of(&both, Collection::Routes).as_deref(), Some("r1"));
        assert_eq!(identity_of(&both, Collection::Consumers).as_deref(), Some("alice"));

        // A consumer never falls back to `id`.
        let consumer = json!({"id": "c1"});
        assert_eq!(identity_of(&consumer, Collection::Consumers), None);
    }

    #[test]
    fn test_identity_of_numeric_and_missing() {
        assert_eq!(identity_of(&json!({"id": 42}), Collection::Upstreams).as_deref(), Some("42"));
        assert_eq!(identity_of(&json!({"id": ""}), Collection::Upstreams), None);
        assert_eq!(identity_of(&json!({"id": {"nested": 1}}), Collection::Upstreams), None);
        assert_eq!(identity_of(&json!("not a mapping"), Collection::Routes), None);
        assert_eq!(identity_of(&json!({"uri": "/a"}), Collection::Routes), None);
    }

    #[test]
    fn test_collection_names_round_trip() {
        for c in Collection::ALL {
            assert_eq!(c.name().parse::<Collection>(), Ok(c));
        }
        assert!("plugins".parse::<Collection>().is_err());
        assert_eq!(Collection::GlobalRules.to_string(), "global_rules");
    }
}
