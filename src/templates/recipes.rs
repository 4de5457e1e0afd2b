//! Ready-made configuration recipes.

use serde::Serialize;
use serde_json::{json, Value};
use std::sync::LazyLock;

/// What a recipe's content plugs into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeKind {
    /// A `plugins` mapping fragment.
    Plugin,
    /// A whole route body.
    Route,
    /// A route `vars` match expression list.
    Vars,
}

/// A named configuration snippet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub kind: RecipeKind,
    pub content: Value,
}

static RECIPES: LazyLock<Vec<Recipe>> = LazyLock::new(|| {
    vec![
        Recipe {
            id: "header-routing",
            name: "Route by Header",
            description: "Direct traffic to specific backends based on header presence/value.",
            kind: RecipeKind::Vars,
            content: json!([
                ["http_x_user_type", "==", "admin"],
                ["http_api_key", "~~", "a.*"]
            ]),
        },
        Recipe {
            id: "response-status-rewrite",
            name: "Custom Error Status",
            description: "Intercept and rewrite backend status codes for client-facing consistency.",
            kind: RecipeKind::Plugin,
            content: json!({
                "response-rewrite": {
                    "status_code": 403,
                    "body": "{\"message\": \"Access Denied by Gateway\"}",
                    "headers": {
                        "set": { "X-Blocked-Reason": "Invalid-Credential" }
                    }
                }
            }),
        },
        Recipe {
            id: "canary-release",
            name: "Canary Release (10%)",
            description: "Traffic splitting between two upstreams for safe deployments.",
            kind: RecipeKind::Plugin,
            content: json!({
                "traffic-split": {
                    "rules": [{
                        "weighted_upstreams": [
                            { "upstream_id": "v2-id", "weight": 1 },
                            { "upstream_id": "v1-id", "weight": 9 }
                        ]
                    }]
                }
            }),
        },
        Recipe {
            id: "advanced-rewrite",
            name: "Request URI & Header Fix",
            description: "Clean up legacy paths and add tracing headers.",
            kind: RecipeKind::Plugin,
            content: json!({
                "proxy-rewrite": {
                    "uri": "/api/v1/auth",
                    "headers": {
                        "set": { "X-Proxied-By": "APISIX" },
                        "remove": ["User-Agent", "Accept-Encoding"]
                    }
                }
            }),
        },
        Recipe {
            id: "cors-hardening",
            name: "Secure CORS Policy",
            description: "Strict browser security for multi-origin environments.",
            kind: RecipeKind::Plugin,
            content: json!({
                "cors": {
                    "allow_origins": "https://myapp.com",
                    "allow_methods": "GET,POST,OPTIONS",
                    "allow_headers": "Content-Type,Authorization",
                    "expose_headers": "Content-Length",
                    "max_age": 3600,
                    "allow_credential": true
                }
            }),
        },
    ]
});

/// All bundled recipes.
pub fn recipes() -> &'static [Recipe] {
    &RECIPES
}

/// Look up a recipe by id.
pub fn recipe(id: &str) -> Option<&'static Recipe> {
    RECIPES.iter().find(|r| r.id == id)
}
