//! Plugin configuration templates.

use std::path::Path;

use serde_json::{json, Map, Value};

use crate::codec::{self, Format, ParseError};

/// Mapping from plugin name to an example configuration payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateCatalog {
    entries: Map<String, Value>,
}

impl TemplateCatalog {
    /// Templates bundled with the dashboard.
    pub fn builtin() -> Self {
        let table = json!({
            "key-auth": {
                "key": "your-key-here"
            },
            "jwt-auth": {
                "key": "user-key",
                "secret": "your-secret",
                "algorithm": "HS256"
            },
            "basic-auth": {
                "username": "admin",
                "password": "password"
            },
            "rate-limiting": {
                "count": 100,
                "time_window": 60,
                "rejected_code": 429,
                "key": "remote_addr"
            },
            "prometheus": {},
            "proxy-rewrite": {
                "uri": "/new-uri",
                "host": "new-host.com",
                "headers": {
                    "set": { "X-Api-Version": "v1" },
                    "add": { "Via": "APISIX-Proxy" },
                    "remove": ["User-Agent"]
                }
            },
            "response-rewrite": {
                "status_code": 200,
                "headers": {
                    "set": { "X-Server": "APISIX-Dashboard" },
                    "remove": ["Server", "X-Powered-By"]
                },
                "body": "{\"message\": \"Rewritten by APISIX\"}"
            },
            "cors": {
                "allow_origins": "*",
                "allow_methods": "GET,POST,PUT,DELETE,PATCH,OPTIONS",
                "allow_headers": "*",
                "expose_headers": "*",
                "max_age": 3600,
                "allow_credential": true
            },
            "ip-restriction": {
                "whitelist": ["127.0.0.1", "192.168.1.0/24"]
            },
            "limit-count": {
                "count": 2,
                "time_window": 60,
                "rejected_code": 503,
                "key": "remote_addr"
            }
        });

        match table {
            Value::Object(entries) => Self { entries },
            _ => Self { entries: Map::new() },
        }
    }

    /// Load a catalog from an operator-supplied data file.
    ///
    /// The file must hold a single mapping of plugin name to payload.
    pub fn from_file(path: &Path, format: Format) -> Result<Self, ParseError> {
        let text = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_text(&text, format)
    }

    /// Parse a catalog from text.
    pub fn from_text(text: &str, format: Format) -> Result<Self, ParseError> {
        match codec::decode_value(text, format)? {
            Value::Object(entries) => Ok(Self { entries }),
            Value::Array(_) => Err(ParseError::NotAMapping("a sequence")),
            _ => Err(ParseError::NotAMapping("a scalar")),
        }
    }

    /// Example payload for a plugin, if one is known.
    pub fn template_for(&self, plugin: &str) -> Option<&Value> {
        self.entries.get(plugin)
    }

    /// Known plugin names, in table order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
