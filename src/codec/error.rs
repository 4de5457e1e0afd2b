//! Decode/encode failures.

use thiserror::Error;

/// Input text does not decode under the declared format.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Not well-formed JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Not well-formed YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Top-level document is not a mapping.
    #[error("expected a mapping at the top level, found {0}")]
    NotAMapping(&'static str),

    /// Well-formed, but a known section has the wrong shape.
    #[error("unexpected document shape: {0}")]
    Shape(String),

    /// The document could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
