//! Import/export of configuration sets.
//!
//! # Data Flow
//! ```text
//! text + declared Format
//!     → decode_value (serde_json / serde_yaml into an ordered Value tree)
//!     → top-level shape check (must be a mapping)
//!     → ConfigurationSet
//!
//! ConfigurationSet
//!     → encode (pretty JSON, 2-space indent / block-style YAML)
//! ```
//!
//! # Design Decisions
//! - Format is always declared by the caller, never sniffed from content
//! - Both encodings pass through the same `serde_json::Value` tree so key order
//!   and number representation survive a round trip
//! - Resource entries are not schema-checked; malformed entries pass through

pub mod error;
pub mod format;

use std::path::Path;

use serde_json::Value;

use crate::resources::ConfigurationSet;

pub use error::ParseError;
pub use format::Format;

/// Encode a configuration set in the given format.
pub fn encode(set: &ConfigurationSet, format: Format) -> Result<String, ParseError> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(set)?),
        Format::Yaml => Ok(serde_yaml::to_string(set)?),
    }
}

/// Decode a configuration set from text in the given format.
pub fn decode(text: &str, format: Format) -> Result<ConfigurationSet, ParseError> {
    let value = decode_value(text, format)?;
    if !value.is_object() {
        return Err(ParseError::NotAMapping(kind_of(&value)));
    }
    serde_json::from_value(value).map_err(|e| ParseError::Shape(e.to_string()))
}

/// Read and decode a configuration set from a file.
pub fn decode_file(path: &Path, format: Format) -> Result<ConfigurationSet, ParseError> {
    let text = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    decode(&text, format)
}

/// Decode an arbitrary document without any shape requirement.
pub fn decode_value(text: &str, format: Format) -> Result<Value, ParseError> {
    match format {
        Format::Json => Ok(serde_json::from_str(text)?),
        Format::Yaml => Ok(serde_yaml::from_str(text)?),
    }
}

/// Encode an arbitrary document.
pub fn encode_value(value: &Value, format: Format) -> Result<String, ParseError> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(value)?),
        Format::Yaml => Ok(serde_yaml::to_string(value)?),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
