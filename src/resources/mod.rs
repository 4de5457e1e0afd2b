//! Gateway resource model.
//!
//! # Data Flow
//! ```text
//! live fetch (gateway::snapshot) or uploaded text (codec)
//!     → set.rs (ConfigurationSet: one ordered sequence per collection)
//!     → collection.rs (collection names + identity policy)
//!     → reconcile engine (identity_of on every resource)
//! ```
//!
//! # Design Decisions
//! - Resources stay semi-structured (`serde_json::Value`); plugin payloads are opaque
//! - Identity field is a fixed per-collection policy, never inferred from content
//! - No validation here: the gateway is the authority on resource schemas

pub mod collection;
pub mod set;

pub use collection::{identity_of, Collection};
pub use set::{ConfigurationSet, Resource};
