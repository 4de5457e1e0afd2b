//! Configuration reconciliation.
//!
//! # Data Flow
//! ```text
//! (current ConfigurationSet, candidate ConfigurationSet)
//!     → engine.rs (per collection: add/update pass, then delete pass)
//!     → summary.rs (ChangeSummary: totals, detail lines, structured changes)
//!     → operator review
//!     → gateway::apply (push accepted changes)
//! ```
//!
//! # Design Decisions
//! - Matching is by identity only, never by position
//! - Equality is whole-resource structural equality; no field-level diff
//! - Pure: no I/O, no logging, no shared state
//! - `global_rules` is left out of the comparison

pub mod engine;
pub mod summary;

pub use engine::diff;
pub use summary::{Change, ChangeKind, ChangeSummary, UNNAMED};
