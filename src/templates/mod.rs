//! Read-only authoring aids served to the dashboard UI.
//!
//! # Responsibilities
//! - Plugin template catalog: plugin name → example configuration payload
//! - Recipe catalog: named, ready-made plugin/route/vars snippets
//!
//! # Design Decisions
//! - Loaded once at startup, shared via `Arc`, never mutated
//! - Builtin tables ship with the binary; an operator data file may replace
//!   the plugin table

pub mod plugins;
pub mod recipes;

pub use plugins::TemplateCatalog;
pub use recipes::{recipe, recipes, Recipe, RecipeKind};
