//! Reconciliation output types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::resources::{Collection, Resource};

/// Label used for resources that carry no identity.
pub const UNNAMED: &str = "Unnamed";

/// Classification of a detected change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Add,
    Update,
    Delete,
}

impl ChangeKind {
    /// Tag used in detail lines.
    pub fn tag(self) -> &'static str {
        match self {
            ChangeKind::Add => "ADD",
            ChangeKind::Update => "UPDATE",
            ChangeKind::Delete => "DELETE",
        }
    }
}

/// One detected change.
///
/// `resource` is the candidate version for additions and updates and the
/// current version for deletions.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub kind: ChangeKind,
    pub collection: Collection,
    pub identity: Option<String>,
    pub resource: Resource,
}

impl Change {
    /// Identity, or the placeholder label when the resource has none.
    pub fn label(&self) -> &str {
        self.identity.as_deref().unwrap_or(UNNAMED)
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind.tag(), self.collection, self.label())
    }
}

/// Result of comparing two configuration sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub added: usize,
    pub updated: usize,
    pub deleted: usize,
    /// One human-readable line per change, in detection order.
    pub details: Vec<String>,
    /// Structured form of `details`, consumed by the apply step.
    #[serde(skip)]
    pub changes: Vec<Change>,
}

impl ChangeSummary {
    /// Count a change and append its detail line.
    pub fn record(&mut self, change: Change) {
        match change.kind {
            ChangeKind::Add => self.added += 1,
            ChangeKind::Update => self.updated += 1,
            ChangeKind::Delete => self.deleted += 1,
        }
        self.details.push(change.to_string());
        self.changes.push(change);
    }

    pub fn total(&self) -> usize {
        self.added + self.updated + self.deleted
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
