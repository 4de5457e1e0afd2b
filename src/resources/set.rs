//! The configuration set: unit of comparison, import and export.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::resources::collection::Collection;

/// One gateway object (route, upstream, consumer, ...).
pub type Resource = Value;

/// A declarative snapshot of the gateway's configuration.
///
/// Any collection may be absent; absent and empty are treated alike by
/// readers but kept distinct so a decoded document re-encodes unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ConfigurationSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<Resource>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstreams: Option<Vec<Resource>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<Resource>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumers: Option<Vec<Resource>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssls: Option<Vec<Resource>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_rules: Option<Vec<Resource>>,

    /// Top-level sections this model does not know about (e.g. `plugin_configs`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigurationSet {
    /// Items of a collection, empty when the collection is absent.
    pub fn items(&self, collection: Collection) -> &[Resource] {
        self.slot(collection).as_deref().unwrap_or(&[])
    }

    /// Replace the items of a collection.
    pub fn set_items(&mut self, collection: Collection, items: Vec<Resource>) {
        *self.slot_mut(collection) = Some(items);
    }

    /// Total number of resources across all known collections.
    pub fn len(&self) -> usize {
        Collection::ALL.iter().map(|c| self.items(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, collection: Collection) -> &Option<Vec<Resource>> {
        match collection {
            Collection::Routes => &self.routes,
            Collection::Upstreams => &self.upstreams,
            Collection::Services => &self.services,
            Collection::Consumers => &self.consumers,
            Collection::Ssls => &self.ssls,
            Collection::GlobalRules => &self.global_rules,
        }
    }

    fn slot_mut(&mut self, collection: Collection) -> &mut Option<Vec<Resource>> {
        match collection {
            Collection::Routes => &mut self.routes,
            Collection::Upstreams => &mut self.upstreams,
            Collection::Services => &mut self.services,
            Collection::Consumers => &mut self.consumers,
            Collection::Ssls => &mut self.ssls,
            Collection::GlobalRules => &mut self.global_rules,
        }
    }
}
