//! Identity-based diff between two configuration sets.
//!
//! For each collection in [`Collection::RECONCILED`] order:
//! 1. every candidate resource is matched against the current resource with
//!    the same identity: no match is an addition, a structurally different
//!    match is an update;
//! 2. every current resource without a candidate of the same identity is a
//!    deletion.
//!
//! A changed identity therefore shows up as one deletion plus one addition.
//! Resources without an identity only match identity-less resources that are
//! structurally equal to them.

use crate::reconcile::summary::{Change, ChangeKind, ChangeSummary};
use crate::resources::{identity_of, Collection, ConfigurationSet, Resource};

/// A resource paired with its resolved identity.
struct Keyed<'a> {
    identity: Option<String>,
    resource: &'a Resource,
}

impl<'a> Keyed<'a> {
    fn index(items: &'a [Resource], collection: Collection) -> Vec<Keyed<'a>> {
        items
            .iter()
            .map(|resource| Keyed {
                identity: identity_of(resource, collection),
                resource,
            })
            .collect()
    }
}

/// Compute the changes that turn `current` into `candidate`.
pub fn diff(current: &ConfigurationSet, candidate: &ConfigurationSet) -> ChangeSummary {
    let mut summary = ChangeSummary::default();
    for collection in Collection::RECONCILED {
        diff_collection(
            collection,
            current.items(collection),
            candidate.items(collection),
            &mut summary,
        );
    }
    summary
}

fn diff_collection(
    collection: Collection,
    old_items: &[Resource],
    new_items: &[Resource],
    summary: &mut ChangeSummary,
) {
    let old = Keyed::index(old_items, collection);
    let new = Keyed::index(new_items, collection);

    for item in &new {
        match counterpart(item, &old) {
            None => summary.record(change(ChangeKind::Add, collection, item)),
            Some(existing) if existing != item.resource => {
                summary.record(change(ChangeKind::Update, collection, item))
            }
            Some(_) => {}
        }
    }

    for item in &old {
        if counterpart(item, &new).is_none() {
            summary.record(change(ChangeKind::Delete, collection, item));
        }
    }
}

/// Find the resource on the other side that `item` is compared against.
///
/// When several share the identity, an equal one wins over the first one.
fn counterpart<'a>(item: &Keyed<'_>, others: &[Keyed<'a>]) -> Option<&'a Resource> {
    match &item.identity {
        Some(_) => {
            let mut same = others.iter().filter(|o| o.identity == item.identity);
            let first = same.next()?;
            if first.resource == item.resource {
                return Some(first.resource);
            }
            Some(
                same.find(|o| o.resource == item.resource)
                    .unwrap_or(first)
                    .resource,
            )
        }
        None => others
            .iter()
            .find(|o| o.identity.is_none() && o.resource == item.resource)
            .map(|o| o.resource),
    }
}

fn change(kind: ChangeKind, collection: Collection, item: &Keyed<'_>) -> Change {
    Change {
        kind,
        collection,
        identity: item.identity.clone(),
        resource: item.resource.clone(),
    }
}
