//! Resolve item identifiers against a caller-supplied catalogue.
//!
//! The catalogue is an already-materialised lookup; fetching and caching it is
//! the caller's concern. Unknown identifiers never fail resolution: they turn
//! into [`Item::placeholder`] values and a warning.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::{Item, ItemId, ValidationError};

/// Read-only lookup from item identifier to physical attributes.
///
/// Implemented for `HashMap` and `BTreeMap` keyed by [`ItemId`] so a plain map
/// can be passed straight to the engine.
///
/// # Examples
///
/// ```rust
/// use loadplan_core::{Item, ItemCatalog, ItemId};
///
/// struct SingleItem(Item);
///
/// impl ItemCatalog for SingleItem {
///     fn lookup(&self, id: &ItemId) -> Option<&Item> {
///         (self.0.id() == id).then_some(&self.0)
///     }
/// }
///
/// let catalog = SingleItem(Item::new("lamp", 0.05, 2.0).unwrap());
/// assert!(catalog.lookup(&ItemId::new("lamp")).is_some());
/// assert!(catalog.lookup(&ItemId::new("piano")).is_none());
/// ```
pub trait ItemCatalog {
    /// Return the item registered under `id`, if any.
    fn lookup(&self, id: &ItemId) -> Option<&Item>;
}

impl<S: BuildHasher> ItemCatalog for HashMap<ItemId, Item, S> {
    fn lookup(&self, id: &ItemId) -> Option<&Item> {
        self.get(id)
    }
}

impl ItemCatalog for BTreeMap<ItemId, Item> {
    fn lookup(&self, id: &ItemId) -> Option<&Item> {
        self.get(id)
    }
}

/// Items resolved in input order, plus advisory warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedItems {
    /// One entry per requested identifier, placeholders included.
    pub items: Vec<Item>,
    /// One message per identifier that resolved to a placeholder.
    pub warnings: Vec<String>,
}

impl ResolvedItems {
    /// Identifiers that resolved to placeholders.
    pub fn unresolved_ids(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.items
            .iter()
            .filter(|item| item.is_unresolved())
            .map(Item::id)
    }
}

/// Resolve `ids` against `catalog`, keeping input order.
///
/// # Errors
/// Returns [`ValidationError::EmptyItemIds`] when `ids` is empty.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use loadplan_core::{Item, ItemId, resolve_items};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let chair = Item::new("chair", 0.3, 7.5)?;
/// let catalog = HashMap::from([(chair.id().clone(), chair)]);
/// let resolved = resolve_items(&[ItemId::new("chair"), ItemId::new("ghost")], &catalog)?;
///
/// assert_eq!(resolved.items.len(), 2);
/// assert_eq!(resolved.warnings.len(), 1);
/// # Ok(())
/// # }
/// ```
pub fn resolve_items<C>(ids: &[ItemId], catalog: &C) -> Result<ResolvedItems, ValidationError>
where
    C: ItemCatalog + ?Sized,
{
    if ids.is_empty() {
        return Err(ValidationError::EmptyItemIds);
    }
    let mut warnings = Vec::new();
    let items = ids
        .iter()
        .map(|id| match catalog.lookup(id) {
            Some(item) if !item.is_unresolved() => item.clone(),
            found => {
                log::warn!("item {id} not found in catalogue; using a zero placeholder");
                warnings.push(unresolved_warning(id));
                found.cloned().unwrap_or_else(|| Item::placeholder(id.clone()))
            }
        })
        .collect();
    Ok(ResolvedItems { items, warnings })
}

fn unresolved_warning(id: &ItemId) -> String {
    format!("Item '{id}' was not found in the catalogue and counts as zero volume and weight")
}
