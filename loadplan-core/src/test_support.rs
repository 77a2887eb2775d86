//! Builders shared by unit tests.

use std::collections::HashMap;

use crate::{Booking, Item, ItemId};

/// Item with default handling metadata.
pub fn item(id: &str, volume_m3: f64, weight_kg: f64) -> Item {
    Item::new(id, volume_m3, weight_kg).expect("test items use valid measurements")
}

/// Catalogue keyed by each item's id.
pub fn catalog<I>(items: I) -> HashMap<ItemId, Item>
where
    I: IntoIterator<Item = Item>,
{
    items
        .into_iter()
        .map(|item| (item.id().clone(), item))
        .collect()
}

/// Booking whose addresses are derived from its id: `{id}-from`, `{id}-to`.
pub fn booking(id: &str, item_ids: &[&str]) -> Booking {
    Booking::new(
        id,
        format!("{id}-from"),
        format!("{id}-to"),
        item_ids.iter().copied(),
    )
}
