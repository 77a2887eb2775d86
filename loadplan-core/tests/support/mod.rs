//! Builders shared by the integration tests.

use std::collections::HashMap;

use loadplan_core::{Booking, Item, ItemId};

/// Tolerance for comparing derived capacities and utilisation ratios.
const EPSILON: f64 = 1.0e-9;

/// Item with default handling metadata.
#[expect(
    clippy::expect_used,
    reason = "fixtures should fail fast during setup"
)]
pub fn item(id: &str, volume_m3: f64, weight_kg: f64) -> Item {
    Item::new(id, volume_m3, weight_kg).expect("fixture items are valid")
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

/// Booking with addresses derived from its id.
pub fn booking(id: &str, item_ids: &[&str]) -> Booking {
    Booking::new(
        id,
        format!("{id} pickup"),
        format!("{id} delivery"),
        item_ids.iter().copied(),
    )
}

/// Compare floats within a small epsilon.
#[expect(
    clippy::float_arithmetic,
    reason = "test delta computation requires float maths"
)]
pub fn assert_close(actual: f64, expected: f64) {
    let delta = (actual - expected).abs();
    assert!(
        delta <= EPSILON,
        "expected {expected}, got {actual} (|Δ| = {delta})"
    );
}
