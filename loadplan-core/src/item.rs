//! Physical items carried between a pickup and a dropoff.
//!
//! Items are closed records: volume and weight are required, finite and
//! non-negative. Identifiers missing from a catalogue become explicit
//! placeholders via [`Item::placeholder`] rather than silently zeroed values.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ItemId;

/// Errors returned by [`Item::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ItemError {
    /// The identifier was empty or whitespace.
    #[error("item identifier must not be blank")]
    BlankId,
    /// Volume was negative, NaN or infinite.
    #[error("item {id} has invalid volume {value} m³")]
    InvalidVolume {
        /// Offending item.
        id: ItemId,
        /// Rejected value.
        value: f64,
    },
    /// Weight was negative, NaN or infinite.
    #[error("item {id} has invalid weight {value} kg")]
    InvalidWeight {
        /// Offending item.
        id: ItemId,
        /// Rejected value.
        value: f64,
    },
}

/// A physical object referenced by a booking.
///
/// Handling metadata (workers, dismantling and reassembly time) is carried for
/// downstream consumers but never enters the capacity arithmetic.
///
/// # Examples
/// ```
/// use loadplan_core::Item;
///
/// # fn main() -> Result<(), loadplan_core::ItemError> {
/// let wardrobe = Item::new("wardrobe", 1.8, 95.0)?
///     .with_workers_required(2)
///     .with_dismantling(30, 40);
/// assert_eq!(wardrobe.volume_m3(), 1.8);
/// assert!(wardrobe.dismantling_required());
/// assert!(!wardrobe.is_unresolved());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "ItemRecord", into = "ItemRecord")
)]
pub struct Item {
    id: ItemId,
    volume_m3: f64,
    weight_kg: f64,
    workers_required: u8,
    fits_standard_van: bool,
    dismantling_required: bool,
    dismantling_minutes: u32,
    reassembly_minutes: u32,
    unresolved: bool,
}

impl Item {
    /// Validate and construct an item with default handling metadata.
    ///
    /// Defaults: one worker, fits a standard van, no dismantling.
    ///
    /// # Errors
    /// Returns [`ItemError`] when the id is blank or either measurement is
    /// negative or not finite.
    pub fn new(id: impl Into<ItemId>, volume_m3: f64, weight_kg: f64) -> Result<Self, ItemError> {
        let item_id = id.into();
        if item_id.is_blank() {
            return Err(ItemError::BlankId);
        }
        if !is_valid_measure(volume_m3) {
            return Err(ItemError::InvalidVolume {
                id: item_id,
                value: volume_m3,
            });
        }
        if !is_valid_measure(weight_kg) {
            return Err(ItemError::InvalidWeight {
                id: item_id,
                value: weight_kg,
            });
        }
        Ok(Self {
            id: item_id,
            volume_m3,
            weight_kg,
            workers_required: 1,
            fits_standard_van: true,
            dismantling_required: false,
            dismantling_minutes: 0,
            reassembly_minutes: 0,
            unresolved: false,
        })
    }

    /// Zero-volume, zero-weight stand-in for an identifier the catalogue did
    /// not know.
    ///
    /// # Examples
    /// ```
    /// use loadplan_core::{Item, ItemId};
    ///
    /// let missing = Item::placeholder(ItemId::new("mystery-box"));
    /// assert!(missing.is_unresolved());
    /// assert_eq!(missing.weight_kg(), 0.0);
    /// ```
    #[must_use]
    pub const fn placeholder(id: ItemId) -> Self {
        Self {
            id,
            volume_m3: 0.0,
            weight_kg: 0.0,
            workers_required: 0,
            fits_standard_van: true,
            dismantling_required: false,
            dismantling_minutes: 0,
            reassembly_minutes: 0,
            unresolved: true,
        }
    }

    /// Set the minimum number of handlers.
    #[must_use]
    pub const fn with_workers_required(mut self, workers: u8) -> Self {
        self.workers_required = workers;
        self
    }

    /// Mark whether the item alone fits a standard van.
    #[must_use]
    pub const fn with_fits_standard_van(mut self, fits: bool) -> Self {
        self.fits_standard_van = fits;
        self
    }

    /// Record dismantling and reassembly times; marks the item as needing
    /// dismantling.
    #[must_use]
    pub const fn with_dismantling(
        mut self,
        dismantling_minutes: u32,
        reassembly_minutes: u32,
    ) -> Self {
        self.dismantling_required = true;
        self.dismantling_minutes = dismantling_minutes;
        self.reassembly_minutes = reassembly_minutes;
        self
    }

    /// Item identifier.
    #[must_use]
    pub const fn id(&self) -> &ItemId {
        &self.id
    }

    /// Volume in cubic metres.
    #[must_use]
    pub const fn volume_m3(&self) -> f64 {
        self.volume_m3
    }

    /// Mass in kilograms.
    #[must_use]
    pub const fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Minimum handlers needed.
    #[must_use]
    pub const fn workers_required(&self) -> u8 {
        self.workers_required
    }

    /// Whether the item alone fits a standard van.
    #[must_use]
    pub const fn fits_standard_van(&self) -> bool {
        self.fits_standard_van
    }

    /// Whether the item must be dismantled before loading.
    #[must_use]
    pub const fn dismantling_required(&self) -> bool {
        self.dismantling_required
    }

    /// Minutes spent dismantling at pickup.
    #[must_use]
    pub const fn dismantling_minutes(&self) -> u32 {
        self.dismantling_minutes
    }

    /// Minutes spent reassembling at dropoff.
    #[must_use]
    pub const fn reassembly_minutes(&self) -> u32 {
        self.reassembly_minutes
    }

    /// Whether this is a placeholder for an unknown identifier.
    #[must_use]
    pub const fn is_unresolved(&self) -> bool {
        self.unresolved
    }
}

fn is_valid_measure(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Wire shape of [`Item`]; optional handling fields fall back to defaults.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemRecord {
    id: ItemId,
    volume_m3: f64,
    weight_kg: f64,
    #[serde(default = "default_workers")]
    workers_required: u8,
    #[serde(default = "default_fits_standard_van")]
    fits_standard_van: bool,
    #[serde(default)]
    dismantling_required: bool,
    #[serde(default)]
    dismantling_minutes: u32,
    #[serde(default)]
    reassembly_minutes: u32,
    #[serde(default, skip_deserializing, skip_serializing_if = "std::ops::Not::not")]
    unresolved: bool,
}

#[cfg(feature = "serde")]
const fn default_workers() -> u8 {
    1
}

#[cfg(feature = "serde")]
const fn default_fits_standard_van() -> bool {
    true
}

#[cfg(feature = "serde")]
impl TryFrom<ItemRecord> for Item {
    type Error = ItemError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        let mut item = Self::new(record.id, record.volume_m3, record.weight_kg)?
            .with_workers_required(record.workers_required)
            .with_fits_standard_van(record.fits_standard_van);
        item.dismantling_required = record.dismantling_required;
        item.dismantling_minutes = record.dismantling_minutes;
        item.reassembly_minutes = record.reassembly_minutes;
        Ok(item)
    }
}

#[cfg(feature = "serde")]
impl From<Item> for ItemRecord {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            volume_m3: item.volume_m3,
            weight_kg: item.weight_kg,
            workers_required: item.workers_required,
            fits_standard_van: item.fits_standard_van,
            dismantling_required: item.dismantling_required,
            dismantling_minutes: item.dismantling_minutes,
            reassembly_minutes: item.reassembly_minutes,
            unresolved: item.unresolved,
        }
    }
}
