//! Customer bookings: one pickup, one delivery, a list of items.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{BookingId, ItemId, ValidationError};

/// A single customer order within a possibly multi-drop route.
///
/// Construction never fails; structural checks happen in
/// [`Booking::validate`] so that a malformed booking surfaces as a
/// [`ValidationError`] at evaluation time.
///
/// # Examples
/// ```
/// use loadplan_core::Booking;
///
/// let booking = Booking::new("b1", "1 High St", "9 Low Rd", ["sofa", "lamp"]);
/// assert_eq!(booking.item_ids.len(), 2);
/// assert!(booking.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Booking {
    /// Booking identifier, unique within a route.
    pub id: BookingId,
    /// Opaque pickup address handle.
    pub pickup_address: String,
    /// Opaque delivery address handle.
    pub delivery_address: String,
    /// Items to move, in the order the customer listed them.
    pub item_ids: Vec<ItemId>,
}

impl Booking {
    /// Construct a booking from raw parts.
    pub fn new<I, T>(
        id: impl Into<BookingId>,
        pickup_address: impl Into<String>,
        delivery_address: impl Into<String>,
        item_ids: I,
    ) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemId>,
    {
        Self {
            id: id.into(),
            pickup_address: pickup_address.into(),
            delivery_address: delivery_address.into(),
            item_ids: item_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Check that the booking lists at least one item.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyItemList`] when `item_ids` is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.item_ids.is_empty() {
            return Err(ValidationError::EmptyItemList {
                booking_id: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// Validate a route's bookings as a whole.
///
/// The list must be non-empty, every booking must carry items, and booking
/// identifiers must be unique so that stops map back to exactly one booking.
///
/// # Errors
/// Returns the first [`ValidationError`] encountered in input order.
pub fn validate_bookings(bookings: &[Booking]) -> Result<(), ValidationError> {
    if bookings.is_empty() {
        return Err(ValidationError::NoBookings);
    }
    let mut seen = std::collections::HashSet::with_capacity(bookings.len());
    for booking in bookings {
        booking.validate()?;
        if !seen.insert(&booking.id) {
            return Err(ValidationError::DuplicateBooking {
                booking_id: booking.id.clone(),
            });
        }
    }
    Ok(())
}
