//! Structural input errors.
//!
//! Infeasibility is not an error: an overloaded route is reported through a
//! fully populated [`RoutePlan`](crate::RoutePlan). Only caller misuse ends
//! up here.

use thiserror::Error;

use crate::BookingId;

/// Errors returned when evaluation inputs are structurally invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The route contained no bookings.
    #[error("route must contain at least one booking")]
    NoBookings,
    /// A booking listed no items.
    #[error("booking {booking_id} must list at least one item")]
    EmptyItemList {
        /// Offending booking.
        booking_id: BookingId,
    },
    /// Two bookings shared an identifier.
    #[error("booking {booking_id} appears more than once in the route")]
    DuplicateBooking {
        /// Repeated identifier.
        booking_id: BookingId,
    },
    /// The item resolver was handed an empty identifier list.
    #[error("at least one item identifier is required")]
    EmptyItemIds,
    /// A multi-tier comparison was requested for no tiers.
    #[error("at least one tier must be requested")]
    NoTiers,
}
