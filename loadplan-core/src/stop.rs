//! Pickup and dropoff events along a route.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::BookingId;

/// Whether a stop loads or unloads a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum StopKind {
    /// The booking's items are loaded.
    Pickup,
    /// The booking's items are unloaded.
    Dropoff,
}

impl StopKind {
    /// Return the kind as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Dropoff => "dropoff",
        }
    }
}

impl std::fmt::Display for StopKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One physical event in the route.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Stop {
    /// Booking served at this stop.
    pub booking_id: BookingId,
    /// Pickup or dropoff.
    pub kind: StopKind,
    /// Zero-based position in the route.
    pub sequence_index: usize,
    /// Address handle copied from the booking.
    pub address: String,
}
