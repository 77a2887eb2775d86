//! Expand bookings into an ordered stop sequence.
//!
//! Every policy is deterministic and keeps each booking's pickup ahead of its
//! dropoff. [`check_precedence`] verifies that contract for any stop list.

use std::collections::HashMap;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Booking, BookingId, Stop, StopKind};

/// Stop ordering strategy.
///
/// # Examples
/// ```
/// use loadplan_core::{Booking, SequencingPolicy, StopKind};
///
/// let bookings = [
///     Booking::new("a", "A1", "A2", ["box"]),
///     Booking::new("b", "B1", "B2", ["box"]),
/// ];
/// let kinds: Vec<StopKind> = SequencingPolicy::Batch
///     .build(&bookings)
///     .into_iter()
///     .map(|stop| stop.kind)
///     .collect();
/// assert_eq!(
///     kinds,
///     [StopKind::Pickup, StopKind::Pickup, StopKind::Dropoff, StopKind::Dropoff]
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum SequencingPolicy {
    /// All pickups in booking order, then all dropoffs in booking order.
    #[default]
    Batch,
    /// Each booking's pickup immediately followed by its dropoff.
    Paired,
}

impl SequencingPolicy {
    /// Return the policy as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Batch => "batch",
            Self::Paired => "paired",
        }
    }

    /// Produce exactly two stops per booking, indexed from zero.
    #[must_use]
    pub fn build(self, bookings: &[Booking]) -> Vec<Stop> {
        let events: Vec<(&Booking, StopKind)> = match self {
            Self::Batch => bookings
                .iter()
                .map(|b| (b, StopKind::Pickup))
                .chain(bookings.iter().map(|b| (b, StopKind::Dropoff)))
                .collect(),
            Self::Paired => bookings
                .iter()
                .flat_map(|b| [(b, StopKind::Pickup), (b, StopKind::Dropoff)])
                .collect(),
        };
        events
            .into_iter()
            .enumerate()
            .map(|(sequence_index, (booking, kind))| Stop {
                booking_id: booking.id.clone(),
                kind,
                sequence_index,
                address: match kind {
                    StopKind::Pickup => booking.pickup_address.clone(),
                    StopKind::Dropoff => booking.delivery_address.clone(),
                },
            })
            .collect()
    }
}

impl std::fmt::Display for SequencingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SequencingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "batch" => Ok(Self::Batch),
            "paired" => Ok(Self::Paired),
            _ => Err(format!("unknown sequencing policy '{s}'")),
        }
    }
}

/// Ways a stop list can break the route contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// `sequence_index` did not match the stop's position.
    #[error("stop at position {position} carries sequence index {found}")]
    IndexMismatch {
        /// Position in the list.
        position: usize,
        /// Index recorded on the stop.
        found: usize,
    },
    /// A booking was dropped off before being picked up.
    #[error("booking {booking_id} is dropped off before it is picked up")]
    DropoffBeforePickup {
        /// Offending booking.
        booking_id: BookingId,
    },
    /// A booking had two stops of the same kind.
    #[error("booking {booking_id} has more than one {kind} stop")]
    DuplicateStop {
        /// Offending booking.
        booking_id: BookingId,
        /// Repeated kind.
        kind: StopKind,
    },
    /// A booking was picked up and never dropped off.
    #[error("booking {booking_id} is never dropped off")]
    MissingDropoff {
        /// Offending booking.
        booking_id: BookingId,
    },
}

#[derive(Default)]
struct Seen {
    pickup: bool,
    dropoff: bool,
}

/// Verify indexes are contiguous and every booking has one pickup followed by
/// one dropoff.
///
/// # Errors
/// Returns the first [`SequenceError`] found walking the list.
pub fn check_precedence(stops: &[Stop]) -> Result<(), SequenceError> {
    let mut seen: HashMap<&BookingId, Seen> = HashMap::new();
    let mut first_seen: Vec<&BookingId> = Vec::new();
    for (position, stop) in stops.iter().enumerate() {
        if stop.sequence_index != position {
            return Err(SequenceError::IndexMismatch {
                position,
                found: stop.sequence_index,
            });
        }
        let entry = seen.entry(&stop.booking_id).or_insert_with(|| {
            first_seen.push(&stop.booking_id);
            Seen::default()
        });
        match stop.kind {
            StopKind::Pickup if entry.pickup => {
                return Err(duplicate(&stop.booking_id, StopKind::Pickup));
            }
            StopKind::Pickup => entry.pickup = true,
            StopKind::Dropoff if entry.dropoff => {
                return Err(duplicate(&stop.booking_id, StopKind::Dropoff));
            }
            StopKind::Dropoff if !entry.pickup => {
                return Err(SequenceError::DropoffBeforePickup {
                    booking_id: stop.booking_id.clone(),
                });
            }
            StopKind::Dropoff => entry.dropoff = true,
        }
    }
    for booking_id in first_seen {
        if seen.get(booking_id).is_some_and(|s| !s.dropoff) {
            return Err(SequenceError::MissingDropoff {
                booking_id: booking_id.clone(),
            });
        }
    }
    Ok(())
}

fn duplicate(booking_id: &BookingId, kind: StopKind) -> SequenceError {
    SequenceError::DuplicateStop {
        booking_id: booking_id.clone(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::booking;
    use rstest::{fixture, rstest};

    #[fixture]
    fn three_bookings() -> Vec<Booking> {
        vec![
            booking("a", &["x"]),
            booking("b", &["y"]),
            booking("c", &["z"]),
        ]
    }

    fn labels(stops: &[Stop]) -> Vec<String> {
        stops
            .iter()
            .map(|s| format!("{}:{}", s.kind, s.booking_id))
            .collect()
    }

    #[rstest]
    fn batch_policy_groups_pickups_then_dropoffs(three_bookings: Vec<Booking>) {
        let stops = SequencingPolicy::Batch.build(&three_bookings);
        assert_eq!(
            labels(&stops),
            vec![
                "pickup:a", "pickup:b", "pickup:c", "dropoff:a", "dropoff:b", "dropoff:c"
            ]
        );
        assert_eq!(check_precedence(&stops), Ok(()));
    }

    #[rstest]
    fn paired_policy_interleaves_each_booking(three_bookings: Vec<Booking>) {
        let stops = SequencingPolicy::Paired.build(&three_bookings);
        assert_eq!(
            labels(&stops),
            vec![
                "pickup:a", "dropoff:a", "pickup:b", "dropoff:b", "pickup:c", "dropoff:c"
            ]
        );
        assert_eq!(check_precedence(&stops), Ok(()));
    }

    #[rstest]
    #[case(SequencingPolicy::Batch)]
    #[case(SequencingPolicy::Paired)]
    fn single_booking_yields_two_stops(#[case] policy: SequencingPolicy) {
        let stops = policy.build(&[booking("solo", &["x"])]);
        assert_eq!(stops.len(), 2);
        let first = stops.first().expect("pickup stop");
        let last = stops.last().expect("dropoff stop");
        assert_eq!(first.kind, StopKind::Pickup);
        assert_eq!(first.address, "solo-from");
        assert_eq!(last.kind, StopKind::Dropoff);
        assert_eq!(last.address, "solo-to");
    }

    #[rstest]
    fn detects_dropoff_before_pickup(three_bookings: Vec<Booking>) {
        let mut stops = SequencingPolicy::Paired.build(&three_bookings);
        stops.swap(0, 1);
        for (index, stop) in stops.iter_mut().enumerate() {
            stop.sequence_index = index;
        }
        assert_eq!(
            check_precedence(&stops),
            Err(SequenceError::DropoffBeforePickup {
                booking_id: BookingId::new("a")
            })
        );
    }

    #[rstest]
    fn detects_missing_dropoff(three_bookings: Vec<Booking>) {
        let mut stops = SequencingPolicy::Batch.build(&three_bookings);
        stops.pop();
        assert_eq!(
            check_precedence(&stops),
            Err(SequenceError::MissingDropoff {
                booking_id: BookingId::new("c")
            })
        );
    }

    #[rstest]
    fn detects_index_gaps(three_bookings: Vec<Booking>) {
        let mut stops = SequencingPolicy::Batch.build(&three_bookings);
        stops.remove(1);
        assert!(matches!(
            check_precedence(&stops),
            Err(SequenceError::IndexMismatch { position: 1, found: 2 })
        ));
    }

    #[rstest]
    #[case("batch", Ok(SequencingPolicy::Batch))]
    #[case(" Paired ", Ok(SequencingPolicy::Paired))]
    fn parses_policy_names(#[case] raw: &str, #[case] expected: Result<SequencingPolicy, String>) {
        assert_eq!(raw.parse::<SequencingPolicy>(), expected);
    }

    #[rstest]
    fn parsing_rejects_unknown() {
        let err = "nearest".parse::<SequencingPolicy>().expect_err("unknown policy");
        assert!(err.contains("unknown sequencing policy"));
    }
}
