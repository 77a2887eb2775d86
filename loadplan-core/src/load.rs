//! Walk a stop sequence and track the load carried between stops.
//!
//! Loads are summed in the item model's own units (m³, kg) without rounding.
//! Whenever no booking is aboard the running load is exactly zero, so the
//! vehicle always ends the route empty even when floating-point subtraction
//! would leave a residue.
#![expect(
    clippy::float_arithmetic,
    reason = "load accumulation adds and subtracts floating-point volumes and weights"
)]

use std::collections::HashMap;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{BookingId, Item, Stop, StopKind};

/// Volume and weight carried at a point in time.
///
/// # Examples
/// ```
/// use loadplan_core::Load;
///
/// let total = Load::new(1.5, 20.0) + Load::new(0.5, 5.0);
/// assert_eq!(total, Load::new(2.0, 25.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Load {
    /// Volume in cubic metres.
    pub volume_m3: f64,
    /// Mass in kilograms.
    pub weight_kg: f64,
}

impl Load {
    /// Nothing aboard.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Construct a load from raw measurements.
    #[must_use]
    pub const fn new(volume_m3: f64, weight_kg: f64) -> Self {
        Self {
            volume_m3,
            weight_kg,
        }
    }

    /// Sum the measurements of `items` in iteration order.
    pub fn of_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Item>,
    {
        items
            .into_iter()
            .fold(Self::ZERO, |acc, item| {
                acc + Self::new(item.volume_m3(), item.weight_kg())
            })
    }

    /// Per-dimension maximum of two loads.
    #[must_use]
    pub const fn max(self, other: Self) -> Self {
        Self {
            volume_m3: self.volume_m3.max(other.volume_m3),
            weight_kg: self.weight_kg.max(other.weight_kg),
        }
    }
}

impl Add for Load {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.volume_m3 + rhs.volume_m3, self.weight_kg + rhs.weight_kg)
    }
}

impl AddAssign for Load {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Load {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.volume_m3 - rhs.volume_m3, self.weight_kg - rhs.weight_kg)
    }
}

impl SubAssign for Load {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

/// Load carried by each booking, keyed by booking.
pub type BookingLoads = HashMap<BookingId, Load>;

/// Load aboard immediately after a stop's update.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct LoadSample {
    /// Position of the stop in the route.
    pub sequence_index: usize,
    /// Booking served at the stop.
    pub booking_id: BookingId,
    /// Pickup or dropoff.
    pub kind: StopKind,
    /// Volume aboard after the stop, m³.
    pub volume_m3: f64,
    /// Weight aboard after the stop, kg.
    pub weight_kg: f64,
}

impl LoadSample {
    /// The sampled load.
    #[must_use]
    pub const fn load(&self) -> Load {
        Load::new(self.volume_m3, self.weight_kg)
    }
}

/// Stop-by-stop load record with running maxima.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadTimeline {
    samples: Vec<LoadSample>,
    peak: Load,
}

impl LoadTimeline {
    /// One sample per stop, in route order.
    #[must_use]
    pub fn samples(&self) -> &[LoadSample] {
        &self.samples
    }

    /// Highest volume and highest weight seen anywhere on the route.
    ///
    /// The two maxima may occur at different stops.
    #[must_use]
    pub const fn peak(&self) -> Load {
        self.peak
    }

    /// Load aboard after the last stop.
    #[must_use]
    pub fn final_load(&self) -> Load {
        self.samples.last().map_or(Load::ZERO, LoadSample::load)
    }
}

/// Simulate the route, applying each booking's load at its stops.
///
/// Pickups add the booking's load and dropoffs subtract it; the running load
/// is compared against the maxima after every stop. A stop whose booking is
/// missing from `loads` carries nothing.
///
/// # Examples
/// ```
/// use loadplan_core::{Booking, BookingId, BookingLoads, Load, SequencingPolicy, accumulate};
///
/// let bookings = [
///     Booking::new("a", "A1", "A2", ["crate"]),
///     Booking::new("b", "B1", "B2", ["crate"]),
/// ];
/// let stops = SequencingPolicy::Batch.build(&bookings);
/// let loads = BookingLoads::from([
///     (BookingId::new("a"), Load::new(2.0, 50.0)),
///     (BookingId::new("b"), Load::new(3.0, 10.0)),
/// ]);
/// let timeline = accumulate(&stops, &loads);
/// assert_eq!(timeline.peak(), Load::new(5.0, 60.0));
/// assert_eq!(timeline.final_load(), Load::ZERO);
/// ```
#[must_use]
pub fn accumulate<S>(stops: &[Stop], loads: &HashMap<BookingId, Load, S>) -> LoadTimeline
where
    S: std::hash::BuildHasher,
{
    let mut current = Load::ZERO;
    let mut peak = Load::ZERO;
    let mut aboard = 0_usize;
    let mut samples = Vec::with_capacity(stops.len());
    for stop in stops {
        let delta = booking_load(loads, &stop.booking_id);
        match stop.kind {
            StopKind::Pickup => {
                current += delta;
                aboard = aboard.saturating_add(1);
            }
            StopKind::Dropoff => {
                current -= delta;
                aboard = aboard.saturating_sub(1);
            }
        }
        if aboard == 0 {
            current = Load::ZERO;
        }
        peak = peak.max(current);
        samples.push(LoadSample {
            sequence_index: stop.sequence_index,
            booking_id: stop.booking_id.clone(),
            kind: stop.kind,
            volume_m3: current.volume_m3,
            weight_kg: current.weight_kg,
        });
    }
    LoadTimeline { samples, peak }
}

fn booking_load<S>(loads: &HashMap<BookingId, Load, S>, booking_id: &BookingId) -> Load
where
    S: std::hash::BuildHasher,
{
    loads.get(booking_id).copied().unwrap_or_else(|| {
        log::warn!("no load recorded for booking {booking_id}; treating it as empty");
        debug_assert!(false, "no load recorded for booking {booking_id}");
        Load::ZERO
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SequencingPolicy;
    use crate::test_support::booking;
    use rstest::rstest;

    fn loads(entries: &[(&str, f64, f64)]) -> BookingLoads {
        entries
            .iter()
            .map(|(id, volume, weight)| (BookingId::new(*id), Load::new(*volume, *weight)))
            .collect()
    }

    #[rstest]
    fn batch_route_peaks_with_everything_aboard() {
        let bookings = [booking("a", &["x"]), booking("b", &["y"])];
        let stops = SequencingPolicy::Batch.build(&bookings);
        let timeline = accumulate(&stops, &loads(&[("a", 2.0, 100.0), ("b", 2.0, 50.0)]));

        let volumes: Vec<f64> = timeline.samples().iter().map(|s| s.volume_m3).collect();
        assert_eq!(volumes, vec![2.0, 4.0, 2.0, 0.0]);
        assert_eq!(timeline.peak(), Load::new(4.0, 150.0));
    }

    #[rstest]
    fn paired_route_peaks_at_largest_single_booking() {
        let bookings = [booking("a", &["x"]), booking("b", &["y"])];
        let stops = SequencingPolicy::Paired.build(&bookings);
        let timeline = accumulate(&stops, &loads(&[("a", 2.0, 100.0), ("b", 3.0, 50.0)]));
        assert_eq!(timeline.peak(), Load::new(3.0, 100.0));
    }

    #[rstest]
    fn volume_and_weight_peaks_are_tracked_independently() {
        let bookings = [booking("bulky", &["x"]), booking("heavy", &["y"])];
        let stops = SequencingPolicy::Paired.build(&bookings);
        let timeline = accumulate(
            &stops,
            &loads(&[("bulky", 9.0, 20.0), ("heavy", 1.0, 900.0)]),
        );
        assert_eq!(timeline.peak(), Load::new(9.0, 900.0));
    }

    #[rstest]
    fn awkward_decimals_still_return_to_zero() {
        let bookings = [booking("a", &["x"]), booking("b", &["y"]), booking("c", &["z"])];
        let stops = SequencingPolicy::Batch.build(&bookings);
        let timeline = accumulate(
            &stops,
            &loads(&[("a", 0.1, 0.7), ("b", 0.2, 0.1), ("c", 0.3, 0.2)]),
        );
        assert_eq!(timeline.final_load(), Load::ZERO);
        assert_eq!(timeline.samples().len(), 6);
    }

    #[rstest]
    fn of_items_sums_in_order() {
        let items = [
            Item::new("a", 0.5, 10.0).expect("valid"),
            Item::new("b", 1.5, 30.0).expect("valid"),
            Item::placeholder("ghost".into()),
        ];
        assert_eq!(Load::of_items(&items), Load::new(2.0, 40.0));
    }

    #[rstest]
    fn empty_route_has_empty_timeline() {
        let timeline = accumulate(&[], &BookingLoads::new());
        assert!(timeline.samples().is_empty());
        assert_eq!(timeline.peak(), Load::ZERO);
        assert_eq!(timeline.final_load(), Load::ZERO);
    }
}
