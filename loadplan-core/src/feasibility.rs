//! Compare a route's peak load against a tier's effective capacity.
#![expect(
    clippy::float_arithmetic,
    reason = "overflow and utilisation are floating-point differences and ratios"
)]

use crate::{Capacity, Load};

/// Result of checking a peak load against one capacity.
///
/// Utilisation is a plain ratio and may exceed `1.0` when the load does not
/// fit; callers use it to judge how far over the limit a route is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeasibilityOutcome {
    /// Peak load aboard at any point on the route.
    pub peak: Load,
    /// Effective capacity the peak was compared against.
    pub capacity: Capacity,
    /// Volume above capacity, or zero.
    pub volume_overflow: f64,
    /// Weight above capacity, or zero.
    pub weight_overflow: f64,
    /// Peak volume ÷ effective volume.
    pub volume_utilization: f64,
    /// Peak weight ÷ effective weight.
    pub weight_utilization: f64,
}

impl FeasibilityOutcome {
    /// `true` when neither dimension overflows.
    ///
    /// A load exactly equal to capacity fits.
    #[must_use]
    pub const fn is_feasible(&self) -> bool {
        self.volume_overflow <= 0.0 && self.weight_overflow <= 0.0
    }
}

/// Check `peak` against `capacity`.
///
/// # Examples
/// ```
/// use loadplan_core::{Capacity, Load, evaluate_feasibility};
///
/// let capacity = Capacity { volume_m3: 15.2, weight_kg: 1_140.0 };
/// let outcome = evaluate_feasibility(Load::new(20.0, 1_600.0), capacity);
/// assert!(!outcome.is_feasible());
/// assert!((outcome.volume_overflow - 4.8).abs() < 1e-9);
/// ```
#[must_use]
pub const fn evaluate_feasibility(peak: Load, capacity: Capacity) -> FeasibilityOutcome {
    FeasibilityOutcome {
        peak,
        capacity,
        volume_overflow: (peak.volume_m3 - capacity.volume_m3).max(0.0),
        weight_overflow: (peak.weight_kg - capacity.weight_kg).max(0.0),
        volume_utilization: ratio(peak.volume_m3, capacity.volume_m3),
        weight_utilization: ratio(peak.weight_kg, capacity.weight_kg),
    }
}

// Only hand-built capacities can be zero; any load saturates them.
const fn ratio(amount: f64, capacity: f64) -> f64 {
    if capacity > 0.0 {
        amount / capacity
    } else if amount > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}
