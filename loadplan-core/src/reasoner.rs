//! Explain an infeasible outcome and propose remedies.
//!
//! The reasoner never fails. Given a feasible outcome it returns an empty
//! [`Rejection`]; given an infeasible one it always offers at least one
//! [`Suggestion`].
#![expect(
    clippy::float_arithmetic,
    reason = "van counts are ratios of peak load to raw capacity"
)]

use std::collections::BTreeSet;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CapacityProfile, CapacityRegistry, FeasibilityOutcome, Item, ItemId, Load, TierName};

/// Capacity dimension that can overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum CapacityDimension {
    /// Cubic metres.
    Volume,
    /// Kilograms.
    Weight,
}

impl CapacityDimension {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Volume => "Volume",
            Self::Weight => "Weight",
        }
    }

    /// Unit suffix used in messages.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Volume => "m³",
            Self::Weight => "kg",
        }
    }
}

/// One violated capacity dimension.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct RejectionReason {
    /// Dimension that overflowed.
    pub dimension: CapacityDimension,
    /// Peak amount the route needs.
    pub required: f64,
    /// Effective capacity of the evaluated tier.
    pub available: f64,
    /// `required − available`.
    pub overflow: f64,
    /// Rendered message, e.g. `Volume exceeds capacity: 20.00m³ > 15.20m³ (over by 4.80m³)`.
    pub message: String,
}

impl RejectionReason {
    fn new(dimension: CapacityDimension, required: f64, available: f64, overflow: f64) -> Self {
        let unit = dimension.unit();
        let message = format!(
            "{} exceeds capacity: {required:.2}{unit} > {available:.2}{unit} (over by {overflow:.2}{unit})",
            dimension.label()
        );
        Self {
            dimension,
            required,
            available,
            overflow,
            message,
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A remedy for an infeasible route.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum Suggestion {
    /// A looser-buffer tier carries the load in one vehicle.
    UpgradeTier {
        /// Tier that fits.
        tier: TierName,
    },
    /// Divide the bookings across more than one vehicle.
    SplitLoad,
    /// No single vehicle in the fleet can carry the load.
    DispatchVans {
        /// Minimum number of the largest vans needed.
        count: u32,
    },
    /// An item needs a specialty vehicle on its own.
    OversizedItem {
        /// Offending item.
        item_id: ItemId,
    },
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpgradeTier { tier } => write!(
                f,
                "Upgrade to a higher service tier: {tier} has room for this load"
            ),
            Self::SplitLoad => f.write_str("Split into multiple vans"),
            Self::DispatchVans { count } => write!(f, "Dispatch {count} vans to carry the load"),
            Self::OversizedItem { item_id } => write!(
                f,
                "Item '{item_id}' does not fit a standard van and needs a specialty vehicle"
            ),
        }
    }
}

/// Switches for the heuristic parts of suggestion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct SuggestionPolicy {
    /// Offer a tier upgrade when another tier fits the load.
    pub suggest_tier_upgrades: bool,
    /// Call out items flagged as not fitting a standard van.
    pub flag_oversized_items: bool,
}

impl Default for SuggestionPolicy {
    fn default() -> Self {
        Self {
            suggest_tier_upgrades: true,
            flag_oversized_items: true,
        }
    }
}

/// Everything the reasoner has to say about one outcome.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rejection {
    /// One entry per overflowing dimension, volume first.
    pub reasons: Vec<RejectionReason>,
    /// Remedies in presentation order.
    pub suggestions: Vec<Suggestion>,
    /// The peak exceeds the largest raw capacity in the fleet.
    pub requires_multiple_vans: bool,
}

/// Explain `outcome` for the tier described by `evaluated`.
///
/// Suggestions appear in this order:
/// 1. [`Suggestion::UpgradeTier`] naming the tightest other tier whose
///    effective capacity holds the peak, when the policy allows it.
/// 2. [`Suggestion::SplitLoad`] when no upgrade was offered or no single van
///    can carry the load.
/// 3. [`Suggestion::DispatchVans`] when no single van can carry the load.
/// 4. [`Suggestion::OversizedItem`] for each distinct resolved item flagged as
///    not fitting a standard van, when the policy allows it.
///
/// # Examples
/// ```
/// use loadplan_core::{
///     CapacityRegistry, Load, Suggestion, SuggestionPolicy, TierName, evaluate_feasibility,
///     explain,
/// };
///
/// let registry = CapacityRegistry::default();
/// let express = registry.resolve(&TierName::express()).profile;
/// let outcome = evaluate_feasibility(Load::new(14.0, 100.0), express.effective_capacity());
/// let rejection = explain(&outcome, express, &[], &registry, SuggestionPolicy::default());
///
/// assert!(!rejection.requires_multiple_vans);
/// assert_eq!(
///     rejection.suggestions,
///     [Suggestion::UpgradeTier { tier: TierName::standard() }]
/// );
/// ```
#[must_use]
pub fn explain(
    outcome: &FeasibilityOutcome,
    evaluated: &CapacityProfile,
    items: &[Item],
    registry: &CapacityRegistry,
    policy: SuggestionPolicy,
) -> Rejection {
    if outcome.is_feasible() {
        return Rejection::default();
    }
    let reasons = rejection_reasons(outcome);
    let largest = registry.largest_raw_capacity();
    let peak = outcome.peak;
    let requires_multiple_vans =
        peak.volume_m3 > largest.volume_m3 || peak.weight_kg > largest.weight_kg;

    let mut suggestions = Vec::new();
    let upgrade = if policy.suggest_tier_upgrades && !requires_multiple_vans {
        upgrade_candidate(peak, evaluated, registry)
    } else {
        None
    };
    let offered_upgrade = upgrade.is_some();
    suggestions.extend(upgrade.map(|tier| Suggestion::UpgradeTier { tier }));
    if !offered_upgrade || requires_multiple_vans {
        suggestions.push(Suggestion::SplitLoad);
    }
    if requires_multiple_vans {
        suggestions.push(Suggestion::DispatchVans {
            count: vans_needed(peak, largest.volume_m3, largest.weight_kg),
        });
    }
    if policy.flag_oversized_items {
        suggestions.extend(oversized_items(items).map(|item_id| Suggestion::OversizedItem {
            item_id,
        }));
    }

    Rejection {
        reasons,
        suggestions,
        requires_multiple_vans,
    }
}

fn rejection_reasons(outcome: &FeasibilityOutcome) -> Vec<RejectionReason> {
    let mut reasons = Vec::with_capacity(2);
    if outcome.volume_overflow > 0.0 {
        reasons.push(RejectionReason::new(
            CapacityDimension::Volume,
            outcome.peak.volume_m3,
            outcome.capacity.volume_m3,
            outcome.volume_overflow,
        ));
    }
    if outcome.weight_overflow > 0.0 {
        reasons.push(RejectionReason::new(
            CapacityDimension::Weight,
            outcome.peak.weight_kg,
            outcome.capacity.weight_kg,
            outcome.weight_overflow,
        ));
    }
    reasons
}

/// Other tier with an equal or looser buffer whose effective capacity holds
/// `peak`, choosing the smallest such capacity and breaking ties by name.
fn upgrade_candidate(
    peak: Load,
    evaluated: &CapacityProfile,
    registry: &CapacityRegistry,
) -> Option<TierName> {
    registry
        .profiles()
        .filter(|profile| profile.tier() != evaluated.tier())
        .filter(|profile| profile.buffer_fraction() <= evaluated.buffer_fraction())
        .filter(|profile| {
            let capacity = profile.effective_capacity();
            peak.volume_m3 <= capacity.volume_m3 && peak.weight_kg <= capacity.weight_kg
        })
        .min_by(|a, b| {
            let (a_cap, b_cap) = (a.effective_capacity(), b.effective_capacity());
            a_cap
                .volume_m3
                .total_cmp(&b_cap.volume_m3)
                .then_with(|| a_cap.weight_kg.total_cmp(&b_cap.weight_kg))
                .then_with(|| a.tier().cmp(b.tier()))
        })
        .map(|profile| profile.tier().clone())
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "van counts are small positive integers after ceil and clamping"
)]
fn vans_needed(peak: Load, largest_volume: f64, largest_weight: f64) -> u32 {
    let by_volume = peak.volume_m3 / largest_volume;
    let by_weight = peak.weight_kg / largest_weight;
    let needed = by_volume.max(by_weight).ceil();
    if needed.is_finite() {
        needed.clamp(2.0, f64::from(u32::MAX)) as u32
    } else {
        u32::MAX
    }
}

fn oversized_items(items: &[Item]) -> impl Iterator<Item = ItemId> + '_ {
    let mut seen = BTreeSet::new();
    items
        .iter()
        .filter(|item| !item.is_unresolved() && !item.fits_standard_van())
        .filter(move |item| seen.insert(item.id().clone()))
        .map(|item| item.id().clone())
}
