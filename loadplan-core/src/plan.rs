//! Evaluation output: the route plan and its capacity analysis.
#![expect(
    clippy::float_arithmetic,
    reason = "utilisation percentages are scaled and rounded floats"
)]

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{LoadSample, RejectionReason, Stop, Suggestion, TierName};

/// Peak load, utilisation and warnings for one tier.
///
/// Ratios are stored unrounded; use the `*_percent` helpers for display.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct RouteCapacityAnalysis {
    /// Peak volume ÷ effective volume capacity.
    pub peak_volume_utilization: f64,
    /// Peak weight ÷ effective weight capacity.
    pub peak_weight_utilization: f64,
    /// Highest volume aboard, m³.
    pub peak_volume_m3: f64,
    /// Highest weight aboard, kg.
    pub peak_weight_kg: f64,
    /// Effective volume capacity of the tier used, m³.
    pub effective_volume_m3: f64,
    /// Effective weight capacity of the tier used, kg.
    pub effective_weight_kg: f64,
    /// Load aboard after each stop.
    pub timeline: Vec<LoadSample>,
    /// Advisory messages such as unresolved items or tier fallback.
    pub warnings: Vec<String>,
}

impl RouteCapacityAnalysis {
    /// Peak volume utilisation as a percentage with one decimal place.
    ///
    /// # Examples
    /// ```
    /// use loadplan_core::RouteCapacityAnalysis;
    ///
    /// let analysis = RouteCapacityAnalysis {
    ///     peak_volume_utilization: 0.394_736,
    ///     ..RouteCapacityAnalysis::default()
    /// };
    /// assert_eq!(analysis.volume_utilization_percent(), 39.5);
    /// ```
    #[must_use]
    pub fn volume_utilization_percent(&self) -> f64 {
        percent(self.peak_volume_utilization)
    }

    /// Peak weight utilisation as a percentage with one decimal place.
    #[must_use]
    pub fn weight_utilization_percent(&self) -> f64 {
        percent(self.peak_weight_utilization)
    }
}

fn percent(ratio: f64) -> f64 {
    (ratio * 1_000.0).round() / 10.0
}

/// Result of evaluating a route against one tier.
///
/// An infeasible plan is still a complete answer: it carries the analysis,
/// reasons and suggestions but no stop list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct RoutePlan {
    /// Tier the caller asked for.
    pub tier: TierName,
    /// Tier whose profile was applied; differs from `tier` after a fallback.
    pub resolved_tier: TierName,
    /// Whether one vehicle of this tier can carry the route.
    pub is_feasible: bool,
    /// Ordered stops when feasible, `None` otherwise.
    pub stops: Option<Vec<Stop>>,
    /// Load and utilisation details.
    pub capacity_analysis: RouteCapacityAnalysis,
    /// One entry per overflowing dimension.
    pub rejection_reasons: Vec<RejectionReason>,
    /// Remedies for an infeasible route.
    pub suggestions: Vec<Suggestion>,
    /// No single vehicle in the fleet can carry the peak load.
    pub requires_multiple_vans: bool,
}

impl RoutePlan {
    /// Suggestions rendered as display strings.
    #[must_use]
    pub fn suggestion_messages(&self) -> Vec<String> {
        self.suggestions.iter().map(ToString::to_string).collect()
    }

    /// Rejection reasons rendered as display strings.
    #[must_use]
    pub fn rejection_messages(&self) -> Vec<&str> {
        self.rejection_reasons
            .iter()
            .map(|reason| reason.message.as_str())
            .collect()
    }
}

/// Plans for several tiers over the same bookings, keyed by requested tier.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use loadplan_core::{Booking, CapacityRegistry, Item, TierName, evaluate_all_tiers};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let sofa = Item::new("sofa", 14.0, 90.0)?;
/// let catalog = HashMap::from([(sofa.id().clone(), sofa)]);
/// let bookings = [Booking::new("b1", "A", "B", ["sofa"])];
/// let tiers = [TierName::economy(), TierName::standard(), TierName::express()];
/// let comparison =
///     evaluate_all_tiers(&bookings, &tiers, &catalog, &CapacityRegistry::default())?;
///
/// let feasible: Vec<&str> = comparison.feasible_tiers().map(TierName::as_str).collect();
/// assert_eq!(feasible, ["economy", "standard"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(transparent)
)]
pub struct TierComparison {
    plans: BTreeMap<TierName, RoutePlan>,
}

impl TierComparison {
    pub(crate) const fn new(plans: BTreeMap<TierName, RoutePlan>) -> Self {
        Self { plans }
    }

    /// Plan for `tier`, if it was requested.
    #[must_use]
    pub fn get(&self, tier: &TierName) -> Option<&RoutePlan> {
        self.plans.get(tier)
    }

    /// Requested tiers whose plan is feasible, in name order.
    pub fn feasible_tiers(&self) -> impl Iterator<Item = &TierName> + '_ {
        self.plans
            .iter()
            .filter(|(_, plan)| plan.is_feasible)
            .map(|(tier, _)| tier)
    }

    /// Iterate plans in tier-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&TierName, &RoutePlan)> + '_ {
        self.plans.iter()
    }

    /// Number of tiers evaluated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// Whether no tiers were evaluated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl<'a> IntoIterator for &'a TierComparison {
    type Item = (&'a TierName, &'a RoutePlan);
    type IntoIter = std::collections::btree_map::Iter<'a, TierName, RoutePlan>;

    fn into_iter(self) -> Self::IntoIter {
        self.plans.iter()
    }
}
