//! Route evaluation pipeline.
//!
//! Resolution, sequencing and load accumulation depend only on the bookings
//! and the catalogue, so they run once per call. Each tier then compares the
//! same peak load against its own effective capacity.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Booking, BookingLoads, CapacityRegistry, Item, ItemCatalog, Load, LoadTimeline,
    RouteCapacityAnalysis, RoutePlan, SequencingPolicy, Stop, SuggestionPolicy, TierComparison,
    TierName, ValidationError, accumulate, evaluate_feasibility, explain, resolve_items,
    validate_bookings,
};

/// Configuration for [`RouteEvaluator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct EvaluatorConfig {
    /// How bookings expand into stops.
    pub sequencing: SequencingPolicy,
    /// Which heuristic suggestions to emit.
    pub suggestions: SuggestionPolicy,
}

/// Evaluates bookings against capacity profiles.
///
/// The evaluator holds configuration only; every call is independent and
/// identical inputs give identical plans.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use loadplan_core::{
///     Booking, CapacityRegistry, EvaluatorConfig, Item, RouteEvaluator, SequencingPolicy,
///     TierName,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let crate_item = Item::new("crate", 6.0, 60.0)?;
/// let catalog = HashMap::from([(crate_item.id().clone(), crate_item)]);
/// let bookings = [
///     Booking::new("a", "A1", "A2", ["crate"]),
///     Booking::new("b", "B1", "B2", ["crate", "crate"]),
/// ];
/// let evaluator = RouteEvaluator::new(EvaluatorConfig {
///     sequencing: SequencingPolicy::Paired,
///     ..EvaluatorConfig::default()
/// });
/// let plan = evaluator.evaluate(
///     &bookings,
///     &TierName::economy(),
///     &catalog,
///     &CapacityRegistry::default(),
/// )?;
/// assert!(plan.is_feasible);
/// assert_eq!(plan.capacity_analysis.peak_volume_m3, 12.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteEvaluator {
    config: EvaluatorConfig,
}

/// Tier-independent state shared by every tier in one call.
struct PreparedRoute {
    stops: Vec<Stop>,
    items: Vec<Item>,
    timeline: LoadTimeline,
    warnings: Vec<String>,
}

impl RouteEvaluator {
    /// Construct an evaluator with explicit configuration.
    #[must_use]
    pub const fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate `bookings` against a single tier.
    ///
    /// # Errors
    /// Returns [`ValidationError`] when the bookings are structurally
    /// invalid. An overloaded route is not an error.
    pub fn evaluate<C>(
        &self,
        bookings: &[Booking],
        tier: &TierName,
        catalog: &C,
        registry: &CapacityRegistry,
    ) -> Result<RoutePlan, ValidationError>
    where
        C: ItemCatalog + ?Sized,
    {
        let prepared = self.prepare(bookings, catalog)?;
        Ok(self.plan_for(&prepared, tier, registry))
    }

    /// Evaluate `bookings` independently against each of `tiers`.
    ///
    /// Repeated tier names collapse into a single entry.
    ///
    /// # Errors
    /// Returns [`ValidationError::NoTiers`] when `tiers` is empty, or any
    /// booking validation error.
    pub fn evaluate_all_tiers<C>(
        &self,
        bookings: &[Booking],
        tiers: &[TierName],
        catalog: &C,
        registry: &CapacityRegistry,
    ) -> Result<TierComparison, ValidationError>
    where
        C: ItemCatalog + ?Sized,
    {
        if tiers.is_empty() {
            return Err(ValidationError::NoTiers);
        }
        let prepared = self.prepare(bookings, catalog)?;
        let plans: BTreeMap<TierName, RoutePlan> = tiers
            .iter()
            .map(|tier| (tier.clone(), self.plan_for(&prepared, tier, registry)))
            .collect();
        Ok(TierComparison::new(plans))
    }

    fn prepare<C>(
        &self,
        bookings: &[Booking],
        catalog: &C,
    ) -> Result<PreparedRoute, ValidationError>
    where
        C: ItemCatalog + ?Sized,
    {
        validate_bookings(bookings)?;
        let mut loads = BookingLoads::with_capacity(bookings.len());
        let mut items = Vec::new();
        let mut warnings = Vec::new();
        for booking in bookings {
            let resolved = resolve_items(&booking.item_ids, catalog)?;
            loads.insert(booking.id.clone(), Load::of_items(&resolved.items));
            for warning in resolved.warnings {
                push_unique(&mut warnings, warning);
            }
            items.extend(resolved.items);
        }
        let stops = self.config.sequencing.build(bookings);
        let timeline = accumulate(&stops, &loads);
        Ok(PreparedRoute {
            stops,
            items,
            timeline,
            warnings,
        })
    }

    fn plan_for(
        &self,
        prepared: &PreparedRoute,
        tier: &TierName,
        registry: &CapacityRegistry,
    ) -> RoutePlan {
        let resolution = registry.resolve(tier);
        let profile = resolution.profile;
        let mut warnings = prepared.warnings.clone();
        if resolution.fell_back {
            push_unique(
                &mut warnings,
                format!("Unknown tier '{tier}'; using the {} profile", profile.tier()),
            );
        }

        let capacity = profile.effective_capacity();
        let peak = prepared.timeline.peak();
        let outcome = evaluate_feasibility(peak, capacity);
        let rejection = explain(
            &outcome,
            profile,
            &prepared.items,
            registry,
            self.config.suggestions,
        );
        let is_feasible = outcome.is_feasible();
        log::debug!(
            "tier {tier} (profile {}): peak {:.3} m³ / {:.3} kg against {:.3} m³ / {:.3} kg, feasible: {is_feasible}",
            profile.tier(),
            peak.volume_m3,
            peak.weight_kg,
            capacity.volume_m3,
            capacity.weight_kg,
        );

        RoutePlan {
            tier: tier.clone(),
            resolved_tier: profile.tier().clone(),
            is_feasible,
            stops: is_feasible.then(|| prepared.stops.clone()),
            capacity_analysis: RouteCapacityAnalysis {
                peak_volume_utilization: outcome.volume_utilization,
                peak_weight_utilization: outcome.weight_utilization,
                peak_volume_m3: peak.volume_m3,
                peak_weight_kg: peak.weight_kg,
                effective_volume_m3: capacity.volume_m3,
                effective_weight_kg: capacity.weight_kg,
                timeline: prepared.timeline.samples().to_vec(),
                warnings,
            },
            rejection_reasons: rejection.reasons,
            suggestions: rejection.suggestions,
            requires_multiple_vans: rejection.requires_multiple_vans,
        }
    }
}

fn push_unique(warnings: &mut Vec<String>, warning: String) {
    if !warnings.contains(&warning) {
        warnings.push(warning);
    }
}

/// Evaluate `bookings` against one tier with the default configuration.
///
/// # Errors
/// Returns [`ValidationError`] for structurally invalid bookings.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use loadplan_core::{Booking, CapacityRegistry, Item, TierName, evaluate_route};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let lamp = Item::new("lamp", 0.1, 10.0)?;
/// let catalog = HashMap::from([(lamp.id().clone(), lamp)]);
/// let bookings = [Booking::new("b1", "A", "B", ["lamp"])];
/// let plan = evaluate_route(
///     &bookings,
///     &TierName::economy(),
///     &catalog,
///     &CapacityRegistry::default(),
/// )?;
/// assert!(plan.is_feasible);
/// assert_eq!(plan.stops.map(|stops| stops.len()), Some(2));
/// # Ok(())
/// # }
/// ```
pub fn evaluate_route<C>(
    bookings: &[Booking],
    tier: &TierName,
    catalog: &C,
    registry: &CapacityRegistry,
) -> Result<RoutePlan, ValidationError>
where
    C: ItemCatalog + ?Sized,
{
    RouteEvaluator::default().evaluate(bookings, tier, catalog, registry)
}

/// Evaluate `bookings` against each of `tiers` with the default
/// configuration.
///
/// # Errors
/// Returns [`ValidationError`] for structurally invalid bookings or an empty
/// tier list.
pub fn evaluate_all_tiers<C>(
    bookings: &[Booking],
    tiers: &[TierName],
    catalog: &C,
    registry: &CapacityRegistry,
) -> Result<TierComparison, ValidationError>
where
    C: ItemCatalog + ?Sized,
{
    RouteEvaluator::default().evaluate_all_tiers(bookings, tiers, catalog, registry)
}
