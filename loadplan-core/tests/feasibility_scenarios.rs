//! End-to-end feasibility scenarios against the built-in fleet.
//!
//! Covers the documented worked examples plus boundary inclusion, input
//! validation and output idempotence.

mod support;

use loadplan_core::{
    Booking, CapacityRegistry, Item, ItemId, Load, RoutePlan, Suggestion, TierName, ValidationError,
    check_precedence, evaluate_all_tiers, evaluate_route,
};
use rstest::{fixture, rstest};
use support::{assert_close, booking, catalog, item};

#[fixture]
fn registry() -> CapacityRegistry {
    CapacityRegistry::default()
}

fn all_tiers() -> [TierName; 3] {
    [TierName::economy(), TierName::standard(), TierName::express()]
}

#[expect(
    clippy::expect_used,
    reason = "scenario tests use expect for readable failures"
)]
fn plan_on(
    bookings: &[Booking],
    tier: &TierName,
    items: impl IntoIterator<Item = Item>,
    registry: &CapacityRegistry,
) -> RoutePlan {
    evaluate_route(bookings, tier, &catalog(items), registry).expect("valid bookings")
}

#[rstest]
fn single_small_item_is_feasible_on_every_tier(registry: CapacityRegistry) {
    let bookings = [booking("b1", &["lamp"])];
    let comparison = evaluate_all_tiers(
        &bookings,
        &all_tiers(),
        &catalog([item("lamp", 0.1, 10.0)]),
        &registry,
    )
    .expect("valid bookings");
    assert_eq!(comparison.feasible_tiers().count(), 3);
    for (_, plan) in &comparison {
        let stops = plan.stops.as_ref().expect("feasible plans list stops");
        assert_eq!(stops.len(), 2);
    }
}

#[rstest]
fn twenty_cubic_metres_overflows_economy(registry: CapacityRegistry) {
    let plan = plan_on(
        &[booking("b1", &["wardrobe-a", "wardrobe-b"])],
        &TierName::economy(),
        [
            item("wardrobe-a", 10.0, 800.0),
            item("wardrobe-b", 10.0, 800.0),
        ],
        &registry,
    );
    assert!(!plan.is_feasible);
    assert!(plan.stops.is_none());
    assert!(plan.requires_multiple_vans);
    assert!(
        plan.rejection_messages()
            .iter()
            .any(|message| message.contains("20.00m³ > 15.20m³"))
    );
    assert!(plan.suggestions.contains(&Suggestion::SplitLoad));
    assert!(plan.suggestions.contains(&Suggestion::DispatchVans { count: 2 }));
    assert!(
        plan.suggestion_messages()
            .iter()
            .any(|message| message == "Split into multiple vans")
    );
}

#[rstest]
fn two_bookings_produce_four_stops(registry: CapacityRegistry) {
    let plan = plan_on(
        &[booking("b1", &["box-1"]), booking("b2", &["box-2"])],
        &TierName::economy(),
        [item("box-1", 2.0, 30.0), item("box-2", 2.0, 30.0)],
        &registry,
    );
    assert!(plan.is_feasible);
    let stops = plan.stops.unwrap_or_default();
    assert_eq!(stops.len(), 4);
    assert_eq!(check_precedence(&stops), Ok(()));
    assert_close(plan.capacity_analysis.peak_volume_m3, 4.0);
}

#[rstest]
fn unknown_item_is_a_warning_not_a_failure(registry: CapacityRegistry) {
    let plan = plan_on(
        &[booking("b1", &["chair", "not-in-catalogue"])],
        &TierName::standard(),
        [item("chair", 0.3, 7.0)],
        &registry,
    );
    assert!(plan.is_feasible);
    assert!(!plan.capacity_analysis.warnings.is_empty());
    assert!(
        plan.capacity_analysis
            .warnings
            .iter()
            .any(|warning| warning.contains("not-in-catalogue"))
    );
    assert_close(plan.capacity_analysis.peak_volume_m3, 0.3);
}

#[rstest]
fn fifty_small_items_fit_economy(registry: CapacityRegistry) {
    let ids: Vec<String> = (0..50).map(|n| format!("book-box-{n}")).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let plan = plan_on(
        &[booking("library", &id_refs)],
        &TierName::economy(),
        ids.iter().map(|id| item(id, 0.1, 5.0)),
        &registry,
    );
    assert!(plan.is_feasible);
    assert!((plan.capacity_analysis.peak_volume_m3 - 5.0).abs() < 1.0e-6);
}

#[rstest]
fn express_reports_higher_utilisation_than_economy(registry: CapacityRegistry) {
    let bookings = [booking("b1", &["crate", "crate", "crate"])];
    let comparison = evaluate_all_tiers(
        &bookings,
        &[TierName::economy(), TierName::express()],
        &catalog([item("crate", 2.0, 20.0)]),
        &registry,
    )
    .expect("valid bookings");
    let economy = comparison.get(&TierName::economy()).expect("economy plan");
    let express = comparison.get(&TierName::express()).expect("express plan");
    assert!(
        express.capacity_analysis.peak_volume_utilization
            > economy.capacity_analysis.peak_volume_utilization
    );
    assert_close(
        economy.capacity_analysis.peak_volume_m3,
        express.capacity_analysis.peak_volume_m3,
    );
}

#[rstest]
#[case(15.2, true)]
#[case(15.21, false)]
#[case(16.2, false)]
fn effective_capacity_is_inclusive(
    registry: CapacityRegistry,
    #[case] volume: f64,
    #[case] feasible: bool,
) {
    let plan = plan_on(
        &[booking("b1", &["load"])],
        &TierName::economy(),
        [item("load", volume, 100.0)],
        &registry,
    );
    assert_eq!(plan.is_feasible, feasible);
}

#[rstest]
fn load_returns_to_zero_after_the_last_stop(registry: CapacityRegistry) {
    let plan = plan_on(
        &[
            booking("b1", &["a", "b"]),
            booking("b2", &["c"]),
            booking("b3", &["a", "c"]),
        ],
        &TierName::standard(),
        [item("a", 0.1, 0.3), item("b", 0.7, 1.1), item("c", 0.2, 0.7)],
        &registry,
    );
    let last = plan
        .capacity_analysis
        .timeline
        .last()
        .map(|sample| sample.load());
    assert_eq!(last, Some(Load::ZERO));
}

#[rstest]
fn booking_without_items_is_a_validation_error(registry: CapacityRegistry) {
    let bookings = [
        booking("b1", &["chair"]),
        Booking::new("b2", "here", "there", Vec::<ItemId>::new()),
    ];
    let result = evaluate_route(
        &bookings,
        &TierName::standard(),
        &catalog([item("chair", 0.3, 7.0)]),
        &registry,
    );
    assert_eq!(
        result,
        Err(ValidationError::EmptyItemList {
            booking_id: "b2".into()
        })
    );
}

#[rstest]
fn empty_route_is_a_validation_error(registry: CapacityRegistry) {
    let result = evaluate_all_tiers(
        &[],
        &all_tiers(),
        &catalog([item("chair", 0.3, 7.0)]),
        &registry,
    );
    assert_eq!(result, Err(ValidationError::NoBookings));
}

#[cfg(feature = "serde")]
#[rstest]
fn identical_inputs_serialise_identically(registry: CapacityRegistry) {
    let bookings = [
        booking("b1", &["sofa", "ghost"]),
        booking("b2", &["sofa", "sofa"]),
    ];
    let items = catalog([item("sofa", 4.5, 60.0).with_fits_standard_van(false)]);
    let render = || {
        let comparison = evaluate_all_tiers(&bookings, &all_tiers(), &items, &registry)
            .expect("valid bookings");
        serde_json::to_string(&comparison).expect("plans serialise")
    };
    let first = render();
    assert_eq!(first, render());
    assert!(first.contains("\"isFeasible\""));
    assert!(first.contains("\"peakVolumeUtilization\""));
}
