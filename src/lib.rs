//! Facade crate for the loadplan route capacity engine.
//!
//! This crate re-exports the core domain types and the two evaluation entry
//! points, [`evaluate_route`] and [`evaluate_all_tiers`].

#![forbid(unsafe_code)]

pub use loadplan_core::{
    Booking, BookingId, Capacity, CapacityDimension, CapacityProfile, CapacityRegistry,
    EvaluatorConfig, Item, ItemCatalog, ItemError, ItemId, Load, LoadSample, ProfileError,
    RegistryError, RejectionReason, RouteCapacityAnalysis, RouteEvaluator, RoutePlan,
    SequencingPolicy, Stop, StopKind, Suggestion, SuggestionPolicy, TierComparison, TierName,
    ValidationError, evaluate_all_tiers, evaluate_route,
};
