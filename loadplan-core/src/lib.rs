//! Capacity feasibility for multi-stop van routes.
//!
//! Given bookings (each a pickup, a delivery and a list of items), an item
//! catalogue and a tier's capacity profile, the engine decides whether one
//! vehicle can carry the route without exceeding volume or weight at any
//! stop. Infeasible routes come back as complete [`RoutePlan`] values with
//! rejection reasons and suggestions; only malformed input is an error.
//!
//! The crate performs no I/O. Catalogues and capacity registries are plain
//! values supplied by the caller on every call.
//!
//! # Examples
//! ```
//! use std::collections::HashMap;
//! use loadplan_core::{Booking, CapacityRegistry, Item, TierName, evaluate_route};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sofa = Item::new("sofa", 10.0, 800.0)?;
//! let catalog = HashMap::from([(sofa.id().clone(), sofa)]);
//! let bookings = [Booking::new("b1", "1 High St", "9 Low Rd", ["sofa", "sofa"])];
//! let plan = evaluate_route(
//!     &bookings,
//!     &TierName::economy(),
//!     &catalog,
//!     &CapacityRegistry::default(),
//! )?;
//!
//! assert!(!plan.is_feasible);
//! assert!(plan.requires_multiple_vans);
//! assert!(plan.rejection_reasons[0].message.contains("20.00m³ > 15.20m³"));
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod booking;
mod catalog;
mod engine;
mod error;
mod feasibility;
mod id;
mod item;
mod load;
mod plan;
mod profile;
mod reasoner;
pub mod registry;
pub mod sequence;
mod stop;

#[cfg(test)]
mod test_support;

pub use booking::{Booking, validate_bookings};
pub use catalog::{ItemCatalog, ResolvedItems, resolve_items};
pub use engine::{EvaluatorConfig, RouteEvaluator, evaluate_all_tiers, evaluate_route};
pub use error::ValidationError;
pub use feasibility::{FeasibilityOutcome, evaluate_feasibility};
pub use id::{BookingId, ItemId, TierName};
pub use item::{Item, ItemError};
pub use load::{BookingLoads, Load, LoadSample, LoadTimeline, accumulate};
pub use plan::{RouteCapacityAnalysis, RoutePlan, TierComparison};
pub use profile::{Capacity, CapacityProfile, ProfileError};
pub use reasoner::{
    CapacityDimension, Rejection, RejectionReason, Suggestion, SuggestionPolicy, explain,
};
pub use registry::{CapacityRegistry, RegistryError, TierResolution};
pub use sequence::{SequenceError, SequencingPolicy, check_precedence};
pub use stop::{Stop, StopKind};
