//! Tier to capacity profile lookup.
//!
//! The registry is plain configuration supplied per call. It always contains a
//! `standard` profile, which unknown tier names resolve to.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Capacity, CapacityProfile, TierName};

/// Name of the loosest-buffer built-in tier.
pub const ECONOMY: &str = "economy";
/// Name of the default tier, used as the fallback for unknown names.
pub const STANDARD: &str = "standard";
/// Name of the tightest-buffer built-in tier.
pub const EXPRESS: &str = "express";

/// Errors returned by [`CapacityRegistry::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No `standard` profile was supplied.
    #[error("capacity registry must define the `standard` tier")]
    MissingStandard,
    /// The same tier appeared twice.
    #[error("tier {tier} is defined more than once")]
    DuplicateTier {
        /// Repeated tier.
        tier: TierName,
    },
    /// A stricter tier reserved less margin than a looser one.
    #[error("tier {stricter} must buffer at least as much as {looser}")]
    BufferOrder {
        /// Tier expected to carry the larger buffer.
        stricter: TierName,
        /// Tier expected to carry the smaller buffer.
        looser: TierName,
    },
}

/// How a requested tier name mapped onto a profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierResolution<'a> {
    /// Profile to evaluate against.
    pub profile: &'a CapacityProfile,
    /// `true` when the requested name was unknown and `standard` was used.
    pub fell_back: bool,
}

/// Capacity profiles keyed by tier name.
///
/// # Examples
/// ```
/// use loadplan_core::{CapacityRegistry, TierName};
///
/// let registry = CapacityRegistry::default();
/// let resolution = registry.resolve(&TierName::new("overnight"));
/// assert!(resolution.fell_back);
/// assert_eq!(resolution.profile.tier(), &TierName::standard());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(
        try_from = "Vec<CapacityProfile>",
        into = "Vec<CapacityProfile>"
    )
)]
pub struct CapacityRegistry {
    profiles: BTreeMap<TierName, CapacityProfile>,
    fallback: CapacityProfile,
}

impl CapacityRegistry {
    /// Build a registry from profiles.
    ///
    /// When the built-in tier names are present their buffers must satisfy
    /// `express >= standard >= economy`.
    ///
    /// # Errors
    /// Returns [`RegistryError`] for duplicate tiers, a missing `standard`
    /// profile, or buffers that break the tier ordering.
    pub fn new<I>(profiles: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = CapacityProfile>,
    {
        let mut by_tier = BTreeMap::new();
        for profile in profiles {
            let tier = profile.tier().clone();
            if by_tier.insert(tier.clone(), profile).is_some() {
                return Err(RegistryError::DuplicateTier { tier });
            }
        }
        check_buffer_order(&by_tier)?;
        let fallback = by_tier
            .get(&TierName::standard())
            .cloned()
            .ok_or(RegistryError::MissingStandard)?;
        Ok(Self {
            profiles: by_tier,
            fallback,
        })
    }

    /// Profile registered under `tier`, without fallback.
    #[must_use]
    pub fn get(&self, tier: &TierName) -> Option<&CapacityProfile> {
        self.profiles.get(tier)
    }

    /// Profile for `tier`, falling back to `standard` for unknown names.
    #[must_use]
    pub fn resolve(&self, tier: &TierName) -> TierResolution<'_> {
        self.profiles.get(tier).map_or_else(
            || {
                log::warn!("unknown tier {tier}; falling back to the {STANDARD} profile");
                TierResolution {
                    profile: &self.fallback,
                    fell_back: true,
                }
            },
            |profile| TierResolution {
                profile,
                fell_back: false,
            },
        )
    }

    /// Registered tier names in lexical order.
    pub fn tiers(&self) -> impl Iterator<Item = &TierName> + '_ {
        self.profiles.keys()
    }

    /// Registered profiles in tier-name order.
    pub fn profiles(&self) -> impl Iterator<Item = &CapacityProfile> + '_ {
        self.profiles.values()
    }

    /// Number of registered tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Always `false`; a registry holds at least the `standard` tier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Largest raw (unbuffered) capacity in the fleet, per dimension.
    ///
    /// A load above this cannot travel in any single vehicle regardless of
    /// tier.
    #[must_use]
    pub fn largest_raw_capacity(&self) -> Capacity {
        self.profiles().map(CapacityProfile::raw_capacity).fold(
            self.fallback.raw_capacity(),
            |acc, raw| Capacity {
                volume_m3: acc.volume_m3.max(raw.volume_m3),
                weight_kg: acc.weight_kg.max(raw.weight_kg),
            },
        )
    }
}

impl Default for CapacityRegistry {
    /// One 16 m³ / 1 200 kg van body sold as three tiers with increasing
    /// buffers.
    fn default() -> Self {
        let economy = CapacityProfile::from_trusted(ECONOMY, 16.0, 1_200.0, 0.05);
        let standard = CapacityProfile::from_trusted(STANDARD, 16.0, 1_200.0, 0.10);
        let express = CapacityProfile::from_trusted(EXPRESS, 16.0, 1_200.0, 0.15);
        let fallback = standard.clone();
        let profiles = [economy, standard, express]
            .into_iter()
            .map(|profile| (profile.tier().clone(), profile))
            .collect();
        Self { profiles, fallback }
    }
}

fn check_buffer_order(profiles: &BTreeMap<TierName, CapacityProfile>) -> Result<(), RegistryError> {
    let ordered = [EXPRESS, STANDARD, ECONOMY].map(TierName::new);
    let present: Vec<&CapacityProfile> = ordered.iter().filter_map(|t| profiles.get(t)).collect();
    for pair in present.windows(2) {
        if let [stricter, looser] = pair
            && stricter.buffer_fraction() < looser.buffer_fraction()
        {
            return Err(RegistryError::BufferOrder {
                stricter: stricter.tier().clone(),
                looser: looser.tier().clone(),
            });
        }
    }
    Ok(())
}

#[cfg(feature = "serde")]
impl TryFrom<Vec<CapacityProfile>> for CapacityRegistry {
    type Error = RegistryError;

    fn try_from(profiles: Vec<CapacityProfile>) -> Result<Self, Self::Error> {
        Self::new(profiles)
    }
}

#[cfg(feature = "serde")]
impl From<CapacityRegistry> for Vec<CapacityProfile> {
    fn from(registry: CapacityRegistry) -> Self {
        registry.profiles.into_values().collect()
    }
}
