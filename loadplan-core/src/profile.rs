//! Per-tier vehicle capacity and safety buffer.
#![expect(
    clippy::float_arithmetic,
    reason = "effective capacity is a floating-point product of raw capacity and buffer"
)]

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TierName;

/// Errors returned by [`CapacityProfile::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    /// The tier name was blank.
    #[error("tier name must not be blank")]
    BlankTier,
    /// Raw volume was zero, negative or not finite.
    #[error("tier {tier} has invalid maximum volume {value} m³")]
    InvalidVolume {
        /// Offending tier.
        tier: TierName,
        /// Rejected value.
        value: f64,
    },
    /// Raw weight was zero, negative or not finite.
    #[error("tier {tier} has invalid maximum weight {value} kg")]
    InvalidWeight {
        /// Offending tier.
        tier: TierName,
        /// Rejected value.
        value: f64,
    },
    /// Buffer fraction fell outside `0.0..1.0`.
    #[error("tier {tier} has buffer fraction {value}; expected 0.0 <= buffer < 1.0")]
    InvalidBuffer {
        /// Offending tier.
        tier: TierName,
        /// Rejected value.
        value: f64,
    },
}

/// A volume and weight ceiling, either raw or after the buffer is held back.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Capacity {
    /// Volume in cubic metres.
    pub volume_m3: f64,
    /// Payload in kilograms.
    pub weight_kg: f64,
}

/// Raw vehicle capacity for a tier and the fraction reserved as margin.
///
/// Effective capacity is recomputed on every call to
/// [`CapacityProfile::effective_capacity`]; nothing is cached.
///
/// # Examples
/// ```
/// use loadplan_core::CapacityProfile;
///
/// # fn main() -> Result<(), loadplan_core::ProfileError> {
/// let economy = CapacityProfile::new("economy", 16.0, 1_200.0, 0.05)?;
/// let capacity = economy.effective_capacity();
/// assert!((capacity.volume_m3 - 15.2).abs() < 1e-9);
/// assert!((capacity.weight_kg - 1_140.0).abs() < 1e-9);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "ProfileRecord", into = "ProfileRecord")
)]
pub struct CapacityProfile {
    tier: TierName,
    max_volume_m3: f64,
    max_weight_kg: f64,
    buffer_fraction: f64,
}

impl CapacityProfile {
    /// Validate and construct a profile.
    ///
    /// # Errors
    /// Returns [`ProfileError`] when the tier is blank, either raw capacity is
    /// not a positive finite number, or the buffer is outside `0.0..1.0`.
    /// A buffer of `1.0` is refused because it leaves no usable capacity.
    pub fn new(
        tier: impl Into<TierName>,
        max_volume_m3: f64,
        max_weight_kg: f64,
        buffer_fraction: f64,
    ) -> Result<Self, ProfileError> {
        let tier_name = tier.into();
        if tier_name.is_blank() {
            return Err(ProfileError::BlankTier);
        }
        if !is_positive(max_volume_m3) {
            return Err(ProfileError::InvalidVolume {
                tier: tier_name,
                value: max_volume_m3,
            });
        }
        if !is_positive(max_weight_kg) {
            return Err(ProfileError::InvalidWeight {
                tier: tier_name,
                value: max_weight_kg,
            });
        }
        if !(0.0..1.0).contains(&buffer_fraction) {
            return Err(ProfileError::InvalidBuffer {
                tier: tier_name,
                value: buffer_fraction,
            });
        }
        Ok(Self {
            tier: tier_name,
            max_volume_m3,
            max_weight_kg,
            buffer_fraction,
        })
    }

    /// Construct a profile from values already known to be valid.
    pub(crate) fn from_trusted(
        tier: &str,
        max_volume_m3: f64,
        max_weight_kg: f64,
        buffer_fraction: f64,
    ) -> Self {
        debug_assert!(is_positive(max_volume_m3) && is_positive(max_weight_kg));
        debug_assert!((0.0..1.0).contains(&buffer_fraction));
        Self {
            tier: TierName::new(tier),
            max_volume_m3,
            max_weight_kg,
            buffer_fraction,
        }
    }

    /// Tier this profile describes.
    #[must_use]
    pub const fn tier(&self) -> &TierName {
        &self.tier
    }

    /// Raw vehicle volume in cubic metres.
    #[must_use]
    pub const fn max_volume_m3(&self) -> f64 {
        self.max_volume_m3
    }

    /// Raw vehicle payload in kilograms.
    #[must_use]
    pub const fn max_weight_kg(&self) -> f64 {
        self.max_weight_kg
    }

    /// Fraction of raw capacity held back as margin.
    #[must_use]
    pub const fn buffer_fraction(&self) -> f64 {
        self.buffer_fraction
    }

    /// Unbuffered vehicle capacity.
    #[must_use]
    pub const fn raw_capacity(&self) -> Capacity {
        Capacity {
            volume_m3: self.max_volume_m3,
            weight_kg: self.max_weight_kg,
        }
    }

    /// `raw × (1 − buffer)` for both dimensions.
    #[must_use]
    pub fn effective_capacity(&self) -> Capacity {
        let usable = 1.0 - self.buffer_fraction;
        Capacity {
            volume_m3: self.max_volume_m3 * usable,
            weight_kg: self.max_weight_kg * usable,
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(feature = "serde")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileRecord {
    tier_name: TierName,
    max_volume_m3: f64,
    max_weight_kg: f64,
    buffer_fraction: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<ProfileRecord> for CapacityProfile {
    type Error = ProfileError;

    fn try_from(record: ProfileRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.tier_name,
            record.max_volume_m3,
            record.max_weight_kg,
            record.buffer_fraction,
        )
    }
}

#[cfg(feature = "serde")]
impl From<CapacityProfile> for ProfileRecord {
    fn from(profile: CapacityProfile) -> Self {
        Self {
            tier_name: profile.tier,
            max_volume_m3: profile.max_volume_m3,
            max_weight_kg: profile.max_weight_kg,
            buffer_fraction: profile.buffer_fraction,
        }
    }
}
