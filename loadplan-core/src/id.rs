//! String-backed identifiers for items, bookings and tiers.

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Report whether the identifier is blank.
            #[must_use]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Stable identifier of a catalogue item.
    ///
    /// # Examples
    /// ```
    /// use loadplan_core::ItemId;
    ///
    /// let id = ItemId::new("sofa-3-seat");
    /// assert_eq!(id.as_str(), "sofa-3-seat");
    /// assert_eq!(id.to_string(), "sofa-3-seat");
    /// ```
    ItemId
);

string_id!(
    /// Identifier of a customer booking within a route.
    BookingId
);

string_id!(
    /// Name of a service tier such as `economy` or `express`.
    ///
    /// Tier names are compared exactly; the registry decides what an unknown
    /// name resolves to.
    TierName
);

impl TierName {
    /// The `economy` tier.
    #[must_use]
    pub fn economy() -> Self {
        Self::new(crate::registry::ECONOMY)
    }

    /// The `standard` tier, also the fallback for unknown names.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(crate::registry::STANDARD)
    }

    /// The `express` tier.
    #[must_use]
    pub fn express() -> Self {
        Self::new(crate::registry::EXPRESS)
    }
}
