//! Identifier types for portfolio entities.
//!
//! Strongly-typed identifiers for trades, counterparties and netting sets.
//! Ordering is lexical, which fixes the netting set order of the output cubes.

use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier.
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the ID as a string slice.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Unique identifier for a trade.
    ///
    /// ```
    /// use pricer_xva::portfolio::TradeId;
    ///
    /// let id = TradeId::new("SWAP_EUR_10Y");
    /// assert_eq!(id.as_str(), "SWAP_EUR_10Y");
    /// ```
    TradeId
);

string_id!(
    /// Unique identifier for a counterparty.
    CounterpartyId
);

string_id!(
    /// Unique identifier for a netting set.
    NettingSetId
);
