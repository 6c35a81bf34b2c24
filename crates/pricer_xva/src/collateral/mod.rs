//! Collateral balances and the simulated collateral path contract.
//!
//! The engine never simulates margin calls itself. It hands a netting set's
//! simulated values plus FX and index scenarios to a [`CollateralPathProvider`]
//! through the [`CollateralPathAdapter`] and reads back one
//! [`CollateralBalancePath`] per sample.

mod adapter;
mod replay;

pub use adapter::CollateralPathAdapter;
pub use replay::{GridBalancePath, VariationMarginReplay};

use std::collections::HashMap;
use std::fmt;

use pricer_core::types::{Currency, Date};
use serde::{Deserialize, Serialize};

use crate::error::ExposureError;
use crate::portfolio::{CsaDetails, NettingSetId};

/// How the collateral provider lags margin calls against exposure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollateralCalculationType {
    /// Both parties call margin with the same delay.
    #[default]
    Symmetric,
    /// Delay applied to collateral we receive.
    AsymmetricCVA,
    /// Delay applied to collateral we post.
    AsymmetricDVA,
    /// Margin settles without delay; exposure uses close-out values.
    NoLag,
}

impl fmt::Display for CollateralCalculationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CollateralCalculationType::Symmetric => "Symmetric",
            CollateralCalculationType::AsymmetricCVA => "AsymmetricCVA",
            CollateralCalculationType::AsymmetricDVA => "AsymmetricDVA",
            CollateralCalculationType::NoLag => "NoLag",
        };
        f.write_str(s)
    }
}

/// Simulated collateral balance of one sample, in CSA currency.
pub trait CollateralBalancePath: Send + Sync {
    /// Balance held on `date` (negative when posted).
    fn balance(&self, date: Date) -> f64;
}

/// Per-sample collateral paths, `None` when the netting set is uncollateralised.
pub type CollateralPaths = Option<Vec<Box<dyn CollateralBalancePath>>>;

/// Everything a provider needs to simulate one netting set's collateral.
///
/// Matrices are `[date][sample]`. FX rates convert CSA currency into base
/// currency; rates are index fixings, all zero when the CSA has no index.
#[derive(Debug, Clone, Copy)]
pub struct CollateralPathInputs<'a> {
    /// Netting set being collateralised.
    pub netting_set: &'a NettingSetId,
    /// CSA terms, already inverted under the flipped view.
    pub csa: &'a CsaDetails,
    /// Valuation date.
    pub as_of: Date,
    /// Simulation dates.
    pub dates: &'a [Date],
    /// Number of samples.
    pub samples: usize,
    /// Netting set value today, base currency.
    pub value_today: f64,
    /// Simulated netting set values, base currency.
    pub values: &'a [Vec<f64>],
    /// Today's variation margin balance.
    pub initial_balance: f64,
    /// Lag convention.
    pub calculation_type: CollateralCalculationType,
    /// CSA to base FX rate today.
    pub fx_today: f64,
    /// CSA index fixing today, zero without an index.
    pub rate_today: f64,
    /// Scenario CSA to base FX rates.
    pub fx: &'a [Vec<f64>],
    /// Scenario CSA index fixings.
    pub rates: &'a [Vec<f64>],
}

/// Simulator of collateral balance paths.
pub trait CollateralPathProvider: Sync {
    /// Balance paths for one netting set, one per sample.
    fn collateral_paths(
        &self,
        inputs: &CollateralPathInputs<'_>,
    ) -> Result<CollateralPaths, ExposureError>;
}

/// Today's collateral position of a netting set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CollateralBalance {
    /// Currency of the amounts; `None` for an empty balance.
    pub currency: Option<Currency>,
    /// Variation margin held (negative when posted).
    pub vm: f64,
    /// Initial margin held.
    pub im: f64,
}

impl CollateralBalance {
    /// Balance in `currency`.
    pub fn new(currency: Currency, vm: f64, im: f64) -> Self {
        Self {
            currency: Some(currency),
            vm,
            im,
        }
    }
}

/// Today's collateral balances by netting set; missing entries are zero.
#[derive(Debug, Clone, Default)]
pub struct CollateralBalances {
    balances: HashMap<NettingSetId, CollateralBalance>,
}

impl CollateralBalances {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a balance.
    pub fn with_balance(mut self, netting_set: NettingSetId, balance: CollateralBalance) -> Self {
        self.balances.insert(netting_set, balance);
        self
    }

    /// Balance of a netting set.
    pub fn get(&self, netting_set: &NettingSetId) -> CollateralBalance {
        self.balances.get(netting_set).copied().unwrap_or_default()
    }

    /// Whether a balance was supplied.
    pub fn has(&self, netting_set: &NettingSetId) -> bool {
        self.balances.contains_key(netting_set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_balance_is_zero() {
        let balances = CollateralBalances::new().with_balance(
            NettingSetId::new("NS1"),
            CollateralBalance::new(Currency::USD, 10.0, 2.0),
        );
        let missing = balances.get(&NettingSetId::new("NS2"));
        assert_eq!(missing, CollateralBalance::default());
        assert!(missing.currency.is_none());
        assert_eq!(balances.get(&NettingSetId::new("NS1")).vm, 10.0);
        assert!(!balances.has(&NettingSetId::new("NS2")));
    }

    #[test]
    fn test_balance_from_toml() {
        let balance: CollateralBalance = toml::from_str("currency = \"USD\"\nvm = -5.0\nim = 1.5").unwrap();
        assert_eq!(balance, CollateralBalance::new(Currency::USD, -5.0, 1.5));
    }

    #[test]
    fn test_calculation_type_names() {
        assert_eq!(CollateralCalculationType::default().to_string(), "Symmetric");
        assert_eq!(CollateralCalculationType::AsymmetricDVA.to_string(), "AsymmetricDVA");
    }
}
