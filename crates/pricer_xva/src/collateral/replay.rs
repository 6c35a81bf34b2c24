//! Deterministic variation margin provider.

use std::sync::Arc;

use pricer_core::types::Date;

use super::{
    CollateralBalancePath, CollateralCalculationType, CollateralPathInputs,
    CollateralPathProvider, CollateralPaths,
};
use crate::error::ExposureError;
use crate::portfolio::CsaDetails;

/// Balance path that holds each grid value until the next grid date.
///
/// Dates before the first grid date return the initial balance.
#[derive(Debug, Clone)]
pub struct GridBalancePath {
    dates: Arc<[Date]>,
    initial: f64,
    balances: Vec<f64>,
}

impl GridBalancePath {
    /// Path over `dates` with one balance per date.
    pub fn new(dates: Arc<[Date]>, initial: f64, balances: Vec<f64>) -> Self {
        Self {
            dates,
            initial,
            balances,
        }
    }
}

impl CollateralBalancePath for GridBalancePath {
    fn balance(&self, date: Date) -> f64 {
        match self.dates.partition_point(|&d| d <= date) {
            0 => self.initial,
            n => self.balances.get(n - 1).copied().unwrap_or(self.initial),
        }
    }
}

/// Replays the netting set value observed `lag` grid dates earlier as the
/// variation margin balance.
///
/// The credit support amount of a value `v` (in CSA currency) is
/// `max(v - TH_rcv, 0) - max(-v - TH_pay, 0) + IAH`. A call smaller than the
/// minimum transfer amount leaves the balance unchanged. `NoLag` ignores the
/// configured lag.
///
/// # Examples
///
/// ```
/// use pricer_xva::collateral::VariationMarginReplay;
/// use pricer_xva::portfolio::CsaDetails;
/// use pricer_core::types::Currency;
///
/// let csa = CsaDetails::new(Currency::EUR).with_thresholds(10.0, 5.0);
/// assert_eq!(VariationMarginReplay::credit_support_amount(25.0, &csa), 15.0);
/// assert_eq!(VariationMarginReplay::credit_support_amount(-25.0, &csa), -20.0);
/// assert_eq!(VariationMarginReplay::credit_support_amount(3.0, &csa), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VariationMarginReplay {
    lag: usize,
}

impl VariationMarginReplay {
    /// Provider with a lag in grid dates.
    pub fn new(lag: usize) -> Self {
        Self { lag }
    }

    /// Lag in grid dates.
    #[inline]
    pub fn lag(&self) -> usize {
        self.lag
    }

    /// Collateral required against value `value`.
    pub fn credit_support_amount(value: f64, csa: &CsaDetails) -> f64 {
        (value - csa.threshold_rcv()).max(0.0) - (-value - csa.threshold_pay()).max(0.0)
            + csa.independent_amount_held()
    }

    fn settle(previous: f64, target: f64, csa: &CsaDetails) -> f64 {
        let call = target - previous;
        if (call > 0.0 && call < csa.mta_rcv()) || (call < 0.0 && -call < csa.mta_pay()) {
            previous
        } else {
            target
        }
    }
}

impl CollateralPathProvider for VariationMarginReplay {
    fn collateral_paths(
        &self,
        inputs: &CollateralPathInputs<'_>,
    ) -> Result<CollateralPaths, ExposureError> {
        let lag = match inputs.calculation_type {
            CollateralCalculationType::NoLag => 0,
            _ => self.lag,
        };
        if !(inputs.fx_today > 0.0) {
            return Err(ExposureError::Configuration(format!(
                "non-positive CSA FX rate today for netting set {}",
                inputs.netting_set
            )));
        }
        let csa = inputs.csa;
        let today = Self::credit_support_amount(inputs.value_today / inputs.fx_today, csa);
        let dates: Arc<[Date]> = Arc::from(inputs.dates);

        let mut paths: Vec<Box<dyn CollateralBalancePath>> = Vec::with_capacity(inputs.samples);
        for k in 0..inputs.samples {
            let mut balances = Vec::with_capacity(inputs.dates.len());
            let mut previous = today;
            for j in 0..inputs.dates.len() {
                let target = if j < lag {
                    today
                } else {
                    let fx = inputs.fx[j - lag][k];
                    if !(fx > 0.0) {
                        return Err(ExposureError::Configuration(format!(
                            "non-positive CSA FX rate at date {}, sample {} for netting set {}",
                            j - lag,
                            k,
                            inputs.netting_set
                        )));
                    }
                    Self::credit_support_amount(inputs.values[j - lag][k] / fx, csa)
                };
                previous = Self::settle(previous, target, csa);
                balances.push(previous);
            }
            paths.push(Box::new(GridBalancePath::new(dates.clone(), today, balances)));
        }
        Ok(Some(paths))
    }
}
