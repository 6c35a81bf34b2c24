//! Netting set exposure aggregation.
//!
//! This module provides:
//!
//! - [`NettedExposureCalculator`]: the per-netting-set date/sample loop producing
//!   EPE, ENE, PFE, discounted EE, expected collateral, COLVA and trade allocations
//! - [`ExposureCalculator`]: sample statistics shared by the engine and the
//!   stand-alone trade profiles
//! - [`MporCashFlowMode`]: treatment of cash flows inside the margin period of risk
//! - regulatory time-weighted EPE/EEPE over the one-year window

mod allocation;
mod engine;
mod mpor;
mod regulatory;
mod result;
mod standalone;

pub use allocation::{allocate, TradeAllocation};
pub use engine::{ExposureInputs, NettedExposureCalculator};
pub use mpor::{MporCashFlowMode, MporCashFlows};
pub use regulatory::{regulatory_window_end, time_weighted_exposures};
pub use result::{ExposureResults, NettingSetExposure};
pub use standalone::{trade_exposures, TradeExposure};

/// Sample statistics used across the exposure run.
pub struct ExposureCalculator;

impl ExposureCalculator {
    /// Sample mean of `max(v, 0)`; zero for no samples.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_xva::exposure::ExposureCalculator;
    ///
    /// // (10 + 5 + 0) / 3
    /// assert_eq!(ExposureCalculator::expected_positive_exposure(&[10.0, 5.0, -5.0]), 5.0);
    /// ```
    pub fn expected_positive_exposure(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        samples.iter().map(|v| v.max(0.0)).sum::<f64>() / samples.len() as f64
    }

    /// Sample mean of `max(-v, 0)`; zero for no samples.
    pub fn expected_negative_exposure(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        samples.iter().map(|v| (-v).max(0.0)).sum::<f64>() / samples.len() as f64
    }

    /// Position of the `quantile` in an ascending sample of size `samples`.
    ///
    /// `floor(quantile * (samples - 1) + 0.5)`, so halves round up.
    ///
    /// ```
    /// use pricer_xva::exposure::ExposureCalculator;
    ///
    /// assert_eq!(ExposureCalculator::pfe_index(0.99, 100), 98);
    /// assert_eq!(ExposureCalculator::pfe_index(0.5, 4), 2);
    /// ```
    pub fn pfe_index(quantile: f64, samples: usize) -> usize {
        if samples == 0 {
            return 0;
        }
        let index = (quantile * (samples - 1) as f64 + 0.5).floor() as usize;
        index.min(samples - 1)
    }

    /// Quantile of the distribution, floored at zero. Sorts `distribution`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_xva::exposure::ExposureCalculator;
    ///
    /// let mut values = vec![10.0, 5.0, 15.0, 20.0, 25.0];
    /// // Sorted: [5, 10, 15, 20, 25], index round(4 * 0.8) = 3
    /// assert_eq!(ExposureCalculator::potential_future_exposure(&mut values, 0.8), 20.0);
    ///
    /// let mut negative = vec![-3.0, -1.0];
    /// assert_eq!(ExposureCalculator::potential_future_exposure(&mut negative, 0.95), 0.0);
    /// ```
    pub fn potential_future_exposure(distribution: &mut [f64], quantile: f64) -> f64 {
        if distribution.is_empty() {
            return 0.0;
        }
        distribution.sort_by(|a, b| a.total_cmp(b));
        distribution[Self::pfe_index(quantile, distribution.len())].max(0.0)
    }

    /// Running maximum of an expected exposure profile.
    ///
    /// ```
    /// use pricer_xva::exposure::ExposureCalculator;
    ///
    /// let eee = ExposureCalculator::effective_expected_exposure(&[10.0, 8.0, 12.0, 15.0, 10.0]);
    /// assert_eq!(eee, vec![10.0, 10.0, 12.0, 15.0, 15.0]);
    /// ```
    pub fn effective_expected_exposure(ee: &[f64]) -> Vec<f64> {
        let mut running_max = f64::NEG_INFINITY;
        ee.iter()
            .map(|&v| {
                running_max = running_max.max(v);
                running_max
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_expected_exposures() {
        let samples = [10.0, -20.0, -5.0];
        assert_relative_eq!(ExposureCalculator::expected_positive_exposure(&samples), 10.0 / 3.0);
        assert_relative_eq!(ExposureCalculator::expected_negative_exposure(&samples), 25.0 / 3.0);
        assert_eq!(ExposureCalculator::expected_positive_exposure(&[]), 0.0);
    }

    #[test]
    fn test_pfe_index_bounds() {
        assert_eq!(ExposureCalculator::pfe_index(0.0, 10), 0);
        assert_eq!(ExposureCalculator::pfe_index(1.0, 10), 9);
        assert_eq!(ExposureCalculator::pfe_index(0.95, 1), 0);
        assert_eq!(ExposureCalculator::pfe_index(0.95, 0), 0);
    }

    #[test]
    fn test_pfe_of_empty_distribution() {
        assert_eq!(ExposureCalculator::potential_future_exposure(&mut [], 0.95), 0.0);
    }
}
