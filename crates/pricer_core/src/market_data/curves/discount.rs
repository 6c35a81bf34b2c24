//! Date-based discount curve.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use crate::types::{Date, DayCountConvention};

/// Discount curve anchored at a reference date.
///
/// Pillars are `(date, discount factor)` pairs. Discount factors are
/// interpolated log-linearly in time, with an implicit pillar `D = 1` at the
/// reference date. Beyond the last pillar the last segment's forward rate is
/// extended.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::DiscountCurve;
/// use pricer_core::types::{Date, DayCountConvention};
///
/// let today = Date::from_ymd(2024, 1, 2).unwrap();
/// let curve = DiscountCurve::flat(today, 0.02, DayCountConvention::ActualActual365);
/// let df = curve.discount(Date::from_ymd(2025, 1, 1).unwrap()).unwrap();
/// assert!((df - (-0.02_f64).exp()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountCurve {
    reference_date: Date,
    day_count: DayCountConvention,
    times: Vec<f64>,
    log_dfs: Vec<f64>,
}

impl DiscountCurve {
    /// Builds a curve from pillars.
    ///
    /// # Errors
    ///
    /// - `InsufficientData` if `pillars` is empty
    /// - `InvalidPillar` if pillar dates are not strictly after the reference date
    ///   and strictly increasing, or a discount factor is not positive
    pub fn new(
        reference_date: Date,
        day_count: DayCountConvention,
        pillars: &[(Date, f64)],
    ) -> Result<Self, MarketDataError> {
        if pillars.is_empty() {
            return Err(MarketDataError::InsufficientData { got: 0, need: 1 });
        }
        let mut times = Vec::with_capacity(pillars.len() + 1);
        let mut log_dfs = Vec::with_capacity(pillars.len() + 1);
        times.push(0.0);
        log_dfs.push(0.0);
        for (index, &(date, df)) in pillars.iter().enumerate() {
            let t = day_count.year_fraction_dates(reference_date, date);
            let last = times[times.len() - 1];
            if t <= last || !(df > 0.0) {
                return Err(MarketDataError::InvalidPillar { index });
            }
            times.push(t);
            log_dfs.push(df.ln());
        }
        Ok(Self {
            reference_date,
            day_count,
            times,
            log_dfs,
        })
    }

    /// Flat continuously compounded curve.
    pub fn flat(reference_date: Date, rate: f64, day_count: DayCountConvention) -> Self {
        Self {
            reference_date,
            day_count,
            times: vec![0.0, 1.0],
            log_dfs: vec![0.0, -rate],
        }
    }

    /// Reference date (D = 1).
    #[inline]
    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    /// Discount factor for a calendar date.
    pub fn discount(&self, date: Date) -> Result<f64, MarketDataError> {
        let t = self.day_count.year_fraction_dates(self.reference_date, date);
        self.discount_factor(t)
    }

    fn log_df(&self, t: f64) -> f64 {
        let n = self.times.len();
        // First pillar index with time >= t, clamped to the last segment.
        let hi = self.times.partition_point(|&x| x < t).clamp(1, n - 1);
        let (t0, t1) = (self.times[hi - 1], self.times[hi]);
        let (l0, l1) = (self.log_dfs[hi - 1], self.log_dfs[hi]);
        l0 + (l1 - l0) * (t - t0) / (t1 - t0)
    }
}

impl YieldCurve<f64> for DiscountCurve {
    fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
        if t < 0.0 {
            return Err(MarketDataError::InvalidMaturity { t });
        }
        Ok(self.log_df(t).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn curve() -> DiscountCurve {
        DiscountCurve::new(
            d(2024, 1, 1),
            DayCountConvention::ActualActual365,
            &[(d(2024, 12, 31), 0.98), (d(2026, 12, 31), 0.92)],
        )
        .unwrap()
    }

    #[test]
    fn test_reference_date_is_one() {
        assert_relative_eq!(curve().discount(d(2024, 1, 1)).unwrap(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_pillars_are_reproduced() {
        let c = curve();
        assert_relative_eq!(c.discount(d(2024, 12, 31)).unwrap(), 0.98, epsilon = 1e-12);
        assert_relative_eq!(c.discount(d(2026, 12, 31)).unwrap(), 0.92, epsilon = 1e-12);
    }

    #[test]
    fn test_log_linear_midpoint() {
        let c = curve();
        let t_mid = 0.5 * (365.0 + 1095.0) / 365.0;
        let expected = (0.5 * (0.98_f64.ln() + 0.92_f64.ln())).exp();
        assert_relative_eq!(c.discount_factor(t_mid).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_extrapolation_is_monotone() {
        let c = curve();
        let far = c.discount(d(2030, 1, 1)).unwrap();
        assert!(far < 0.92 && far > 0.0);
    }

    #[test]
    fn test_invalid_pillars() {
        let err = DiscountCurve::new(
            d(2024, 1, 1),
            DayCountConvention::ActualActual365,
            &[(d(2025, 1, 1), 0.98), (d(2024, 6, 1), 0.99)],
        );
        assert_eq!(err, Err(MarketDataError::InvalidPillar { index: 1 }));
        assert!(DiscountCurve::new(d(2024, 1, 1), DayCountConvention::ActualActual365, &[]).is_err());
    }

    #[test]
    fn test_date_before_reference_is_error() {
        assert!(curve().discount(d(2023, 12, 1)).is_err());
    }
}
