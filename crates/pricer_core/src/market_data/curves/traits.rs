//! Yield curve trait definition.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Yield curve over year fractions measured from the curve's reference date.
///
/// # Invariants
///
/// - D(0) = 1
/// - D(t) > 0 for all t >= 0
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{DiscountCurve, YieldCurve};
/// use pricer_core::types::{Date, DayCountConvention};
///
/// let today = Date::from_ymd(2024, 1, 2).unwrap();
/// let curve = DiscountCurve::flat(today, 0.05, DayCountConvention::ActualActual365);
/// let rate = curve.zero_rate(2.0).unwrap();
/// assert!((rate - 0.05).abs() < 1e-12);
/// ```
pub trait YieldCurve<T: Float> {
    /// Discount factor for maturity `t` (years, `t >= 0`).
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;

    /// Continuously compounded zero rate, `-ln(D(t)) / t`, for `t > 0`.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        let df = self.discount_factor(t)?;
        Ok(-df.ln() / t)
    }

    /// Forward rate between `t1` and `t2`, `-ln(D(t2) / D(t1)) / (t2 - t1)`.
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        let dt = t2 - t1;
        if dt <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: dt.to_f64().unwrap_or(0.0),
            });
        }
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        Ok(-(df2 / df1).ln() / dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct LinearRateCurve;

    impl YieldCurve<f64> for LinearRateCurve {
        fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
            if t < 0.0 {
                return Err(MarketDataError::InvalidMaturity { t });
            }
            // r(t) = 0.01 + 0.01 t
            Ok((-(0.01 + 0.01 * t) * t).exp())
        }
    }

    #[test]
    fn test_default_zero_rate() {
        assert_relative_eq!(LinearRateCurve.zero_rate(2.0).unwrap(), 0.03, epsilon = 1e-12);
        assert!(LinearRateCurve.zero_rate(0.0).is_err());
    }

    #[test]
    fn test_default_forward_rate() {
        // -ln(D(2)/D(1)) = 0.06 - 0.02
        assert_relative_eq!(
            LinearRateCurve.forward_rate(1.0, 2.0).unwrap(),
            0.04,
            epsilon = 1e-12
        );
        assert!(matches!(
            LinearRateCurve.forward_rate(2.0, 1.0),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
    }
}
