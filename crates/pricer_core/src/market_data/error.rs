//! Market data error types.

use thiserror::Error;

use crate::types::{Currency, Date};

/// Market data operation errors.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidMaturity { t: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid maturity (negative time).
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Insufficient data for construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Curve pillars must be strictly increasing with positive discount factors.
    #[error("Invalid curve pillar at index {index}")]
    InvalidPillar {
        /// Offending pillar index
        index: usize,
    },

    /// No discount curve for the currency.
    #[error("No discount curve for {0}")]
    MissingDiscountCurve(Currency),

    /// No FX quote for the pair.
    #[error("No FX rate for {pair}")]
    MissingFxRate {
        /// Pair code, e.g. `USDEUR`
        pair: String,
    },

    /// Unknown interest rate index.
    #[error("Unknown index {0}")]
    UnknownIndex(String),

    /// No fixing stored for the index on the date.
    #[error("Missing fixing for {index} on {date}")]
    MissingFixing {
        /// Index name
        index: String,
        /// Fixing date
        date: Date,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_maturity_display() {
        let err = MarketDataError::InvalidMaturity { t: -1.5 };
        assert_eq!(format!("{}", err), "Invalid maturity: t = -1.5");
    }

    #[test]
    fn test_missing_fixing_display() {
        let err = MarketDataError::MissingFixing {
            index: "EUR-EONIA".to_string(),
            date: Date::from_ymd(2024, 6, 14).unwrap(),
        };
        assert_eq!(format!("{}", err), "Missing fixing for EUR-EONIA on 2024-06-14");
    }

    #[test]
    fn test_missing_curve_display() {
        let err = MarketDataError::MissingDiscountCurve(Currency::GBP);
        assert_eq!(format!("{}", err), "No discount curve for GBP");
    }
}
