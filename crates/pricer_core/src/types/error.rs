//! Error types for structured error handling.
//!
//! This module provides:
//! - `DateError`: Errors from date construction and parsing
//! - `CurrencyError`: Errors from currency parsing

use std::fmt;

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse date string
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string
    ParseError(String),
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateError::InvalidDate { year, month, day } => {
                write!(f, "Invalid date: {}-{}-{}", year, month, day)
            }
            DateError::ParseError(msg) => write!(f, "Date parse error: {}", msg),
        }
    }
}

impl std::error::Error for DateError {}

/// Currency-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::CurrencyError;
///
/// let err = CurrencyError::UnknownCurrency("XYZ".to_string());
/// assert_eq!(format!("{}", err), "Unknown currency code: XYZ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Currency code not recognised
    UnknownCurrency(String),

    /// Currency pair code is not two concatenated ISO codes
    InvalidPair(String),
}

impl fmt::Display for CurrencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyError::UnknownCurrency(code) => write!(f, "Unknown currency code: {}", code),
            CurrencyError::InvalidPair(code) => write!(f, "Invalid currency pair: {}", code),
        }
    }
}

impl std::error::Error for CurrencyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_error_display() {
        let err = DateError::ParseError("bad input".to_string());
        assert_eq!(format!("{}", err), "Date parse error: bad input");
    }

    #[test]
    fn test_currency_error_display() {
        let err = CurrencyError::InvalidPair("USDE".to_string());
        assert_eq!(format!("{}", err), "Invalid currency pair: USDE");
    }

    #[test]
    fn test_errors_are_std_errors() {
        let _: &dyn std::error::Error = &DateError::ParseError(String::new());
        let _: &dyn std::error::Error = &CurrencyError::UnknownCurrency(String::new());
    }
}
