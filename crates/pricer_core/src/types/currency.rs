//! Currency types for financial calculations.
//!
//! ISO 4217 currency codes used for CSA, reporting and scenario FX keys.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::currency::Currency;
//!
//! let usd = Currency::USD;
//! assert_eq!(usd.code(), "USD");
//! assert_eq!(Currency::JPY.decimal_places(), 0);
//!
//! // FX pair codes concatenate the two ISO codes
//! assert_eq!(Currency::USD.pair_code(Currency::EUR), "USDEUR");
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::CurrencyError;

/// ISO 4217 currency codes with decimal precision metadata.
///
/// # Examples
///
/// ```
/// use pricer_core::types::currency::Currency;
///
/// let eur: Currency = "eur".parse().unwrap();
/// assert_eq!(eur, Currency::EUR);
/// assert!("XYZ".parse::<Currency>().is_err());
/// ```
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Currency {
    /// United States Dollar
    USD,
    /// Euro
    EUR,
    /// British Pound Sterling
    GBP,
    /// Japanese Yen (no minor units)
    JPY,
    /// Swiss Franc
    CHF,
    /// Australian Dollar
    AUD,
    /// Canadian Dollar
    CAD,
    /// Swedish Krona
    SEK,
}

impl Currency {
    /// All supported currencies.
    pub const ALL: [Currency; 8] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::JPY,
        Currency::CHF,
        Currency::AUD,
        Currency::CAD,
        Currency::SEK,
    ];

    /// Returns the ISO 4217 three-letter currency code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
            Currency::SEK => "SEK",
        }
    }

    /// Returns the standard number of decimal places for this currency.
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// FX pair code `SELF` + `quote`, e.g. `USDEUR` (units of `quote` per unit of `self`).
    pub fn pair_code(&self, quote: Currency) -> String {
        format!("{}{}", self.code(), quote.code())
    }

    /// Splits a six-letter pair code such as `GBPUSD` into its two currencies.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::currency::Currency;
    ///
    /// let (base, quote) = Currency::parse_pair("GBPUSD").unwrap();
    /// assert_eq!((base, quote), (Currency::GBP, Currency::USD));
    /// assert!(Currency::parse_pair("GBPUS").is_err());
    /// ```
    pub fn parse_pair(code: &str) -> Result<(Currency, Currency), CurrencyError> {
        if code.len() != 6 || !code.is_ascii() {
            return Err(CurrencyError::InvalidPair(code.to_string()));
        }
        let (base, quote) = code.split_at(3);
        Ok((base.parse()?, quote.parse()?))
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    /// Parses ISO 4217 currency code (case-insensitive).
    fn from_str(s: &str) -> Result<Self, CurrencyError> {
        let upper = s.to_uppercase();
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == upper)
            .ok_or_else(|| CurrencyError::UnknownCurrency(s.to_string()))
    }
}

impl fmt::Display for Currency {
    /// Formats as ISO 4217 code.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_roundtrip() {
        for currency in Currency::ALL {
            let parsed: Currency = currency.code().parse().unwrap();
            assert_eq!(currency, parsed);
        }
    }

    #[test]
    fn test_currency_from_str_case_insensitive() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::USD);
        assert_eq!("Sek".parse::<Currency>().unwrap(), Currency::SEK);
    }

    #[test]
    fn test_currency_from_str_unknown() {
        match "XYZ".parse::<Currency>() {
            Err(CurrencyError::UnknownCurrency(code)) => assert_eq!(code, "XYZ"),
            other => panic!("Expected UnknownCurrency error, got {:?}", other),
        }
    }

    #[test]
    fn test_pair_code() {
        assert_eq!(Currency::GBP.pair_code(Currency::EUR), "GBPEUR");
        assert_eq!(
            Currency::parse_pair("chfjpy").unwrap(),
            (Currency::CHF, Currency::JPY)
        );
        assert!(matches!(
            Currency::parse_pair("CHFXXX"),
            Err(CurrencyError::UnknownCurrency(_))
        ));
    }
}
