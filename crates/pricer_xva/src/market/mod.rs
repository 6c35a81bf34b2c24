//! Market and scenario accessors consumed by the exposure run.
//!
//! - [`Market`]: today's curves, FX quotes and index fixings
//! - [`SimpleMarket`]: in-memory [`Market`] for a single configuration
//! - [`ScenarioData`]: per-date, per-sample FX, index and numeraire values

mod index;
mod scenario;

pub use index::IborIndex;
pub use scenario::{InMemoryScenarioData, ScenarioData, ScenarioDataKind};

use std::collections::HashMap;

use pricer_core::market_data::{DiscountCurve, MarketDataError};
use pricer_core::types::{Currency, Date};

/// Today's market, shared read-only by all workers.
pub trait Market: Sync {
    /// Valuation date.
    fn as_of_date(&self) -> Date;

    /// Discount curve for a currency.
    fn discount_curve(
        &self,
        currency: Currency,
        configuration: &str,
    ) -> Result<&DiscountCurve, MarketDataError>;

    /// FX spot for a pair code such as `USDEUR` (units of quote per unit of base).
    fn fx_spot(&self, pair: &str) -> Result<f64, MarketDataError>;

    /// FX rate for a pair under a market configuration.
    fn fx_rate(&self, pair: &str, _configuration: &str) -> Result<f64, MarketDataError> {
        self.fx_spot(pair)
    }

    /// Interest rate index by name.
    fn ibor_index(&self, name: &str, configuration: &str) -> Result<&IborIndex, MarketDataError>;
}

/// In-memory market with one configuration.
///
/// FX lookups fall back to the inverse quote, and a pair of identical
/// currencies is 1.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::DiscountCurve;
/// use pricer_core::types::{Currency, Date, DayCountConvention};
/// use pricer_xva::market::{Market, SimpleMarket};
///
/// let today = Date::from_ymd(2024, 6, 14).unwrap();
/// let market = SimpleMarket::new(today)
///     .with_discount_curve(Currency::EUR, DiscountCurve::flat(today, 0.03, DayCountConvention::ActualActual365))
///     .with_fx_spot("EURUSD", 1.25);
///
/// assert_eq!(market.fx_rate("USDEUR", "default").unwrap(), 0.8);
/// assert_eq!(market.fx_spot("EUREUR").unwrap(), 1.0);
/// assert!(market.discount_curve(Currency::USD, "default").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SimpleMarket {
    as_of: Date,
    curves: HashMap<Currency, DiscountCurve>,
    fx: HashMap<String, f64>,
    indices: HashMap<String, IborIndex>,
}

impl SimpleMarket {
    /// Empty market as of `as_of`.
    pub fn new(as_of: Date) -> Self {
        Self {
            as_of,
            curves: HashMap::new(),
            fx: HashMap::new(),
            indices: HashMap::new(),
        }
    }

    /// Adds a discount curve.
    pub fn with_discount_curve(mut self, currency: Currency, curve: DiscountCurve) -> Self {
        self.curves.insert(currency, curve);
        self
    }

    /// Adds an FX quote.
    pub fn with_fx_spot(mut self, pair: impl Into<String>, rate: f64) -> Self {
        self.fx.insert(pair.into().to_uppercase(), rate);
        self
    }

    /// Adds an index.
    pub fn with_index(mut self, index: IborIndex) -> Self {
        self.indices.insert(index.name().to_string(), index);
        self
    }
}

impl Market for SimpleMarket {
    fn as_of_date(&self) -> Date {
        self.as_of
    }

    fn discount_curve(
        &self,
        currency: Currency,
        _configuration: &str,
    ) -> Result<&DiscountCurve, MarketDataError> {
        self.curves
            .get(&currency)
            .ok_or(MarketDataError::MissingDiscountCurve(currency))
    }

    fn fx_spot(&self, pair: &str) -> Result<f64, MarketDataError> {
        let missing = || MarketDataError::MissingFxRate {
            pair: pair.to_string(),
        };
        let (base, quote) = Currency::parse_pair(pair).map_err(|_| missing())?;
        if base == quote {
            return Ok(1.0);
        }
        if let Some(&rate) = self.fx.get(&base.pair_code(quote)) {
            return Ok(rate);
        }
        match self.fx.get(&quote.pair_code(base)) {
            Some(&rate) if rate != 0.0 => Ok(1.0 / rate),
            _ => Err(missing()),
        }
    }

    fn ibor_index(&self, name: &str, _configuration: &str) -> Result<&IborIndex, MarketDataError> {
        self.indices
            .get(name)
            .ok_or_else(|| MarketDataError::UnknownIndex(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::{Calendar, DayCountConvention};

    fn today() -> Date {
        Date::from_ymd(2024, 6, 14).unwrap()
    }

    #[test]
    fn test_fx_direct_and_inverse() {
        let market = SimpleMarket::new(today()).with_fx_spot("gbpusd", 1.25);
        assert_eq!(market.fx_spot("GBPUSD").unwrap(), 1.25);
        assert_eq!(market.fx_spot("USDGBP").unwrap(), 0.8);
        assert!(matches!(
            market.fx_spot("USDJPY"),
            Err(MarketDataError::MissingFxRate { .. })
        ));
        assert!(market.fx_spot("garbage").is_err());
    }

    #[test]
    fn test_fx_rate_ignores_configuration() {
        let market = SimpleMarket::new(today()).with_fx_spot("EURUSD", 1.1);
        assert_eq!(market.fx_rate("EURUSD", "default").unwrap(), 1.1);
        assert_eq!(market.fx_rate("EURUSD", "collateral_inccy").unwrap(), 1.1);
    }

    #[test]
    fn test_index_lookup() {
        let market = SimpleMarket::new(today()).with_index(IborIndex::new(
            "USD-SOFR",
            Calendar::weekends_only(),
            DayCountConvention::ActualActual360,
        ));
        assert!(market.ibor_index("USD-SOFR", "default").is_ok());
        assert!(matches!(
            market.ibor_index("EUR-ESTR", "default"),
            Err(MarketDataError::UnknownIndex(_))
        ));
    }
}
