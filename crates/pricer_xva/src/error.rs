//! Run-level error type for the exposure aggregation.
//!
//! Every variant aborts the run: exposure figures feed regulatory and
//! accounting numbers, so there is no partial-result fallback.

use pricer_core::market_data::MarketDataError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::market::ScenarioDataKind;
use crate::portfolio::PortfolioError;

/// Errors raised by the exposure run.
#[derive(Debug, Error)]
pub enum ExposureError {
    /// Inconsistent or incomplete run inputs.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Cube, grid, scenario or DIM dimensions disagree.
    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Which dimension
        what: String,
        /// Expected size
        expected: usize,
        /// Actual size
        actual: usize,
    },

    /// Curve, FX or index fixing lookup failed.
    #[error("Missing market data: {0}")]
    MissingMarketData(#[from] MarketDataError),

    /// Scenario store lacks a referenced series.
    #[error("Scenario data does not provide {kind} values for '{key}'")]
    MissingScenarioData {
        /// Series kind
        kind: ScenarioDataKind,
        /// Series key (currency, index name, empty for the numeraire)
        key: String,
    },

    /// Scenario lookup failed inside a netting set's date/sample loop.
    #[error("Scenario lookup failed for netting set {netting_set}, date {date_index}, sample {sample_index}: {source}")]
    ScenarioLookup {
        /// Netting set
        netting_set: String,
        /// Date index
        date_index: usize,
        /// Sample index
        sample_index: usize,
        /// Underlying failure
        source: Box<ExposureError>,
    },

    /// Active CSA flag without CSA terms.
    #[error("Active CSA for netting set {0}, but CSA details not initialised")]
    MissingCsaDetails(String),

    /// Two trades of one netting set face different counterparties.
    #[error("Counterparty is not unique within netting set {netting_set}: {first} vs {second}")]
    CounterpartyMismatch {
        /// Netting set
        netting_set: String,
        /// Counterparty of the first trade
        first: String,
        /// Conflicting counterparty
        second: String,
    },

    /// Dynamic initial margin below zero.
    #[error("Negative DIM for netting set {netting_set}, date {date_index}, sample {sample_index}: {value}")]
    NegativeDim {
        /// Netting set
        netting_set: String,
        /// Date index
        date_index: usize,
        /// Sample index
        sample_index: usize,
        /// Offending value
        value: f64,
    },

    /// Collateral provider returned the wrong number of sample paths.
    #[error("Collateral provider returned {actual} paths for netting set {netting_set}, expected {expected}")]
    CollateralPathCount {
        /// Netting set
        netting_set: String,
        /// Cube sample count
        expected: usize,
        /// Paths returned
        actual: usize,
    },

    /// Initial margin requested but the DIM provider has no profile.
    #[error("No dynamic initial margin profile for netting set {0}")]
    MissingDim(String),

    /// Portfolio lookup failure.
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    /// Invalid configuration values.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Report output failed.
    #[error("Report output failed: {0}")]
    Report(#[from] csv::Error),
}

impl ExposureError {
    pub(crate) fn dimension(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        ExposureError::DimensionMismatch {
            what: what.into(),
            expected,
            actual,
        }
    }

    /// Attaches the netting set, date and sample at which a lookup failed.
    pub(crate) fn at(self, netting_set: impl ToString, date_index: usize, sample_index: usize) -> Self {
        ExposureError::ScenarioLookup {
            netting_set: netting_set.to_string(),
            date_index,
            sample_index,
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_dim_message_locates_sample() {
        let err = ExposureError::NegativeDim {
            netting_set: "NS1".to_string(),
            date_index: 3,
            sample_index: 17,
            value: -1.5,
        };
        assert_eq!(
            err.to_string(),
            "Negative DIM for netting set NS1, date 3, sample 17: -1.5"
        );
    }

    #[test]
    fn test_missing_scenario_data_message() {
        let err = ExposureError::MissingScenarioData {
            kind: ScenarioDataKind::FxSpot,
            key: "USD".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Scenario data does not provide FXSpot values for 'USD'"
        );
    }

    #[test]
    fn test_portfolio_error_is_transparent() {
        let err: ExposureError = PortfolioError::TradeNotFound("T1".to_string()).into();
        assert_eq!(err.to_string(), "Trade not found: T1");
    }
}
