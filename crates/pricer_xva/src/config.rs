//! Exposure run configuration.
//!
//! Loaded from TOML; every key is optional and falls back to its default.
//!
//! ```
//! use pricer_xva::config::ExposureConfig;
//! use pricer_xva::exposure::MporCashFlowMode;
//!
//! let config = ExposureConfig::from_toml_str(
//!     r#"
//!     base_currency = "USD"
//!     quantile = 0.99
//!     mpor_cash_flow_mode = "NonePay"
//!     marginal_allocation = true
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.quantile, 0.99);
//! assert_eq!(config.mpor_cash_flow_mode, MporCashFlowMode::NonePay);
//! assert!(!config.multi_path);
//! ```

use std::path::Path;

use pricer_core::types::Currency;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collateral::CollateralCalculationType;
use crate::exposure::MporCashFlowMode;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// PFE quantile outside [0, 1].
    #[error("Invalid quantile: {0}. Must lie in [0, 1]")]
    InvalidQuantile(f64),

    /// Negative or non-finite de-minimis limit.
    #[error("Invalid marginal allocation limit: {0}. Must be non-negative")]
    InvalidAllocationLimit(f64),

    /// Empty market configuration label.
    #[error("Market configuration label must not be empty")]
    EmptyMarketConfiguration,

    /// TOML could not be parsed.
    #[error("Configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Settings for one exposure aggregation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExposureConfig {
    /// Reporting currency.
    pub base_currency: Currency,
    /// Market configuration label passed to FX and curve lookups.
    pub market_configuration: String,
    /// PFE quantile.
    pub quantile: f64,
    /// Collateral calculation type forwarded to the path provider.
    pub calculation_type: CollateralCalculationType,
    /// Treatment of cash flows inside the margin period of risk.
    pub mpor_cash_flow_mode: MporCashFlowMode,
    /// Keep per-sample exposures and allocations.
    pub multi_path: bool,
    /// Analytics-level initial margin switch, combined with the CSA flag.
    pub apply_initial_margin: bool,
    /// Assume today's value is fully collateralised.
    pub full_initial_collateralisation: bool,
    /// Allocate netting set exposure to trades.
    pub marginal_allocation: bool,
    /// Uncollateralised netting set values at or below this size are split evenly.
    pub marginal_allocation_limit: f64,
    /// Report from the counterparty's side.
    pub flip_view: bool,
}

impl Default for ExposureConfig {
    fn default() -> Self {
        Self {
            base_currency: Currency::EUR,
            market_configuration: "default".to_string(),
            quantile: 0.95,
            calculation_type: CollateralCalculationType::Symmetric,
            mpor_cash_flow_mode: MporCashFlowMode::BothPay,
            multi_path: false,
            apply_initial_margin: false,
            full_initial_collateralisation: false,
            marginal_allocation: false,
            marginal_allocation_limit: 1.0,
            flip_view: false,
        }
    }
}

impl ExposureConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.quantile) {
            return Err(ConfigError::InvalidQuantile(self.quantile));
        }
        if !(self.marginal_allocation_limit >= 0.0) || !self.marginal_allocation_limit.is_finite() {
            return Err(ConfigError::InvalidAllocationLimit(
                self.marginal_allocation_limit,
            ));
        }
        if self.market_configuration.is_empty() {
            return Err(ConfigError::EmptyMarketConfiguration);
        }
        Ok(())
    }

    /// Sets the reporting currency.
    pub fn with_base_currency(mut self, currency: Currency) -> Self {
        self.base_currency = currency;
        self
    }

    /// Sets the PFE quantile.
    pub fn with_quantile(mut self, quantile: f64) -> Self {
        self.quantile = quantile;
        self
    }

    /// Enables trade allocation with the given de-minimis limit.
    pub fn with_marginal_allocation(mut self, limit: f64) -> Self {
        self.marginal_allocation = true;
        self.marginal_allocation_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExposureConfig::from_toml_str("").unwrap();
        assert_eq!(config, ExposureConfig::default());
        assert_eq!(config.base_currency, Currency::EUR);
        assert_eq!(config.market_configuration, "default");
        assert_eq!(config.quantile, 0.95);
        assert_eq!(config.calculation_type, CollateralCalculationType::Symmetric);
        assert_eq!(config.marginal_allocation_limit, 1.0);
    }

    #[test]
    fn test_full_document() {
        let config = ExposureConfig::from_toml_str(
            r#"
            base_currency = "GBP"
            market_configuration = "xva"
            quantile = 0.9
            calculation_type = "NoLag"
            mpor_cash_flow_mode = "WePay"
            multi_path = true
            apply_initial_margin = true
            full_initial_collateralisation = true
            marginal_allocation = true
            marginal_allocation_limit = 0.5
            flip_view = true
            "#,
        )
        .unwrap();
        assert_eq!(config.base_currency, Currency::GBP);
        assert_eq!(config.calculation_type, CollateralCalculationType::NoLag);
        assert_eq!(config.mpor_cash_flow_mode, MporCashFlowMode::WePay);
        assert!(config.multi_path && config.flip_view && config.full_initial_collateralisation);
    }

    #[test]
    fn test_invalid_quantile() {
        let err = ExposureConfig::from_toml_str("quantile = 1.5").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidQuantile(q) if q == 1.5));
    }

    #[test]
    fn test_invalid_limit() {
        let err = ExposureConfig::default()
            .with_marginal_allocation(-1.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAllocationLimit(_)));
    }

    #[test]
    fn test_unknown_key_is_parse_error() {
        let err = ExposureConfig::from_toml_str("quantil = 0.9").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ExposureConfig::from_file("/nonexistent/exposure.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }
}
