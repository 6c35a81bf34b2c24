//! Portfolio error types.

use thiserror::Error;

/// Errors that can occur while building or querying a portfolio.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PortfolioError {
    /// Trade not found in portfolio.
    #[error("Trade not found: {0}")]
    TradeNotFound(String),

    /// Counterparty not found in portfolio.
    #[error("Counterparty not found: {0}")]
    CounterpartyNotFound(String),

    /// Netting set not found in portfolio.
    #[error("Netting set not found: {0}")]
    NettingSetNotFound(String),

    /// Duplicate trade ID encountered.
    #[error("Duplicate trade ID: {0}")]
    DuplicateTrade(String),

    /// Duplicate counterparty ID encountered.
    #[error("Duplicate counterparty ID: {0}")]
    DuplicateCounterparty(String),

    /// Duplicate netting set ID encountered.
    #[error("Duplicate netting set ID: {0}")]
    DuplicateNettingSet(String),

    /// Invalid credit parameters.
    #[error("Invalid credit parameters: {0}")]
    InvalidCreditParams(String),

    /// Invalid CSA terms.
    #[error("Invalid CSA for netting set {netting_set}: {reason}")]
    InvalidCsa {
        /// Netting set carrying the CSA
        netting_set: String,
        /// What is wrong
        reason: String,
    },

    /// Trade references an unknown counterparty.
    #[error("Trade references unknown counterparty: trade={0}, counterparty={1}")]
    UnknownCounterpartyReference(String, String),

    /// Trade references an unknown netting set.
    #[error("Trade references unknown netting set: trade={0}, netting_set={1}")]
    UnknownNettingSetReference(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_duplicate_trade() {
        let err = PortfolioError::DuplicateTrade("TRADE001".to_string());
        assert_eq!(format!("{}", err), "Duplicate trade ID: TRADE001");
    }

    #[test]
    fn test_error_display_invalid_csa() {
        let err = PortfolioError::InvalidCsa {
            netting_set: "NS1".to_string(),
            reason: "negative threshold".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Invalid CSA for netting set NS1: negative threshold"
        );
    }

    #[test]
    fn test_error_display_unknown_netting_set_reference() {
        let err = PortfolioError::UnknownNettingSetReference("T1".to_string(), "NS9".to_string());
        assert_eq!(
            format!("{}", err),
            "Trade references unknown netting set: trade=T1, netting_set=NS9"
        );
    }
}
