//! Portfolio structures for exposure aggregation.
//!
//! This module provides:
//! - Trade envelopes (id, counterparty, netting set, maturity)
//! - Counterparty definitions with credit parameters
//! - Netting sets with optional CSA terms
//! - Portfolio container with the cube's trade order
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::{Currency, Date};
//! use pricer_xva::portfolio::{
//!     Counterparty, CounterpartyId, CreditParams, CsaDetails, NettingSet, NettingSetId,
//!     PortfolioBuilder, Trade, TradeId,
//! };
//!
//! let netting_set = NettingSet::new(NettingSetId::new("CPTY_A"))
//!     .with_csa(CsaDetails::new(Currency::EUR).with_index("EUR-EONIA"))
//!     .unwrap();
//!
//! let portfolio = PortfolioBuilder::new()
//!     .add_counterparty(Counterparty::new(
//!         CounterpartyId::new("CPTY_A"),
//!         CreditParams::new(0.01, 0.6).unwrap(),
//!     ))
//!     .add_netting_set(netting_set)
//!     .add_trade(Trade::new(
//!         TradeId::new("SWAP_1"),
//!         CounterpartyId::new("CPTY_A"),
//!         NettingSetId::new("CPTY_A"),
//!         Date::from_ymd(2034, 3, 1).unwrap(),
//!     ))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(portfolio.netting_set_count(), 1);
//! ```

mod builder;
mod counterparty;
mod error;
mod ids;
mod netting_set;
mod trade;

pub use builder::PortfolioBuilder;
pub use counterparty::{Counterparty, CreditParams};
pub use error::PortfolioError;
pub use ids::{CounterpartyId, NettingSetId, TradeId};
pub use netting_set::{CsaDetails, InitialMarginType, NettingSet};
pub use trade::Trade;

use std::collections::{BTreeMap, HashMap};

/// Portfolio container for trades, counterparties, and netting sets.
///
/// Trades are stored in insertion order, which is the trade axis of every
/// NPV cube handed to the engine. Netting sets iterate in id order.
#[derive(Debug)]
pub struct Portfolio {
    trades: Vec<Trade>,
    trade_index: HashMap<TradeId, usize>,
    counterparties: HashMap<CounterpartyId, Counterparty>,
    netting_sets: BTreeMap<NettingSetId, NettingSet>,
}

impl Portfolio {
    /// Returns the number of trades in the portfolio.
    #[inline]
    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    /// Returns the number of counterparties in the portfolio.
    #[inline]
    pub fn counterparty_count(&self) -> usize {
        self.counterparties.len()
    }

    /// Returns the number of netting sets in the portfolio.
    #[inline]
    pub fn netting_set_count(&self) -> usize {
        self.netting_sets.len()
    }

    /// Returns whether the portfolio has no trades.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Gets a trade by ID.
    #[inline]
    pub fn trade(&self, id: &TradeId) -> Option<&Trade> {
        self.trade_index.get(id).map(|&i| &self.trades[i])
    }

    /// Cube index of a trade.
    #[inline]
    pub fn trade_index(&self, id: &TradeId) -> Option<usize> {
        self.trade_index.get(id).copied()
    }

    /// Trades in cube order.
    #[inline]
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Gets a counterparty by ID.
    #[inline]
    pub fn counterparty(&self, id: &CounterpartyId) -> Option<&Counterparty> {
        self.counterparties.get(id)
    }

    /// Gets a netting set by ID.
    #[inline]
    pub fn netting_set(&self, id: &NettingSetId) -> Option<&NettingSet> {
        self.netting_sets.get(id)
    }

    /// Looks up a netting set, failing with `NettingSetNotFound`.
    pub fn require_netting_set(&self, id: &NettingSetId) -> Result<&NettingSet, PortfolioError> {
        self.netting_sets
            .get(id)
            .ok_or_else(|| PortfolioError::NettingSetNotFound(id.to_string()))
    }

    /// Netting sets in id order.
    #[inline]
    pub fn netting_sets(&self) -> impl Iterator<Item = &NettingSet> {
        self.netting_sets.values()
    }

    /// Netting sets that contain at least one trade, in id order.
    pub fn populated_netting_sets(&self) -> Vec<&NettingSet> {
        self.netting_sets
            .values()
            .filter(|ns| ns.trade_count() > 0)
            .collect()
    }

    /// Cube indices of the trades in a netting set, in cube order.
    pub fn trade_indices_in_netting_set(&self, ns_id: &NettingSetId) -> Vec<usize> {
        self.netting_sets
            .get(ns_id)
            .map(|ns| {
                ns.trade_ids()
                    .iter()
                    .filter_map(|tid| self.trade_index.get(tid).copied())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::Date;

    fn sample_portfolio() -> Portfolio {
        let maturity = Date::from_ymd(2030, 1, 1).unwrap();
        PortfolioBuilder::new()
            .add_counterparty(Counterparty::new(
                CounterpartyId::new("CP1"),
                CreditParams::new(0.02, 0.6).unwrap(),
            ))
            .add_netting_sets([
                NettingSet::new(NettingSetId::new("B")),
                NettingSet::new(NettingSetId::new("A")),
                NettingSet::new(NettingSetId::new("EMPTY")),
            ])
            .add_trades([
                Trade::new("T1".into(), "CP1".into(), "B".into(), maturity),
                Trade::new("T2".into(), "CP1".into(), "A".into(), maturity),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn test_lookup() {
        let p = sample_portfolio();
        assert_eq!(p.trade_count(), 2);
        assert_eq!(p.trade(&TradeId::new("T2")).unwrap().netting_set_id().as_str(), "A");
        assert!(p.require_netting_set(&NettingSetId::new("Z")).is_err());
        assert!(!p.is_empty());
    }

    #[test]
    fn test_netting_sets_are_ordered_by_id() {
        let p = sample_portfolio();
        let ids: Vec<&str> = p.netting_sets().map(|ns| ns.id().as_str()).collect();
        assert_eq!(ids, ["A", "B", "EMPTY"]);
        let populated: Vec<&str> = p
            .populated_netting_sets()
            .iter()
            .map(|ns| ns.id().as_str())
            .collect();
        assert_eq!(populated, ["A", "B"]);
    }
}
