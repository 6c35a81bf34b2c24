//! Portfolio builder for constructing validated portfolios.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::counterparty::Counterparty;
use super::error::PortfolioError;
use super::netting_set::NettingSet;
use super::trade::Trade;
use super::Portfolio;

/// Builder for constructing portfolios with validation.
///
/// Trades keep the order in which they are added; that order is the trade
/// axis of the NPV cube.
///
/// # Examples
///
/// ```
/// use pricer_core::types::Date;
/// use pricer_xva::portfolio::{
///     Counterparty, CounterpartyId, CreditParams, NettingSet, NettingSetId, PortfolioBuilder,
///     Trade, TradeId,
/// };
///
/// let maturity = Date::from_ymd(2030, 1, 1).unwrap();
/// let portfolio = PortfolioBuilder::new()
///     .add_counterparty(Counterparty::new(
///         CounterpartyId::new("CP1"),
///         CreditParams::new(0.02, 0.6).unwrap(),
///     ))
///     .add_netting_set(NettingSet::new(NettingSetId::new("NS1")))
///     .add_trade(Trade::new(TradeId::new("T1"), "CP1".into(), "NS1".into(), maturity))
///     .add_trade(Trade::new(TradeId::new("T2"), "CP1".into(), "NS1".into(), maturity))
///     .build()
///     .unwrap();
///
/// assert_eq!(portfolio.trade_count(), 2);
/// assert_eq!(portfolio.trade_index(&TradeId::new("T2")), Some(1));
/// ```
#[derive(Default)]
pub struct PortfolioBuilder {
    trades: Vec<Trade>,
    counterparties: Vec<Counterparty>,
    netting_sets: Vec<NettingSet>,
}

impl PortfolioBuilder {
    /// Creates a new portfolio builder.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a trade to the portfolio.
    pub fn add_trade(mut self, trade: Trade) -> Self {
        self.trades.push(trade);
        self
    }

    /// Adds multiple trades to the portfolio.
    pub fn add_trades(mut self, trades: impl IntoIterator<Item = Trade>) -> Self {
        self.trades.extend(trades);
        self
    }

    /// Adds a counterparty to the portfolio.
    pub fn add_counterparty(mut self, counterparty: Counterparty) -> Self {
        self.counterparties.push(counterparty);
        self
    }

    /// Adds multiple counterparties to the portfolio.
    pub fn add_counterparties(
        mut self,
        counterparties: impl IntoIterator<Item = Counterparty>,
    ) -> Self {
        self.counterparties.extend(counterparties);
        self
    }

    /// Adds a netting set definition.
    pub fn add_netting_set(mut self, netting_set: NettingSet) -> Self {
        self.netting_sets.push(netting_set);
        self
    }

    /// Adds multiple netting set definitions.
    pub fn add_netting_sets(mut self, netting_sets: impl IntoIterator<Item = NettingSet>) -> Self {
        self.netting_sets.extend(netting_sets);
        self
    }

    /// Builds and validates the portfolio.
    ///
    /// # Validation
    ///
    /// - No duplicate trade, counterparty or netting set IDs
    /// - All trades reference known counterparties and netting sets
    ///
    /// Counterparty consistency inside a netting set is checked by the
    /// exposure run, not here.
    pub fn build(self) -> Result<Portfolio, PortfolioError> {
        let mut trade_index = HashMap::with_capacity(self.trades.len());
        for (i, trade) in self.trades.iter().enumerate() {
            if trade_index.insert(trade.id().clone(), i).is_some() {
                return Err(PortfolioError::DuplicateTrade(trade.id().to_string()));
            }
        }

        let mut cp_ids = HashSet::new();
        for cp in &self.counterparties {
            if !cp_ids.insert(cp.id().clone()) {
                return Err(PortfolioError::DuplicateCounterparty(cp.id().to_string()));
            }
        }

        let mut netting_sets = BTreeMap::new();
        for mut ns in self.netting_sets {
            ns.clear_trades();
            let id = ns.id().clone();
            if netting_sets.insert(id.clone(), ns).is_some() {
                return Err(PortfolioError::DuplicateNettingSet(id.to_string()));
            }
        }

        for trade in &self.trades {
            if !cp_ids.contains(trade.counterparty_id()) {
                return Err(PortfolioError::UnknownCounterpartyReference(
                    trade.id().to_string(),
                    trade.counterparty_id().to_string(),
                ));
            }
            match netting_sets.get_mut(trade.netting_set_id()) {
                Some(ns) => ns.push_trade(trade.id().clone()),
                None => {
                    return Err(PortfolioError::UnknownNettingSetReference(
                        trade.id().to_string(),
                        trade.netting_set_id().to_string(),
                    ))
                }
            }
        }

        let counterparties = self
            .counterparties
            .into_iter()
            .map(|c| (c.id().clone(), c))
            .collect();

        Ok(Portfolio {
            trades: self.trades,
            trade_index,
            counterparties,
            netting_sets,
        })
    }
}
