//! Trade envelope.
//!
//! Trade values arrive pre-simulated in the NPV cube, so a trade only carries
//! the metadata the aggregation needs: who it faces, where it nets and when it
//! matures.

use pricer_core::types::Date;

use super::ids::{CounterpartyId, NettingSetId, TradeId};

/// Trade metadata.
///
/// # Examples
///
/// ```
/// use pricer_core::types::Date;
/// use pricer_xva::portfolio::{CounterpartyId, NettingSetId, Trade, TradeId};
///
/// let trade = Trade::new(
///     TradeId::new("SWAP_1"),
///     CounterpartyId::new("CPTY_A"),
///     NettingSetId::new("CPTY_A"),
///     Date::from_ymd(2030, 6, 15).unwrap(),
/// );
/// assert_eq!(trade.id().as_str(), "SWAP_1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trade {
    id: TradeId,
    counterparty_id: CounterpartyId,
    netting_set_id: NettingSetId,
    maturity: Date,
}

impl Trade {
    /// Creates a new trade.
    pub fn new(
        id: TradeId,
        counterparty_id: CounterpartyId,
        netting_set_id: NettingSetId,
        maturity: Date,
    ) -> Self {
        Self {
            id,
            counterparty_id,
            netting_set_id,
            maturity,
        }
    }

    /// Returns the trade ID.
    #[inline]
    pub fn id(&self) -> &TradeId {
        &self.id
    }

    /// Returns the counterparty ID.
    #[inline]
    pub fn counterparty_id(&self) -> &CounterpartyId {
        &self.counterparty_id
    }

    /// Returns the netting set ID.
    #[inline]
    pub fn netting_set_id(&self) -> &NettingSetId {
        &self.netting_set_id
    }

    /// Returns the final maturity date.
    #[inline]
    pub fn maturity(&self) -> Date {
        self.maturity
    }
}
