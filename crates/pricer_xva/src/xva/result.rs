//! XVA summary rows.

use crate::portfolio::{CounterpartyId, NettingSetId, TradeId};

/// Adjustments of one netting set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NettingSetXva {
    /// Netting set identifier.
    pub netting_set_id: NettingSetId,
    /// Counterparty identifier.
    pub counterparty_id: CounterpartyId,
    /// Credit Valuation Adjustment (non-negative).
    pub cva: f64,
    /// Debit Valuation Adjustment (non-negative, zero without own credit).
    pub dva: f64,
    /// Collateral Valuation Adjustment.
    pub colva: f64,
    /// Collateral floor value.
    pub collateral_floor: f64,
    /// Time-weighted EE over the regulatory window.
    pub basel_epe: f64,
    /// Time-weighted effective EE over the regulatory window.
    pub basel_eepe: f64,
}

impl NettingSetXva {
    /// Bilateral CVA, `CVA - DVA`.
    #[inline]
    pub fn bilateral_cva(&self) -> f64 {
        self.cva - self.dva
    }
}

/// Adjustments of one trade, from its allocated exposure.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TradeXva {
    /// Trade identifier.
    pub trade_id: TradeId,
    /// Netting set the trade belongs to.
    pub netting_set_id: NettingSetId,
    /// CVA on allocated EPE.
    pub cva: f64,
    /// DVA on allocated ENE.
    pub dva: f64,
}

/// Netting set rows in id order, followed by trade rows when allocation ran.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct XvaSummary {
    /// One row per netting set.
    pub netting_sets: Vec<NettingSetXva>,
    /// One row per allocated trade.
    pub trades: Vec<TradeXva>,
}

impl XvaSummary {
    /// Sum of netting set CVA.
    pub fn total_cva(&self) -> f64 {
        self.netting_sets.iter().map(|ns| ns.cva).sum()
    }

    /// Sum of netting set DVA.
    pub fn total_dva(&self) -> f64 {
        self.netting_sets.iter().map(|ns| ns.dva).sum()
    }

    /// Row of a netting set.
    pub fn netting_set(&self, id: &NettingSetId) -> Option<&NettingSetXva> {
        self.netting_sets.iter().find(|ns| &ns.netting_set_id == id)
    }
}
