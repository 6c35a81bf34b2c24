//! XVA summary over exposure profiles.
//!
//! - [`compute_cva`]: CVA from an EPE profile and counterparty credit
//! - [`compute_dva`]: DVA from an ENE profile and own credit
//! - [`XvaCalculator`]: per-netting-set and per-trade summary of an exposure run
//!
//! # Example
//!
//! ```
//! use pricer_xva::portfolio::CreditParams;
//! use pricer_xva::xva::{compute_cva, compute_dva};
//!
//! let times = vec![0.0, 0.5, 1.0];
//! let epe = vec![0.0, 100.0, 80.0];
//! let ene = vec![0.0, 20.0, 40.0];
//!
//! let cva = compute_cva(&epe, &times, &CreditParams::new(0.02, 0.6).unwrap());
//! let dva = compute_dva(&ene, &times, &CreditParams::new(0.01, 0.6).unwrap());
//! assert!(cva > dva);
//! ```

mod cva;
mod dva;
mod result;

pub use cva::compute_cva;
pub use dva::compute_dva;
pub use result::{NettingSetXva, TradeXva, XvaSummary};

use rayon::prelude::*;

use crate::error::ExposureError;
use crate::exposure::ExposureResults;
use crate::portfolio::{CreditParams, Portfolio, PortfolioError};

/// Summarises an exposure run into CVA, DVA, COLVA and regulatory figures.
#[derive(Clone, Debug, Default)]
pub struct XvaCalculator {
    own_credit: Option<CreditParams>,
}

impl XvaCalculator {
    /// Unilateral calculator (DVA is zero).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets own credit, enabling DVA.
    pub fn with_own_credit(mut self, own_credit: CreditParams) -> Self {
        self.own_credit = Some(own_credit);
        self
    }

    /// Own credit parameters, if set.
    #[inline]
    pub fn own_credit(&self) -> Option<&CreditParams> {
        self.own_credit.as_ref()
    }

    /// Summary rows for every netting set and, when allocation ran, every
    /// allocated trade.
    ///
    /// # Errors
    ///
    /// `Portfolio` if a netting set's counterparty is unknown.
    pub fn compute(
        &self,
        portfolio: &Portfolio,
        results: &ExposureResults,
    ) -> Result<XvaSummary, ExposureError> {
        let times = results.times();
        let netting_set_rows = results
            .netting_sets
            .par_iter()
            .map(|(id, exposure)| -> Result<NettingSetXva, ExposureError> {
                let credit = portfolio
                    .counterparty(&exposure.counterparty_id)
                    .ok_or_else(|| {
                        PortfolioError::CounterpartyNotFound(exposure.counterparty_id.to_string())
                    })?
                    .credit_params();
                Ok(NettingSetXva {
                    netting_set_id: id.clone(),
                    counterparty_id: exposure.counterparty_id.clone(),
                    cva: compute_cva(&exposure.epe, times, credit),
                    dva: self.dva(&exposure.ene, times),
                    colva: exposure.colva,
                    collateral_floor: exposure.collateral_floor,
                    basel_epe: exposure.epe_b,
                    basel_eepe: exposure.eepe_b,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut trade_rows = Vec::new();
        if results.allocation_cube().is_some() {
            for (exposure, row) in results.netting_sets().zip(&netting_set_rows) {
                let credit = portfolio
                    .counterparty(&row.counterparty_id)
                    .map(|cp| *cp.credit_params())
                    .ok_or_else(|| PortfolioError::CounterpartyNotFound(row.counterparty_id.to_string()))?;
                for &i in &exposure.trade_indices {
                    let epe = results.allocated_epe(i).unwrap_or_default();
                    let ene = results.allocated_ene(i).unwrap_or_default();
                    trade_rows.push(TradeXva {
                        trade_id: results.trade_ids()[i].clone(),
                        netting_set_id: exposure.netting_set_id.clone(),
                        cva: compute_cva(&epe, times, &credit),
                        dva: self.dva(&ene, times),
                    });
                }
            }
        }

        Ok(XvaSummary {
            netting_sets: netting_set_rows,
            trades: trade_rows,
        })
    }

    fn dva(&self, ene: &[f64], times: &[f64]) -> f64 {
        self.own_credit
            .as_ref()
            .map_or(0.0, |own| compute_dva(ene, times, own))
    }
}
