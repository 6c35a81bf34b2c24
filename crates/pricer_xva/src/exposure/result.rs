//! Output of an exposure run.

use std::collections::BTreeMap;

use pricer_core::types::Date;

use super::standalone::TradeExposure;
use crate::cube::{
    mean_exposure, ExposureCube, NettedCube, TradeAllocationCube, ALLOCATED_ENE_DEPTH,
    ALLOCATED_EPE_DEPTH,
};
use crate::portfolio::{CounterpartyId, NettingSetId, TradeId};

/// Exposure profiles and scalar adjustments of one netting set.
///
/// Profiles have one entry per simulation date plus today at index 0.
#[derive(Debug, Clone, PartialEq)]
pub struct NettingSetExposure {
    /// Netting set identifier.
    pub netting_set_id: NettingSetId,
    /// The single counterparty of the netting set.
    pub counterparty_id: CounterpartyId,
    /// Latest trade maturity.
    pub maturity: Date,
    /// Sum of today's trade values.
    pub value_today: f64,
    /// Expected positive exposure.
    pub epe: Vec<f64>,
    /// Expected negative exposure.
    pub ene: Vec<f64>,
    /// Potential future exposure at the configured quantile.
    pub pfe: Vec<f64>,
    /// EPE divided by the base currency discount factor.
    pub ee_b: Vec<f64>,
    /// Running maximum of `ee_b`.
    pub eee_b: Vec<f64>,
    /// Expected collateral balance, base currency.
    pub eab: Vec<f64>,
    /// COLVA accrued over each period.
    pub colva_increments: Vec<f64>,
    /// Collateral floor value accrued over each period.
    pub floor_increments: Vec<f64>,
    /// Total COLVA.
    pub colva: f64,
    /// Total collateral floor value.
    pub collateral_floor: f64,
    /// Time-weighted EE over the regulatory window.
    pub epe_b: f64,
    /// Time-weighted effective EE over the regulatory window.
    pub eepe_b: f64,
    /// Cube indices of member trades.
    pub trade_indices: Vec<usize>,
}

/// Everything produced by one run of the netted exposure calculator.
#[derive(Debug)]
pub struct ExposureResults {
    pub(crate) as_of: Date,
    pub(crate) dates: Vec<Date>,
    pub(crate) times: Vec<f64>,
    pub(crate) trade_ids: Vec<TradeId>,
    pub(crate) netting_set_order: Vec<NettingSetId>,
    pub(crate) netting_sets: BTreeMap<NettingSetId, NettingSetExposure>,
    pub(crate) netted_cube: NettedCube,
    pub(crate) exposure_cube: ExposureCube,
    pub(crate) allocation_cube: Option<TradeAllocationCube>,
    pub(crate) trade_exposures: Vec<TradeExposure>,
}

impl ExposureResults {
    /// Valuation date.
    #[inline]
    pub fn as_of(&self) -> Date {
        self.as_of
    }

    /// Simulation dates.
    #[inline]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Act/Act ISDA times, index 0 = today.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Trade ids in cube order.
    #[inline]
    pub fn trade_ids(&self) -> &[TradeId] {
        &self.trade_ids
    }

    /// Results of one netting set.
    pub fn netting_set(&self, id: &NettingSetId) -> Option<&NettingSetExposure> {
        self.netting_sets.get(id)
    }

    /// Results in netting set id order.
    pub fn netting_sets(&self) -> impl Iterator<Item = &NettingSetExposure> {
        self.netting_sets.values()
    }

    /// Row of a netting set in the netted and exposure cubes.
    pub fn netting_set_cube_index(&self, id: &NettingSetId) -> Option<usize> {
        self.netting_set_order.iter().position(|ns| ns == id)
    }

    /// Collateral-adjusted netting set values.
    #[inline]
    pub fn netted_cube(&self) -> &NettedCube {
        &self.netted_cube
    }

    /// EPE/ENE cube.
    #[inline]
    pub fn exposure_cube(&self) -> &ExposureCube {
        &self.exposure_cube
    }

    /// Allocated EPE/ENE cube, present when allocation ran.
    #[inline]
    pub fn allocation_cube(&self) -> Option<&TradeAllocationCube> {
        self.allocation_cube.as_ref()
    }

    /// Stand-alone trade profiles in cube order.
    #[inline]
    pub fn trade_exposures(&self) -> &[TradeExposure] {
        &self.trade_exposures
    }

    /// Sample-averaged allocated EPE of a trade, index 0 = today.
    pub fn allocated_epe(&self, trade_index: usize) -> Option<Vec<f64>> {
        self.allocation_cube
            .as_ref()
            .map(|cube| mean_exposure(cube, trade_index, ALLOCATED_EPE_DEPTH))
    }

    /// Sample-averaged allocated ENE of a trade, index 0 = today.
    pub fn allocated_ene(&self, trade_index: usize) -> Option<Vec<f64>> {
        self.allocation_cube
            .as_ref()
            .map(|cube| mean_exposure(cube, trade_index, ALLOCATED_ENE_DEPTH))
    }
}
