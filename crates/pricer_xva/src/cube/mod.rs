//! Value cubes: `[id][date][sample]` arrays plus a t0 value per id.
//!
//! - [`NpvCube`]: read contract for the pre-simulated trade values
//! - [`InMemoryCube`]: dense, depth-aware implementation used for inputs and outputs
//! - [`NettedCube`], [`ExposureCube`], [`TradeAllocationCube`]: output cubes of a run

mod memory;

pub use memory::{CubeSlotMut, InMemoryCube};

use pricer_core::types::Date;

/// Read access to simulated values.
///
/// Implementations are shared read-only across worker threads.
pub trait NpvCube: Sync {
    /// Number of ids (trades) on the first axis.
    fn num_ids(&self) -> usize;

    /// Simulation dates, strictly increasing.
    fn dates(&self) -> &[Date];

    /// Number of Monte Carlo samples.
    fn samples(&self) -> usize;

    /// Value today.
    fn get_t0(&self, id: usize) -> f64;

    /// Simulated value.
    fn get(&self, id: usize, date: usize, sample: usize) -> f64;
}

/// Depth slot of the exposure cube holding EPE.
pub const EPE_DEPTH: usize = 0;
/// Depth slot of the exposure cube holding ENE.
pub const ENE_DEPTH: usize = 1;
/// Depth slot of the allocation cube holding allocated EPE.
pub const ALLOCATED_EPE_DEPTH: usize = 0;
/// Depth slot of the allocation cube holding allocated ENE.
pub const ALLOCATED_ENE_DEPTH: usize = 1;

/// Collateral-adjusted netting set values, `[netting set][date][sample]`.
pub type NettedCube = InMemoryCube;

/// EPE/ENE per netting set; one sample when only expectations are kept.
pub type ExposureCube = InMemoryCube;

/// Allocated EPE/ENE per trade; one sample when only expectations are kept.
pub type TradeAllocationCube = InMemoryCube;

/// Sample-averaged profile of one id and depth, index 0 = t0.
pub fn mean_exposure(cube: &InMemoryCube, id: usize, depth: usize) -> Vec<f64> {
    let dates = cube.dates().len();
    let samples = cube.samples();
    let mut profile = Vec::with_capacity(dates + 1);
    profile.push(cube.get_t0_depth(id, depth));
    for j in 0..dates {
        if samples == 0 {
            profile.push(0.0);
            continue;
        }
        let sum: f64 = (0..samples).map(|k| cube.get_depth(id, j, k, depth)).sum();
        profile.push(sum / samples as f64);
    }
    profile
}
