//! Dynamic initial margin profiles.

use std::collections::HashMap;

use crate::portfolio::NettingSetId;

/// Source of simulated initial margin, `[date][sample]` per netting set.
pub trait DimProvider: Sync {
    /// Profile of a netting set, if one was computed.
    fn dynamic_im(&self, netting_set: &NettingSetId) -> Option<&[Vec<f64>]>;
}

/// Precomputed DIM profiles held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDim {
    profiles: HashMap<NettingSetId, Vec<Vec<f64>>>,
}

impl InMemoryDim {
    /// Empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `[date][sample]` profile.
    pub fn with_profile(mut self, netting_set: NettingSetId, profile: Vec<Vec<f64>>) -> Self {
        self.profiles.insert(netting_set, profile);
        self
    }
}

impl DimProvider for InMemoryDim {
    fn dynamic_im(&self, netting_set: &NettingSetId) -> Option<&[Vec<f64>]> {
        self.profiles.get(netting_set).map(Vec::as_slice)
    }
}

/// Provider without any profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDim;

impl DimProvider for NoDim {
    fn dynamic_im(&self, _netting_set: &NettingSetId) -> Option<&[Vec<f64>]> {
        None
    }
}
