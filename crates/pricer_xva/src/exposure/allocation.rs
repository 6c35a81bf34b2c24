//! Marginal allocation of netting set exposure to trades.

/// Signed share of a netting set exposure attributed to one trade.
///
/// Without collateral the trade keeps its stand-alone exposure, i.e. its
/// value plus its own margin period of risk cash flows. Otherwise the
/// exposure is split evenly when the uncollateralised netting set value is
/// within `limit` of zero, and pro rata to the trade's value if not.
///
/// # Examples
///
/// ```
/// use pricer_xva::exposure::allocate;
///
/// // Uncollateralised: the trade's stand-alone exposure.
/// assert_eq!(allocate(40.0, 0.0, 100.0, 30.0, 32.0, 2, 1.0), 32.0);
/// // Pro rata: 40 * 30 / 100.
/// assert_eq!(allocate(40.0, 60.0, 100.0, 30.0, 32.0, 2, 1.0), 12.0);
/// // Netting set value below the limit: even split.
/// assert_eq!(allocate(4.0, 1.0, 0.5, 30.0, 32.0, 2, 1.0), 2.0);
/// ```
pub fn allocate(
    exposure: f64,
    balance: f64,
    netting_set_value: f64,
    trade_value: f64,
    trade_exposure: f64,
    netting_set_size: usize,
    limit: f64,
) -> f64 {
    if balance == 0.0 {
        trade_exposure
    } else if netting_set_value.abs() <= limit {
        exposure / netting_set_size as f64
    } else {
        exposure * trade_value / netting_set_value
    }
}

/// Allocated EPE/ENE of one trade.
///
/// Profiles are `[date][sample]` flattened, with one sample slot when only
/// expectations are kept. There is no t0 entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeAllocation {
    /// Cube index of the trade.
    pub trade_index: usize,
    /// Allocated EPE.
    pub epe: Vec<f64>,
    /// Allocated ENE.
    pub ene: Vec<f64>,
}

/// Allocation accumulator for the trades of one netting set.
pub(crate) struct AllocationBuffer {
    samples: usize,
    slots: usize,
    trades: Vec<TradeAllocation>,
}

impl AllocationBuffer {
    /// `slots` is the sample count for per-sample output, else 1.
    pub(crate) fn new(trade_indices: &[usize], dates: usize, samples: usize, slots: usize) -> Self {
        let len = dates * slots;
        Self {
            samples,
            slots,
            trades: trade_indices
                .iter()
                .map(|&trade_index| TradeAllocation {
                    trade_index,
                    epe: vec![0.0; len],
                    ene: vec![0.0; len],
                })
                .collect(),
        }
    }

    /// Routes a signed allocation to EPE or ENE by the sign of the netting set exposure.
    #[inline]
    pub(crate) fn record(&mut self, position: usize, date: usize, sample: usize, exposure: f64, allocation: f64) {
        let (slot, weight) = if self.slots == 1 && self.samples > 1 {
            (date, 1.0 / self.samples as f64)
        } else {
            (date * self.slots + sample.min(self.slots - 1), 1.0)
        };
        let trade = &mut self.trades[position];
        if exposure > 0.0 {
            trade.epe[slot] += allocation * weight;
        } else {
            trade.ene[slot] -= allocation * weight;
        }
    }

    pub(crate) fn into_allocations(self) -> Vec<TradeAllocation> {
        self.trades
    }
}
