//! Cash flows falling inside the margin period of risk.

use serde::{Deserialize, Serialize};

use crate::cube::NpvCube;

/// Which cash flows paid during the margin period of risk count as exposure.
///
/// With `BothPay` the cube already pays all flows out; the other modes add
/// back received flows, paid flows (signed negative) or both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MporCashFlowMode {
    /// Both parties keep paying; nothing is added back.
    #[default]
    BothPay,
    /// Neither party pays; both flows are added back.
    NonePay,
    /// Only we pay; flows due to us are added back.
    WePay,
    /// Only the counterparty pays; flows due from us are added back.
    TheyPay,
}

impl MporCashFlowMode {
    /// Adjustment as a function of `(received, paid)`, selected once per run.
    ///
    /// ```
    /// use pricer_xva::exposure::MporCashFlowMode;
    ///
    /// let (received, paid) = (3.0, -2.0);
    /// assert_eq!((MporCashFlowMode::BothPay.adjustment())(received, paid), 0.0);
    /// assert_eq!((MporCashFlowMode::NonePay.adjustment())(received, paid), 1.0);
    /// assert_eq!((MporCashFlowMode::WePay.adjustment())(received, paid), 3.0);
    /// assert_eq!((MporCashFlowMode::TheyPay.adjustment())(received, paid), -2.0);
    /// ```
    pub fn adjustment(self) -> fn(f64, f64) -> f64 {
        match self {
            MporCashFlowMode::BothPay => |_, _| 0.0,
            MporCashFlowMode::NonePay => |received, paid| received + paid,
            MporCashFlowMode::WePay => |received, _| received,
            MporCashFlowMode::TheyPay => |_, paid| paid,
        }
    }

    /// Whether flow cubes are needed.
    #[inline]
    pub fn needs_cash_flows(self) -> bool {
        self != MporCashFlowMode::BothPay
    }
}

/// Per-trade cash flows received (positive) and paid (negative) between
/// each simulation date and the end of its margin period of risk.
#[derive(Clone, Copy)]
pub struct MporCashFlows<'a> {
    /// Flows received, `[trade][date][sample]`.
    pub received: &'a dyn NpvCube,
    /// Flows paid, `[trade][date][sample]`.
    pub paid: &'a dyn NpvCube,
}

impl MporCashFlows<'_> {
    /// Flows `(received, paid)` of one trade at a date and sample.
    ///
    /// Under the flipped view our payments are the counterparty's receipts.
    #[inline]
    pub fn trade_flows(&self, trade: usize, date: usize, sample: usize, flip_view: bool) -> (f64, f64) {
        let received = self.received.get(trade, date, sample);
        let paid = self.paid.get(trade, date, sample);
        if flip_view {
            (-paid, -received)
        } else {
            (received, paid)
        }
    }

    /// Netting set totals `(received, paid)` for one date and sample.
    pub fn netting_set_flows(
        &self,
        trade_indices: &[usize],
        date: usize,
        sample: usize,
        flip_view: bool,
    ) -> (f64, f64) {
        trade_indices.iter().fold((0.0, 0.0), |(r, p), &i| {
            let (received, paid) = self.trade_flows(i, date, sample, flip_view);
            (r + received, p + paid)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::InMemoryCube;
    use pricer_core::types::Date;

    #[test]
    fn test_flows_sum_over_trades_and_flip() {
        let as_of = Date::from_ymd(2024, 1, 2).unwrap();
        let dates = vec![Date::from_ymd(2024, 7, 2).unwrap()];
        let received =
            InMemoryCube::from_values(as_of, dates.clone(), vec![0.0; 2], &[vec![vec![1.0]], vec![vec![2.0]]])
                .unwrap();
        let paid =
            InMemoryCube::from_values(as_of, dates, vec![0.0; 2], &[vec![vec![-0.5]], vec![vec![0.0]]])
                .unwrap();
        let flows = MporCashFlows {
            received: &received,
            paid: &paid,
        };
        assert_eq!(flows.netting_set_flows(&[0, 1], 0, 0, false), (3.0, -0.5));
        assert_eq!(flows.netting_set_flows(&[0, 1], 0, 0, true), (0.5, -3.0));
        assert_eq!(flows.netting_set_flows(&[1], 0, 0, false), (2.0, 0.0));
        assert_eq!(flows.trade_flows(0, 0, 0, true), (0.5, -1.0));
    }

    #[test]
    fn test_mode_from_toml_name() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: MporCashFlowMode,
        }
        let w: Wrapper = toml::from_str("mode = \"TheyPay\"").unwrap();
        assert_eq!(w.mode, MporCashFlowMode::TheyPay);
        assert!(!MporCashFlowMode::BothPay.needs_cash_flows());
    }
}
