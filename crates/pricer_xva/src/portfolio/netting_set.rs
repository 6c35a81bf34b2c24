//! Netting set structures with collateral agreements.
//!
//! A netting set groups trades whose values offset on default and may carry a
//! Credit Support Annex (CSA) governing variation and initial margin.

use std::fmt;

use pricer_core::types::Currency;
use serde::{Deserialize, Serialize};

use super::error::PortfolioError;
use super::ids::{NettingSetId, TradeId};

/// Direction in which initial margin is exchanged under a CSA.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InitialMarginType {
    /// Both parties post initial margin.
    #[default]
    Bilateral,
    /// We post initial margin but do not receive any.
    PostOnly,
    /// We receive initial margin but do not post any.
    CallOnly,
}

impl InitialMarginType {
    /// Type seen from the other side of the agreement.
    pub fn inverted(self) -> Self {
        match self {
            InitialMarginType::Bilateral => InitialMarginType::Bilateral,
            InitialMarginType::PostOnly => InitialMarginType::CallOnly,
            InitialMarginType::CallOnly => InitialMarginType::PostOnly,
        }
    }

    /// Whether held initial margin reduces positive exposure.
    #[inline]
    pub fn reduces_epe(self) -> bool {
        self != InitialMarginType::PostOnly
    }

    /// Whether posted initial margin reduces negative exposure.
    #[inline]
    pub fn reduces_ene(self) -> bool {
        self != InitialMarginType::CallOnly
    }
}

impl fmt::Display for InitialMarginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InitialMarginType::Bilateral => "Bilateral",
            InitialMarginType::PostOnly => "PostOnly",
            InitialMarginType::CallOnly => "CallOnly",
        };
        f.write_str(s)
    }
}

/// CSA terms for a netting set.
///
/// `index` names the overnight index used to compound collateral balances; an
/// empty name means no compounding. Spreads are in absolute rate units.
///
/// # Examples
///
/// ```
/// use pricer_core::types::Currency;
/// use pricer_xva::portfolio::{CsaDetails, InitialMarginType};
///
/// let csa = CsaDetails::new(Currency::EUR)
///     .with_index("EUR-EONIA")
///     .with_collateral_spreads(0.001, 0.002)
///     .with_thresholds(1_000_000.0, 0.0)
///     .with_initial_margin(InitialMarginType::CallOnly);
///
/// let flipped = csa.inverted();
/// assert_eq!(flipped.threshold_pay(), 1_000_000.0);
/// assert_eq!(flipped.initial_margin_type(), InitialMarginType::PostOnly);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CsaDetails {
    currency: Currency,
    index: String,
    collateral_spread_rcv: f64,
    collateral_spread_pay: f64,
    apply_initial_margin: bool,
    initial_margin_type: InitialMarginType,
    threshold_rcv: f64,
    threshold_pay: f64,
    mta_rcv: f64,
    mta_pay: f64,
    independent_amount_held: f64,
}

impl CsaDetails {
    /// Zero-threshold CSA in `currency` without compounding index or initial margin.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            index: String::new(),
            collateral_spread_rcv: 0.0,
            collateral_spread_pay: 0.0,
            apply_initial_margin: false,
            initial_margin_type: InitialMarginType::Bilateral,
            threshold_rcv: 0.0,
            threshold_pay: 0.0,
            mta_rcv: 0.0,
            mta_pay: 0.0,
            independent_amount_held: 0.0,
        }
    }

    /// Sets the compounding index name.
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = index.into();
        self
    }

    /// Sets the collateral spreads on received and posted balances.
    pub fn with_collateral_spreads(mut self, rcv: f64, pay: f64) -> Self {
        self.collateral_spread_rcv = rcv;
        self.collateral_spread_pay = pay;
        self
    }

    /// Enables initial margin of the given type.
    pub fn with_initial_margin(mut self, im_type: InitialMarginType) -> Self {
        self.apply_initial_margin = true;
        self.initial_margin_type = im_type;
        self
    }

    /// Sets the thresholds for receiving and posting variation margin.
    pub fn with_thresholds(mut self, rcv: f64, pay: f64) -> Self {
        self.threshold_rcv = rcv;
        self.threshold_pay = pay;
        self
    }

    /// Sets the minimum transfer amounts.
    pub fn with_minimum_transfer_amounts(mut self, rcv: f64, pay: f64) -> Self {
        self.mta_rcv = rcv;
        self.mta_pay = pay;
        self
    }

    /// Sets the independent amount held (negative when posted).
    pub fn with_independent_amount_held(mut self, iah: f64) -> Self {
        self.independent_amount_held = iah;
        self
    }

    /// Checks thresholds and minimum transfer amounts are non-negative and spreads finite.
    pub fn validate(&self, netting_set: &NettingSetId) -> Result<(), PortfolioError> {
        let invalid = |reason: &str| PortfolioError::InvalidCsa {
            netting_set: netting_set.to_string(),
            reason: reason.to_string(),
        };
        if !(self.threshold_rcv >= 0.0 && self.threshold_pay >= 0.0) {
            return Err(invalid("thresholds must be non-negative"));
        }
        if !(self.mta_rcv >= 0.0 && self.mta_pay >= 0.0) {
            return Err(invalid("minimum transfer amounts must be non-negative"));
        }
        if !(self.collateral_spread_rcv.is_finite() && self.collateral_spread_pay.is_finite()) {
            return Err(invalid("collateral spreads must be finite"));
        }
        if !self.independent_amount_held.is_finite() {
            return Err(invalid("independent amount must be finite"));
        }
        Ok(())
    }

    /// The same agreement seen from the counterparty's side.
    pub fn inverted(&self) -> Self {
        Self {
            currency: self.currency,
            index: self.index.clone(),
            collateral_spread_rcv: self.collateral_spread_pay,
            collateral_spread_pay: self.collateral_spread_rcv,
            apply_initial_margin: self.apply_initial_margin,
            initial_margin_type: self.initial_margin_type.inverted(),
            threshold_rcv: self.threshold_pay,
            threshold_pay: self.threshold_rcv,
            mta_rcv: self.mta_pay,
            mta_pay: self.mta_rcv,
            independent_amount_held: -self.independent_amount_held,
        }
    }

    /// CSA currency.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Compounding index name, empty when none.
    #[inline]
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Spread applied to received (positive) balances.
    #[inline]
    pub fn collateral_spread_rcv(&self) -> f64 {
        self.collateral_spread_rcv
    }

    /// Spread applied to posted (negative) balances.
    #[inline]
    pub fn collateral_spread_pay(&self) -> f64 {
        self.collateral_spread_pay
    }

    /// Whether the CSA calls for initial margin.
    #[inline]
    pub fn apply_initial_margin(&self) -> bool {
        self.apply_initial_margin
    }

    /// Initial margin direction.
    #[inline]
    pub fn initial_margin_type(&self) -> InitialMarginType {
        self.initial_margin_type
    }

    /// Threshold for receiving variation margin.
    #[inline]
    pub fn threshold_rcv(&self) -> f64 {
        self.threshold_rcv
    }

    /// Threshold for posting variation margin.
    #[inline]
    pub fn threshold_pay(&self) -> f64 {
        self.threshold_pay
    }

    /// Minimum transfer amount when receiving.
    #[inline]
    pub fn mta_rcv(&self) -> f64 {
        self.mta_rcv
    }

    /// Minimum transfer amount when posting.
    #[inline]
    pub fn mta_pay(&self) -> f64 {
        self.mta_pay
    }

    /// Independent amount held.
    #[inline]
    pub fn independent_amount_held(&self) -> f64 {
        self.independent_amount_held
    }
}

/// Netting set: a group of trades with an optional CSA.
///
/// Member trade ids are filled in by [`PortfolioBuilder`](super::PortfolioBuilder)
/// in portfolio (cube) order.
///
/// # Examples
///
/// ```
/// use pricer_core::types::Currency;
/// use pricer_xva::portfolio::{CsaDetails, NettingSet, NettingSetId};
///
/// let uncollateralised = NettingSet::new(NettingSetId::new("NS1"));
/// assert!(!uncollateralised.active_csa());
///
/// let collateralised = NettingSet::new(NettingSetId::new("NS2"))
///     .with_csa(CsaDetails::new(Currency::USD))
///     .unwrap();
/// assert!(collateralised.active_csa());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NettingSet {
    id: NettingSetId,
    active_csa: bool,
    csa: Option<CsaDetails>,
    trade_ids: Vec<TradeId>,
}

impl NettingSet {
    /// Creates a netting set without CSA.
    #[inline]
    pub fn new(id: NettingSetId) -> Self {
        Self {
            id,
            active_csa: false,
            csa: None,
            trade_ids: Vec::new(),
        }
    }

    /// Attaches a validated, active CSA.
    pub fn with_csa(mut self, csa: CsaDetails) -> Result<Self, PortfolioError> {
        csa.validate(&self.id)?;
        self.csa = Some(csa);
        self.active_csa = true;
        Ok(self)
    }

    /// Overrides the CSA activity flag, keeping any attached terms.
    pub fn with_active_csa(mut self, active: bool) -> Self {
        self.active_csa = active;
        self
    }

    /// Returns the netting set ID.
    #[inline]
    pub fn id(&self) -> &NettingSetId {
        &self.id
    }

    /// Whether the CSA is active.
    #[inline]
    pub fn active_csa(&self) -> bool {
        self.active_csa
    }

    /// CSA terms, if any.
    #[inline]
    pub fn csa(&self) -> Option<&CsaDetails> {
        self.csa.as_ref()
    }

    /// Member trade IDs in portfolio order.
    #[inline]
    pub fn trade_ids(&self) -> &[TradeId] {
        &self.trade_ids
    }

    /// Number of member trades.
    #[inline]
    pub fn trade_count(&self) -> usize {
        self.trade_ids.len()
    }

    pub(crate) fn push_trade(&mut self, trade_id: TradeId) {
        self.trade_ids.push(trade_id);
    }

    pub(crate) fn clear_trades(&mut self) {
        self.trade_ids.clear();
    }
}
