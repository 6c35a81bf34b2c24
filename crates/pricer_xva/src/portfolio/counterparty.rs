//! Counterparty structures with credit parameters.
//!
//! Flat hazard rate credit for the CVA/DVA summary.

use serde::{Deserialize, Serialize};

use super::error::PortfolioError;
use super::ids::CounterpartyId;

/// Credit parameters: flat hazard rate and Loss Given Default.
///
/// # Examples
///
/// ```
/// use pricer_xva::portfolio::CreditParams;
///
/// let params = CreditParams::new(0.02, 0.4).unwrap();
/// assert!((params.recovery_rate() - 0.6).abs() < 1e-12);
/// assert!(params.survival_prob(2.0) < params.survival_prob(1.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreditParams {
    hazard_rate: f64,
    lgd: f64,
}

impl CreditParams {
    /// Creates new credit parameters.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::InvalidCreditParams` if the hazard rate is
    /// negative or LGD lies outside [0, 1].
    pub fn new(hazard_rate: f64, lgd: f64) -> Result<Self, PortfolioError> {
        if !(hazard_rate >= 0.0) {
            return Err(PortfolioError::InvalidCreditParams(
                "Hazard rate must be non-negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&lgd) {
            return Err(PortfolioError::InvalidCreditParams(
                "LGD must be in range [0, 1]".to_string(),
            ));
        }
        Ok(Self { hazard_rate, lgd })
    }

    /// Returns the hazard rate.
    #[inline]
    pub fn hazard_rate(&self) -> f64 {
        self.hazard_rate
    }

    /// Returns the Loss Given Default.
    #[inline]
    pub fn lgd(&self) -> f64 {
        self.lgd
    }

    /// Returns the recovery rate (1 - LGD).
    #[inline]
    pub fn recovery_rate(&self) -> f64 {
        1.0 - self.lgd
    }

    /// Survival probability to time t, `exp(-λ t)`.
    #[inline]
    pub fn survival_prob(&self, t: f64) -> f64 {
        (-self.hazard_rate * t).exp()
    }

    /// Default probability between t1 and t2, `Q(t1) - Q(t2)`.
    #[inline]
    pub fn marginal_default_prob(&self, t1: f64, t2: f64) -> f64 {
        self.survival_prob(t1) - self.survival_prob(t2)
    }
}

/// Counterparty entity with credit parameters.
///
/// # Examples
///
/// ```
/// use pricer_xva::portfolio::{Counterparty, CounterpartyId, CreditParams};
///
/// let cp = Counterparty::new(CounterpartyId::new("CPTY_A"), CreditParams::new(0.02, 0.4).unwrap())
///     .with_name("Acme Corp");
/// assert_eq!(cp.name(), Some("Acme Corp"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Counterparty {
    id: CounterpartyId,
    name: Option<String>,
    credit_params: CreditParams,
}

impl Counterparty {
    /// Creates a new counterparty.
    #[inline]
    pub fn new(id: CounterpartyId, credit_params: CreditParams) -> Self {
        Self {
            id,
            name: None,
            credit_params,
        }
    }

    /// Sets the counterparty name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the counterparty ID.
    #[inline]
    pub fn id(&self) -> &CounterpartyId {
        &self.id
    }

    /// Returns the counterparty name if set.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the credit parameters.
    #[inline]
    pub fn credit_params(&self) -> &CreditParams {
        &self.credit_params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_invalid_credit_params() {
        assert!(CreditParams::new(-0.01, 0.4).is_err());
        assert!(CreditParams::new(0.01, 1.5).is_err());
        assert!(CreditParams::new(f64::NAN, 0.4).is_err());
    }

    #[test]
    fn test_marginal_default_prob_sums_to_default_prob() {
        let p = CreditParams::new(0.03, 0.6).unwrap();
        let total = p.marginal_default_prob(0.0, 0.5) + p.marginal_default_prob(0.5, 2.0);
        assert_relative_eq!(total, 1.0 - p.survival_prob(2.0), epsilon = 1e-14);
    }
}
