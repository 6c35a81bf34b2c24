//! Debit Valuation Adjustment (DVA) calculation.
//!
//! DVA = LGD_own × ∫₀ᵀ ENE(t) × dPD_own(t)

use super::cva::integrate_default_loss;
use crate::portfolio::CreditParams;

/// Computes DVA from an ENE profile and own credit.
///
/// ```
/// use pricer_xva::xva::compute_dva;
/// use pricer_xva::portfolio::CreditParams;
///
/// let ene = vec![0.0, 50.0, 80.0, 60.0, 30.0];
/// let time_grid = vec![0.0, 0.25, 0.5, 0.75, 1.0];
/// let own_credit = CreditParams::new(0.03, 0.4).unwrap();
///
/// assert!(compute_dva(&ene, &time_grid, &own_credit) > 0.0);
/// ```
pub fn compute_dva(ene: &[f64], time_grid: &[f64], own_credit: &CreditParams) -> f64 {
    integrate_default_loss(ene, time_grid, own_credit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xva::compute_cva;

    #[test]
    fn test_dva_mirrors_cva() {
        let profile = vec![0.0, 10.0, 30.0];
        let times = vec![0.0, 1.0, 2.0];
        let credit = CreditParams::new(0.05, 0.6).unwrap();
        assert_eq!(
            compute_dva(&profile, &times, &credit),
            compute_cva(&profile, &times, &credit)
        );
    }
}
