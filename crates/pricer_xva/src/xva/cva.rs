//! Credit Valuation Adjustment (CVA) calculation.
//!
//! CVA represents the expected loss due to counterparty default.
//!
//! # Formula
//!
//! CVA = LGD × ∫₀ᵀ EPE(t) × dPD(t)
//!
//! Where:
//! - LGD = Loss Given Default
//! - EPE(t) = Expected Positive Exposure at time t
//! - dPD(t) = Marginal default probability

use crate::portfolio::CreditParams;

/// Computes unilateral CVA from an EPE profile.
///
/// Uses trapezoidal integration over the time grid. `epe` and `time_grid`
/// must have the same length, index 0 being today.
///
/// # Examples
///
/// ```
/// use pricer_xva::xva::compute_cva;
/// use pricer_xva::portfolio::CreditParams;
///
/// let epe = vec![0.0, 100.0, 150.0, 100.0, 50.0];
/// let time_grid = vec![0.0, 0.25, 0.5, 0.75, 1.0];
/// let credit = CreditParams::new(0.02, 0.4).unwrap();
///
/// let cva = compute_cva(&epe, &time_grid, &credit);
/// assert!(cva > 0.0);
/// ```
pub fn compute_cva(epe: &[f64], time_grid: &[f64], credit_params: &CreditParams) -> f64 {
    integrate_default_loss(epe, time_grid, credit_params)
}

/// `LGD × Σ ½(x_i + x_{i+1}) × PD(t_i, t_{i+1})`, floored at zero.
pub(crate) fn integrate_default_loss(profile: &[f64], time_grid: &[f64], credit: &CreditParams) -> f64 {
    if time_grid.len() < 2 || profile.len() != time_grid.len() {
        return 0.0;
    }
    let loss: f64 = time_grid
        .windows(2)
        .zip(profile.windows(2))
        .map(|(t, x)| 0.5 * (x[0] + x[1]) * credit.marginal_default_prob(t[0], t[1]))
        .sum();
    (credit.lgd() * loss).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cva_constant_exposure() {
        let epe = vec![100.0; 5];
        let time_grid = vec![0.0, 0.25, 0.5, 0.75, 1.0];
        let credit = CreditParams::new(0.02, 0.4).unwrap();

        // Constant EPE: LGD * EPE * PD(0, T)
        let expected = 0.4 * 100.0 * (1.0 - (-0.02_f64).exp());
        assert_relative_eq!(compute_cva(&epe, &time_grid, &credit), expected, epsilon = 1e-10);
    }

    #[test]
    fn test_cva_zero_cases() {
        let credit = CreditParams::new(0.02, 0.4).unwrap();
        assert_eq!(compute_cva(&[0.0; 3], &[0.0, 0.5, 1.0], &credit), 0.0);
        assert_eq!(compute_cva(&[1.0, 2.0], &[0.0, 0.5, 1.0], &credit), 0.0);
        assert_eq!(compute_cva(&[1.0], &[0.0], &credit), 0.0);

        let no_default = CreditParams::new(0.0, 0.4).unwrap();
        assert_eq!(compute_cva(&[5.0; 3], &[0.0, 0.5, 1.0], &no_default), 0.0);
    }
}
