//! Time-weighted exposure over the first year.

use pricer_core::types::{BusinessDayConvention, Calendar, Date};

/// End of the regulatory window: one year and four days after `as_of`,
/// rolled forward on a weekends-only calendar, capped at `maturity`.
///
/// ```
/// use pricer_core::types::Date;
/// use pricer_xva::exposure::regulatory_window_end;
///
/// let as_of = Date::from_ymd(2024, 1, 2).unwrap();
/// let far = Date::from_ymd(2030, 1, 1).unwrap();
/// // 2025-01-06 is a Monday.
/// assert_eq!(regulatory_window_end(as_of, far), Date::from_ymd(2025, 1, 6).unwrap());
///
/// let near = Date::from_ymd(2024, 6, 28).unwrap();
/// assert_eq!(regulatory_window_end(as_of, near), near);
/// ```
pub fn regulatory_window_end(as_of: Date, maturity: Date) -> Date {
    let one_year = Calendar::weekends_only().adjust(
        as_of.add_years(1).add_days(4),
        BusinessDayConvention::Following,
    );
    one_year.min(maturity)
}

/// Weighted `(EPE, EEPE)` over grid points with time at or before `maturity_time`.
///
/// `times` are the simulation date times; `ee` and `eee` are indexed like
/// the exposure arrays (index 0 = today). The first weight is the first
/// grid time, later weights are the grid spacings, normalised to one.
/// Profile index `k` is paired with weight `k`.
///
/// # Examples
///
/// ```
/// use pricer_xva::exposure::time_weighted_exposures;
///
/// let times = [0.25, 0.5, 1.5];
/// let ee = [0.0, 10.0, 20.0, 30.0];
/// let eee = [0.0, 10.0, 20.0, 30.0];
/// // Weights over the first two points: [0.5, 0.5].
/// let (epe, eepe) = time_weighted_exposures(&times, &ee, &eee, 1.0);
/// assert_eq!(epe, 5.0);
/// assert_eq!(eepe, 5.0);
/// ```
pub fn time_weighted_exposures(
    times: &[f64],
    ee: &[f64],
    eee: &[f64],
    maturity_time: f64,
) -> (f64, f64) {
    let cutoff = times.iter().take_while(|&&t| t <= maturity_time).count();
    if cutoff == 0 {
        return (0.0, 0.0);
    }
    let mut weights: Vec<f64> = (0..cutoff)
        .map(|k| if k == 0 { times[0] } else { times[k] - times[k - 1] })
        .collect();
    let total: f64 = weights.iter().sum();
    if !(total > 0.0) {
        return (0.0, 0.0);
    }
    weights.iter_mut().for_each(|w| *w /= total);

    weights
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(epe, eepe), (k, &w)| {
            (
                epe + ee.get(k).copied().unwrap_or(0.0) * w,
                eepe + eee.get(k).copied().unwrap_or(0.0) * w,
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_weights_follow_grid_spacing() {
        let times = [0.1, 0.4, 1.0, 2.0];
        let ee = [1.0, 2.0, 3.0, 4.0, 5.0];
        let eee = [1.0, 2.0, 3.0, 4.0, 5.0];
        let (epe, _) = time_weighted_exposures(&times, &ee, &eee, 1.0);
        assert_relative_eq!(epe, 1.0 * 0.1 + 2.0 * 0.3 + 3.0 * 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_no_point_inside_window() {
        assert_eq!(time_weighted_exposures(&[2.0], &[1.0, 1.0], &[1.0, 1.0], 1.0), (0.0, 0.0));
        assert_eq!(time_weighted_exposures(&[], &[1.0], &[1.0], 1.0), (0.0, 0.0));
    }

    #[test]
    fn test_window_end_rolls_off_weekend() {
        // 2023-06-15 + 1Y + 4D = 2024-06-19 (Wednesday)
        let as_of = Date::from_ymd(2023, 6, 15).unwrap();
        let end = regulatory_window_end(as_of, Date::from_ymd(2040, 1, 1).unwrap());
        assert_eq!(end, Date::from_ymd(2024, 6, 19).unwrap());
        // 2023-06-13 + 1Y + 4D = 2024-06-17 (Monday)
        let as_of = Date::from_ymd(2023, 6, 13).unwrap();
        assert_eq!(
            regulatory_window_end(as_of, Date::from_ymd(2040, 1, 1).unwrap()),
            Date::from_ymd(2024, 6, 17).unwrap()
        );
        // 2023-06-11 + 1Y + 4D = 2024-06-15 (Saturday) -> Monday
        let as_of = Date::from_ymd(2023, 6, 11).unwrap();
        assert_eq!(
            regulatory_window_end(as_of, Date::from_ymd(2040, 1, 1).unwrap()),
            Date::from_ymd(2024, 6, 17).unwrap()
        );
    }
}
