//! Stand-alone (uncollateralised, unnetted) trade exposure profiles.

use rayon::prelude::*;

use super::ExposureCalculator;
use crate::cube::NpvCube;
use crate::portfolio::TradeId;

/// EPE/ENE profile of a single trade, index 0 = today.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeExposure {
    /// Trade identifier.
    pub trade_id: TradeId,
    /// Expected positive exposure.
    pub epe: Vec<f64>,
    /// Expected negative exposure.
    pub ene: Vec<f64>,
}

/// Profiles for every trade of the cube, in cube order.
///
/// `sign` is `-1.0` under the flipped view.
pub fn trade_exposures(cube: &dyn NpvCube, trade_ids: &[TradeId], sign: f64) -> Vec<TradeExposure> {
    let dates = cube.dates().len();
    let samples = cube.samples();
    trade_ids
        .par_iter()
        .enumerate()
        .map(|(i, trade_id)| {
            let npv0 = sign * cube.get_t0(i);
            let mut epe = Vec::with_capacity(dates + 1);
            let mut ene = Vec::with_capacity(dates + 1);
            epe.push(npv0.max(0.0));
            ene.push((-npv0).max(0.0));
            let mut values = vec![0.0; samples];
            for j in 0..dates {
                for (k, v) in values.iter_mut().enumerate() {
                    *v = sign * cube.get(i, j, k);
                }
                epe.push(ExposureCalculator::expected_positive_exposure(&values));
                ene.push(ExposureCalculator::expected_negative_exposure(&values));
            }
            TradeExposure {
                trade_id: trade_id.clone(),
                epe,
                ene,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::InMemoryCube;
    use pricer_core::types::Date;

    #[test]
    fn test_profiles_and_flip() {
        let as_of = Date::from_ymd(2024, 1, 2).unwrap();
        let cube = InMemoryCube::from_values(
            as_of,
            vec![Date::from_ymd(2025, 1, 2).unwrap()],
            vec![5.0],
            &[vec![vec![10.0, -4.0]]],
        )
        .unwrap();
        let ids = [TradeId::new("T1")];

        let plain = trade_exposures(&cube, &ids, 1.0);
        assert_eq!(plain[0].epe, vec![5.0, 5.0]);
        assert_eq!(plain[0].ene, vec![0.0, 2.0]);

        let flipped = trade_exposures(&cube, &ids, -1.0);
        assert_eq!(flipped[0].epe, vec![0.0, 2.0]);
        assert_eq!(flipped[0].ene, vec![5.0, 5.0]);
    }
}
