//! Marshals today's market and scenario slices for the collateral provider.

use pricer_core::types::{BusinessDayConvention, Currency, Date};
use tracing::debug;

use super::{
    CollateralCalculationType, CollateralPathInputs, CollateralPathProvider, CollateralPaths,
};
use crate::error::ExposureError;
use crate::market::{Market, ScenarioData, ScenarioDataKind};
use crate::portfolio::{CsaDetails, NettingSetId};

/// Builds collateral provider inputs from shared, read-only run inputs.
///
/// Holds no state between calls; the same request always yields the same
/// provider inputs.
pub struct CollateralPathAdapter<'a> {
    market: &'a dyn Market,
    scenario: &'a dyn ScenarioData,
    provider: &'a dyn CollateralPathProvider,
    base_currency: Currency,
    configuration: &'a str,
    calculation_type: CollateralCalculationType,
}

impl<'a> CollateralPathAdapter<'a> {
    /// Creates an adapter.
    pub fn new(
        market: &'a dyn Market,
        scenario: &'a dyn ScenarioData,
        provider: &'a dyn CollateralPathProvider,
        base_currency: Currency,
        configuration: &'a str,
        calculation_type: CollateralCalculationType,
    ) -> Self {
        Self {
            market,
            scenario,
            provider,
            base_currency,
            configuration,
            calculation_type,
        }
    }

    /// Collateral paths for a netting set, `None` when it has no active CSA.
    ///
    /// `values` is the netting set's `[date][sample]` value matrix in base
    /// currency, `dates` the simulation grid.
    ///
    /// # Errors
    ///
    /// - `MissingMarketData` if today's FX rate or index fixing is unavailable
    /// - `MissingScenarioData` if the CSA currency or index has no scenario series
    /// - `CollateralPathCount` if the provider returns the wrong number of paths
    #[allow(clippy::too_many_arguments)]
    pub fn collateral_paths(
        &self,
        netting_set: &NettingSetId,
        csa: Option<&CsaDetails>,
        dates: &[Date],
        samples: usize,
        value_today: f64,
        values: &[Vec<f64>],
        initial_balance: f64,
    ) -> Result<CollateralPaths, ExposureError> {
        let Some(csa) = csa else {
            return Ok(None);
        };
        let csa_currency = csa.currency();
        let foreign = csa_currency != self.base_currency;

        let fx_today = if foreign {
            self.market
                .fx_rate(&csa_currency.pair_code(self.base_currency), self.configuration)?
        } else {
            1.0
        };
        let rate_today = self.rate_today(csa.index())?;
        debug!(
            netting_set = %netting_set,
            csa_currency = %csa_currency,
            fx_today,
            rate_today,
            "CSA rates today"
        );

        if foreign && !self.scenario.has(ScenarioDataKind::FxSpot, csa_currency.code()) {
            return Err(ExposureError::MissingScenarioData {
                kind: ScenarioDataKind::FxSpot,
                key: csa_currency.code().to_string(),
            });
        }
        if !csa.index().is_empty() && !self.scenario.has(ScenarioDataKind::IndexFixing, csa.index()) {
            return Err(ExposureError::MissingScenarioData {
                kind: ScenarioDataKind::IndexFixing,
                key: csa.index().to_string(),
            });
        }

        if !self.scenario.has(ScenarioDataKind::Numeraire, "") {
            return Err(ExposureError::MissingScenarioData {
                kind: ScenarioDataKind::Numeraire,
                key: String::new(),
            });
        }

        let mut fx = vec![vec![1.0; samples]; dates.len()];
        let mut rates = vec![vec![0.0; samples]; dates.len()];
        for j in 0..dates.len() {
            for k in 0..samples {
                if foreign {
                    fx[j][k] = self
                        .scenario
                        .get(j, k, ScenarioDataKind::FxSpot, csa_currency.code())
                        .map_err(|e| e.at(netting_set, j, k))?;
                }
                if !csa.index().is_empty() {
                    rates[j][k] = self
                        .scenario
                        .get(j, k, ScenarioDataKind::IndexFixing, csa.index())
                        .map_err(|e| e.at(netting_set, j, k))?;
                }
            }
        }

        let inputs = CollateralPathInputs {
            netting_set,
            csa,
            as_of: self.market.as_of_date(),
            dates,
            samples,
            value_today,
            values,
            initial_balance,
            calculation_type: self.calculation_type,
            fx_today,
            rate_today,
            fx: &fx,
            rates: &rates,
        };
        let paths = self.provider.collateral_paths(&inputs)?;
        if let Some(paths) = &paths {
            if paths.len() != samples {
                return Err(ExposureError::CollateralPathCount {
                    netting_set: netting_set.to_string(),
                    expected: samples,
                    actual: paths.len(),
                });
            }
        }
        debug!(netting_set = %netting_set, "collateral paths built");
        Ok(paths)
    }

    /// Today's CSA index fixing, rolled back to the preceding fixing date.
    fn rate_today(&self, index_name: &str) -> Result<f64, ExposureError> {
        if index_name.is_empty() {
            return Ok(0.0);
        }
        let index = self.market.ibor_index(index_name, self.configuration)?;
        let today = self.market.as_of_date();
        let fixing_date = if index.is_valid_fixing_date(today) {
            today
        } else {
            index
                .fixing_calendar()
                .adjust(today, BusinessDayConvention::Preceding)
        };
        Ok(index.fixing(fixing_date)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collateral::VariationMarginReplay;
    use crate::market::{IborIndex, InMemoryScenarioData, SimpleMarket};
    use pricer_core::market_data::MarketDataError;
    use pricer_core::types::{Calendar, DayCountConvention};
    use std::sync::Mutex;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    // Saturday
    fn today() -> Date {
        d(2024, 6, 15)
    }

    fn market() -> SimpleMarket {
        SimpleMarket::new(today())
            .with_fx_spot("USDEUR", 0.9)
            .with_index(
                IborIndex::new("USD-SOFR", Calendar::weekends_only(), DayCountConvention::ActualActual360)
                    .with_fixing(d(2024, 6, 14), 0.053),
            )
    }

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<(f64, f64, f64, Vec<Vec<f64>>, Vec<Vec<f64>>)>>,
    }

    impl CollateralPathProvider for Recorder {
        fn collateral_paths(
            &self,
            inputs: &CollateralPathInputs<'_>,
        ) -> Result<CollateralPaths, ExposureError> {
            self.seen.lock().unwrap().push((
                inputs.fx_today,
                inputs.rate_today,
                inputs.initial_balance,
                inputs.fx.to_vec(),
                inputs.rates.to_vec(),
            ));
            Ok(Some(Vec::new()))
        }
    }

    fn scenario() -> InMemoryScenarioData {
        let mut data = InMemoryScenarioData::new(1, 2);
        data.set(0, 0, ScenarioDataKind::FxSpot, "USD", 0.8).unwrap();
        data.set(0, 1, ScenarioDataKind::FxSpot, "USD", 1.0).unwrap();
        data.set_series(ScenarioDataKind::IndexFixing, "USD-SOFR", 0.05);
        data.set_series(ScenarioDataKind::Numeraire, "", 1.0);
        data
    }

    #[test]
    fn test_inputs_marshalled_with_preceding_fixing() {
        let market = market();
        let scenario = scenario();
        let recorder = Recorder::default();
        let adapter = CollateralPathAdapter::new(
            &market,
            &scenario,
            &recorder,
            Currency::EUR,
            "default",
            CollateralCalculationType::Symmetric,
        );
        let csa = CsaDetails::new(Currency::USD).with_index("USD-SOFR");
        let values = vec![vec![1.0, 2.0]];
        let result = adapter.collateral_paths(
            &NettingSetId::new("NS1"),
            Some(&csa),
            &[d(2024, 7, 15)],
            2,
            0.0,
            &values,
            5.0,
        );
        // Recorder returns zero paths for two samples.
        assert!(matches!(
            result,
            Err(ExposureError::CollateralPathCount { expected: 2, actual: 0, .. })
        ));
        let seen = recorder.seen.lock().unwrap();
        let (fx_today, rate_today, initial, fx, rates) = &seen[0];
        assert_eq!(*fx_today, 0.9);
        assert_eq!(*rate_today, 0.053);
        assert_eq!(*initial, 5.0);
        assert_eq!(fx, &vec![vec![0.8, 1.0]]);
        assert_eq!(rates, &vec![vec![0.05, 0.05]]);
    }

    #[test]
    fn test_no_csa_means_no_paths() {
        let market = market();
        let scenario = scenario();
        let provider = VariationMarginReplay::new(0);
        let adapter = CollateralPathAdapter::new(
            &market,
            &scenario,
            &provider,
            Currency::EUR,
            "default",
            CollateralCalculationType::Symmetric,
        );
        let paths = adapter
            .collateral_paths(&NettingSetId::new("NS1"), None, &[d(2024, 7, 15)], 2, 0.0, &[vec![0.0, 0.0]], 0.0)
            .unwrap();
        assert!(paths.is_none());
    }

    #[test]
    fn test_missing_series_is_error() {
        let market = market();
        let scenario = InMemoryScenarioData::new(1, 1);
        let provider = VariationMarginReplay::new(0);
        let adapter = CollateralPathAdapter::new(
            &market,
            &scenario,
            &provider,
            Currency::EUR,
            "default",
            CollateralCalculationType::Symmetric,
        );
        let values = vec![vec![0.0]];
        let ns = NettingSetId::new("NS1");
        let dates = [d(2024, 7, 15)];

        let usd = CsaDetails::new(Currency::USD);
        let err = adapter
            .collateral_paths(&ns, Some(&usd), &dates, 1, 0.0, &values, 0.0)
            .err().unwrap();
        assert!(matches!(
            err,
            ExposureError::MissingScenarioData { kind: ScenarioDataKind::FxSpot, .. }
        ));

        let eur = CsaDetails::new(Currency::EUR).with_index("USD-SOFR");
        let err = adapter
            .collateral_paths(&ns, Some(&eur), &dates, 1, 0.0, &values, 0.0)
            .err().unwrap();
        assert!(matches!(
            err,
            ExposureError::MissingScenarioData { kind: ScenarioDataKind::IndexFixing, .. }
        ));

        let err = adapter
            .collateral_paths(&ns, Some(&CsaDetails::new(Currency::EUR)), &dates, 1, 0.0, &values, 0.0)
            .err().unwrap();
        assert!(matches!(
            err,
            ExposureError::MissingScenarioData { kind: ScenarioDataKind::Numeraire, .. }
        ));

        let unknown = CsaDetails::new(Currency::EUR).with_index("EUR-ESTR");
        let err = adapter
            .collateral_paths(&ns, Some(&unknown), &dates, 1, 0.0, &values, 0.0)
            .err().unwrap();
        assert!(matches!(
            err,
            ExposureError::MissingMarketData(MarketDataError::UnknownIndex(_))
        ));
    }

    #[test]
    fn test_repeated_calls_give_identical_paths() {
        let market = market();
        let mut scenario = InMemoryScenarioData::new(2, 2);
        scenario.set_series(ScenarioDataKind::FxSpot, "USD", 0.9);
        scenario.set_series(ScenarioDataKind::Numeraire, "", 1.0);
        let provider = VariationMarginReplay::new(1);
        let adapter = CollateralPathAdapter::new(
            &market,
            &scenario,
            &provider,
            Currency::EUR,
            "default",
            CollateralCalculationType::Symmetric,
        );
        let csa = CsaDetails::new(Currency::USD).with_thresholds(1.0, 0.5);
        let dates = [d(2024, 7, 15), d(2024, 8, 15)];
        let values = vec![vec![3.0, -2.0], vec![7.0, 0.25]];
        let ns = NettingSetId::new("NS1");
        let build = || {
            adapter
                .collateral_paths(&ns, Some(&csa), &dates, 2, 1.5, &values, 0.0)
                .unwrap()
                .unwrap()
        };
        let first = build();
        let second = build();
        for (a, b) in first.iter().zip(&second) {
            for date in [today(), dates[0], d(2024, 8, 1), dates[1], d(2025, 1, 1)] {
                assert_eq!(a.balance(date), b.balance(date));
            }
        }
    }

    /// Declares every series but fails on one sample.
    struct GappyScenario;

    impl ScenarioData for GappyScenario {
        fn n_dates(&self) -> usize {
            2
        }

        fn n_samples(&self) -> usize {
            2
        }

        fn has(&self, _kind: ScenarioDataKind, _key: &str) -> bool {
            true
        }

        fn get(&self, date: usize, sample: usize, kind: ScenarioDataKind, key: &str) -> Result<f64, ExposureError> {
            if (date, sample) == (1, 0) {
                Err(ExposureError::MissingScenarioData {
                    kind,
                    key: key.to_string(),
                })
            } else {
                Ok(0.9)
            }
        }
    }

    #[test]
    fn test_lookup_failure_names_location() {
        let market = market();
        let provider = VariationMarginReplay::new(0);
        let adapter = CollateralPathAdapter::new(
            &market,
            &GappyScenario,
            &provider,
            Currency::EUR,
            "default",
            CollateralCalculationType::Symmetric,
        );
        let csa = CsaDetails::new(Currency::USD);
        let dates = [d(2024, 7, 15), d(2024, 8, 15)];
        let values = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let err = adapter
            .collateral_paths(&NettingSetId::new("NS7"), Some(&csa), &dates, 2, 0.0, &values, 0.0)
            .err().unwrap();
        match err {
            ExposureError::ScenarioLookup {
                netting_set,
                date_index,
                sample_index,
                source,
            } => {
                assert_eq!(netting_set, "NS7");
                assert_eq!((date_index, sample_index), (1, 0));
                assert!(matches!(
                    *source,
                    ExposureError::MissingScenarioData { kind: ScenarioDataKind::FxSpot, .. }
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
