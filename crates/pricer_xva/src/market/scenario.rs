//! Simulated market data per date and sample.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ExposureError;

/// Kind of scenario series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioDataKind {
    /// FX spot of a currency against the base currency.
    FxSpot,
    /// Fixing of an interest rate index.
    IndexFixing,
    /// Numeraire of the simulation model (empty key).
    Numeraire,
}

impl fmt::Display for ScenarioDataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScenarioDataKind::FxSpot => "FXSpot",
            ScenarioDataKind::IndexFixing => "IndexFixing",
            ScenarioDataKind::Numeraire => "Numeraire",
        };
        f.write_str(s)
    }
}

/// Read access to scenario series, keyed by `(kind, key)`.
pub trait ScenarioData: Sync {
    /// Number of simulation dates.
    fn n_dates(&self) -> usize;

    /// Number of samples.
    fn n_samples(&self) -> usize;

    /// Whether a series is available.
    fn has(&self, kind: ScenarioDataKind, key: &str) -> bool;

    /// Value of a series at a date and sample.
    fn get(
        &self,
        date: usize,
        sample: usize,
        kind: ScenarioDataKind,
        key: &str,
    ) -> Result<f64, ExposureError>;
}

/// Dense in-memory scenario store.
///
/// # Examples
///
/// ```
/// use pricer_xva::market::{InMemoryScenarioData, ScenarioData, ScenarioDataKind};
///
/// let mut data = InMemoryScenarioData::new(2, 3);
/// data.set_series(ScenarioDataKind::Numeraire, "", 1.0);
/// data.set(1, 2, ScenarioDataKind::FxSpot, "USD", 0.9).unwrap();
///
/// assert!(data.has(ScenarioDataKind::FxSpot, "USD"));
/// assert_eq!(data.get(1, 2, ScenarioDataKind::FxSpot, "USD").unwrap(), 0.9);
/// assert_eq!(data.get(0, 0, ScenarioDataKind::FxSpot, "USD").unwrap(), 0.0);
/// assert!(data.get(0, 0, ScenarioDataKind::IndexFixing, "EUR-EONIA").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryScenarioData {
    n_dates: usize,
    n_samples: usize,
    series: HashMap<(ScenarioDataKind, String), Vec<f64>>,
}

impl InMemoryScenarioData {
    /// Empty store with fixed dimensions.
    pub fn new(n_dates: usize, n_samples: usize) -> Self {
        Self {
            n_dates,
            n_samples,
            series: HashMap::new(),
        }
    }

    /// Fills a whole series with a constant.
    pub fn set_series(
        &mut self,
        kind: ScenarioDataKind,
        key: &str,
        value: f64,
    ) {
        let len = self.n_dates * self.n_samples;
        self.series.insert((kind, key.to_string()), vec![value; len]);
    }

    /// Sets one value, creating a zero series on first use.
    pub fn set(
        &mut self,
        date: usize,
        sample: usize,
        kind: ScenarioDataKind,
        key: &str,
        value: f64,
    ) -> Result<(), ExposureError> {
        let offset = self.offset(date, sample)?;
        let len = self.n_dates * self.n_samples;
        let series = self
            .series
            .entry((kind, key.to_string()))
            .or_insert_with(|| vec![0.0; len]);
        series[offset] = value;
        Ok(())
    }

    fn offset(&self, date: usize, sample: usize) -> Result<usize, ExposureError> {
        if date >= self.n_dates {
            return Err(ExposureError::dimension("scenario date index", self.n_dates, date));
        }
        if sample >= self.n_samples {
            return Err(ExposureError::dimension(
                "scenario sample index",
                self.n_samples,
                sample,
            ));
        }
        Ok(date * self.n_samples + sample)
    }
}

impl ScenarioData for InMemoryScenarioData {
    fn n_dates(&self) -> usize {
        self.n_dates
    }

    fn n_samples(&self) -> usize {
        self.n_samples
    }

    fn has(&self, kind: ScenarioDataKind, key: &str) -> bool {
        self.series.contains_key(&(kind, key.to_string()))
    }

    fn get(
        &self,
        date: usize,
        sample: usize,
        kind: ScenarioDataKind,
        key: &str,
    ) -> Result<f64, ExposureError> {
        let offset = self.offset(date, sample)?;
        self.series
            .get(&(kind, key.to_string()))
            .map(|values| values[offset])
            .ok_or_else(|| ExposureError::MissingScenarioData {
                kind,
                key: key.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_is_dimension_error() {
        let mut data = InMemoryScenarioData::new(1, 2);
        data.set_series(ScenarioDataKind::Numeraire, "", 1.0);
        assert!(matches!(
            data.get(0, 2, ScenarioDataKind::Numeraire, ""),
            Err(ExposureError::DimensionMismatch { .. })
        ));
        assert!(data.set(1, 0, ScenarioDataKind::Numeraire, "", 1.0).is_err());
    }

    #[test]
    fn test_kinds_are_distinct_keys() {
        let mut data = InMemoryScenarioData::new(1, 1);
        data.set_series(ScenarioDataKind::FxSpot, "USD", 1.1);
        assert!(!data.has(ScenarioDataKind::IndexFixing, "USD"));
        assert_eq!(ScenarioDataKind::IndexFixing.to_string(), "IndexFixing");
    }
}
