//! Interest rate index with fixing history.

use std::collections::BTreeMap;

use pricer_core::market_data::MarketDataError;
use pricer_core::types::{Calendar, Date, DayCountConvention};

/// Overnight or term index used to compound collateral balances.
///
/// # Examples
///
/// ```
/// use pricer_core::types::{Calendar, CalendarId, Date, DayCountConvention};
/// use pricer_xva::market::IborIndex;
///
/// let friday = Date::from_ymd(2024, 6, 14).unwrap();
/// let index = IborIndex::new("EUR-EONIA", Calendar::new(CalendarId::Target), DayCountConvention::ActualActual360)
///     .with_fixing(friday, 0.039);
/// assert_eq!(index.fixing(friday).unwrap(), 0.039);
/// assert!(!index.is_valid_fixing_date(friday.add_days(1)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IborIndex {
    name: String,
    fixing_calendar: Calendar,
    day_count: DayCountConvention,
    fixings: BTreeMap<Date, f64>,
}

impl IborIndex {
    /// Index without fixings.
    pub fn new(
        name: impl Into<String>,
        fixing_calendar: Calendar,
        day_count: DayCountConvention,
    ) -> Self {
        Self {
            name: name.into(),
            fixing_calendar,
            day_count,
            fixings: BTreeMap::new(),
        }
    }

    /// Adds a historical fixing.
    pub fn with_fixing(mut self, date: Date, value: f64) -> Self {
        self.fixings.insert(date, value);
        self
    }

    /// Index name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fixing calendar.
    #[inline]
    pub fn fixing_calendar(&self) -> &Calendar {
        &self.fixing_calendar
    }

    /// Accrual day count.
    #[inline]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Whether the index fixes on `date`.
    #[inline]
    pub fn is_valid_fixing_date(&self, date: Date) -> bool {
        self.fixing_calendar.is_business_day(date)
    }

    /// Stored fixing for `date`.
    pub fn fixing(&self, date: Date) -> Result<f64, MarketDataError> {
        self.fixings
            .get(&date)
            .copied()
            .ok_or_else(|| MarketDataError::MissingFixing {
                index: self.name.clone(),
                date,
            })
    }
}
