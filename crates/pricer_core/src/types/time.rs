//! Time types and Day Count Conventions for financial calculations.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `DayCountConvention`: Industry-standard day count conventions
//! - `BusinessDayConvention`: Date roll rules used by [`Calendar`](super::Calendar)
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{Date, DayCountConvention};
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 7, 1).unwrap();
//!
//! // Calculate year fraction using ACT/ACT (ISDA)
//! let yf = DayCountConvention::ActualActualIsda.year_fraction_dates(start, end);
//! assert!((yf - 182.0 / 366.0).abs() < 1e-12);
//! ```

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 serialisation and standard date arithmetic.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
///
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let leap = Date::from_ymd(2024, 2, 29).unwrap();
    /// assert!(Date::from_ymd(2024, 2, 30).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the day of the week.
    #[inline]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Returns `true` for Saturdays and Sundays.
    #[inline]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Shifts the date by a signed number of calendar days.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let d = Date::from_ymd(2024, 2, 28).unwrap();
    /// assert_eq!(d.add_days(2), Date::from_ymd(2024, 3, 1).unwrap());
    /// assert_eq!(d.add_days(-28), Date::from_ymd(2024, 1, 31).unwrap());
    /// ```
    pub fn add_days(self, days: i64) -> Self {
        Date(self.0 + Duration::days(days))
    }

    /// Shifts the date forward by whole months, clamping to the month end.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let d = Date::from_ymd(2024, 1, 31).unwrap();
    /// assert_eq!(d.add_months(1), Date::from_ymd(2024, 2, 29).unwrap());
    /// ```
    pub fn add_months(self, months: u32) -> Self {
        Date(
            self.0
                .checked_add_months(Months::new(months))
                .unwrap_or(NaiveDate::MAX),
        )
    }

    /// Shifts the date forward by whole years (29 February rolls to 28 February).
    pub fn add_years(self, years: u32) -> Self {
        self.add_months(12 * years)
    }

    /// Previous calendar day.
    #[inline]
    pub fn pred(self) -> Self {
        self.add_days(-1)
    }

    /// Next calendar day.
    #[inline]
    pub fn succ(self) -> Self {
        self.add_days(1)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Day Count Convention (year fraction convention).
///
/// # Variants
/// - `ActualActual365`: Actual days / 365
/// - `ActualActual360`: Actual days / 360
/// - `Thirty360`: 30/360 US bond basis
/// - `ActualActualIsda`: Actual/Actual (ISDA), days in each calendar year divided
///   by that year's length
///
/// # Usage
///
/// ```
/// use pricer_core::types::time::{Date, DayCountConvention};
///
/// let start = Date::from_ymd(2023, 7, 1).unwrap();
/// let end = Date::from_ymd(2024, 7, 1).unwrap();
///
/// // 184 days in 2023 (365) + 182 days in 2024 (366)
/// let yf = DayCountConvention::ActualActualIsda.year_fraction_dates(start, end);
/// assert!((yf - (184.0 / 365.0 + 182.0 / 366.0)).abs() < 1e-12);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayCountConvention {
    /// Actual/365 Fixed: actual_days / 365.0
    ActualActual365,

    /// Actual/360: actual_days / 360.0
    ///
    /// Used for most overnight and money market indices.
    ActualActual360,

    /// 30/360 US Bond Basis
    Thirty360,

    /// Actual/Actual (ISDA)
    ///
    /// Splits the period at calendar year boundaries and divides the days in
    /// each piece by 365 or 366. This is the convention used for the exposure
    /// time grid.
    ActualActualIsda,
}

impl DayCountConvention {
    /// Returns the standard convention name.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::DayCountConvention;
    ///
    /// assert_eq!(DayCountConvention::ActualActual365.name(), "ACT/365");
    /// assert_eq!(DayCountConvention::ActualActualIsda.name(), "ACT/ACT (ISDA)");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::ActualActual365 => "ACT/365",
            DayCountConvention::ActualActual360 => "ACT/360",
            DayCountConvention::Thirty360 => "30/360",
            DayCountConvention::ActualActualIsda => "ACT/ACT (ISDA)",
        }
    }

    /// Calculates year fraction between two dates.
    ///
    /// Returns a negative value when `start > end` instead of panicking; the
    /// sign indicates direction.
    pub fn year_fraction_dates(&self, start: Date, end: Date) -> f64 {
        if start > end {
            return -self.year_fraction_dates(end, start);
        }
        let days = end - start;

        match self {
            DayCountConvention::ActualActual365 => days as f64 / 365.0,
            DayCountConvention::ActualActual360 => days as f64 / 360.0,
            DayCountConvention::Thirty360 => thirty_360(start.0, end.0),
            DayCountConvention::ActualActualIsda => actual_actual_isda(start.0, end.0),
        }
    }
}

fn thirty_360(start: NaiveDate, end: NaiveDate) -> f64 {
    let d1 = start.day();
    let d2 = end.day();

    let d1_adj = if d1 == 31 { 30 } else { d1 };
    let d2_adj = if d2 == 31 && d1_adj == 30 { 30 } else { d2 };

    let days = 360 * (end.year() - start.year())
        + 30 * (end.month() as i32 - start.month() as i32)
        + (d2_adj as i32 - d1_adj as i32);
    days as f64 / 360.0
}

fn days_in_year(year: i32) -> f64 {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366.0
    } else {
        365.0
    }
}

fn actual_actual_isda(start: NaiveDate, end: NaiveDate) -> f64 {
    let (y1, y2) = (start.year(), end.year());
    if y1 == y2 {
        return (end - start).num_days() as f64 / days_in_year(y1);
    }
    // Both boundaries exist for any year chrono can represent.
    let first_boundary = NaiveDate::from_ymd_opt(y1 + 1, 1, 1).unwrap_or(NaiveDate::MAX);
    let last_boundary = NaiveDate::from_ymd_opt(y2, 1, 1).unwrap_or(NaiveDate::MIN);

    (first_boundary - start).num_days() as f64 / days_in_year(y1)
        + (y2 - y1 - 1) as f64
        + (end - last_boundary).num_days() as f64 / days_in_year(y2)
}

impl FromStr for DayCountConvention {
    type Err = String;

    /// Parses day count convention from string (case-insensitive).
    ///
    /// Supports multiple aliases for each convention:
    /// - ACT/365: "ACT/365", "Actual/365", "A365"
    /// - ACT/360: "ACT/360", "Actual/360", "A360"
    /// - 30/360: "30/360", "Thirty360"
    /// - ACT/ACT (ISDA): "ACT/ACT", "ActualActual", "ACT/ACT (ISDA)"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s
            .to_uppercase()
            .replace(['/', ' ', '(', ')'], "")
            .as_str()
        {
            "ACT365" | "ACTUAL365" | "A365" => Ok(DayCountConvention::ActualActual365),
            "ACT360" | "ACTUAL360" | "A360" => Ok(DayCountConvention::ActualActual360),
            "30360" | "THIRTY360" => Ok(DayCountConvention::Thirty360),
            "ACTACT" | "ACTUALACTUAL" | "ACTACTISDA" | "ACTUALACTUALISDA" => {
                Ok(DayCountConvention::ActualActualIsda)
            }
            _ => Err(format!("Unknown day count convention: {}", s)),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::DayCountConvention;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for DayCountConvention {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for DayCountConvention {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            DayCountConvention::from_str(&s).map_err(de::Error::custom)
        }
    }
}

/// Business Day Convention for date adjustments.
///
/// Defines how to adjust dates that fall on non-business days (weekends, holidays).
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::BusinessDayConvention;
///
/// let conv = BusinessDayConvention::ModifiedFollowing;
/// assert_eq!(conv.name(), "Modified Following");
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessDayConvention {
    /// Move to the next business day.
    Following,

    /// Move to the next business day, unless it crosses a month boundary.
    ModifiedFollowing,

    /// Move to the previous business day.
    Preceding,

    /// Move to the previous business day, unless it crosses a month boundary.
    ModifiedPreceding,

    /// Do not adjust the date.
    Unadjusted,
}

impl BusinessDayConvention {
    /// Returns the standard name for this convention.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::Unadjusted => "Unadjusted",
        }
    }
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BusinessDayConvention {
    type Err = String;

    /// Parses business day convention from string (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "following" | "f" => Ok(BusinessDayConvention::Following),
            "modifiedfollowing" | "mf" => Ok(BusinessDayConvention::ModifiedFollowing),
            "preceding" | "p" => Ok(BusinessDayConvention::Preceding),
            "modifiedpreceding" | "mp" => Ok(BusinessDayConvention::ModifiedPreceding),
            "unadjusted" | "u" | "none" => Ok(BusinessDayConvention::Unadjusted),
            _ => Err(format!("Unknown business day convention: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_date_display_and_parse() {
        let date = d(2024, 6, 5);
        assert_eq!(format!("{}", date), "2024-06-05");
        assert_eq!("2024-06-05".parse::<Date>().unwrap(), date);
        assert!(Date::parse("2024-13-01").is_err());
    }

    #[test]
    fn test_date_arithmetic() {
        let date = d(2024, 2, 29);
        assert_eq!(date.add_years(1), d(2025, 2, 28));
        assert_eq!(date.add_days(1), d(2024, 3, 1));
        assert_eq!(date.succ().pred(), date);
        assert_eq!(d(2024, 3, 1) - d(2024, 2, 1), 29);
    }

    #[test]
    fn test_weekend() {
        assert!(d(2024, 6, 15).is_weekend()); // Saturday
        assert!(!d(2024, 6, 17).is_weekend()); // Monday
    }

    #[test]
    fn test_act_act_isda_same_year() {
        let yf = DayCountConvention::ActualActualIsda.year_fraction_dates(d(2023, 1, 1), d(2023, 7, 2));
        assert_relative_eq!(yf, 182.0 / 365.0, epsilon = 1e-14);
    }

    #[test]
    fn test_act_act_isda_across_years() {
        let yf =
            DayCountConvention::ActualActualIsda.year_fraction_dates(d(2022, 11, 1), d(2024, 3, 1));
        let expected = 61.0 / 365.0 + 1.0 + 60.0 / 366.0;
        assert_relative_eq!(yf, expected, epsilon = 1e-14);
    }

    #[test]
    fn test_act_act_isda_full_year_is_one() {
        let yf = DayCountConvention::ActualActualIsda.year_fraction_dates(d(2024, 1, 1), d(2025, 1, 1));
        assert_relative_eq!(yf, 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_year_fraction_reversed_is_negative() {
        for dc in [
            DayCountConvention::ActualActual365,
            DayCountConvention::ActualActual360,
            DayCountConvention::Thirty360,
            DayCountConvention::ActualActualIsda,
        ] {
            let fwd = dc.year_fraction_dates(d(2024, 1, 15), d(2025, 6, 30));
            let bwd = dc.year_fraction_dates(d(2025, 6, 30), d(2024, 1, 15));
            assert_relative_eq!(fwd, -bwd, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_thirty_360() {
        let yf = DayCountConvention::Thirty360.year_fraction_dates(d(2024, 1, 31), d(2024, 7, 31));
        assert_relative_eq!(yf, 0.5, epsilon = 1e-14);
    }

    #[test]
    fn test_day_count_from_str() {
        assert_eq!(
            "ACT/ACT (ISDA)".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::ActualActualIsda
        );
        assert_eq!(
            "a360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::ActualActual360
        );
        assert!("bogus".parse::<DayCountConvention>().is_err());
    }

    #[test]
    fn test_bdc_from_str() {
        assert_eq!(
            "Preceding".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::Preceding
        );
        assert_eq!(
            "mf".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedFollowing
        );
    }
}
