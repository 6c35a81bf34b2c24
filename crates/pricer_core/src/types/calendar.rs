//! Holiday calendars and business day adjustment.
//!
//! Financial-centre calendars are simplified to fixed-date holidays. Explicit
//! holiday lists can be added on top of any calendar, which is how index fixing
//! calendars are modelled.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::{BusinessDayConvention, Calendar, Date};
//!
//! let cal = Calendar::weekends_only();
//! let saturday = Date::from_ymd(2024, 6, 15).unwrap();
//! assert_eq!(
//!     cal.adjust(saturday, BusinessDayConvention::Preceding),
//!     Date::from_ymd(2024, 6, 14).unwrap()
//! );
//! ```

use std::collections::BTreeSet;
use std::fmt;

use super::time::{BusinessDayConvention, Date};

/// Calendar identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalendarId {
    /// Saturdays and Sundays only.
    WeekendsOnly,
    /// TARGET (simplified fixed-date holidays).
    Target,
    /// London (simplified fixed-date holidays).
    London,
    /// New York (simplified fixed-date holidays).
    NewYork,
}

impl fmt::Display for CalendarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalendarId::WeekendsOnly => "WeekendsOnly",
            CalendarId::Target => "TARGET",
            CalendarId::London => "London",
            CalendarId::NewYork => "NewYork",
        };
        f.write_str(name)
    }
}

/// Holiday calendar for business day calculations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    id: CalendarId,
    extra_holidays: BTreeSet<Date>,
}

impl Calendar {
    /// Calendar for the given identifier.
    pub fn new(id: CalendarId) -> Self {
        Self {
            id,
            extra_holidays: BTreeSet::new(),
        }
    }

    /// Calendar where only Saturdays and Sundays are holidays.
    pub fn weekends_only() -> Self {
        Self::new(CalendarId::WeekendsOnly)
    }

    /// Adds explicit holidays on top of the calendar's own rules.
    pub fn with_holidays<I: IntoIterator<Item = Date>>(mut self, holidays: I) -> Self {
        self.extra_holidays.extend(holidays);
        self
    }

    /// Calendar identifier.
    #[inline]
    pub fn id(&self) -> CalendarId {
        self.id
    }

    /// Returns `true` if `date` is neither a weekend nor a holiday.
    pub fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.is_holiday(date)
    }

    /// Returns `true` for holidays (weekends excluded).
    pub fn is_holiday(&self, date: Date) -> bool {
        if self.extra_holidays.contains(&date) {
            return true;
        }
        let md = (date.month(), date.day());
        match self.id {
            CalendarId::WeekendsOnly => false,
            CalendarId::Target => matches!(md, (1, 1) | (5, 1) | (12, 25) | (12, 26)),
            CalendarId::London => matches!(md, (1, 1) | (12, 25) | (12, 26)),
            CalendarId::NewYork => matches!(md, (1, 1) | (7, 4) | (12, 25)),
        }
    }

    /// First business day on or after `date`.
    pub fn next_business_day(&self, mut date: Date) -> Date {
        while !self.is_business_day(date) {
            date = date.succ();
        }
        date
    }

    /// Last business day on or before `date`.
    pub fn prev_business_day(&self, mut date: Date) -> Date {
        while !self.is_business_day(date) {
            date = date.pred();
        }
        date
    }

    /// Rolls `date` to a business day according to `convention`.
    pub fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        match convention {
            BusinessDayConvention::Unadjusted => date,
            BusinessDayConvention::Following => self.next_business_day(date),
            BusinessDayConvention::Preceding => self.prev_business_day(date),
            BusinessDayConvention::ModifiedFollowing => {
                let adjusted = self.next_business_day(date);
                if adjusted.month() != date.month() {
                    self.prev_business_day(date)
                } else {
                    adjusted
                }
            }
            BusinessDayConvention::ModifiedPreceding => {
                let adjusted = self.prev_business_day(date);
                if adjusted.month() != date.month() {
                    self.next_business_day(date)
                } else {
                    adjusted
                }
            }
        }
    }

    /// Moves `days` business days forward (or backward when negative).
    pub fn add_business_days(&self, mut date: Date, days: i32) -> Date {
        let step = if days >= 0 { 1 } else { -1 };
        let mut remaining = days.unsigned_abs();
        while remaining > 0 {
            date = date.add_days(step);
            if self.is_business_day(date) {
                remaining -= 1;
            }
        }
        date
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::weekends_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_weekend_not_business_day() {
        let cal = Calendar::weekends_only();
        assert!(!cal.is_business_day(d(2026, 1, 10)));
        assert!(cal.is_business_day(d(2026, 1, 5)));
    }

    #[test]
    fn test_following_and_preceding() {
        let cal = Calendar::weekends_only();
        let sunday = d(2024, 6, 16);
        assert_eq!(cal.adjust(sunday, BusinessDayConvention::Following), d(2024, 6, 17));
        assert_eq!(cal.adjust(sunday, BusinessDayConvention::Preceding), d(2024, 6, 14));
        assert_eq!(cal.adjust(sunday, BusinessDayConvention::Unadjusted), sunday);
    }

    #[test]
    fn test_modified_following_stays_in_month() {
        let cal = Calendar::weekends_only();
        // Saturday 30 November 2024
        assert_eq!(
            cal.adjust(d(2024, 11, 30), BusinessDayConvention::ModifiedFollowing),
            d(2024, 11, 29)
        );
    }

    #[test]
    fn test_target_holidays() {
        let cal = Calendar::new(CalendarId::Target);
        assert!(cal.is_holiday(d(2025, 5, 1)));
        assert_eq!(
            cal.adjust(d(2025, 12, 25), BusinessDayConvention::Preceding),
            d(2025, 12, 24)
        );
    }

    #[test]
    fn test_extra_holidays() {
        let cal = Calendar::weekends_only().with_holidays([d(2024, 6, 17)]);
        assert_eq!(
            cal.adjust(d(2024, 6, 17), BusinessDayConvention::Preceding),
            d(2024, 6, 14)
        );
    }

    #[test]
    fn test_add_business_days() {
        let cal = Calendar::weekends_only();
        assert_eq!(cal.add_business_days(d(2026, 1, 9), 1), d(2026, 1, 12));
        assert_eq!(cal.add_business_days(d(2026, 1, 12), -1), d(2026, 1, 9));
    }
}
