//! Property tests for day count conventions and calendars.

use pricer_core::types::{BusinessDayConvention, Calendar, Date, DayCountConvention};
use proptest::prelude::*;

fn date_strategy() -> impl Strategy<Value = Date> {
    (0i64..20_000).prop_map(|offset| Date::from_ymd(1990, 1, 1).unwrap().add_days(offset))
}

proptest! {
    /// Actual/Actual (ISDA) is additive over consecutive periods.
    #[test]
    fn act_act_isda_is_additive(a in date_strategy(), b in date_strategy(), c in date_strategy()) {
        let mut dates = [a, b, c];
        dates.sort();
        let dc = DayCountConvention::ActualActualIsda;
        let whole = dc.year_fraction_dates(dates[0], dates[2]);
        let parts = dc.year_fraction_dates(dates[0], dates[1]) + dc.year_fraction_dates(dates[1], dates[2]);
        prop_assert!((whole - parts).abs() < 1e-12);
    }

    /// Actual/Actual (ISDA) stays within one day of Actual/365 per year elapsed.
    #[test]
    fn act_act_isda_close_to_act_365(a in date_strategy(), b in date_strategy()) {
        let isda = DayCountConvention::ActualActualIsda.year_fraction_dates(a, b);
        let a365 = DayCountConvention::ActualActual365.year_fraction_dates(a, b);
        prop_assert!((isda - a365).abs() <= (a365.abs() + 1.0) / 365.0);
    }

    /// Adjusted dates are business days and never move more than a few days.
    #[test]
    fn adjusted_dates_are_business_days(date in date_strategy()) {
        let cal = Calendar::weekends_only();
        for conv in [
            BusinessDayConvention::Following,
            BusinessDayConvention::Preceding,
            BusinessDayConvention::ModifiedFollowing,
            BusinessDayConvention::ModifiedPreceding,
        ] {
            let adjusted = cal.adjust(date, conv);
            prop_assert!(cal.is_business_day(adjusted));
            prop_assert!((adjusted - date).abs() <= 2);
        }
    }
}
