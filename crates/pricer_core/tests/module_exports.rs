//! Integration tests for module exports.
//!
//! Verifies that public modules and types are reachable via absolute paths.

/// Types module is accessible via absolute path.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::calendar::{Calendar, CalendarId};
    use pricer_core::types::currency::Currency;
    use pricer_core::types::time::{BusinessDayConvention, Date, DayCountConvention};

    let start = Date::from_ymd(2024, 1, 1).unwrap();
    let end = Date::from_ymd(2024, 7, 1).unwrap();
    let yf = DayCountConvention::ActualActual365.year_fraction_dates(start, end);
    assert!((yf - 0.4986).abs() < 0.001);

    let cal = Calendar::new(CalendarId::Target);
    assert_eq!(
        cal.adjust(start, BusinessDayConvention::Following),
        Date::from_ymd(2024, 1, 2).unwrap()
    );
    assert_eq!(Currency::EUR.code(), "EUR");
}

/// Re-exports at the `types` level match the submodule paths.
#[test]
fn test_types_reexports() {
    use pricer_core::types::{Calendar, Currency, CurrencyError, Date, DateError};

    assert!(matches!(
        Date::from_ymd(2023, 2, 29),
        Err(DateError::InvalidDate { .. })
    ));
    assert!(matches!(
        "ABC".parse::<Currency>(),
        Err(CurrencyError::UnknownCurrency(_))
    ));
    assert_eq!(Calendar::default(), Calendar::weekends_only());
}

/// Market data module is accessible via absolute path.
#[test]
fn test_market_data_exports() {
    use pricer_core::market_data::{DiscountCurve, MarketDataError, YieldCurve};
    use pricer_core::types::{Date, DayCountConvention};

    let today = Date::from_ymd(2024, 1, 1).unwrap();
    let curve = DiscountCurve::flat(today, 0.01, DayCountConvention::ActualActualIsda);
    assert_eq!(curve.reference_date(), today);
    assert!(curve.discount_factor(1.0).unwrap() < 1.0);

    let err: Result<DiscountCurve, MarketDataError> =
        DiscountCurve::new(today, DayCountConvention::ActualActualIsda, &[]);
    assert!(err.is_err());
}
