//! Time, calendar and currency types.
//!
//! This module provides:
//! - `time`: Date, DayCountConvention, BusinessDayConvention
//! - `calendar`: Holiday calendars with business day adjustment
//! - `currency`: ISO 4217 currency codes
//! - `error`: Date and currency error types
//!
//! # Re-exports
//!
//! - [`Date`], [`DayCountConvention`], [`BusinessDayConvention`] from `time`
//! - [`Calendar`], [`CalendarId`] from `calendar`
//! - [`Currency`] from `currency`
//! - [`DateError`], [`CurrencyError`] from `error`

pub mod calendar;
pub mod currency;
pub mod error;
pub mod time;

pub use calendar::{Calendar, CalendarId};
pub use currency::Currency;
pub use error::{CurrencyError, DateError};
pub use time::{BusinessDayConvention, Date, DayCountConvention};
