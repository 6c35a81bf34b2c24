//! # pricer_core: Foundation types for the exposure engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Time types: `Date`, `DayCountConvention`, `BusinessDayConvention` (`types::time`)
//! - Holiday calendars: `Calendar` (`types::calendar`)
//! - Currency types: `Currency` (`types::currency`)
//! - Curves: `YieldCurve`, `DiscountCurve` (`market_data::curves`)
//! - Error types: `DateError`, `CurrencyError`, `MarketDataError`
//!
//! ## Dependencies
//!
//! Layer 1 has no dependencies on other pricer_* crates:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{BusinessDayConvention, Calendar, Currency, Date, DayCountConvention};
//!
//! let today = Date::from_ymd(2024, 6, 14).unwrap();
//! let horizon = Calendar::weekends_only()
//!     .adjust(today.add_years(1).add_days(4), BusinessDayConvention::Following);
//! let t = DayCountConvention::ActualActualIsda.year_fraction_dates(today, horizon);
//! assert!(t > 1.0);
//!
//! assert_eq!(Currency::USD.code(), "USD");
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date, Currency, DayCountConvention, CalendarId

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod types;
