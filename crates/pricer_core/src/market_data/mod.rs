//! Market data structures used to discount and convert exposures.
//!
//! # Components
//!
//! - [`curves`]: Yield curve trait and a dated discount curve
//! - [`error`]: Market data error types (MarketDataError)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::curves::{DiscountCurve, YieldCurve};
//! use pricer_core::types::{Date, DayCountConvention};
//!
//! let today = Date::from_ymd(2024, 1, 2).unwrap();
//! let curve = DiscountCurve::flat(today, 0.05, DayCountConvention::ActualActual365);
//! let df = curve.discount_factor(1.0).unwrap();
//! assert!((df - 0.951229).abs() < 1e-5);
//! ```

pub mod curves;
pub mod error;

pub use curves::{DiscountCurve, YieldCurve};
pub use error::MarketDataError;
