//! Curve abstractions for discounting.
//!
//! - [`YieldCurve`]: Generic trait over year fractions
//! - [`DiscountCurve`]: Date-based curve with log-linear discount factor interpolation

mod discount;
mod traits;

pub use discount::DiscountCurve;
pub use traits::YieldCurve;
