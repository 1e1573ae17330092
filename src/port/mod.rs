//! Trait definitions and result views at the engine boundary.
//!
//! - [`PriceSource`] - Market data pulled by `mark_to_market`
//! - [`RiskCheckResult`] - `(viable, message)` view over a viability check

mod price;
mod risk;

pub use price::PriceSource;
pub use risk::RiskCheckResult;
