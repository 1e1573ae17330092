//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`price`] - [`StaticPriceSource`](price::StaticPriceSource), a settable
//!   [`PriceSource`](crate::port::PriceSource).
//! - [`domain`] - Builders for positions and trade requests.
//! - [`config`] - Canonical limit sets for tests.

pub mod config;
pub mod domain;
pub mod price;
