//! Riskwarden - pre-trade risk checks and exposure tracking.
//!
//! Decides whether a proposed forex trade or crowdfunding investment may be
//! opened, how large it may safely be, and keeps running exposure and P&L
//! aggregates for the positions that were opened.
//!
//! # Modules
//!
//! - [`domain`] - Instruments, positions, tickets and exposure aggregates
//! - [`application`] - Catalog, validator, sizer, ledger, risk policy and the
//!   [`RiskEngine`](application::engine::RiskEngine) facade
//! - [`port`] - Market data trait and the `(viable, message)` result view
//! - [`config`] - TOML configuration and logging setup
//! - [`cli`] - The `riskwarden` operator commands
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use riskwarden::application::engine::{RiskEngine, TradeRequest};
//! use riskwarden::domain::Side;
//! use rust_decimal_macros::dec;
//!
//! let engine = RiskEngine::default();
//! let opened = engine
//!     .check_and_open(
//!         TradeRequest::new("EUR/USD", Side::Buy, dec!(1.0850))
//!             .with_stop_loss(dec!(1.0800))
//!             .with_account_balance(dec!(10000)),
//!     )
//!     .unwrap();
//! assert_eq!(opened.volume, dec!(40000));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
