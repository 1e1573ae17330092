//! Monetary types for price and volume representation.

use rust_decimal::Decimal;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Volume represented as a Decimal for precision.
pub type Volume = Decimal;

/// Profit and loss in account currency.
pub type Pnl = Decimal;
