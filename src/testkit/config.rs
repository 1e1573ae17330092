//! Canonical limit sets for tests.

use rust_decimal::Decimal;

use crate::application::risk::RiskLimits;

/// Default limits with a custom concurrent trade cap.
pub fn concurrent(max_concurrent_trades: usize) -> RiskLimits {
    let mut limits = RiskLimits::default();
    limits.forex.max_concurrent_trades = max_concurrent_trades;
    limits
}

/// Default limits with custom per-trade and portfolio risk fractions.
pub fn risk_caps(max_trade_risk: Decimal, max_portfolio_risk: Decimal) -> RiskLimits {
    RiskLimits {
        max_trade_risk,
        max_portfolio_risk,
        ..RiskLimits::default()
    }
}
