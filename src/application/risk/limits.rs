//! Risk limit configuration consumed by the policy.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::AssetClass;

/// Forex limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForexLimits {
    /// Maximum number of simultaneously open forex trades.
    pub max_concurrent_trades: usize,
    /// Maximum notional exposure across all forex positions.
    pub max_exposure: Decimal,
    /// Maximum notional exposure on a single pair.
    pub max_exposure_per_instrument: Decimal,
    /// Daily loss, in currency units, at which new trades are refused.
    pub max_daily_loss: Decimal,
}

impl Default for ForexLimits {
    fn default() -> Self {
        Self {
            max_concurrent_trades: 10,
            max_exposure: Decimal::from(5_000_000),
            max_exposure_per_instrument: Decimal::from(2_000_000),
            max_daily_loss: Decimal::from(5000),
        }
    }
}

/// Crowdfunding limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrowdfundingLimits {
    pub max_investment_per_project: Decimal,
    pub max_total_exposure: Decimal,
    /// Daily loss, in currency units, at which new investments are refused.
    pub max_daily_loss: Decimal,
}

impl Default for CrowdfundingLimits {
    fn default() -> Self {
        Self {
            max_investment_per_project: Decimal::from(10_000),
            max_total_exposure: Decimal::from(100_000),
            max_daily_loss: Decimal::from(10_000),
        }
    }
}

/// Complete limit set. Replaced wholesale, never mutated in place.
///
/// Ratios are fractions: `0.02` means two percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskLimits {
    /// Cap on summed open risk as a fraction of portfolio value.
    pub max_portfolio_risk: Decimal,
    /// Cap on one trade's potential loss as a fraction of portfolio value.
    pub max_trade_risk: Decimal,
    /// Share of `max_daily_loss` at which approvals start carrying a warning.
    pub daily_loss_warning_ratio: Decimal,
    pub forex: ForexLimits,
    pub crowdfunding: CrowdfundingLimits,
}

impl RiskLimits {
    /// Daily loss cap for `asset_class`.
    #[must_use]
    pub const fn max_daily_loss(&self, asset_class: AssetClass) -> Decimal {
        match asset_class {
            AssetClass::Forex => self.forex.max_daily_loss,
            AssetClass::Crowdfunding => self.crowdfunding.max_daily_loss,
        }
    }

    /// Daily loss at which approvals in `asset_class` carry a warning.
    #[must_use]
    pub fn daily_loss_warning_threshold(&self, asset_class: AssetClass) -> Decimal {
        self.max_daily_loss(asset_class)
            .saturating_mul(self.daily_loss_warning_ratio)
    }
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            max_portfolio_risk: Decimal::new(6, 2), // 6%
            max_trade_risk: Decimal::new(2, 2), // 2%
            daily_loss_warning_ratio: Decimal::new(8, 1), // 80%
            forex: ForexLimits::default(),
            crowdfunding: CrowdfundingLimits::default(),
        }
    }
}
