//! Risk limit configuration.
//!
//! Ratios are written as human percentages (`2.0` = 2%) and normalized to
//! fractions when converted into [`RiskLimits`].

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::ledger::NotionalUnits;
use crate::application::risk::{CrowdfundingLimits, ForexLimits, RiskLimits};

/// Risk management configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskConfig {
    /// Cap on summed open risk, percent of portfolio value.
    #[serde(default = "default_max_portfolio_risk_pct")]
    pub max_portfolio_risk_pct: Decimal,
    /// Cap on one trade's potential loss, percent of portfolio value.
    #[serde(default = "default_max_trade_risk_pct")]
    pub max_trade_risk_pct: Decimal,
    /// Percent of `max_daily_loss` at which approvals carry a warning.
    #[serde(default = "default_daily_loss_warning_pct")]
    pub daily_loss_warning_pct: Decimal,
    #[serde(default)]
    pub forex: ForexConfig,
    #[serde(default)]
    pub crowdfunding: CrowdfundingConfig,
}

/// `[risk.forex]`
#[derive(Debug, Clone, Deserialize)]
pub struct ForexConfig {
    #[serde(default = "default_max_concurrent_trades")]
    pub max_concurrent_trades: usize,
    #[serde(default = "default_max_exposure")]
    pub max_exposure: Decimal,
    #[serde(default = "default_max_exposure_per_instrument")]
    pub max_exposure_per_instrument: Decimal,
    #[serde(default = "default_max_daily_loss")]
    pub max_daily_loss: Decimal,
    /// Volume-to-exposure multiplier. Applied when the engine is built.
    #[serde(default = "default_notional_unit")]
    pub notional_unit: Decimal,
}

/// `[risk.crowdfunding]`
#[derive(Debug, Clone, Deserialize)]
pub struct CrowdfundingConfig {
    #[serde(default = "default_max_investment_per_project")]
    pub max_investment_per_project: Decimal,
    #[serde(default = "default_max_total_exposure")]
    pub max_total_exposure: Decimal,
    #[serde(default = "default_max_crowdfunding_daily_loss")]
    pub max_daily_loss: Decimal,
    #[serde(default = "default_notional_unit")]
    pub notional_unit: Decimal,
}

fn default_max_portfolio_risk_pct() -> Decimal {
    Decimal::from(6)
}

fn default_max_trade_risk_pct() -> Decimal {
    Decimal::from(2)
}

fn default_daily_loss_warning_pct() -> Decimal {
    Decimal::from(80)
}

const fn default_max_concurrent_trades() -> usize {
    10
}

fn default_max_exposure() -> Decimal {
    Decimal::from(5_000_000)
}

fn default_max_exposure_per_instrument() -> Decimal {
    Decimal::from(2_000_000)
}

fn default_max_daily_loss() -> Decimal {
    Decimal::from(5000)
}

const fn default_notional_unit() -> Decimal {
    Decimal::ONE
}

fn default_max_investment_per_project() -> Decimal {
    Decimal::from(10_000)
}

fn default_max_total_exposure() -> Decimal {
    Decimal::from(100_000)
}

fn default_max_crowdfunding_daily_loss() -> Decimal {
    Decimal::from(10_000)
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            max_portfolio_risk_pct: default_max_portfolio_risk_pct(),
            max_trade_risk_pct: default_max_trade_risk_pct(),
            daily_loss_warning_pct: default_daily_loss_warning_pct(),
            forex: ForexConfig::default(),
            crowdfunding: CrowdfundingConfig::default(),
        }
    }
}

impl Default for ForexConfig {
    fn default() -> Self {
        Self {
            max_concurrent_trades: default_max_concurrent_trades(),
            max_exposure: default_max_exposure(),
            max_exposure_per_instrument: default_max_exposure_per_instrument(),
            max_daily_loss: default_max_daily_loss(),
            notional_unit: default_notional_unit(),
        }
    }
}

impl Default for CrowdfundingConfig {
    fn default() -> Self {
        Self {
            max_investment_per_project: default_max_investment_per_project(),
            max_total_exposure: default_max_total_exposure(),
            max_daily_loss: default_max_crowdfunding_daily_loss(),
            notional_unit: default_notional_unit(),
        }
    }
}

impl RiskConfig {
    /// Notional multipliers for the ledger.
    #[must_use]
    pub const fn notional_units(&self) -> NotionalUnits {
        NotionalUnits {
            forex: self.forex.notional_unit,
            crowdfunding: self.crowdfunding.notional_unit,
        }
    }
}

fn fraction(pct: Decimal) -> Decimal {
    pct / Decimal::ONE_HUNDRED
}

impl From<&RiskConfig> for RiskLimits {
    fn from(config: &RiskConfig) -> Self {
        Self {
            max_portfolio_risk: fraction(config.max_portfolio_risk_pct),
            max_trade_risk: fraction(config.max_trade_risk_pct),
            daily_loss_warning_ratio: fraction(config.daily_loss_warning_pct),
            forex: ForexLimits {
                max_concurrent_trades: config.forex.max_concurrent_trades,
                max_exposure: config.forex.max_exposure,
                max_exposure_per_instrument: config.forex.max_exposure_per_instrument,
                max_daily_loss: config.forex.max_daily_loss,
            },
            crowdfunding: CrowdfundingLimits {
                max_investment_per_project: config.crowdfunding.max_investment_per_project,
                max_total_exposure: config.crowdfunding.max_total_exposure,
                max_daily_loss: config.crowdfunding.max_daily_loss,
            },
        }
    }
}

impl From<RiskConfig> for RiskLimits {
    fn from(config: RiskConfig) -> Self {
        Self::from(&config)
    }
}
