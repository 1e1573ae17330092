//! Viability rules evaluated against a ledger snapshot.
//!
//! Checks run in a fixed order and the first violated rule wins, so a given
//! ledger state always yields the same rejection.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use super::limits::RiskLimits;
use crate::application::ledger::PositionLedger;
use crate::application::validator::InstrumentValidator;
use crate::domain::{AssetClass, Price, Side, Volume};
use crate::error::{RiskError, ValidationError};

/// A viable outcome, optionally carrying a warning for the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Approval {
    warning: Option<String>,
}

impl Approval {
    /// Plain approval.
    #[must_use]
    pub const fn approved() -> Self {
        Self { warning: None }
    }

    /// Approval the caller may want to surface to a human.
    #[must_use]
    pub fn with_warning(warning: impl Into<String>) -> Self {
        Self {
            warning: Some(warning.into()),
        }
    }

    #[must_use]
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    #[must_use]
    pub const fn has_warning(&self) -> bool {
        self.warning.is_some()
    }

    /// Operator-facing text: `"approved"` or the warning.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Approval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.warning {
            Some(warning) => write!(f, "approved with warning: {warning}"),
            None => f.write_str("approved"),
        }
    }
}

/// Evaluates proposals against one limit set. Never mutates the ledger.
#[derive(Debug, Clone, Copy)]
pub struct RiskPolicy<'a> {
    limits: &'a RiskLimits,
    validator: &'a InstrumentValidator,
}

impl<'a> RiskPolicy<'a> {
    #[must_use]
    pub const fn new(limits: &'a RiskLimits, validator: &'a InstrumentValidator) -> Self {
        Self { limits, validator }
    }

    #[must_use]
    pub const fn limits(&self) -> &RiskLimits {
        self.limits
    }

    /// Decide whether a forex trade may be opened.
    ///
    /// Order: instrument and volume validity, concurrent trade count,
    /// asset-class exposure, per-instrument exposure, daily loss limit,
    /// daily loss warning band.
    pub fn check_forex_trade_viability(
        &self,
        ledger: &PositionLedger,
        symbol: &str,
        volume: Volume,
        side: Side,
        entry_price: Price,
    ) -> Result<Approval, RiskError> {
        let instrument = self.validator.validate_pair(symbol)?;
        self.validator.validate_volume(instrument, volume)?;
        if entry_price <= Decimal::ZERO {
            return Err(ValidationError::NonPositivePrice { price: entry_price }.into());
        }

        let symbol = instrument.symbol();
        let limits = &self.limits.forex;
        let forex = ledger.get_exposure(Some(AssetClass::Forex));

        if forex.open_positions >= limits.max_concurrent_trades {
            warn!(
                open = forex.open_positions,
                limit = limits.max_concurrent_trades,
                "Concurrent trade limit reached"
            );
            return Err(RiskError::ConcurrentTradeLimit {
                asset_class: AssetClass::Forex,
                open: forex.open_positions,
                limit: limits.max_concurrent_trades,
            });
        }

        let notional = ledger.notional(AssetClass::Forex, volume);
        let attempted = forex.exposure.saturating_add(notional);
        if attempted > limits.max_exposure {
            warn!(
                current = %forex.exposure,
                additional = %notional,
                limit = %limits.max_exposure,
                "Forex exposure limit would be exceeded"
            );
            return Err(RiskError::AssetClassExposureExceeded {
                asset_class: AssetClass::Forex,
                attempted,
                limit: limits.max_exposure,
            });
        }

        let attempted = ledger
            .symbol_exposure(AssetClass::Forex, &symbol)
            .saturating_add(notional);
        if attempted > limits.max_exposure_per_instrument {
            warn!(
                symbol = %symbol,
                attempted = %attempted,
                limit = %limits.max_exposure_per_instrument,
                "Instrument exposure limit would be exceeded"
            );
            return Err(RiskError::InstrumentExposureExceeded {
                symbol,
                attempted,
                limit: limits.max_exposure_per_instrument,
            });
        }

        let approval = self.check_daily_loss(AssetClass::Forex, forex.daily_loss())?;

        debug!(symbol = %symbol, side = %side, volume = %volume, "Forex trade viable");
        Ok(approval)
    }

    /// Decide whether an investment in `project_id` may be made.
    ///
    /// Order: project and amount validity, per-project cap, aggregate cap,
    /// daily loss limit, daily loss warning band. Equality with either
    /// exposure cap is allowed. No concurrency limit applies.
    pub fn check_crowdfunding_investment_viability(
        &self,
        ledger: &PositionLedger,
        project_id: &str,
        amount: Decimal,
    ) -> Result<Approval, RiskError> {
        if project_id.trim().is_empty() {
            return Err(ValidationError::InvalidFormat {
                symbol: project_id.to_string(),
            }
            .into());
        }
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveVolume { volume: amount }.into());
        }

        let limits = &self.limits.crowdfunding;
        let notional = ledger.notional(AssetClass::Crowdfunding, amount);

        let attempted = ledger
            .symbol_exposure(AssetClass::Crowdfunding, project_id)
            .saturating_add(notional);
        if attempted > limits.max_investment_per_project {
            warn!(
                project_id = %project_id,
                attempted = %attempted,
                limit = %limits.max_investment_per_project,
                "Project investment limit would be exceeded"
            );
            return Err(RiskError::ProjectInvestmentExceeded {
                project_id: project_id.to_string(),
                attempted,
                limit: limits.max_investment_per_project,
            });
        }

        let crowdfunding = ledger.get_exposure(Some(AssetClass::Crowdfunding));
        let attempted = crowdfunding.exposure.saturating_add(notional);
        if attempted > limits.max_total_exposure {
            warn!(
                current = %crowdfunding.exposure,
                additional = %notional,
                limit = %limits.max_total_exposure,
                "Crowdfunding exposure limit would be exceeded"
            );
            return Err(RiskError::CrowdfundingExposureExceeded {
                attempted,
                limit: limits.max_total_exposure,
            });
        }

        let approval =
            self.check_daily_loss(AssetClass::Crowdfunding, crowdfunding.daily_loss())?;

        debug!(project_id = %project_id, amount = %amount, "Investment viable");
        Ok(approval)
    }

    /// Hard stop at the class's daily loss cap; warning band below it.
    fn check_daily_loss(
        &self,
        asset_class: AssetClass,
        loss: Decimal,
    ) -> Result<Approval, RiskError> {
        let limit = self.limits.max_daily_loss(asset_class);
        if loss >= limit {
            warn!(
                asset_class = %asset_class,
                loss = %loss,
                limit = %limit,
                "Daily loss limit reached"
            );
            return Err(RiskError::DailyLossLimitReached {
                asset_class,
                loss,
                limit,
            });
        }

        let threshold = self.limits.daily_loss_warning_threshold(asset_class);
        if loss > Decimal::ZERO && loss >= threshold {
            warn!(
                asset_class = %asset_class,
                loss = %loss,
                limit = %limit,
                "Approving inside daily loss warning band"
            );
            return Ok(Approval::with_warning(format!(
                "daily loss {loss} is approaching the limit of {limit}"
            )));
        }

        Ok(Approval::approved())
    }

    /// Check one trade's potential loss against the per-trade and portfolio caps.
    ///
    /// Open risk already committed by stops on open positions counts against
    /// the portfolio cap. A non-positive `portfolio_value` leaves no budget.
    pub fn check_trade_risk(
        &self,
        ledger: &PositionLedger,
        potential_loss: Decimal,
        portfolio_value: Decimal,
    ) -> Result<Approval, RiskError> {
        let potential_loss = potential_loss.max(Decimal::ZERO);
        let portfolio_value = portfolio_value.max(Decimal::ZERO);

        let trade_cap = portfolio_value.saturating_mul(self.limits.max_trade_risk);
        if potential_loss > trade_cap {
            warn!(
                potential_loss = %potential_loss,
                limit = %trade_cap,
                "Per-trade risk cap exceeded"
            );
            return Err(RiskError::TradeRiskExceeded {
                potential_loss,
                limit: trade_cap,
            });
        }

        let current = ledger.get_exposure(None).open_risk;
        let portfolio_cap = portfolio_value.saturating_mul(self.limits.max_portfolio_risk);
        if current.saturating_add(potential_loss) > portfolio_cap {
            warn!(
                current = %current,
                additional = %potential_loss,
                limit = %portfolio_cap,
                "Portfolio risk cap would be exceeded"
            );
            return Err(RiskError::PortfolioRiskExceeded {
                current,
                additional: potential_loss,
                limit: portfolio_cap,
            });
        }

        Ok(Approval::approved())
    }
}
