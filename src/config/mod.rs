//! Configuration loading and validation.
//!
//! Every section is optional; a missing file section takes its defaults.
//!
//! ```no_run
//! use riskwarden::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

mod logging;
mod risk;

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

pub use logging::LoggingConfig;
pub use risk::{CrowdfundingConfig, ForexConfig, RiskConfig};

use crate::application::sizing::SizerConfig;
use crate::error::{ConfigError, Result};

/// Largest sizing precision accepted; `Decimal` carries 28 digits.
const MAX_PRECISION: u32 = 12;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub sizing: SizerConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is out of range.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or if parsing or
    /// validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Check that all values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        let risk = &self.risk;
        percent("max_portfolio_risk_pct", risk.max_portfolio_risk_pct)?;
        percent("max_trade_risk_pct", risk.max_trade_risk_pct)?;
        percent("daily_loss_warning_pct", risk.daily_loss_warning_pct)?;

        if risk.forex.max_concurrent_trades == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_concurrent_trades",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        positive("max_exposure", risk.forex.max_exposure)?;
        positive(
            "max_exposure_per_instrument",
            risk.forex.max_exposure_per_instrument,
        )?;
        positive("max_daily_loss", risk.forex.max_daily_loss)?;
        positive("forex.notional_unit", risk.forex.notional_unit)?;
        positive(
            "max_investment_per_project",
            risk.crowdfunding.max_investment_per_project,
        )?;
        positive("max_total_exposure", risk.crowdfunding.max_total_exposure)?;
        positive(
            "crowdfunding.max_daily_loss",
            risk.crowdfunding.max_daily_loss,
        )?;
        positive("crowdfunding.notional_unit", risk.crowdfunding.notional_unit)?;

        if self.sizing.precision > MAX_PRECISION {
            return Err(ConfigError::InvalidValue {
                field: "precision",
                reason: format!("must be at most {MAX_PRECISION}"),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn percent(field: &'static str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be greater than 0 and at most 100".to_string(),
        }
        .into());
    }
    Ok(())
}

fn positive(field: &'static str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be greater than 0".to_string(),
        }
        .into());
    }
    Ok(())
}
