//! `riskwarden limits`: effective limit table.

use std::process::ExitCode;

use rust_decimal::Decimal;
use tabled::{Table, Tabled};

use super::output;
use crate::application::risk::RiskLimits;
use crate::config::Config;
use crate::error::Result;

#[derive(Tabled)]
struct LimitRow {
    #[tabled(rename = "Limit")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn pct(fraction: Decimal) -> String {
    format!("{}%", (fraction * Decimal::ONE_HUNDRED).normalize())
}

fn rows(limits: &RiskLimits, config: &Config) -> Vec<LimitRow> {
    let row = |name: &'static str, value: String| LimitRow { name, value };
    vec![
        row("max_portfolio_risk", pct(limits.max_portfolio_risk)),
        row("max_trade_risk", pct(limits.max_trade_risk)),
        row("daily_loss_warning", pct(limits.daily_loss_warning_ratio)),
        row(
            "forex.max_concurrent_trades",
            limits.forex.max_concurrent_trades.to_string(),
        ),
        row("forex.max_exposure", limits.forex.max_exposure.to_string()),
        row(
            "forex.max_exposure_per_instrument",
            limits.forex.max_exposure_per_instrument.to_string(),
        ),
        row("forex.max_daily_loss", limits.forex.max_daily_loss.to_string()),
        row(
            "forex.notional_unit",
            config.risk.forex.notional_unit.to_string(),
        ),
        row(
            "crowdfunding.max_investment_per_project",
            limits.crowdfunding.max_investment_per_project.to_string(),
        ),
        row(
            "crowdfunding.max_total_exposure",
            limits.crowdfunding.max_total_exposure.to_string(),
        ),
        row(
            "crowdfunding.max_daily_loss",
            limits.crowdfunding.max_daily_loss.to_string(),
        ),
        row(
            "crowdfunding.notional_unit",
            config.risk.crowdfunding.notional_unit.to_string(),
        ),
        row("sizing.precision", config.sizing.precision.to_string()),
    ]
}

pub fn execute(config: &Config, json: bool) -> Result<ExitCode> {
    let limits = RiskLimits::from(&config.risk);

    if json {
        output::json(&limits)?;
        return Ok(ExitCode::SUCCESS);
    }

    output::section("Risk limits");
    output::lines(&Table::new(rows(&limits, config)).to_string());
    Ok(ExitCode::SUCCESS)
}
