//! `riskwarden size`: risk-budget sizing.

use std::process::ExitCode;

use rust_decimal::Decimal;
use serde_json::json;

use super::{output, SizeArgs};
use crate::application::sizing::PositionSizer;
use crate::config::Config;
use crate::error::Result;

pub fn execute(config: &Config, args: &SizeArgs) -> Result<ExitCode> {
    let sizer = PositionSizer::with_config(config.sizing);
    let fraction = args.risk_pct / Decimal::ONE_HUNDRED;
    let volume = sizer.calculate_position_size(args.entry, args.stop, args.balance, fraction)?;
    let risk_amount = (args.entry - args.stop).abs() * volume;

    if args.json {
        output::json(&json!({
            "volume": volume,
            "risk_amount": risk_amount,
            "budget": args.balance * fraction,
        }))?;
        return Ok(ExitCode::SUCCESS);
    }

    output::key_value("Volume", volume);
    output::key_value("Risk amount", risk_amount);
    output::key_value("Budget", args.balance * fraction);
    Ok(ExitCode::SUCCESS)
}
