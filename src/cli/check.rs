//! `riskwarden check`: one-off forex viability check.

use std::process::ExitCode;

use serde_json::json;

use super::{output, CheckArgs};
use crate::application::engine::RiskEngine;
use crate::config::Config;
use crate::error::Result;
use crate::port::RiskCheckResult;

pub fn execute(config: &Config, args: &CheckArgs) -> Result<ExitCode> {
    let engine = RiskEngine::from_config(config);
    let result = RiskCheckResult::from(engine.check_trade(
        &args.symbol,
        args.volume,
        args.side,
        args.entry,
    ));
    let rule = result.rejection_error().map(|e| e.rule().as_str());
    let (viable, message) = result.into_parts();

    if args.json {
        output::json(&json!({
            "viable": viable,
            "message": message,
            "rule": rule,
        }))?;
    } else if viable {
        output::ok(&message);
    } else {
        output::error(&message);
    }

    Ok(if viable {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
