//! `riskwarden pair`: instrument lookup.

use std::process::ExitCode;

use serde_json::json;

use super::{output, PairArgs};
use crate::application::engine::RiskEngine;
use crate::application::validator::parse_volume;
use crate::config::Config;
use crate::error::Result;

pub fn execute(config: &Config, args: &PairArgs) -> Result<ExitCode> {
    let engine = RiskEngine::from_config(config);
    let instrument = engine.validator().validate_pair(&args.symbol)?;
    let info = instrument.info();

    let volume = match args.volume.as_deref() {
        Some(text) => {
            let volume = parse_volume(text)?;
            engine.validator().validate_volume(instrument, volume)?;
            Some(volume)
        }
        None => None,
    };

    if args.json {
        output::json(&json!({
            "instrument": info,
            "volume": volume,
        }))?;
        return Ok(ExitCode::SUCCESS);
    }

    output::section(&info.symbol);
    output::key_value("Base", info.base);
    output::key_value("Quote", info.quote);
    output::key_value("Class", info.classification);
    output::key_value("Spread", info.typical_spread);
    output::key_value("Min size", info.min_trade_size);
    output::key_value("Max size", info.max_trade_size);
    if let Some(volume) = volume {
        output::ok(&format!("volume {volume} is within bounds"));
    }
    Ok(ExitCode::SUCCESS)
}
