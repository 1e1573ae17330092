//! `riskwarden replay`: apply a JSON operation journal to a fresh engine.
//!
//! The journal is an array of tagged operations:
//!
//! ```json
//! [
//!   {"op": "open", "ticket": "T-1", "symbol": "EUR/USD", "side": "buy",
//!    "entry_price": "1.0850", "stop_loss": "1.0800", "account_balance": "10000"},
//!   {"op": "update", "ticket": "T-1", "price": "1.0870"},
//!   {"op": "close", "ticket": "T-1", "price": "1.0900"},
//!   {"op": "invest", "ticket": "C-1", "project_id": "solar-farm", "amount": "5000"},
//!   {"op": "reset", "asset_class": "forex"}
//! ]
//! ```

use std::path::Path;
use std::process::ExitCode;

use rust_decimal::Decimal;
use serde::Deserialize;
use tabled::{Table, Tabled};

use super::{output, ReplayArgs};
use crate::application::engine::{RiskEngine, TradeRequest};
use crate::config::Config;
use crate::domain::{AssetClass, ExposureAggregate, Price, Side, Ticket, Volume};
use crate::error::Result;

/// One journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Operation {
    Open {
        ticket: Option<Ticket>,
        symbol: String,
        side: Side,
        entry_price: Price,
        volume: Option<Volume>,
        stop_loss: Option<Price>,
        account_balance: Option<Decimal>,
    },
    Update {
        ticket: Ticket,
        price: Price,
    },
    Close {
        ticket: Ticket,
        price: Price,
    },
    Invest {
        ticket: Ticket,
        project_id: String,
        amount: Decimal,
    },
    Reset {
        asset_class: AssetClass,
    },
}

impl Operation {
    const fn name(&self) -> &'static str {
        match self {
            Self::Open { .. } => "open",
            Self::Update { .. } => "update",
            Self::Close { .. } => "close",
            Self::Invest { .. } => "invest",
            Self::Reset { .. } => "reset",
        }
    }
}

/// Read a journal file.
pub fn load(path: &Path) -> Result<Vec<Operation>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Apply one operation; `Ok` carries the outcome line.
pub fn apply(engine: &RiskEngine, operation: Operation) -> Result<String> {
    match operation {
        Operation::Open {
            ticket,
            symbol,
            side,
            entry_price,
            volume,
            stop_loss,
            account_balance,
        } => {
            let mut request = TradeRequest::new(symbol, side, entry_price);
            if let Some(ticket) = ticket {
                request = request.with_ticket(ticket);
            }
            if let Some(volume) = volume {
                request = request.with_volume(volume);
            }
            if let Some(stop) = stop_loss {
                request = request.with_stop_loss(stop);
            }
            if let Some(balance) = account_balance {
                request = request.with_account_balance(balance);
            }
            let opened = engine.check_and_open(request)?;
            Ok(format!(
                "{} {} {} {}: {}",
                opened.ticket,
                opened.symbol,
                side,
                opened.volume,
                opened.approval
            ))
        }
        Operation::Update { ticket, price } => {
            let delta = engine.update_position(&ticket, price)?;
            Ok(format!("{ticket} @ {price}: pnl delta {delta}"))
        }
        Operation::Close { ticket, price } => {
            let snapshot = engine.close_position(&ticket, price)?;
            Ok(format!(
                "{ticket} closed @ {price}: realized {}",
                snapshot.realized_pnl
            ))
        }
        Operation::Invest {
            ticket,
            project_id,
            amount,
        } => {
            let approval = engine.check_and_invest(ticket.clone(), &project_id, amount)?;
            Ok(format!("{ticket} {project_id} {amount}: {approval}"))
        }
        Operation::Reset { asset_class } => {
            engine.reset_daily_pl(asset_class)?;
            Ok(format!("{asset_class} daily P&L reset"))
        }
    }
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Class")]
    class: String,
    #[tabled(rename = "Open")]
    open: usize,
    #[tabled(rename = "Exposure")]
    exposure: Decimal,
    #[tabled(rename = "Daily P&L")]
    daily: Decimal,
    #[tabled(rename = "Realized")]
    realized: Decimal,
    #[tabled(rename = "Unrealized")]
    unrealized: Decimal,
    #[tabled(rename = "Open Risk")]
    open_risk: Decimal,
}

impl From<ExposureAggregate> for SummaryRow {
    fn from(aggregate: ExposureAggregate) -> Self {
        Self {
            class: aggregate
                .asset_class
                .map_or_else(|| "total".to_string(), |c| c.to_string()),
            open: aggregate.open_positions,
            exposure: aggregate.exposure,
            daily: aggregate.daily_pnl,
            realized: aggregate.realized_pnl,
            unrealized: aggregate.unrealized_pnl,
            open_risk: aggregate.open_risk,
        }
    }
}

pub fn execute(config: &Config, args: &ReplayArgs) -> Result<ExitCode> {
    let operations = load(&args.file)?;
    let engine = RiskEngine::from_config(config);

    output::section(&format!("Replaying {} operations", operations.len()));
    let mut failures = 0usize;
    for (index, operation) in operations.into_iter().enumerate() {
        let name = operation.name();
        match apply(&engine, operation) {
            Ok(line) => output::ok(&format!("#{} {name} {line}", index + 1)),
            Err(e) => {
                failures += 1;
                output::warn(&format!("#{} {name} failed: {e}", index + 1));
            }
        }
    }

    let rows: Vec<SummaryRow> = AssetClass::ALL
        .into_iter()
        .map(|class| engine.get_risk_summary(Some(class)))
        .chain(std::iter::once(engine.get_risk_summary(None)))
        .map(SummaryRow::from)
        .collect();
    output::section("Summary");
    output::lines(&Table::new(rows).to_string());

    if failures > 0 && args.strict {
        output::error(&format!("{failures} operation(s) failed"));
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
