//! The single entry point: validation, sizing, viability and ledger mutation.
//!
//! The ledger sits behind one `RwLock`; every mutation holds the write lock
//! for its whole read-modify-write. Limits sit behind a separate lock and are
//! swapped wholesale, so a check always evaluates one consistent limit set.
//! When both are needed the limits snapshot is taken first and released
//! before the ledger lock is acquired.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::ledger::{NotionalUnits, PositionLedger};
use super::risk::{Approval, RiskLimits, RiskPolicy};
use super::sizing::PositionSizer;
use super::validator::InstrumentValidator;
use crate::config::Config;
use crate::domain::{
    AssetClass, ExposureAggregate, InstrumentInfo, Pnl, Position, PositionSnapshot, Price, Side,
    Ticket, Volume,
};
use crate::error::{LedgerError, Result, RiskError, SizingError, ValidationError};
use crate::port::PriceSource;

/// A proposed forex trade for [`RiskEngine::check_and_open`].
///
/// Without an explicit volume the trade is sized from the stop loss and
/// account balance at the configured per-trade risk fraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeRequest {
    ticket: Option<Ticket>,
    symbol: String,
    side: Side,
    entry_price: Price,
    volume: Option<Volume>,
    stop_loss: Option<Price>,
    account_balance: Option<Decimal>,
}

impl TradeRequest {
    #[must_use]
    pub fn new(symbol: impl Into<String>, side: Side, entry_price: Price) -> Self {
        Self {
            ticket: None,
            symbol: symbol.into(),
            side,
            entry_price,
            volume: None,
            stop_loss: None,
            account_balance: None,
        }
    }

    #[must_use]
    pub fn with_ticket(mut self, ticket: impl Into<Ticket>) -> Self {
        self.ticket = Some(ticket.into());
        self
    }

    #[must_use]
    pub const fn with_volume(mut self, volume: Volume) -> Self {
        self.volume = Some(volume);
        self
    }

    #[must_use]
    pub const fn with_stop_loss(mut self, stop_loss: Price) -> Self {
        self.stop_loss = Some(stop_loss);
        self
    }

    /// Portfolio value used for sizing and for the trade/portfolio risk caps.
    #[must_use]
    pub const fn with_account_balance(mut self, balance: Decimal) -> Self {
        self.account_balance = Some(balance);
        self
    }
}

/// Outcome of a successful [`RiskEngine::check_and_open`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenedTrade {
    pub ticket: Ticket,
    pub symbol: String,
    pub volume: Volume,
    /// Whether the volume came from the sizer rather than the request.
    pub sized: bool,
    pub approval: Approval,
}

/// Outcome of one [`RiskEngine::mark_to_market`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarkReport {
    pub updated: usize,
    /// Tickets whose symbol had no usable quote.
    pub missing: Vec<Ticket>,
    /// Sum of P&L deltas applied in this pass.
    pub pnl_delta: Pnl,
}

/// Thread-safe facade over the ledger, limits, validator and sizer.
pub struct RiskEngine {
    ledger: RwLock<PositionLedger>,
    limits: RwLock<Arc<RiskLimits>>,
    validator: InstrumentValidator,
    sizer: PositionSizer,
}

impl RiskEngine {
    /// Engine over the standard catalog with unit notionals.
    #[must_use]
    pub fn new(limits: RiskLimits) -> Self {
        Self::with_parts(
            limits,
            NotionalUnits::default(),
            InstrumentValidator::default(),
            PositionSizer::default(),
        )
    }

    /// Engine configured from a validated [`Config`].
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::with_parts(
            RiskLimits::from(&config.risk),
            config.risk.notional_units(),
            InstrumentValidator::default(),
            PositionSizer::with_config(config.sizing),
        )
    }

    #[must_use]
    pub fn with_parts(
        limits: RiskLimits,
        units: NotionalUnits,
        validator: InstrumentValidator,
        sizer: PositionSizer,
    ) -> Self {
        Self {
            ledger: RwLock::new(PositionLedger::new(units)),
            limits: RwLock::new(Arc::new(limits)),
            validator,
            sizer,
        }
    }

    #[must_use]
    pub const fn validator(&self) -> &InstrumentValidator {
        &self.validator
    }

    #[must_use]
    pub const fn sizer(&self) -> &PositionSizer {
        &self.sizer
    }

    /// Current limit set.
    #[must_use]
    pub fn limits(&self) -> Arc<RiskLimits> {
        Arc::clone(&self.limits.read())
    }

    /// Swap in a new limit set. In-flight checks finish on the old one.
    pub fn replace_limits(&self, limits: RiskLimits) {
        info!(
            max_trade_risk = %limits.max_trade_risk,
            max_portfolio_risk = %limits.max_portfolio_risk,
            "Risk limits replaced"
        );
        *self.limits.write() = Arc::new(limits);
    }

    pub fn validate_pair(&self, symbol: &str) -> std::result::Result<InstrumentInfo, ValidationError> {
        self.validator.validate_pair(symbol).map(|i| i.info())
    }

    pub fn size_position(
        &self,
        entry_price: Price,
        stop_loss_price: Price,
        account_balance: Decimal,
        risk_fraction: Decimal,
    ) -> std::result::Result<Volume, SizingError> {
        self.sizer
            .calculate_position_size(entry_price, stop_loss_price, account_balance, risk_fraction)
    }

    /// Read-only forex viability check against the current ledger.
    ///
    /// Not atomic with a later [`open_position`](Self::open_position); use
    /// [`check_and_open`](Self::check_and_open) for that.
    pub fn check_trade(
        &self,
        symbol: &str,
        volume: Volume,
        side: Side,
        entry_price: Price,
    ) -> std::result::Result<Approval, RiskError> {
        let limits = self.limits();
        let ledger = self.ledger.read();
        RiskPolicy::new(&limits, &self.validator)
            .check_forex_trade_viability(&ledger, symbol, volume, side, entry_price)
    }

    /// Read-only crowdfunding viability check.
    pub fn check_investment(
        &self,
        project_id: &str,
        amount: Decimal,
    ) -> std::result::Result<Approval, RiskError> {
        let limits = self.limits();
        let ledger = self.ledger.read();
        RiskPolicy::new(&limits, &self.validator)
            .check_crowdfunding_investment_viability(&ledger, project_id, amount)
    }

    /// Read-only per-trade and portfolio risk check.
    pub fn check_trade_risk(
        &self,
        potential_loss: Decimal,
        portfolio_value: Decimal,
    ) -> std::result::Result<Approval, RiskError> {
        let limits = self.limits();
        let ledger = self.ledger.read();
        RiskPolicy::new(&limits, &self.validator).check_trade_risk(
            &ledger,
            potential_loss,
            portfolio_value,
        )
    }

    /// Validate, size, check and open a forex trade under one ledger write lock.
    ///
    /// Concurrent callers cannot both pass a limit that only one of them fits under.
    pub fn check_and_open(&self, request: TradeRequest) -> Result<OpenedTrade> {
        let instrument = self.validator.validate_pair(&request.symbol)?;
        let symbol = instrument.symbol();
        let limits = self.limits();

        let (volume, sized) = match request.volume {
            Some(volume) => (volume, false),
            None => {
                let stop = request
                    .stop_loss
                    .ok_or(SizingError::MissingInput { field: "stop_loss" })?;
                let balance = request
                    .account_balance
                    .ok_or(SizingError::MissingInput {
                        field: "account_balance",
                    })?;
                let volume = self.sizer.calculate_position_size(
                    request.entry_price,
                    stop,
                    balance,
                    limits.max_trade_risk,
                )?;
                debug!(symbol = %symbol, volume = %volume, "Sized trade from stop distance");
                (volume, true)
            }
        };

        let ticket = request.ticket.unwrap_or_else(Ticket::generate);
        let mut position = Position::new(
            ticket.clone(),
            symbol.clone(),
            AssetClass::Forex,
            request.side,
            volume,
            request.entry_price,
            Utc::now(),
        );
        if let Some(stop) = request.stop_loss {
            position = position.with_stop_loss(stop);
        }

        let mut ledger = self.ledger.write();
        let policy = RiskPolicy::new(&limits, &self.validator);
        let approval = policy.check_forex_trade_viability(
            &ledger,
            &symbol,
            volume,
            request.side,
            request.entry_price,
        )?;

        if let (Some(_), Some(balance)) = (request.stop_loss, request.account_balance) {
            policy.check_trade_risk(&ledger, position.risk_amount()?, balance)?;
        }

        ledger.insert(position)?;
        drop(ledger);

        if let Some(warning) = approval.warning() {
            warn!(ticket = %ticket, warning = %warning, "Trade opened with warning");
        }
        info!(
            ticket = %ticket,
            symbol = %symbol,
            side = %request.side,
            volume = %volume,
            entry_price = %request.entry_price,
            "Position opened"
        );

        Ok(OpenedTrade {
            ticket,
            symbol,
            volume,
            sized,
            approval,
        })
    }

    /// Check and record a crowdfunding investment under one ledger write lock.
    ///
    /// Investments are held as buy positions with a unit entry price, so
    /// their volume equals the amount invested.
    pub fn check_and_invest(
        &self,
        ticket: impl Into<Ticket>,
        project_id: &str,
        amount: Decimal,
    ) -> Result<Approval> {
        let ticket = ticket.into();
        let limits = self.limits();

        let mut ledger = self.ledger.write();
        let approval = RiskPolicy::new(&limits, &self.validator)
            .check_crowdfunding_investment_viability(&ledger, project_id, amount)?;
        ledger.open_position(
            ticket.clone(),
            project_id,
            AssetClass::Crowdfunding,
            Side::Buy,
            amount,
            Decimal::ONE,
        )?;
        drop(ledger);

        info!(ticket = %ticket, project_id = %project_id, amount = %amount, "Investment recorded");
        Ok(approval)
    }

    /// Record a position without limit checks.
    pub fn open_position(
        &self,
        ticket: impl Into<Ticket>,
        symbol: &str,
        asset_class: AssetClass,
        side: Side,
        volume: Volume,
        entry_price: Price,
    ) -> std::result::Result<(), LedgerError> {
        let ticket = ticket.into();
        self.ledger.write().open_position(
            ticket.clone(),
            symbol,
            asset_class,
            side,
            volume,
            entry_price,
        )?;
        info!(
            ticket = %ticket,
            symbol = %symbol,
            asset_class = %asset_class,
            side = %side,
            volume = %volume,
            "Position opened"
        );
        Ok(())
    }

    /// Re-mark one position; returns the P&L delta applied.
    pub fn update_position(
        &self,
        ticket: &Ticket,
        current_price: Price,
    ) -> std::result::Result<Pnl, LedgerError> {
        let delta = self.ledger.write().update_position(ticket, current_price)?;
        debug!(ticket = %ticket, price = %current_price, delta = %delta, "Position marked");
        Ok(delta)
    }

    pub fn close_position(
        &self,
        ticket: &Ticket,
        close_price: Price,
    ) -> std::result::Result<PositionSnapshot, LedgerError> {
        let snapshot = self.ledger.write().close_position(ticket, close_price)?;
        info!(
            ticket = %ticket,
            symbol = %snapshot.symbol,
            close_price = %close_price,
            realized_pnl = %snapshot.realized_pnl,
            "Position closed"
        );
        Ok(snapshot)
    }

    /// Re-mark every open position from `prices` in one ledger pass.
    pub fn mark_to_market(&self, prices: &dyn PriceSource) -> MarkReport {
        let mut ledger = self.ledger.write();
        let quotes: Vec<(Ticket, Option<Price>)> = ledger
            .open_positions()
            .map(|p| (p.ticket().clone(), prices.price(p.symbol())))
            .collect();

        let mut report = MarkReport::default();
        for (ticket, quote) in quotes {
            match quote.map(|price| ledger.update_position(&ticket, price)) {
                Some(Ok(delta)) => {
                    report.updated += 1;
                    report.pnl_delta += delta;
                }
                Some(Err(e)) => {
                    warn!(ticket = %ticket, error = %e, "Skipping unusable quote");
                    report.missing.push(ticket);
                }
                None => report.missing.push(ticket),
            }
        }
        drop(ledger);

        report.missing.sort();
        debug!(
            updated = report.updated,
            missing = report.missing.len(),
            pnl_delta = %report.pnl_delta,
            "Mark to market complete"
        );
        report
    }

    /// Aggregate for one asset class, or global for `None`.
    #[must_use]
    pub fn get_risk_summary(&self, asset_class: Option<AssetClass>) -> ExposureAggregate {
        self.ledger.read().get_exposure(asset_class)
    }

    pub fn reset_daily_pl(
        &self,
        asset_class: AssetClass,
    ) -> std::result::Result<(), LedgerError> {
        self.ledger.write().reset_daily_pl(asset_class)?;
        info!(asset_class = %asset_class, "Daily P&L reset");
        Ok(())
    }

    #[must_use]
    pub fn position(&self, ticket: &Ticket) -> Option<Position> {
        self.ledger.read().position(ticket).cloned()
    }

    /// Open positions ordered by ticket.
    #[must_use]
    pub fn open_positions(&self) -> Vec<Position> {
        let mut positions: Vec<Position> = self.ledger.read().open_positions().cloned().collect();
        positions.sort_by(|a, b| a.ticket().cmp(b.ticket()));
        positions
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new(RiskLimits::default())
    }
}
