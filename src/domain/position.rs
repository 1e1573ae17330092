//! Position types for forex trades and crowdfunding investments.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Pnl, Price, Ticket, Volume};
use crate::error::LedgerError;

/// Category of tradeable thing with its own limit semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    /// Leveraged currency-pair positions.
    Forex,
    /// Direct investments in funding projects.
    Crowdfunding,
}

impl AssetClass {
    /// Every asset class, in reporting order.
    pub const ALL: [AssetClass; 2] = [AssetClass::Forex, AssetClass::Crowdfunding];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forex => "forex",
            Self::Crowdfunding => "crowdfunding",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forex" | "fx" => Ok(Self::Forex),
            "crowdfunding" | "cf" => Ok(Self::Crowdfunding),
            other => Err(format!("unknown asset class '{other}'")),
        }
    }
}

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Direction sign applied to price moves: +1 for long, -1 for short.
    #[must_use]
    pub const fn sign(self) -> Decimal {
        match self {
            Self::Buy => Decimal::ONE,
            Self::Sell => Decimal::NEGATIVE_ONE,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => f.write_str("buy"),
            Self::Sell => f.write_str("sell"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" | "long" => Ok(Self::Buy),
            "sell" | "short" => Ok(Self::Sell),
            other => Err(format!("unknown side '{other}'")),
        }
    }
}

/// One open trade or investment.
///
/// Owned by the ledger: created on open, re-marked on every price update,
/// removed on close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    ticket: Ticket,
    symbol: String,
    asset_class: AssetClass,
    side: Side,
    volume: Volume,
    entry_price: Price,
    last_price: Price,
    unrealized_pnl: Pnl,
    stop_loss: Option<Price>,
    opened_at: DateTime<Utc>,
}

impl Position {
    /// Create a new position marked at its entry price.
    #[must_use]
    pub fn new(
        ticket: Ticket,
        symbol: impl Into<String>,
        asset_class: AssetClass,
        side: Side,
        volume: Volume,
        entry_price: Price,
        opened_at: DateTime<Utc>,
    ) -> Self {
        Self {
            ticket,
            symbol: symbol.into(),
            asset_class,
            side,
            volume,
            entry_price,
            last_price: entry_price,
            unrealized_pnl: Decimal::ZERO,
            stop_loss: None,
            opened_at,
        }
    }

    /// Attach the protective stop that bounds this position's loss.
    #[must_use]
    pub fn with_stop_loss(mut self, stop_loss: Price) -> Self {
        self.stop_loss = Some(stop_loss);
        self
    }

    #[must_use]
    pub fn ticket(&self) -> &Ticket {
        &self.ticket
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub const fn asset_class(&self) -> AssetClass {
        self.asset_class
    }

    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub const fn volume(&self) -> Volume {
        self.volume
    }

    #[must_use]
    pub const fn entry_price(&self) -> Price {
        self.entry_price
    }

    #[must_use]
    pub const fn last_price(&self) -> Price {
        self.last_price
    }

    #[must_use]
    pub const fn unrealized_pnl(&self) -> Pnl {
        self.unrealized_pnl
    }

    #[must_use]
    pub const fn stop_loss(&self) -> Option<Price> {
        self.stop_loss
    }

    #[must_use]
    pub const fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Loss taken if the stop is hit: `|entry - stop| * volume`.
    ///
    /// Zero when no stop is attached.
    pub fn risk_amount(&self) -> Result<Decimal, LedgerError> {
        self.stop_loss.map_or(Ok(Decimal::ZERO), |stop| {
            (self.entry_price - stop)
                .abs()
                .checked_mul(self.volume)
                .ok_or_else(|| self.overflow())
        })
    }

    /// P&L at `price`: `(price - entry) * volume * sign`.
    pub fn pnl_at(&self, price: Price) -> Result<Pnl, LedgerError> {
        (price - self.entry_price)
            .checked_mul(self.volume)
            .map(|pnl| pnl * self.side.sign())
            .ok_or_else(|| self.overflow())
    }

    /// Re-mark the position at `price`.
    ///
    /// Returns the change in unrealized P&L since the previous mark. On
    /// overflow the position is left as it was.
    pub fn mark(&mut self, price: Price) -> Result<Pnl, LedgerError> {
        let pnl = self.pnl_at(price)?;
        let delta = pnl
            .checked_sub(self.unrealized_pnl)
            .ok_or_else(|| self.overflow())?;
        self.last_price = price;
        self.unrealized_pnl = pnl;
        Ok(delta)
    }

    fn overflow(&self) -> LedgerError {
        LedgerError::Overflow {
            ticket: self.ticket.clone(),
        }
    }

    /// Freeze this position into a closed snapshot.
    #[must_use]
    pub fn into_snapshot(self, closed_at: DateTime<Utc>) -> PositionSnapshot {
        PositionSnapshot {
            ticket: self.ticket,
            symbol: self.symbol,
            asset_class: self.asset_class,
            side: self.side,
            volume: self.volume,
            entry_price: self.entry_price,
            close_price: self.last_price,
            realized_pnl: self.unrealized_pnl,
            opened_at: self.opened_at,
            closed_at,
        }
    }
}

/// A position as it stood when it was closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionSnapshot {
    pub ticket: Ticket,
    pub symbol: String,
    pub asset_class: AssetClass,
    pub side: Side,
    pub volume: Volume,
    pub entry_price: Price,
    pub close_price: Price,
    pub realized_pnl: Pnl,
    pub opened_at: DateTime<Utc>,
    pub closed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn eur_usd(side: Side) -> Position {
        Position::new(
            Ticket::from("T-1"),
            "EUR/USD",
            AssetClass::Forex,
            side,
            dec!(10000),
            dec!(1.1000),
            Utc::now(),
        )
    }

    #[test]
    fn long_mark_reports_incremental_pnl() {
        let mut position = eur_usd(Side::Buy);

        assert_eq!(position.mark(dec!(1.1010)), Ok(dec!(10)));
        assert_eq!(position.mark(dec!(1.1030)), Ok(dec!(20)));
        assert_eq!(position.unrealized_pnl(), dec!(30));
        assert_eq!(position.last_price(), dec!(1.1030));
    }

    #[test]
    fn short_mark_inverts_sign() {
        let mut position = eur_usd(Side::Sell);

        assert_eq!(position.mark(dec!(1.1010)), Ok(dec!(-10)));
        assert_eq!(position.mark(dec!(1.0990)), Ok(dec!(20)));
        assert_eq!(position.unrealized_pnl(), dec!(10));
    }

    #[test]
    fn risk_amount_uses_stop_distance() {
        let position = eur_usd(Side::Buy).with_stop_loss(dec!(1.0950));
        assert_eq!(position.risk_amount(), Ok(dec!(50)));
        assert_eq!(eur_usd(Side::Buy).risk_amount(), Ok(Decimal::ZERO));
    }

    #[test]
    fn snapshot_carries_final_mark() {
        let mut position = eur_usd(Side::Buy);
        position.mark(dec!(1.0980)).unwrap();
        let closed_at = Utc::now();
        let snapshot = position.into_snapshot(closed_at);

        assert_eq!(snapshot.close_price, dec!(1.0980));
        assert_eq!(snapshot.realized_pnl, dec!(-20));
        assert_eq!(snapshot.closed_at, closed_at);
    }

    #[test]
    fn mark_overflow_leaves_position_unchanged() {
        let mut position = Position::new(
            Ticket::from("T-big"),
            "EUR/USD",
            AssetClass::Forex,
            Side::Buy,
            dec!(100000000000000000000),
            Decimal::ONE,
            Utc::now(),
        );

        let err = position.mark(dec!(100000000000000000000)).unwrap_err();

        assert_eq!(err, LedgerError::Overflow { ticket: Ticket::from("T-big") });
        assert_eq!(position.last_price(), Decimal::ONE);
        assert_eq!(position.unrealized_pnl(), Decimal::ZERO);
    }

    #[test]
    fn parse_asset_class_and_side() {
        assert_eq!("FX".parse::<AssetClass>(), Ok(AssetClass::Forex));
        assert_eq!("crowdfunding".parse::<AssetClass>(), Ok(AssetClass::Crowdfunding));
        assert_eq!("short".parse::<Side>(), Ok(Side::Sell));
        assert!("hold".parse::<Side>().is_err());
    }
}
