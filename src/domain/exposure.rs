//! Aggregated exposure and P&L figures.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{AssetClass, Pnl};

/// Exposure and P&L totals for one asset class, or globally.
///
/// `asset_class` is `None` for the global aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExposureAggregate {
    pub asset_class: Option<AssetClass>,
    /// Notional exposure of open positions.
    pub exposure: Decimal,
    pub open_positions: usize,
    /// Running P&L for the trading day, realized and unrealized.
    pub daily_pnl: Pnl,
    /// P&L locked in by positions closed since the last day rollover.
    pub realized_pnl: Pnl,
    pub unrealized_pnl: Pnl,
    /// Loss committed by stops on open positions.
    pub open_risk: Decimal,
}

impl ExposureAggregate {
    /// Empty aggregate for `asset_class`.
    #[must_use]
    pub const fn empty(asset_class: Option<AssetClass>) -> Self {
        Self {
            asset_class,
            exposure: Decimal::ZERO,
            open_positions: 0,
            daily_pnl: Decimal::ZERO,
            realized_pnl: Decimal::ZERO,
            unrealized_pnl: Decimal::ZERO,
            open_risk: Decimal::ZERO,
        }
    }

    /// Today's loss as a positive number; zero while the day is in profit.
    #[must_use]
    pub fn daily_loss(&self) -> Decimal {
        if self.daily_pnl < Decimal::ZERO {
            -self.daily_pnl
        } else {
            Decimal::ZERO
        }
    }

    /// Sum of both aggregates' figures, keeping `self`'s asset class.
    ///
    /// `None` if any field leaves the decimal range.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        Some(Self {
            asset_class: self.asset_class,
            exposure: self.exposure.checked_add(other.exposure)?,
            open_positions: self.open_positions.checked_add(other.open_positions)?,
            daily_pnl: self.daily_pnl.checked_add(other.daily_pnl)?,
            realized_pnl: self.realized_pnl.checked_add(other.realized_pnl)?,
            unrealized_pnl: self.unrealized_pnl.checked_add(other.unrealized_pnl)?,
            open_risk: self.open_risk.checked_add(other.open_risk)?,
        })
    }
}
