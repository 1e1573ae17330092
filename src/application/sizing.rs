//! Risk-budget position sizing.
//!
//! `volume = balance * risk_fraction / |entry - stop|`
//!
//! The raw volume is truncated toward zero at the configured precision.
//! Truncation never rounds a size up, so the loss at the stop stays at or
//! below the budget.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

use crate::domain::{Price, Volume};
use crate::error::SizingError;

/// Decimal places kept on a computed volume unless configured otherwise.
pub const DEFAULT_PRECISION: u32 = 4;

/// Configuration for position sizing behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SizerConfig {
    /// Decimal places kept on the computed volume.
    #[serde(default = "default_precision")]
    pub precision: u32,
}

const fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

impl Default for SizerConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

/// Stateless sizer; holds only its rounding configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionSizer {
    config: SizerConfig,
}

impl PositionSizer {
    #[must_use]
    pub const fn with_config(config: SizerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.config.precision
    }

    /// Size a trade so that a stop-out loses `account_balance * risk_fraction`.
    ///
    /// `risk_fraction` is a fraction, so `0.01` risks one percent.
    pub fn calculate_position_size(
        &self,
        entry_price: Price,
        stop_loss_price: Price,
        account_balance: Decimal,
        risk_fraction: Decimal,
    ) -> Result<Volume, SizingError> {
        positive("entry_price", entry_price)?;
        positive("stop_loss_price", stop_loss_price)?;
        positive("account_balance", account_balance)?;

        if risk_fraction <= Decimal::ZERO || risk_fraction > Decimal::ONE {
            return Err(SizingError::InvalidRiskFraction {
                value: risk_fraction,
            });
        }

        let risk_per_unit = (entry_price - stop_loss_price).abs();
        if risk_per_unit.is_zero() {
            return Err(SizingError::ZeroRiskPerUnit { price: entry_price });
        }

        let volume = account_balance
            .checked_mul(risk_fraction)
            .and_then(|risk_amount| risk_amount.checked_div(risk_per_unit))
            .ok_or(SizingError::Overflow {
                balance: account_balance,
                risk_per_unit,
            })?;

        Ok(volume.round_dp_with_strategy(self.config.precision, RoundingStrategy::ToZero))
    }
}

fn positive(field: &'static str, value: Decimal) -> Result<(), SizingError> {
    if value <= Decimal::ZERO {
        return Err(SizingError::NonPositiveInput { field, value });
    }
    Ok(())
}
