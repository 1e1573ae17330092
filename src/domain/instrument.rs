//! Tradeable currency-pair instruments.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::{Price, Volume};

/// Minimum trade size applied when an instrument carries no bound of its own.
pub const DEFAULT_MIN_TRADE_SIZE: Volume = dec!(1000);

/// Maximum trade size applied when an instrument carries no bound of its own.
pub const DEFAULT_MAX_TRADE_SIZE: Volume = dec!(1000000);

/// ISO-style three-letter currency code drawn from the known currency set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Currency(&'static str);

impl Currency {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Liquidity tier of a currency pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Major,
    Minor,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Major => f.write_str("MAJOR"),
            Self::Minor => f.write_str("MINOR"),
        }
    }
}

/// An immutable catalog entry for a currency pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrument {
    base: Currency,
    quote: Currency,
    classification: Classification,
    typical_spread: Price,
    min_trade_size: Option<Volume>,
    max_trade_size: Option<Volume>,
}

impl Instrument {
    #[must_use]
    pub const fn new(
        base: Currency,
        quote: Currency,
        classification: Classification,
        typical_spread: Price,
    ) -> Self {
        Self {
            base,
            quote,
            classification,
            typical_spread,
            min_trade_size: None,
            max_trade_size: None,
        }
    }

    /// Override the default trade size bounds.
    #[must_use]
    pub fn with_trade_size(mut self, min: Option<Volume>, max: Option<Volume>) -> Self {
        self.min_trade_size = min;
        self.max_trade_size = max;
        self
    }

    #[must_use]
    pub const fn base(&self) -> Currency {
        self.base
    }

    #[must_use]
    pub const fn quote(&self) -> Currency {
        self.quote
    }

    #[must_use]
    pub const fn classification(&self) -> Classification {
        self.classification
    }

    #[must_use]
    pub const fn typical_spread(&self) -> Price {
        self.typical_spread
    }

    /// Canonical `BASE/QUOTE` symbol.
    #[must_use]
    pub fn symbol(&self) -> String {
        format!("{}/{}", self.base, self.quote)
    }

    /// Smallest accepted volume, falling back to [`DEFAULT_MIN_TRADE_SIZE`].
    #[must_use]
    pub fn min_trade_size(&self) -> Volume {
        self.min_trade_size.unwrap_or(DEFAULT_MIN_TRADE_SIZE)
    }

    /// Largest accepted volume, falling back to [`DEFAULT_MAX_TRADE_SIZE`].
    #[must_use]
    pub fn max_trade_size(&self) -> Volume {
        self.max_trade_size.unwrap_or(DEFAULT_MAX_TRADE_SIZE)
    }

    /// Read-only projection handed to callers.
    #[must_use]
    pub fn info(&self) -> InstrumentInfo {
        InstrumentInfo {
            symbol: self.symbol(),
            base: self.base,
            quote: self.quote,
            classification: self.classification,
            typical_spread: self.typical_spread,
            min_trade_size: self.min_trade_size(),
            max_trade_size: self.max_trade_size(),
        }
    }
}

/// Public view of an instrument with effective trade size bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstrumentInfo {
    pub symbol: String,
    pub base: Currency,
    pub quote: Currency,
    pub classification: Classification,
    pub typical_spread: Decimal,
    pub min_trade_size: Volume,
    pub max_trade_size: Volume,
}
