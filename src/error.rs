use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::{AssetClass, Ticket};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Category of an instrument or volume validation failure.
///
/// Callers branch on this instead of parsing the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    InvalidFormat,
    UnknownCurrency,
    IdenticalCurrency,
    UnlistedPair,
    NonNumericVolume,
    NonPositiveVolume,
    BelowMinimumVolume,
    AboveMaximumVolume,
    NonPositivePrice,
}

/// Malformed or unknown instrument, or an out-of-range volume.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid symbol format '{symbol}': expected two 3-letter codes joined by one of '/', '_' or '-'")]
    InvalidFormat { symbol: String },

    #[error("unknown currency '{code}'")]
    UnknownCurrency { code: String },

    #[error("base and quote currency are identical ({code})")]
    IdenticalCurrency { code: String },

    #[error("pair {symbol} is not listed in the instrument catalog")]
    UnlistedPair { symbol: String },

    #[error("volume '{input}' is not a number")]
    NonNumericVolume { input: String },

    #[error("volume must be positive, got {volume}")]
    NonPositiveVolume { volume: Decimal },

    #[error("volume {volume} is below the minimum trade size {min}")]
    BelowMinimumVolume { volume: Decimal, min: Decimal },

    #[error("volume {volume} is above the maximum trade size {max}")]
    AboveMaximumVolume { volume: Decimal, max: Decimal },

    #[error("price must be positive, got {price}")]
    NonPositivePrice { price: Decimal },

}

impl ValidationError {
    /// Stable category of this failure.
    #[must_use]
    pub const fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::InvalidFormat { .. } => ValidationErrorKind::InvalidFormat,
            Self::UnknownCurrency { .. } => ValidationErrorKind::UnknownCurrency,
            Self::IdenticalCurrency { .. } => ValidationErrorKind::IdenticalCurrency,
            Self::UnlistedPair { .. } => ValidationErrorKind::UnlistedPair,
            Self::NonNumericVolume { .. } => ValidationErrorKind::NonNumericVolume,
            Self::NonPositiveVolume { .. } => ValidationErrorKind::NonPositiveVolume,
            Self::BelowMinimumVolume { .. } => ValidationErrorKind::BelowMinimumVolume,
            Self::AboveMaximumVolume { .. } => ValidationErrorKind::AboveMaximumVolume,
            Self::NonPositivePrice { .. } => ValidationErrorKind::NonPositivePrice,
        }
    }
}

/// Position sizing failures. Sizing never falls back to zero or infinity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SizingError {
    #[error("{field} must be positive, got {value}")]
    NonPositiveInput { field: &'static str, value: Decimal },

    #[error("entry and stop-loss are both {price}: risk per unit is zero")]
    ZeroRiskPerUnit { price: Decimal },

    #[error("risk fraction must be in (0, 1], got {value}")]
    InvalidRiskFraction { value: Decimal },

    #[error("cannot size position without {field}")]
    MissingInput { field: &'static str },

    #[error("position size for balance {balance} over risk per unit {risk_per_unit} is out of range")]
    Overflow {
        balance: Decimal,
        risk_per_unit: Decimal,
    },
}

/// The limit rule that produced a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskRule {
    Validation,
    ConcurrentTrades,
    AssetClassExposure,
    InstrumentExposure,
    DailyLoss,
    TradeRisk,
    PortfolioRisk,
    ProjectInvestment,
    CrowdfundingExposure,
}

impl RiskRule {
    /// Stable rule name used in logs and command output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::ConcurrentTrades => "concurrent_trades",
            Self::AssetClassExposure => "asset_class_exposure",
            Self::InstrumentExposure => "instrument_exposure",
            Self::DailyLoss => "daily_loss",
            Self::TradeRisk => "trade_risk",
            Self::PortfolioRisk => "portfolio_risk",
            Self::ProjectInvestment => "project_investment",
            Self::CrowdfundingExposure => "crowdfunding_exposure",
        }
    }
}

/// Risk management rejections.
///
/// Each variant names the rule that fired and the values it compared.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RiskError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("concurrent trade limit reached: {open} open {asset_class} trades, limit {limit}")]
    ConcurrentTradeLimit {
        asset_class: AssetClass,
        open: usize,
        limit: usize,
    },

    #[error("asset-class exposure would be exceeded for {asset_class}: attempted {attempted} > limit {limit}")]
    AssetClassExposureExceeded {
        asset_class: AssetClass,
        attempted: Decimal,
        limit: Decimal,
    },

    #[error("exposure on {symbol} would be exceeded: attempted {attempted} > limit {limit}")]
    InstrumentExposureExceeded {
        symbol: String,
        attempted: Decimal,
        limit: Decimal,
    },

    #[error("daily loss limit reached for {asset_class}: loss {loss} >= limit {limit}")]
    DailyLossLimitReached {
        asset_class: AssetClass,
        loss: Decimal,
        limit: Decimal,
    },

    #[error("trade risk exceeded: potential loss {potential_loss} > per-trade cap {limit}")]
    TradeRiskExceeded {
        potential_loss: Decimal,
        limit: Decimal,
    },

    #[error("portfolio risk exceeded: {current} open + {additional} > cap {limit}")]
    PortfolioRiskExceeded {
        current: Decimal,
        additional: Decimal,
        limit: Decimal,
    },

    #[error("investment in project {project_id} exceeded: attempted {attempted} > limit {limit}")]
    ProjectInvestmentExceeded {
        project_id: String,
        attempted: Decimal,
        limit: Decimal,
    },

    #[error("crowdfunding exposure would be exceeded: attempted {attempted} > limit {limit}")]
    CrowdfundingExposureExceeded { attempted: Decimal, limit: Decimal },
}

impl RiskError {
    /// The rule that triggered this rejection.
    #[must_use]
    pub const fn rule(&self) -> RiskRule {
        match self {
            Self::Invalid(_) => RiskRule::Validation,
            Self::ConcurrentTradeLimit { .. } => RiskRule::ConcurrentTrades,
            Self::AssetClassExposureExceeded { .. } => RiskRule::AssetClassExposure,
            Self::InstrumentExposureExceeded { .. } => RiskRule::InstrumentExposure,
            Self::DailyLossLimitReached { .. } => RiskRule::DailyLoss,
            Self::TradeRiskExceeded { .. } => RiskRule::TradeRisk,
            Self::PortfolioRiskExceeded { .. } => RiskRule::PortfolioRisk,
            Self::ProjectInvestmentExceeded { .. } => RiskRule::ProjectInvestment,
            Self::CrowdfundingExposureExceeded { .. } => RiskRule::CrowdfundingExposure,
        }
    }
}

/// Ledger desynchronization and invariant violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("ticket {ticket} is already open")]
    DuplicateTicket { ticket: Ticket },

    #[error("ticket {ticket} not found")]
    NotFound { ticket: Ticket },

    #[error("volume must be positive, got {volume}")]
    NonPositiveVolume { volume: Decimal },

    #[error("price must be positive, got {price}")]
    NonPositivePrice { price: Decimal },

    #[error("arithmetic overflow on ticket {ticket}")]
    Overflow { ticket: Ticket },

    #[error("{asset_class} aggregate would leave the decimal range")]
    AggregateOverflow { asset_class: AssetClass },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Sizing(#[from] SizingError),

    #[error(transparent)]
    Risk(#[from] RiskError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn validation_kind_matches_variant() {
        let err = ValidationError::IdenticalCurrency {
            code: "USD".into(),
        };
        assert_eq!(err.kind(), ValidationErrorKind::IdenticalCurrency);
        assert_eq!(err.to_string(), "base and quote currency are identical (USD)");
    }

    #[test]
    fn risk_error_reports_rule_and_values() {
        let err = RiskError::AssetClassExposureExceeded {
            asset_class: AssetClass::Forex,
            attempted: dec!(600000),
            limit: dec!(500000),
        };
        assert_eq!(err.rule(), RiskRule::AssetClassExposure);
        let message = err.to_string();
        assert!(message.contains("600000"));
        assert!(message.contains("500000"));
    }

    #[test]
    fn validation_rejection_keeps_kind() {
        let err: RiskError = ValidationError::UnlistedPair {
            symbol: "USD/SEK".into(),
        }
        .into();
        assert_eq!(err.rule(), RiskRule::Validation);
        match err {
            RiskError::Invalid(inner) => assert_eq!(inner.kind(), ValidationErrorKind::UnlistedPair),
            other => panic!("expected validation rejection, got {other:?}"),
        }
    }
}
