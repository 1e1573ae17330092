//! Instrument and volume validation against the catalog.

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::application::catalog::InstrumentCatalog;
use crate::domain::{Currency, Instrument, InstrumentInfo, Volume};
use crate::error::ValidationError;

/// Characters accepted between base and quote codes.
pub const SEPARATORS: [char; 3] = ['/', '_', '-'];

/// Pure validation over a shared, immutable catalog.
#[derive(Debug, Clone)]
pub struct InstrumentValidator {
    catalog: Arc<InstrumentCatalog>,
}

impl InstrumentValidator {
    #[must_use]
    pub const fn new(catalog: Arc<InstrumentCatalog>) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &InstrumentCatalog {
        &self.catalog
    }

    /// Validate a pair symbol such as `EUR/USD`, `eur_usd` or `GBP-JPY`.
    ///
    /// Checks run in a fixed order: format, identical codes, currency
    /// membership, catalog listing.
    pub fn validate_pair(&self, symbol: &str) -> Result<&Instrument, ValidationError> {
        let normalized = symbol.trim().to_ascii_uppercase();
        let parts: Vec<&str> = normalized.split(|c: char| SEPARATORS.contains(&c)).collect();

        let (base, quote) = match parts.as_slice() {
            [base, quote] if is_code(base) && is_code(quote) => (*base, *quote),
            _ => {
                return Err(ValidationError::InvalidFormat {
                    symbol: symbol.to_string(),
                })
            }
        };

        if base == quote {
            return Err(ValidationError::IdenticalCurrency {
                code: base.to_string(),
            });
        }

        let base_currency = self.known(base)?;
        let quote_currency = self.known(quote)?;

        self.catalog
            .get(base_currency, quote_currency)
            .ok_or_else(|| ValidationError::UnlistedPair {
                symbol: format!("{base}/{quote}"),
            })
    }

    /// Check `volume` against the instrument's trade size bounds.
    pub fn validate_volume(
        &self,
        instrument: &Instrument,
        volume: Volume,
    ) -> Result<(), ValidationError> {
        if volume <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveVolume { volume });
        }

        let min = instrument.min_trade_size();
        if volume < min {
            return Err(ValidationError::BelowMinimumVolume { volume, min });
        }

        let max = instrument.max_trade_size();
        if volume > max {
            return Err(ValidationError::AboveMaximumVolume { volume, max });
        }

        Ok(())
    }

    /// Read-only projection for a listed pair; `None` when validation fails.
    #[must_use]
    pub fn get_pair_info(&self, symbol: &str) -> Option<InstrumentInfo> {
        self.validate_pair(symbol).ok().map(Instrument::info)
    }

    fn known(&self, code: &str) -> Result<Currency, ValidationError> {
        self.catalog
            .currency(code)
            .ok_or_else(|| ValidationError::UnknownCurrency {
                code: code.to_string(),
            })
    }
}

impl Default for InstrumentValidator {
    fn default() -> Self {
        Self::new(Arc::new(InstrumentCatalog::standard()))
    }
}

/// Parse operator-supplied volume text.
pub fn parse_volume(input: &str) -> Result<Volume, ValidationError> {
    Decimal::from_str(input.trim()).map_err(|_| ValidationError::NonNumericVolume {
        input: input.to_string(),
    })
}

fn is_code(part: &str) -> bool {
    part.len() == 3 && part.bytes().all(|b| b.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Classification;
    use crate::error::ValidationErrorKind;
    use rust_decimal_macros::dec;

    fn kind_of(symbol: &str) -> ValidationErrorKind {
        InstrumentValidator::default()
            .validate_pair(symbol)
            .unwrap_err()
            .kind()
    }

    #[test]
    fn every_listed_pair_validates() {
        let validator = InstrumentValidator::default();
        let symbols: Vec<String> = validator.catalog().instruments().map(Instrument::symbol).collect();

        for symbol in symbols {
            let info = validator.get_pair_info(&symbol).unwrap();
            assert_eq!(info.symbol, symbol);
            assert!(info.typical_spread > Decimal::ZERO);
        }
    }

    #[test]
    fn accepts_alternate_separators_and_case() {
        let validator = InstrumentValidator::default();

        for symbol in ["EUR/USD", "eur_usd", " Eur-Usd "] {
            let instrument = validator.validate_pair(symbol).unwrap();
            assert_eq!(instrument.symbol(), "EUR/USD");
            assert_eq!(instrument.classification(), Classification::Major);
        }
    }

    #[test]
    fn rejects_malformed_symbols() {
        for symbol in ["EURUSD", "EUR//USD", "EU/USD", "EUR/USD/JPY", "EU1/USD", "", "EUR USD"] {
            assert_eq!(kind_of(symbol), ValidationErrorKind::InvalidFormat, "{symbol}");
        }
    }

    #[test]
    fn identical_codes_win_over_unknown_currency() {
        assert_eq!(kind_of("USD/USD"), ValidationErrorKind::IdenticalCurrency);
        assert_eq!(kind_of("XYZ/XYZ"), ValidationErrorKind::IdenticalCurrency);
    }

    #[test]
    fn unknown_currency_names_the_code() {
        let err = InstrumentValidator::default()
            .validate_pair("EUR/XYZ")
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownCurrency {
                code: "XYZ".into()
            }
        );
    }

    #[test]
    fn known_currencies_must_form_listed_pair() {
        assert_eq!(kind_of("USD/SEK"), ValidationErrorKind::UnlistedPair);
        assert_eq!(kind_of("USD/EUR"), ValidationErrorKind::UnlistedPair);
    }

    #[test]
    fn volume_bounds_are_distinct_reasons() {
        let validator = InstrumentValidator::default();
        let eur_usd = validator.validate_pair("EUR/USD").unwrap().clone();

        assert!(validator.validate_volume(&eur_usd, dec!(1000)).is_ok());
        assert!(validator.validate_volume(&eur_usd, dec!(1000000)).is_ok());

        let kinds: Vec<_> = [dec!(0), dec!(-5), dec!(999.99), dec!(1000000.01)]
            .into_iter()
            .map(|v| validator.validate_volume(&eur_usd, v).unwrap_err().kind())
            .collect();

        assert_eq!(
            kinds,
            vec![
                ValidationErrorKind::NonPositiveVolume,
                ValidationErrorKind::NonPositiveVolume,
                ValidationErrorKind::BelowMinimumVolume,
                ValidationErrorKind::AboveMaximumVolume,
            ]
        );
    }

    #[test]
    fn minor_pair_uses_its_own_ceiling() {
        let validator = InstrumentValidator::default();
        let eur_gbp = validator.validate_pair("EUR/GBP").unwrap().clone();

        let err = validator.validate_volume(&eur_gbp, dec!(600000)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::AboveMaximumVolume {
                volume: dec!(600000),
                max: dec!(500000),
            }
        );
    }

    #[test]
    fn parse_volume_rejects_text() {
        assert_eq!(parse_volume(" 25000 ").unwrap(), dec!(25000));
        assert_eq!(
            parse_volume("ten").unwrap_err().kind(),
            ValidationErrorKind::NonNumericVolume
        );
    }

    #[test]
    fn unknown_symbol_has_no_info() {
        assert!(InstrumentValidator::default().get_pair_info("USD/SEK").is_none());
    }
}
