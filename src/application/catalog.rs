//! Static registry of tradeable currency pairs.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{Classification, Currency, Instrument};

/// Currencies the catalog recognises, whether or not they appear in a listed pair.
pub const KNOWN_CURRENCIES: [&str; 13] = [
    "USD", "EUR", "GBP", "JPY", "CHF", "CAD", "AUD", "NZD", "SEK", "NOK", "DKK", "SGD", "HKD",
];

/// Major pairs with typical spread as `(mantissa, scale)`.
const MAJORS: [(&str, &str, i64, u32); 7] = [
    ("EUR", "USD", 1, 4),
    ("GBP", "USD", 2, 4),
    ("USD", "JPY", 2, 2),
    ("USD", "CHF", 2, 4),
    ("AUD", "USD", 2, 4),
    ("USD", "CAD", 2, 4),
    ("NZD", "USD", 3, 4),
];

const MINORS: [(&str, &str, i64, u32); 13] = [
    ("EUR", "GBP", 2, 4),
    ("EUR", "JPY", 3, 2),
    ("GBP", "JPY", 4, 2),
    ("EUR", "CHF", 3, 4),
    ("EUR", "AUD", 4, 4),
    ("EUR", "CAD", 4, 4),
    ("GBP", "CHF", 5, 4),
    ("GBP", "AUD", 5, 4),
    ("AUD", "JPY", 3, 2),
    ("CAD", "JPY", 4, 2),
    ("CHF", "JPY", 4, 2),
    ("NZD", "JPY", 4, 2),
    ("AUD", "NZD", 5, 4),
];

/// Minor pairs trade in thinner books and carry a lower size ceiling.
const MINOR_MAX_TRADE_SIZE: Decimal = dec!(500000);

/// Lookup table of currencies and listed pairs. No mutable state.
#[derive(Debug, Clone, Default)]
pub struct InstrumentCatalog {
    currencies: Vec<Currency>,
    instruments: BTreeMap<(Currency, Currency), Instrument>,
}

impl InstrumentCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the standard currency set, seven majors and the common crosses.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for code in KNOWN_CURRENCIES {
            catalog = catalog.with_currency(code);
        }

        for (base, quote, mantissa, scale) in MAJORS {
            catalog = catalog.with_instrument(Instrument::new(
                Currency::new(base),
                Currency::new(quote),
                Classification::Major,
                Decimal::new(mantissa, scale),
            ));
        }

        for (base, quote, mantissa, scale) in MINORS {
            catalog = catalog.with_instrument(
                Instrument::new(
                    Currency::new(base),
                    Currency::new(quote),
                    Classification::Minor,
                    Decimal::new(mantissa, scale),
                )
                .with_trade_size(None, Some(MINOR_MAX_TRADE_SIZE)),
            );
        }

        catalog
    }

    /// Register a known currency.
    #[must_use]
    pub fn with_currency(mut self, code: &'static str) -> Self {
        let currency = Currency::new(code);
        if !self.currencies.contains(&currency) {
            self.currencies.push(currency);
        }
        self
    }

    /// List an instrument. Its currencies become known as a side effect.
    #[must_use]
    pub fn with_instrument(mut self, instrument: Instrument) -> Self {
        for currency in [instrument.base(), instrument.quote()] {
            if !self.currencies.contains(&currency) {
                self.currencies.push(currency);
            }
        }
        self.instruments
            .insert((instrument.base(), instrument.quote()), instrument);
        self
    }

    /// Resolve a code against the known currency set.
    #[must_use]
    pub fn currency(&self, code: &str) -> Option<Currency> {
        self.currencies.iter().copied().find(|c| c.as_str() == code)
    }

    /// Look up a listed pair.
    #[must_use]
    pub fn get(&self, base: Currency, quote: Currency) -> Option<&Instrument> {
        self.instruments.get(&(base, quote))
    }

    /// All listed instruments in symbol order.
    pub fn instruments(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.values()
    }

    /// Listed instruments of one classification.
    pub fn by_classification(
        &self,
        classification: Classification,
    ) -> impl Iterator<Item = &Instrument> {
        self.instruments()
            .filter(move |i| i.classification() == classification)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}
