//! In-memory price source.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::Price;
use crate::port::PriceSource;

/// Price source backed by a map that tests update between marks.
#[derive(Debug, Default)]
pub struct StaticPriceSource {
    prices: RwLock<HashMap<String, Price>>,
}

impl StaticPriceSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(self, symbol: &str, price: Price) -> Self {
        self.set(symbol, price);
        self
    }

    pub fn set(&self, symbol: &str, price: Price) {
        self.prices.write().insert(symbol.to_string(), price);
    }

    pub fn remove(&self, symbol: &str) {
        self.prices.write().remove(symbol);
    }
}

impl PriceSource for StaticPriceSource {
    fn price(&self, symbol: &str) -> Option<Price> {
        self.prices.read().get(symbol).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn set_and_remove() {
        let source = StaticPriceSource::new().with("EUR/USD", dec!(1.1));
        assert_eq!(source.price("EUR/USD"), Some(dec!(1.1)));

        source.set("EUR/USD", dec!(1.2));
        assert_eq!(source.price("EUR/USD"), Some(dec!(1.2)));

        source.remove("EUR/USD");
        assert_eq!(source.price("EUR/USD"), None);
    }
}
