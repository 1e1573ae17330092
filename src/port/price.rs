//! Market data port.

use crate::domain::Price;

/// Source of last-known prices, keyed by position symbol.
///
/// Implementations must be cheap to call and must not block; the engine
/// queries them while holding its ledger lock.
pub trait PriceSource: Send + Sync {
    /// Last price for `symbol`, or `None` when no quote is available.
    fn price(&self, symbol: &str) -> Option<Price>;
}

impl<F> PriceSource for F
where
    F: Fn(&str) -> Option<Price> + Send + Sync,
{
    fn price(&self, symbol: &str) -> Option<Price> {
        self(symbol)
    }
}
