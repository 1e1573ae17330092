//! Builders for positions and requests used across tests.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::application::engine::TradeRequest;
use crate::domain::{AssetClass, Position, Price, Side, Ticket, Volume};

/// Create a [`Ticket`] from a string.
pub fn ticket(id: &str) -> Ticket {
    Ticket::from(id)
}

/// Forex position opened now, without a stop.
pub fn forex_position(
    id: &str,
    symbol: &str,
    side: Side,
    volume: Volume,
    entry_price: Price,
) -> Position {
    Position::new(
        ticket(id),
        symbol,
        AssetClass::Forex,
        side,
        volume,
        entry_price,
        Utc::now(),
    )
}

/// Buy request with a fixed volume.
pub fn buy(id: &str, symbol: &str, volume: Volume, entry_price: Price) -> TradeRequest {
    TradeRequest::new(symbol, Side::Buy, entry_price)
        .with_ticket(id)
        .with_volume(volume)
}

/// Buy request whose stop is placed so that `risk` is lost at the stop.
///
/// The stop sits `risk / volume` below `entry_price`.
pub fn buy_risking(
    id: &str,
    symbol: &str,
    volume: Volume,
    entry_price: Price,
    risk: Decimal,
    account_balance: Decimal,
) -> TradeRequest {
    buy(id, symbol, volume, entry_price)
        .with_stop_loss(entry_price - risk / volume)
        .with_account_balance(account_balance)
}
