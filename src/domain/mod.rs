//! Core domain types: instruments, positions, exposure.

mod exposure;
mod id;
mod instrument;
mod money;
mod position;

pub use exposure::ExposureAggregate;
pub use id::Ticket;
pub use instrument::{
    Classification, Currency, Instrument, InstrumentInfo, DEFAULT_MAX_TRADE_SIZE,
    DEFAULT_MIN_TRADE_SIZE,
};
pub use money::{Pnl, Price, Volume};
pub use position::{AssetClass, Position, PositionSnapshot, Side};
