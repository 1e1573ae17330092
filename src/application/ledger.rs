//! Open-position ledger with running per-asset-class aggregates.
//!
//! Every mutation builds the affected class aggregate, recomputes the global
//! aggregate from the per-class values and only then commits both, so the
//! global figures are never maintained independently. A mutation whose
//! arithmetic leaves the decimal range fails with no effect on the ledger.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use rust_decimal::Decimal;

use crate::domain::{
    AssetClass, ExposureAggregate, Pnl, Position, PositionSnapshot, Price, Side, Ticket, Volume,
};
use crate::error::LedgerError;

/// Multipliers from trade volume to currency exposure, fixed for a ledger's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotionalUnits {
    pub forex: Decimal,
    pub crowdfunding: Decimal,
}

impl NotionalUnits {
    #[must_use]
    pub const fn get(&self, asset_class: AssetClass) -> Decimal {
        match asset_class {
            AssetClass::Forex => self.forex,
            AssetClass::Crowdfunding => self.crowdfunding,
        }
    }
}

impl Default for NotionalUnits {
    fn default() -> Self {
        Self {
            forex: Decimal::ONE,
            crowdfunding: Decimal::ONE,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    position: Position,
    /// Exposure added at open; subtracted verbatim at close.
    notional: Decimal,
}

/// Owns the open positions and the exposure/P&L aggregates derived from them.
#[derive(Debug)]
pub struct PositionLedger {
    entries: HashMap<Ticket, Entry>,
    classes: BTreeMap<AssetClass, ExposureAggregate>,
    global: ExposureAggregate,
    units: NotionalUnits,
}

impl PositionLedger {
    #[must_use]
    pub fn new(units: NotionalUnits) -> Self {
        let classes = AssetClass::ALL
            .into_iter()
            .map(|class| (class, ExposureAggregate::empty(Some(class))))
            .collect();
        Self {
            entries: HashMap::new(),
            classes,
            global: ExposureAggregate::empty(None),
            units,
        }
    }

    #[must_use]
    pub const fn units(&self) -> NotionalUnits {
        self.units
    }

    /// Exposure `volume` would add in `asset_class`, saturating at the decimal range.
    #[must_use]
    pub fn notional(&self, asset_class: AssetClass, volume: Volume) -> Decimal {
        volume.saturating_mul(self.units.get(asset_class))
    }

    /// Record a newly opened position marked at its entry price.
    pub fn open_position(
        &mut self,
        ticket: Ticket,
        symbol: impl Into<String>,
        asset_class: AssetClass,
        side: Side,
        volume: Volume,
        entry_price: Price,
    ) -> Result<(), LedgerError> {
        self.insert(Position::new(
            ticket,
            symbol,
            asset_class,
            side,
            volume,
            entry_price,
            Utc::now(),
        ))
    }

    /// Record a fully built position, including any stop-loss it carries.
    pub fn insert(&mut self, position: Position) -> Result<(), LedgerError> {
        if self.entries.contains_key(position.ticket()) {
            return Err(LedgerError::DuplicateTicket {
                ticket: position.ticket().clone(),
            });
        }
        if position.volume() <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveVolume {
                volume: position.volume(),
            });
        }
        ensure_positive_price(position.entry_price())?;

        let asset_class = position.asset_class();
        let notional = position
            .volume()
            .checked_mul(self.units.get(asset_class))
            .ok_or_else(|| LedgerError::Overflow {
                ticket: position.ticket().clone(),
            })?;
        let risk = position.risk_amount()?;

        let mut class = self.get_exposure(Some(asset_class));
        let overflow = || LedgerError::AggregateOverflow { asset_class };
        class.exposure = class.exposure.checked_add(notional).ok_or_else(overflow)?;
        class.open_positions += 1;
        class.open_risk = class.open_risk.checked_add(risk).ok_or_else(overflow)?;
        class.unrealized_pnl = class
            .unrealized_pnl
            .checked_add(position.unrealized_pnl())
            .ok_or_else(overflow)?;
        self.commit(class)?;

        self.entries
            .insert(position.ticket().clone(), Entry { position, notional });
        Ok(())
    }

    /// Re-mark an open position.
    ///
    /// Returns the incremental P&L applied to the class's daily total.
    pub fn update_position(
        &mut self,
        ticket: &Ticket,
        current_price: Price,
    ) -> Result<Pnl, LedgerError> {
        ensure_positive_price(current_price)?;
        let mut position = self.entry(ticket)?.position.clone();
        let delta = position.mark(current_price)?;

        let asset_class = position.asset_class();
        let overflow = || LedgerError::AggregateOverflow { asset_class };
        let mut class = self.get_exposure(Some(asset_class));
        class.daily_pnl = class.daily_pnl.checked_add(delta).ok_or_else(overflow)?;
        class.unrealized_pnl = class
            .unrealized_pnl
            .checked_add(delta)
            .ok_or_else(overflow)?;
        self.commit(class)?;

        if let Some(entry) = self.entries.get_mut(ticket) {
            entry.position = position;
        }
        Ok(delta)
    }

    /// Apply a final mark, realize its P&L and remove the position.
    ///
    /// The class's daily P&L keeps running; only [`reset_daily_pl`](Self::reset_daily_pl)
    /// clears it. The position is removed only once the final mark and the
    /// aggregate updates have all succeeded.
    pub fn close_position(
        &mut self,
        ticket: &Ticket,
        close_price: Price,
    ) -> Result<PositionSnapshot, LedgerError> {
        ensure_positive_price(close_price)?;
        let entry = self.entry(ticket)?;
        let notional = entry.notional;
        let mut position = entry.position.clone();

        let previous = position.unrealized_pnl();
        let delta = position.mark(close_price)?;
        let realized = position.unrealized_pnl();
        let risk = position.risk_amount()?;

        let asset_class = position.asset_class();
        let overflow = || LedgerError::AggregateOverflow { asset_class };
        let mut class = self.get_exposure(Some(asset_class));
        class.exposure = class.exposure.checked_sub(notional).ok_or_else(overflow)?;
        class.open_positions = class.open_positions.saturating_sub(1);
        class.open_risk = class.open_risk.checked_sub(risk).ok_or_else(overflow)?;
        class.daily_pnl = class.daily_pnl.checked_add(delta).ok_or_else(overflow)?;
        class.unrealized_pnl = class
            .unrealized_pnl
            .checked_sub(previous)
            .ok_or_else(overflow)?;
        class.realized_pnl = class
            .realized_pnl
            .checked_add(realized)
            .ok_or_else(overflow)?;
        self.commit(class)?;

        self.entries.remove(ticket);
        Ok(position.into_snapshot(Utc::now()))
    }

    /// Snapshot of one class's aggregate, or the global aggregate for `None`.
    #[must_use]
    pub fn get_exposure(&self, asset_class: Option<AssetClass>) -> ExposureAggregate {
        match asset_class {
            Some(class) => self
                .classes
                .get(&class)
                .cloned()
                .unwrap_or_else(|| ExposureAggregate::empty(Some(class))),
            None => self.global.clone(),
        }
    }

    /// Day rollover: clear daily and realized P&L for `asset_class`.
    pub fn reset_daily_pl(&mut self, asset_class: AssetClass) -> Result<(), LedgerError> {
        let mut class = self.get_exposure(Some(asset_class));
        class.daily_pnl = Decimal::ZERO;
        class.realized_pnl = Decimal::ZERO;
        self.commit(class)
    }

    #[must_use]
    pub fn position(&self, ticket: &Ticket) -> Option<&Position> {
        self.entries.get(ticket).map(|e| &e.position)
    }

    pub fn open_positions(&self) -> impl Iterator<Item = &Position> {
        self.entries.values().map(|e| &e.position)
    }

    #[must_use]
    pub fn open_count(&self, asset_class: AssetClass) -> usize {
        self.classes
            .get(&asset_class)
            .map_or(0, |c| c.open_positions)
    }

    /// Exposure already held on one symbol (a pair, or a crowdfunding project).
    #[must_use]
    pub fn symbol_exposure(&self, asset_class: AssetClass, symbol: &str) -> Decimal {
        self.entries
            .values()
            .filter(|e| e.position.asset_class() == asset_class && e.position.symbol() == symbol)
            .map(|e| e.notional)
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, ticket: &Ticket) -> Result<&Entry, LedgerError> {
        self.entries.get(ticket).ok_or_else(|| LedgerError::NotFound {
            ticket: ticket.clone(),
        })
    }

    /// Store `updated` as its class aggregate together with the global
    /// aggregate it implies. Nothing is stored if the global sum overflows.
    fn commit(&mut self, updated: ExposureAggregate) -> Result<(), LedgerError> {
        let Some(asset_class) = updated.asset_class else {
            return Ok(());
        };
        let global = self
            .classes
            .iter()
            .filter(|(class, _)| **class != asset_class)
            .map(|(_, aggregate)| aggregate)
            .chain(std::iter::once(&updated))
            .try_fold(ExposureAggregate::empty(None), |global, aggregate| {
                global.checked_add(aggregate)
            })
            .ok_or(LedgerError::AggregateOverflow { asset_class })?;

        self.classes.insert(asset_class, updated);
        self.global = global;
        Ok(())
    }
}

impl Default for PositionLedger {
    fn default() -> Self {
        Self::new(NotionalUnits::default())
    }
}

fn ensure_positive_price(price: Price) -> Result<(), LedgerError> {
    if price <= Decimal::ZERO {
        return Err(LedgerError::NonPositivePrice { price });
    }
    Ok(())
}
