//! Position lifecycle and aggregate consistency through the engine.

use riskwarden::application::engine::RiskEngine;
use riskwarden::application::ledger::NotionalUnits;
use riskwarden::application::risk::RiskLimits;
use riskwarden::application::sizing::PositionSizer;
use riskwarden::application::validator::InstrumentValidator;
use riskwarden::domain::{AssetClass, Side};
use riskwarden::error::LedgerError;
use riskwarden::testkit::{domain, price::StaticPriceSource};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn assert_global_is_sum(engine: &RiskEngine) {
    let global = engine.get_risk_summary(None);
    let classes: Vec<_> = AssetClass::ALL
        .into_iter()
        .map(|c| engine.get_risk_summary(Some(c)))
        .collect();

    assert_eq!(global.exposure, classes.iter().map(|c| c.exposure).sum::<Decimal>());
    assert_eq!(global.daily_pnl, classes.iter().map(|c| c.daily_pnl).sum::<Decimal>());
    assert_eq!(
        global.open_positions,
        classes.iter().map(|c| c.open_positions).sum::<usize>()
    );
}

#[test]
fn open_then_close_at_entry_is_neutral() {
    let engine = RiskEngine::default();
    let before = engine.get_risk_summary(Some(AssetClass::Forex));

    engine
        .open_position("T-1", "EUR/USD", AssetClass::Forex, Side::Buy, dec!(25000), dec!(1.0850))
        .unwrap();
    let snapshot = engine.close_position(&domain::ticket("T-1"), dec!(1.0850)).unwrap();

    let after = engine.get_risk_summary(Some(AssetClass::Forex));
    assert_eq!(snapshot.realized_pnl, dec!(0));
    assert_eq!(after.exposure, before.exposure);
    assert_eq!(after.daily_pnl, before.daily_pnl);
    assert!(engine.position(&domain::ticket("T-1")).is_none());
}

#[test]
fn global_matches_classes_through_lifecycle() {
    let engine = RiskEngine::default();
    let prices = StaticPriceSource::new()
        .with("EUR/USD", dec!(1.1010))
        .with("solar-farm", dec!(1.05));

    engine
        .open_position("F-1", "EUR/USD", AssetClass::Forex, Side::Buy, dec!(10000), dec!(1.1000))
        .unwrap();
    assert_global_is_sum(&engine);
    engine.check_and_invest("C-1", "solar-farm", dec!(4000)).unwrap();
    assert_global_is_sum(&engine);

    let report = engine.mark_to_market(&prices);
    assert_eq!(report.updated, 2);
    assert_eq!(report.pnl_delta, dec!(210));
    assert_global_is_sum(&engine);

    prices.set("EUR/USD", dec!(1.0990));
    engine.mark_to_market(&prices);
    assert_eq!(engine.get_risk_summary(Some(AssetClass::Forex)).daily_pnl, dec!(-10));
    assert_global_is_sum(&engine);

    engine.close_position(&domain::ticket("F-1"), dec!(1.0995)).unwrap();
    assert_global_is_sum(&engine);
    let forex = engine.get_risk_summary(Some(AssetClass::Forex));
    assert_eq!(forex.realized_pnl, dec!(-5));
    assert_eq!(forex.daily_pnl, dec!(-5));

    engine.reset_daily_pl(AssetClass::Forex).unwrap();
    assert_global_is_sum(&engine);
    assert_eq!(engine.get_risk_summary(None).daily_pnl, dec!(200));
}

#[test]
fn missing_quotes_are_reported() {
    let engine = RiskEngine::default();
    engine
        .open_position("F-1", "EUR/USD", AssetClass::Forex, Side::Sell, dec!(10000), dec!(1.1))
        .unwrap();
    engine
        .open_position("F-2", "USD/JPY", AssetClass::Forex, Side::Buy, dec!(10000), dec!(150))
        .unwrap();

    let report = engine.mark_to_market(&StaticPriceSource::new().with("USD/JPY", dec!(151)));

    assert_eq!(report.updated, 1);
    assert_eq!(report.missing, vec![domain::ticket("F-1")]);
    assert_eq!(report.pnl_delta, dec!(10000));
}

#[test]
fn ledger_errors_are_reported() {
    let engine = RiskEngine::default();
    engine
        .open_position("T-1", "EUR/USD", AssetClass::Forex, Side::Buy, dec!(10000), dec!(1.1))
        .unwrap();

    assert!(matches!(
        engine.open_position("T-1", "EUR/USD", AssetClass::Forex, Side::Buy, dec!(10000), dec!(1.1)),
        Err(LedgerError::DuplicateTicket { .. })
    ));
    assert!(matches!(
        engine.update_position(&domain::ticket("T-9"), dec!(1.1)),
        Err(LedgerError::NotFound { .. })
    ));
    assert!(matches!(
        engine.close_position(&domain::ticket("T-9"), dec!(1.1)),
        Err(LedgerError::NotFound { .. })
    ));
}

#[test]
fn notional_unit_survives_limit_replacement() {
    let engine = RiskEngine::with_parts(
        RiskLimits::default(),
        NotionalUnits {
            forex: dec!(100),
            crowdfunding: Decimal::ONE,
        },
        InstrumentValidator::default(),
        PositionSizer::default(),
    );

    engine
        .open_position("T-1", "EUR/USD", AssetClass::Forex, Side::Buy, dec!(1000), dec!(1.1))
        .unwrap();
    engine.replace_limits(RiskLimits::default());
    engine.close_position(&domain::ticket("T-1"), dec!(1.1)).unwrap();

    assert_eq!(engine.get_risk_summary(None).exposure, dec!(0));
}

#[test]
fn open_positions_are_sorted_by_ticket() {
    let engine = RiskEngine::default();
    for id in ["B", "C", "A"] {
        engine
            .open_position(id, "EUR/USD", AssetClass::Forex, Side::Buy, dec!(1000), dec!(1.1))
            .unwrap();
    }

    let tickets: Vec<String> = engine
        .open_positions()
        .iter()
        .map(|p| p.ticket().to_string())
        .collect();
    assert_eq!(tickets, ["A", "B", "C"]);
}

#[test]
fn oversized_values_fail_without_touching_the_ledger() {
    let engine = RiskEngine::default();
    let huge = dec!(100000000000000000000);

    let err = engine
        .size_position(dec!(1.0000000001), dec!(1.0), dec!(10000000000000000000), dec!(1))
        .unwrap_err();
    assert!(matches!(err, riskwarden::error::SizingError::Overflow { .. }));

    engine
        .open_position("T-big", "EUR/USD", AssetClass::Forex, Side::Buy, huge, Decimal::ONE)
        .unwrap();
    let before = engine.get_risk_summary(None);
    let ticket = domain::ticket("T-big");

    let err = engine.update_position(&ticket, huge).unwrap_err();
    assert_eq!(err, LedgerError::Overflow { ticket: ticket.clone() });
    let err = engine.close_position(&ticket, huge).unwrap_err();
    assert_eq!(err, LedgerError::Overflow { ticket: ticket.clone() });

    assert_eq!(engine.get_risk_summary(None), before);
    assert!(engine.position(&ticket).is_some());
    assert_global_is_sum(&engine);

    engine.close_position(&ticket, dec!(2)).unwrap();
    assert_eq!(engine.get_risk_summary(None).exposure, dec!(0));
    assert_eq!(engine.get_risk_summary(None).open_positions, 0);
}
