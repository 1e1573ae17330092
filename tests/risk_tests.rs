//! Tests for limit enforcement through the engine facade.

use std::sync::Arc;

use riskwarden::application::engine::RiskEngine;
use riskwarden::error::{Error, RiskError};
use riskwarden::testkit::{config, domain};
use rust_decimal_macros::dec;
use tokio::sync::Barrier;

/// N concurrent checked opens against a cap of N-1 yield exactly N-1 positions.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_opens_cannot_exceed_trade_cap() {
    const CALLERS: usize = 8;
    let engine = Arc::new(RiskEngine::new(config::concurrent(CALLERS - 1)));
    let barrier = Arc::new(Barrier::new(CALLERS));

    let handles: Vec<_> = (0..CALLERS)
        .map(|i| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            tokio::spawn(async move {
                barrier.wait().await;
                engine.check_and_open(domain::buy(
                    &format!("T-{i}"),
                    "EUR/USD",
                    dec!(10000),
                    dec!(1.10),
                ))
            })
        })
        .collect();

    let mut approved = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => approved += 1,
            Err(Error::Risk(RiskError::ConcurrentTradeLimit { limit, .. })) => {
                assert_eq!(limit, CALLERS - 1);
                rejected += 1;
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(approved, CALLERS - 1);
    assert_eq!(rejected, 1);
    assert_eq!(engine.get_risk_summary(None).open_positions, CALLERS - 1);
}

/// Concurrent investments in one project never overshoot the project cap.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_investments_respect_project_cap() {
    const CALLERS: usize = 6;
    let engine = Arc::new(RiskEngine::default());
    let barrier = Arc::new(Barrier::new(CALLERS));

    // 6 x 2500 against a 10000 cap: four fit
    let handles: Vec<_> = (0..CALLERS)
        .map(|i| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            tokio::spawn(async move {
                barrier.wait().await;
                engine.check_and_invest(format!("C-{i}"), "solar-farm", dec!(2500))
            })
        })
        .collect();

    let mut approved = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            approved += 1;
        }
    }

    assert_eq!(approved, 4);
    assert_eq!(
        engine
            .get_risk_summary(Some(riskwarden::domain::AssetClass::Crowdfunding))
            .exposure,
        dec!(10000)
    );
}

#[test]
fn trade_and_portfolio_risk_budget() {
    let engine = RiskEngine::new(config::risk_caps(dec!(0.02), dec!(0.03)));
    let balance = dec!(100000);

    // 2500 > 2% of 100000
    let err = engine
        .check_and_open(domain::buy_risking("T-1", "EUR/USD", dec!(50000), dec!(1.10), dec!(2500), balance))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Risk(RiskError::TradeRiskExceeded { .. })
    ));

    engine
        .check_and_open(domain::buy_risking("T-2", "EUR/USD", dec!(50000), dec!(1.10), dec!(1500), balance))
        .unwrap();
    assert_eq!(engine.get_risk_summary(None).open_risk, dec!(1500));

    // cumulative 2500 is inside the 3000 portfolio cap
    engine
        .check_and_open(domain::buy_risking("T-3", "GBP/USD", dec!(50000), dec!(1.25), dec!(1000), balance))
        .unwrap();

    let err = engine
        .check_and_open(domain::buy_risking("T-4", "USD/CHF", dec!(50000), dec!(0.90), dec!(1000), balance))
        .unwrap_err();
    match err {
        Error::Risk(RiskError::PortfolioRiskExceeded {
            current,
            additional,
            limit,
        }) => {
            assert_eq!(current, dec!(2500));
            assert_eq!(additional, dec!(1000));
            assert_eq!(limit, dec!(3000));
        }
        other => panic!("unexpected {other}"),
    }

    // closing frees the budget
    engine
        .close_position(&domain::ticket("T-2"), dec!(1.10))
        .unwrap();
    engine
        .check_and_open(domain::buy_risking("T-5", "USD/CHF", dec!(50000), dec!(0.90), dec!(1000), balance))
        .unwrap();
}

#[test]
fn trade_risk_check_is_read_only() {
    let engine = RiskEngine::new(config::risk_caps(dec!(0.02), dec!(0.03)));

    assert!(engine.check_trade_risk(dec!(2500), dec!(100000)).is_err());
    assert!(engine.check_trade_risk(dec!(1500), dec!(100000)).is_ok());
    assert!(engine.check_trade_risk(dec!(1500), dec!(100000)).is_ok());
    assert_eq!(engine.get_risk_summary(None).open_risk, dec!(0));
}

#[test]
fn investment_boundary_is_exact() {
    let engine = RiskEngine::default();
    let cap = engine.limits().crowdfunding.max_investment_per_project;

    assert!(engine.check_investment("wind", cap).is_ok());
    let err = engine.check_investment("wind", cap + dec!(1)).unwrap_err();
    assert_eq!(
        err,
        RiskError::ProjectInvestmentExceeded {
            project_id: "wind".into(),
            attempted: cap + dec!(1),
            limit: cap,
        }
    );
}

#[test]
fn check_does_not_reserve_capacity() {
    let engine = RiskEngine::new(config::concurrent(1));

    assert!(engine.check_trade("EUR/USD", dec!(10000), riskwarden::domain::Side::Buy, dec!(1.1)).is_ok());
    assert!(engine.check_trade("EUR/USD", dec!(10000), riskwarden::domain::Side::Buy, dec!(1.1)).is_ok());

    engine.check_and_open(domain::buy("T-1", "EUR/USD", dec!(10000), dec!(1.1))).unwrap();
    let err = engine
        .check_trade("GBP/USD", dec!(10000), riskwarden::domain::Side::Sell, dec!(1.27))
        .unwrap_err();
    assert!(matches!(err, RiskError::ConcurrentTradeLimit { open: 1, limit: 1, .. }));
}
