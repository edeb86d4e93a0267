// tests/integration_tests.rs

use approx::assert_relative_eq;
use chrono::NaiveDate;
use more_asserts::assert_gt;
use portfolio_stats::{
    compute_statistics, portfolio_return, recommend, Advisory, PortfolioWeights, PriceTable,
    StatsError, VOLATILITY_THRESHOLD,
};

fn dates(n: u32) -> Vec<NaiveDate> {
    (1..=n)
        .map(|day| NaiveDate::from_ymd_opt(2024, 2, day).expect("REASON"))
        .collect()
}

#[test]
fn test_perfectly_correlated_pair_gets_neutral_advisory() {
    let prices = PriceTable::new(
        dates(3),
        vec![
            ("A".to_string(), vec![100.0, 110.0, 121.0]),
            ("B".to_string(), vec![50.0, 55.0, 60.5]),
        ],
    )
    .unwrap();

    let summary = compute_statistics(&prices).unwrap();
    let advisories = recommend(&summary);

    assert_eq!(summary.correlation_matrix.get("A", "B"), Some(1.0));
    assert_eq!(advisories.len(), 1);
    match &advisories[0] {
        Advisory::CorrelatedTie {
            first,
            second,
            correlation,
            mean_return,
        } => {
            assert_eq!(first, "A");
            assert_eq!(second, "B");
            assert_eq!(*correlation, 1.0);
            assert_relative_eq!(*mean_return, 0.10, epsilon = 1e-12);
        }
        other => panic!("Expected CorrelatedTie advisory, got {:?}", other),
    }
}

#[test]
fn test_same_growth_at_different_price_levels_is_flagged() {
    let prices = PriceTable::new(
        dates(3),
        vec![
            ("A".to_string(), vec![100.0, 110.0, 121.0]),
            ("B".to_string(), vec![30.0, 33.0, 36.3]),
        ],
    )
    .unwrap();

    let summary = compute_statistics(&prices).unwrap();
    let advisories = recommend(&summary);

    assert_eq!(summary.correlation_matrix.get("A", "B"), Some(1.0));
    assert_eq!(advisories.len(), 1);
    assert!(matches!(&advisories[0], Advisory::CorrelatedTie { first, second, .. } if first == "A" && second == "B"));
}

#[test]
fn test_choppy_ticker_gets_volatility_advisory() {
    // Returns of +5%, -5%, +5%, -5%
    let prices = PriceTable::new(
        dates(5),
        vec![("CHOP".to_string(), vec![100.0, 105.0, 99.75, 104.7375, 99.500625])],
    )
    .unwrap();

    let summary = compute_statistics(&prices).unwrap();
    assert_gt!(summary.std_of("CHOP").unwrap(), VOLATILITY_THRESHOLD);

    let advisories = recommend(&summary);
    assert_eq!(advisories.len(), 1);
    assert!(matches!(
        &advisories[0],
        Advisory::HighVolatility { ticker, .. } if ticker == "CHOP"
    ));
}

#[test]
fn test_quiet_uncorrelated_portfolio_is_balanced() {
    let prices = PriceTable::new(
        dates(5),
        vec![
            ("A".to_string(), vec![100.0, 101.0, 100.0, 101.0, 102.0]),
            ("B".to_string(), vec![50.0, 50.0, 50.5, 50.0, 50.5]),
        ],
    )
    .unwrap();

    let advisories = recommend(&compute_statistics(&prices).unwrap());

    assert_eq!(advisories, vec![Advisory::Balanced]);
    assert!(advisories[0].to_string().starts_with("Your portfolio looks okay."));
}

#[test]
fn test_weight_count_mismatch() {
    let tickers = vec!["A".to_string(), "B".to_string(), "C".to_string()];
    let result = PortfolioWeights::from_lists(&tickers, &[0.5, 0.5]);

    match result {
        Err(StatsError::WeightMismatch { reason }) => assert!(reason.contains("3 tickers but 2 weights")),
        other => panic!("Expected WeightMismatch error, got {:?}", other),
    }
}

#[test]
fn test_portfolio_return_of_two_tickers() {
    // Mean returns of 2% and 4%
    let prices = PriceTable::new(
        dates(2),
        vec![
            ("A".to_string(), vec![100.0, 102.0]),
            ("B".to_string(), vec![100.0, 104.0]),
        ],
    )
    .unwrap();
    let summary = compute_statistics(&prices).unwrap();
    let weights = PortfolioWeights::from_lists(&summary.tickers, &[0.5, 0.5]).unwrap();

    assert_relative_eq!(
        portfolio_return(&summary, Some(&weights)).unwrap(),
        0.03,
        epsilon = 1e-12
    );
}

#[test]
fn test_summary_serializes_for_reporters() {
    let prices = PriceTable::new(
        dates(3),
        vec![
            ("A".to_string(), vec![100.0, 101.0, 103.0]),
            ("B".to_string(), vec![10.0, 9.0, 9.5]),
        ],
    )
    .unwrap();

    let json = serde_json::to_value(compute_statistics(&prices).unwrap()).unwrap();

    assert_eq!(json["tickers"], serde_json::json!(["A", "B"]));
    assert_eq!(json["observations"], 2);
    assert!(json["mean_return"]["A"].is_number());
    assert!(json["correlation_matrix"]["values"].is_object());
}
