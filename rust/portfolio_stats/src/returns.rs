// src/returns.rs

use tracing::debug;

use crate::error::{StatsError, StatsResult};
use crate::models::{PriceTable, ReturnSeries, ReturnTable};

// Simple (arithmetic) returns of every ticker: r[i] = (p[i] - p[i-1]) / p[i-1]
pub fn compute_returns(prices: &PriceTable) -> StatsResult<ReturnTable> {
    if prices.len() < 2 {
        return Err(StatsError::InsufficientData {
            observations: prices.len(),
        });
    }

    let dates = prices.dates();
    let mut series = Vec::with_capacity(prices.tickers().len());

    for (ticker, closes) in prices.columns() {
        let mut points = Vec::with_capacity(closes.len() - 1);

        for (i, window) in closes.windows(2).enumerate() {
            let (start_price, end_price) = (window[0], window[1]);

            // Zero, negative and NaN prior prices are all rejected here
            if !(start_price > 0.0) {
                return Err(StatsError::DivisionByZero {
                    ticker: ticker.to_string(),
                    date: dates[i],
                    price: start_price,
                });
            }

            points.push((dates[i + 1], (end_price - start_price) / start_price));
        }

        series.push(ReturnSeries {
            ticker: ticker.to_string(),
            points,
        });
    }

    debug!(
        tickers = series.len(),
        observations = dates.len() - 1,
        "computed daily returns"
    );

    Ok(ReturnTable::new(dates[1..].to_vec(), series))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn dates(n: u32) -> Vec<NaiveDate> {
        (1..=n)
            .map(|day| NaiveDate::from_ymd_opt(2024, 3, day).expect("REASON"))
            .collect()
    }

    #[test]
    fn test_returns_of_growing_prices() {
        let prices = PriceTable::new(
            dates(3),
            vec![
                ("A".to_string(), vec![100.0, 110.0, 121.0]),
                ("B".to_string(), vec![50.0, 55.0, 60.5]),
            ],
        )
        .unwrap();

        let returns = compute_returns(&prices).unwrap();

        assert_eq!(returns.observations(), 2);
        assert_eq!(returns.dates(), &dates(3)[1..]);
        for ticker in ["A", "B"] {
            let series = returns.get(ticker).unwrap();
            assert_eq!(series.len(), 2);
            for value in series.values() {
                assert_relative_eq!(value, 0.10, epsilon = 1e-12);
            }
        }
        assert_relative_eq!(returns.mean_return("A").unwrap(), 0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_returns_are_dated_by_the_later_price() {
        let prices = PriceTable::new(
            dates(3),
            vec![("A".to_string(), vec![100.0, 90.0, 99.0])],
        )
        .unwrap();

        let series = compute_returns(&prices).unwrap().get("A").unwrap().clone();

        assert_eq!(series.points[0].0, dates(3)[1]);
        assert_relative_eq!(series.points[0].1, -0.10, epsilon = 1e-12);
        assert_eq!(series.points[1].0, dates(3)[2]);
        assert_relative_eq!(series.points[1].1, 0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_single_observation_is_insufficient() {
        let prices = PriceTable::new(dates(1), vec![("A".to_string(), vec![100.0])]).unwrap();

        assert_eq!(
            compute_returns(&prices),
            Err(StatsError::InsufficientData { observations: 1 })
        );
    }

    #[test]
    fn test_zero_prior_price_is_rejected() {
        let prices = PriceTable::new(
            dates(3),
            vec![
                ("A".to_string(), vec![100.0, 101.0, 102.0]),
                ("B".to_string(), vec![10.0, 0.0, 5.0]),
            ],
        )
        .unwrap();

        match compute_returns(&prices) {
            Err(StatsError::DivisionByZero { ticker, date, price }) => {
                assert_eq!(ticker, "B");
                assert_eq!(date, dates(3)[1]);
                assert_eq!(price, 0.0);
            }
            other => panic!("Expected DivisionByZero error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_prior_price_is_rejected() {
        let prices = PriceTable::new(
            dates(2),
            vec![("A".to_string(), vec![-5.0, 10.0])],
        )
        .unwrap();

        assert!(matches!(
            compute_returns(&prices),
            Err(StatsError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_mean_return_of_unknown_ticker() {
        let prices = PriceTable::new(
            dates(2),
            vec![("A".to_string(), vec![100.0, 101.0])],
        )
        .unwrap();

        let returns = compute_returns(&prices).unwrap();
        assert_eq!(
            returns.mean_return("ZZZ"),
            Err(StatsError::UnknownTicker("ZZZ".to_string()))
        );
    }

    #[test]
    fn test_return_matrix_layout() {
        let prices = PriceTable::new(
            dates(3),
            vec![
                ("A".to_string(), vec![100.0, 110.0, 99.0]),
                ("B".to_string(), vec![20.0, 21.0, 21.0]),
            ],
        )
        .unwrap();

        let matrix = compute_returns(&prices).unwrap().to_matrix();

        assert_eq!(matrix.shape(), &[2, 2]);
        assert_relative_eq!(matrix[[0, 0]], 0.10, epsilon = 1e-12);
        assert_relative_eq!(matrix[[1, 0]], -0.10, epsilon = 1e-12);
        assert_relative_eq!(matrix[[0, 1]], 0.05, epsilon = 1e-12);
        assert_relative_eq!(matrix[[1, 1]], 0.0, epsilon = 1e-12);
    }
}
