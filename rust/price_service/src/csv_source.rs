// src/csv_source.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use portfolio_stats::PriceTable;
use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;
use validator::Validate;

use crate::error::QueryError;
use crate::models::PriceRequest;
use crate::provider::{align_histories, PriceHistory, PriceSeriesProvider};

// Wide price file: a `Date` column followed by one adjusted-close column per ticker.
// Blank cells are treated as missing observations.
pub struct CsvPriceSource {
    path: PathBuf,
}

impl CsvPriceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvPriceSource { path: path.into() }
    }

    pub fn read_histories(&self) -> Result<Vec<(String, PriceHistory)>, QueryError> {
        let file = std::fs::File::open(&self.path)?;
        parse_histories(file)
    }
}

pub fn parse_histories<R: Read>(reader: R) -> Result<Vec<(String, PriceHistory)>, QueryError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let tickers: Vec<String> = reader
        .headers()?
        .iter()
        .skip(1)
        .map(|h| h.to_uppercase())
        .collect();
    let mut histories: Vec<PriceHistory> = vec![PriceHistory::new(); tickers.len()];

    for record in reader.records() {
        let record = record?;
        let date_str = record.get(0).unwrap_or_default();
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|_| QueryError::InvalidDateFormat(date_str.to_string()))?;

        for (idx, cell) in record.iter().skip(1).enumerate() {
            if cell.is_empty() || idx >= tickers.len() {
                continue;
            }
            let price = cell
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| QueryError::InvalidPrice {
                    ticker: tickers[idx].clone(),
                    value: cell.to_string(),
                })?;
            histories[idx].insert(date, price);
        }
    }

    Ok(tickers.into_iter().zip(histories).collect())
}

#[async_trait]
impl PriceSeriesProvider for CsvPriceSource {
    async fn fetch_prices(&self, request: &PriceRequest) -> Result<PriceTable, QueryError> {
        request.validate()?;

        let mut available: HashMap<String, PriceHistory> =
            self.read_histories()?.into_iter().collect();

        let mut histories = Vec::with_capacity(request.tickers.len());
        for ticker in &request.tickers {
            let history = available
                .remove(ticker)
                .ok_or_else(|| QueryError::NoData(ticker.clone()))?;
            histories.push((ticker.clone(), history));
        }

        info!(path = %self.path.display(), tickers = histories.len(), "loaded prices from file");

        align_histories(histories, request.start_date, request.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wide_csv() {
        let data = "Date,aapl,MSFT\n\
                    2024-01-02,185.64,370.87\n\
                    2024-01-03,184.25,\n\
                    2024-01-04, 181.91 ,367.94\n";

        let histories = parse_histories(data.as_bytes()).unwrap();

        assert_eq!(histories.len(), 2);
        assert_eq!(histories[0].0, "AAPL");
        assert_eq!(histories[0].1.len(), 3);
        assert_eq!(histories[1].0, "MSFT");
        assert_eq!(histories[1].1.len(), 2);

        let jan4 = NaiveDate::from_ymd_opt(2024, 1, 4).expect("REASON");
        assert_eq!(histories[0].1[&jan4], 181.91);
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        let data = "Date,AAPL\n01/02/2024,185.64\n";

        match parse_histories(data.as_bytes()) {
            Err(QueryError::InvalidDateFormat(date_str)) => assert_eq!(date_str, "01/02/2024"),
            other => panic!("Expected InvalidDateFormat error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_price() {
        let data = "Date,AAPL\n2024-01-02,abc\n";

        match parse_histories(data.as_bytes()) {
            Err(QueryError::InvalidPrice { ticker, value }) => {
                assert_eq!(ticker, "AAPL");
                assert_eq!(value, "abc");
            }
            other => panic!("Expected InvalidPrice error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_non_finite_price() {
        for cell in ["NaN", "inf", "-inf"] {
            let data = format!("Date,AAPL\n2024-01-02,{}\n", cell);

            match parse_histories(data.as_bytes()) {
                Err(QueryError::InvalidPrice { ticker, value }) => {
                    assert_eq!(ticker, "AAPL");
                    assert_eq!(value, cell);
                }
                other => panic!("Expected InvalidPrice error, got {:?}", other),
            }
        }
    }
}
