// src/error.rs

use chrono::NaiveDate;
use portfolio_stats::StatsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid price request: {0}")]
    InvalidRequest(#[from] validator::ValidationErrors),

    #[error("API error for {symbol}: {message}")]
    Api { symbol: String, message: String },

    #[error("Invalid date range: start {start} is not before end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("No price data for {0} in the requested range")]
    NoData(String),

    #[error("Invalid date format encountered: {0}")]
    InvalidDateFormat(String),

    #[error("Invalid price for {ticker}: {value}")]
    InvalidPrice { ticker: String, value: String },

    #[error(transparent)]
    Stats(#[from] StatsError),
}
