// src/error.rs

use chrono::NaiveDate;
use thiserror::Error;

pub type StatsResult<T> = Result<T, StatsError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    #[error("Insufficient data: need at least 2 price observations, got {observations}")]
    InsufficientData { observations: usize },

    #[error("Division by zero: prior price of {ticker} on {date} is {price}")]
    DivisionByZero {
        ticker: String,
        date: NaiveDate,
        price: f64,
    },

    #[error("Weight mismatch: {reason}")]
    WeightMismatch { reason: String },

    #[error("Malformed price table: {reason}")]
    MalformedTable { reason: String },

    #[error("Unknown ticker: {0}")]
    UnknownTicker(String),
}

impl StatsError {
    pub fn weight_mismatch(reason: impl Into<String>) -> Self {
        Self::WeightMismatch {
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedTable {
            reason: reason.into(),
        }
    }
}
