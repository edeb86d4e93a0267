// src/models.rs

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use validator::{Validate, ValidationError};

// Custom function to convert a JSON string to f64
fn string_to_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse::<f64>().map_err(serde::de::Error::custom)
}

// Custom function to convert a JSON string to i64
fn string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse::<i64>().map_err(serde::de::Error::custom)
}

// Custom function to convert a JSON string to a NaiveDate
fn string_to_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    // "Last Refreshed" may carry a time component on intraday refreshes
    let date_part = s.split_whitespace().next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(serde::de::Error::custom)
}

// What the caller wants priced: tickers over [start_date, end_date)
#[derive(Debug, Clone, PartialEq, Validate)]
#[validate(schema(function = "validate_date_range"))]
pub struct PriceRequest {
    #[validate(length(min = 1), custom(function = "validate_tickers"))]
    pub tickers: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl PriceRequest {
    // Tickers are trimmed and upper-cased
    pub fn new(tickers: &[String], start_date: NaiveDate, end_date: NaiveDate) -> Self {
        PriceRequest {
            tickers: tickers.iter().map(|t| t.trim().to_uppercase()).collect(),
            start_date,
            end_date,
        }
    }
}

fn validate_tickers(tickers: &Vec<String>) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for ticker in tickers {
        if ticker.is_empty() || ticker.len() > 10 {
            return Err(ValidationError::new("ticker_length"));
        }
        if !seen.insert(ticker.as_str()) {
            return Err(ValidationError::new("duplicate_ticker"));
        }
    }
    Ok(())
}

fn validate_date_range(request: &PriceRequest) -> Result<(), ValidationError> {
    if request.start_date >= request.end_date {
        return Err(ValidationError::new("start_not_before_end"));
    }
    Ok(())
}

// Define the daily adjusted time series API structure
// Struct for the Meta Data
#[derive(Debug, Deserialize)]
pub struct MetaData {
    #[serde(rename = "1. Information")]
    pub information: String,

    #[serde(rename = "2. Symbol")]
    pub symbol: String,

    #[serde(rename = "3. Last Refreshed", deserialize_with = "string_to_date")]
    pub last_refreshed: NaiveDate,

    #[serde(rename = "4. Output Size")]
    pub output_size: String,

    #[serde(rename = "5. Time Zone")]
    pub time_zone: String,
}

// Struct for the stock prices for each date
#[derive(Debug, Deserialize)]
pub struct DailyAdjustedBar {
    #[serde(rename = "1. open", deserialize_with = "string_to_f64")]
    pub open: f64,

    #[serde(rename = "2. high", deserialize_with = "string_to_f64")]
    pub high: f64,

    #[serde(rename = "3. low", deserialize_with = "string_to_f64")]
    pub low: f64,

    #[serde(rename = "4. close", deserialize_with = "string_to_f64")]
    pub close: f64,

    #[serde(rename = "5. adjusted close", deserialize_with = "string_to_f64")]
    pub adjusted_close: f64,

    #[serde(rename = "6. volume", deserialize_with = "string_to_i64")]
    pub volume: i64,

    #[serde(rename = "7. dividend amount", deserialize_with = "string_to_f64")]
    pub dividend_amount: f64,

    #[serde(rename = "8. split coefficient", deserialize_with = "string_to_f64")]
    pub split_coefficient: f64,
}

// Struct for the overall response
#[derive(Debug, Deserialize)]
pub struct DailyAdjustedResponse {
    #[serde(rename = "Meta Data")]
    pub meta_data: MetaData,

    #[serde(rename = "Time Series (Daily)")]
    pub daily_time_series: HashMap<String, DailyAdjustedBar>, // Date -> DailyAdjustedBar
}

// Alpha Vantage answers 200 with one of these keys instead of data when a call fails
pub const API_MESSAGE_KEYS: [&str; 3] = ["Error Message", "Note", "Information"];
