// src/loader.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use portfolio_stats::PriceTable;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};
use validator::Validate;

use crate::error::QueryError;
use crate::models::{DailyAdjustedResponse, PriceRequest, API_MESSAGE_KEYS};
use crate::provider::{align_histories, PriceHistory, PriceSeriesProvider};

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";

// Fetches daily adjusted closes from Alpha Vantage, one request per ticker
pub struct AlphaVantageClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        AlphaVantageClient {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub async fn fetch_daily_adjusted(&self, symbol: &str) -> Result<DailyAdjustedResponse, QueryError> {
        let url = format!("{}/query", self.base_url);
        debug!(symbol, "requesting daily adjusted series");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("function", "TIME_SERIES_DAILY_ADJUSTED"),
                ("symbol", symbol),
                ("outputsize", "full"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Api {
                symbol: symbol.to_string(),
                message: format!("HTTP status {}", status),
            });
        }

        let body: Value = response.json().await?;

        // Rate limits and bad symbols still come back as 200
        for key in API_MESSAGE_KEYS {
            if let Some(message) = body.get(key).and_then(Value::as_str) {
                return Err(QueryError::Api {
                    symbol: symbol.to_string(),
                    message: message.to_string(),
                });
            }
        }

        Ok(serde_json::from_value(body)?)
    }

    // Adjusted close by date for one ticker
    pub async fn fetch_history(&self, symbol: &str) -> Result<PriceHistory, QueryError> {
        let response = self.fetch_daily_adjusted(symbol).await?;

        let mut history = PriceHistory::new();
        for (date_str, bar) in response.daily_time_series {
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .map_err(|_| QueryError::InvalidDateFormat(date_str.clone()))?;
            history.insert(date, bar.adjusted_close);
        }

        Ok(history)
    }
}

#[async_trait]
impl PriceSeriesProvider for AlphaVantageClient {
    async fn fetch_prices(&self, request: &PriceRequest) -> Result<PriceTable, QueryError> {
        request.validate()?;

        let mut histories = Vec::with_capacity(request.tickers.len());
        for ticker in &request.tickers {
            let history = self.fetch_history(ticker).await?;
            info!(ticker = %ticker, points = history.len(), "downloaded price history");
            histories.push((ticker.clone(), history));
        }

        align_histories(histories, request.start_date, request.end_date)
    }
}
