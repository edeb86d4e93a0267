// src/config.rs

use chrono::NaiveDate;
use portfolio_stats::Thresholds;
use std::path::PathBuf;
use thiserror::Error;
use validator::Validate;

pub const API_KEY_VAR: &str = "ALPHAVANTAGE_API_KEY";
pub const BASE_URL_VAR: &str = "ALPHAVANTAGE_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No tickers supplied")]
    NoTickers,

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid weight '{0}'")]
    InvalidWeight(String),

    #[error("Number of weights must match number of tickers ({tickers} tickers, {weights} weights)")]
    WeightCount { tickers: usize, weights: usize },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("Missing environment variable {0}")]
    MissingEnv(&'static str),
}

// Everything one analysis run needs, built once by the entry point
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct AnalyzerConfig {
    #[validate(length(min = 1))]
    pub tickers: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub weights: Option<Vec<f64>>,
    pub thresholds: Thresholds,
    pub prices_file: Option<PathBuf>,
}

impl AnalyzerConfig {
    // Builds a config from the raw, comma-separated answers a user types in
    pub fn from_inputs(
        tickers: &str,
        start_date: &str,
        end_date: &str,
        weights: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let tickers = parse_tickers(tickers)?;
        let weights = match weights {
            Some(raw) => parse_weights(raw)?,
            None => None,
        };

        if let Some(weights) = &weights {
            if weights.len() != tickers.len() {
                return Err(ConfigError::WeightCount {
                    tickers: tickers.len(),
                    weights: weights.len(),
                });
            }
        }

        let config = AnalyzerConfig {
            tickers,
            start_date: parse_date(start_date)?,
            end_date: parse_date(end_date)?,
            weights,
            thresholds: Thresholds::default(),
            prices_file: None,
        };
        config.validate()?;

        Ok(config)
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_prices_file(mut self, path: Option<PathBuf>) -> Self {
        self.prices_file = path;
        self
    }
}

// Repeated tickers keep their first position
pub fn parse_tickers(raw: &str) -> Result<Vec<String>, ConfigError> {
    let mut tickers: Vec<String> = Vec::new();
    for ticker in raw.split(',').map(|t| t.trim().to_uppercase()) {
        if !ticker.is_empty() && !tickers.contains(&ticker) {
            tickers.push(ticker);
        }
    }

    if tickers.is_empty() {
        return Err(ConfigError::NoTickers);
    }
    Ok(tickers)
}

// A blank answer means no weights
pub fn parse_weights(raw: &str) -> Result<Option<Vec<f64>>, ConfigError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }

    raw.split(',')
        .map(|w| {
            let w = w.trim();
            w.parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| ConfigError::InvalidWeight(w.to_string()))
        })
        .collect::<Result<Vec<f64>, ConfigError>>()
        .map(Some)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ConfigError::InvalidDate(raw.trim().to_string()))
}

// Alpha Vantage credentials, read from the environment (or a .env file loaded by main)
#[derive(Debug, Clone, PartialEq)]
pub struct ApiSettings {
    pub api_key: String,
    pub base_url: Option<String>,
}

impl ApiSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingEnv(API_KEY_VAR))?;

        Ok(ApiSettings {
            api_key,
            base_url: std::env::var(BASE_URL_VAR).ok(),
        })
    }
}
