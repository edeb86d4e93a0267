// src/models.rs

use chrono::NaiveDate;
use portfolio_stats::{Advisory, StatisticsSummary};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

#[derive(Deserialize, Serialize, Validate)]
pub struct AnalysisRequest {
    #[validate(length(min = 1))]
    pub tickers: Vec<String>,
    pub dates: Vec<NaiveDate>,

    // Columns as key-value pairs: ticker -> adjusted closes aligned with `dates`
    pub columns: HashMap<String, Vec<f64>>,

    // Positional, same order as `tickers`
    pub weights: Option<Vec<f64>>,

    #[validate(range(min = -1.0, max = 1.0))]
    pub correlation_threshold: Option<f64>,
    #[validate(range(min = 0.0))]
    pub volatility_threshold: Option<f64>,
}

#[derive(Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub summary: Option<StatisticsSummary>,
    pub portfolio_return: Option<f64>,
    pub advisories: Option<Vec<Advisory>>,
    pub message: String,
}

impl AnalysisResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        AnalysisResponse {
            success: false,
            summary: None,
            portfolio_return: None,
            advisories: None,
            message: message.into(),
        }
    }
}
