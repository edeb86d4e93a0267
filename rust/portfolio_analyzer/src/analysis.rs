// src/analysis.rs

use portfolio_stats::{
    compute_returns, portfolio_return, recommend_with, summarize_returns, Advisory,
    PortfolioWeights, PriceTable, StatisticsSummary, StatsError, Thresholds,
};
use price_service::{PriceRequest, PriceSeriesProvider, QueryError};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::config::{AnalyzerConfig, ConfigError};

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Stats(#[from] StatsError),
}

// Result of one run: statistics, optional portfolio return and advisories
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub summary: StatisticsSummary,
    pub portfolio_return: Option<f64>,
    pub advisories: Vec<Advisory>,
}

// Weights are positional, matching the table's ticker order.
// No weights means the portfolio return is skipped.
pub fn analyze(
    prices: &PriceTable,
    weights: Option<&[f64]>,
    thresholds: &Thresholds,
) -> Result<Analysis, StatsError> {
    let weights = weights
        .map(|w| PortfolioWeights::from_lists(prices.tickers(), w))
        .transpose()?;

    let returns = compute_returns(prices)?;
    let summary = summarize_returns(&returns);

    let portfolio_return = match &weights {
        Some(weights) => Some(portfolio_return(&summary, Some(weights))?),
        None => None,
    };

    let advisories = recommend_with(&summary, thresholds);

    Ok(Analysis {
        summary,
        portfolio_return,
        advisories,
    })
}

// Fetches prices for the configured tickers and date range, then analyzes them
pub async fn run_analysis(
    config: &AnalyzerConfig,
    provider: &dyn PriceSeriesProvider,
) -> Result<Analysis, AnalyzerError> {
    let request = PriceRequest::new(&config.tickers, config.start_date, config.end_date);
    let prices = provider.fetch_prices(&request).await?;

    info!(
        tickers = prices.tickers().len(),
        rows = prices.len(),
        start = %config.start_date,
        end = %config.end_date,
        "fetched price table"
    );

    Ok(analyze(&prices, config.weights.as_deref(), &config.thresholds)?)
}
