// src/lib.rs

//! Descriptive statistics and diversification heuristics over a table of
//! adjusted close prices.
//!
//! Everything here is a pure transform:
//! `PriceTable -> ReturnTable -> StatisticsSummary -> Vec<Advisory>`.

pub mod error;
pub mod models;
pub mod recommendations;
pub mod returns;
pub mod statistics;

pub use error::{StatsError, StatsResult};
pub use models::{
    CorrelationMatrix, PortfolioWeights, PriceTable, ReturnSeries, ReturnTable, StatisticsSummary,
};
pub use recommendations::{
    recommend, recommend_with, Advisory, Thresholds, CORRELATION_THRESHOLD, VOLATILITY_THRESHOLD,
};
pub use returns::compute_returns;
pub use statistics::{compute_statistics, portfolio_return, summarize_returns};
