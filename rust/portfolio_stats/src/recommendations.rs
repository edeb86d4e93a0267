// src/recommendations.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::models::StatisticsSummary;
use crate::statistics::nearly_equal;

// Pairs whose return correlation exceeds this are flagged (signed comparison)
pub const CORRELATION_THRESHOLD: f64 = 0.75;

// Tickers whose return standard deviation exceeds this are flagged
pub const VOLATILITY_THRESHOLD: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub correlation: f64,
    pub volatility: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            correlation: CORRELATION_THRESHOLD,
            volatility: VOLATILITY_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    // Highly correlated pair where one ticker out-earns the other
    CorrelatedPair {
        first: String,
        second: String,
        correlation: f64,
        keep: String,
        keep_return: f64,
        sell: String,
        sell_return: f64,
    },
    // Highly correlated pair with identical mean returns
    CorrelatedTie {
        first: String,
        second: String,
        correlation: f64,
        mean_return: f64,
    },
    HighVolatility {
        ticker: String,
        std_return: f64,
        mean_return: f64,
    },
    Balanced,
}

fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::CorrelatedPair {
                first,
                second,
                correlation,
                keep,
                keep_return,
                sell,
                sell_return,
            } => {
                writeln!(
                    f,
                    "The stocks {} and {} have a high correlation of {:.2}.",
                    first, second, correlation
                )?;
                writeln!(
                    f,
                    "The average return of {} is {}, which is higher than the average return of {} ({}).",
                    keep,
                    percent(*keep_return),
                    sell,
                    percent(*sell_return)
                )?;
                write!(f, "You may want to sell {} and keep {}.", sell, keep)
            }
            Advisory::CorrelatedTie {
                first,
                second,
                correlation,
                mean_return,
            } => {
                writeln!(
                    f,
                    "The stocks {} and {} have a high correlation of {:.2}.",
                    first, second, correlation
                )?;
                writeln!(
                    f,
                    "The average return of both stocks is {}.",
                    percent(*mean_return)
                )?;
                write!(f, "You may want to sell one of them based on other factors.")
            }
            Advisory::HighVolatility {
                ticker,
                std_return,
                mean_return,
            } => {
                writeln!(
                    f,
                    "The stock {} has a high standard deviation of {:.2}, which indicates a high risk.",
                    ticker, std_return
                )?;
                writeln!(
                    f,
                    "The average return of {} is {}.",
                    ticker,
                    percent(*mean_return)
                )?;
                write!(
                    f,
                    "If you are looking for a portfolio with less risk you may want to sell {} and invest in a less volatile stock.",
                    ticker
                )
            }
            Advisory::Balanced => write!(
                f,
                "Your portfolio looks okay. No recommendations to make at this time. \
                 However you may want to look at other factors rather than just std and correlation."
            ),
        }
    }
}

pub fn recommend(summary: &StatisticsSummary) -> Vec<Advisory> {
    recommend_with(summary, &Thresholds::default())
}

// Correlation pass, then volatility pass, both in ticker order.
// Falls back to a single Balanced advisory when neither pass fires.
pub fn recommend_with(summary: &StatisticsSummary, thresholds: &Thresholds) -> Vec<Advisory> {
    let mut advisories = correlation_advisories(summary, thresholds.correlation);
    advisories.extend(volatility_advisories(summary, thresholds.volatility));

    if advisories.is_empty() {
        advisories.push(Advisory::Balanced);
    }

    debug!(count = advisories.len(), "generated recommendations");
    advisories
}

fn correlation_advisories(summary: &StatisticsSummary, threshold: f64) -> Vec<Advisory> {
    let matrix = &summary.correlation_matrix;
    let mut advisories = Vec::new();

    for i in 0..matrix.len() {
        for j in (i + 1)..matrix.len() {
            let correlation = matrix.at(i, j);
            // Negative correlations never pass this check
            if !(correlation > threshold) {
                continue;
            }

            let first = &matrix.tickers[i];
            let second = &matrix.tickers[j];
            let first_return = summary.mean_return.get(first).copied().unwrap_or(f64::NAN);
            let second_return = summary.mean_return.get(second).copied().unwrap_or(f64::NAN);

            let advisory = if nearly_equal(first_return, second_return) {
                Advisory::CorrelatedTie {
                    first: first.clone(),
                    second: second.clone(),
                    correlation,
                    mean_return: first_return,
                }
            } else if first_return > second_return {
                Advisory::CorrelatedPair {
                    first: first.clone(),
                    second: second.clone(),
                    correlation,
                    keep: first.clone(),
                    keep_return: first_return,
                    sell: second.clone(),
                    sell_return: second_return,
                }
            } else {
                Advisory::CorrelatedPair {
                    first: first.clone(),
                    second: second.clone(),
                    correlation,
                    keep: second.clone(),
                    keep_return: second_return,
                    sell: first.clone(),
                    sell_return: first_return,
                }
            };

            advisories.push(advisory);
        }
    }

    advisories
}

fn volatility_advisories(summary: &StatisticsSummary, threshold: f64) -> Vec<Advisory> {
    summary
        .tickers
        .iter()
        .filter_map(|ticker| {
            let std_return = summary.std_return.get(ticker).copied()?;
            if std_return > threshold {
                Some(Advisory::HighVolatility {
                    ticker: ticker.clone(),
                    std_return,
                    mean_return: summary.mean_return.get(ticker).copied().unwrap_or(f64::NAN),
                })
            } else {
                None
            }
        })
        .collect()
}
