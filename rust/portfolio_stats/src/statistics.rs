// src/statistics.rs

use ndarray::{Array2, ArrayView1};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{StatsError, StatsResult};
use crate::models::{CorrelationMatrix, PortfolioWeights, PriceTable, ReturnTable, StatisticsSummary};
use crate::returns::compute_returns;

pub fn compute_statistics(prices: &PriceTable) -> StatsResult<StatisticsSummary> {
    let returns = compute_returns(prices)?;
    Ok(summarize_returns(&returns))
}

// Mean, sample standard deviation and correlation of an existing return table
pub fn summarize_returns(returns: &ReturnTable) -> StatisticsSummary {
    let tickers = returns.tickers();
    let matrix = returns.to_matrix();

    let mut mean_return = BTreeMap::new();
    let mut std_return = BTreeMap::new();

    for (col, ticker) in tickers.iter().enumerate() {
        let column = matrix.column(col);
        mean_return.insert(ticker.clone(), mean(column));
        std_return.insert(ticker.clone(), sample_std(column));
    }

    let correlation_matrix = correlation_matrix(&tickers, &matrix);

    debug!(
        tickers = tickers.len(),
        observations = returns.observations(),
        "computed return statistics"
    );

    StatisticsSummary {
        tickers,
        observations: returns.observations(),
        mean_return,
        std_return,
        correlation_matrix,
    }
}

pub fn mean(values: ArrayView1<f64>) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.sum() / values.len() as f64
}

// N-1 denominator; undefined (NaN) below two observations
pub fn sample_std(values: ArrayView1<f64>) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let mean = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (n - 1) as f64).sqrt()
}

/// Pearson correlation of two equally long series.
///
/// Two constant series move identically and are reported as 1.0; a constant
/// series against a varying one has no linear co-movement and is 0.0.
/// A series counts as constant when its spread is within rounding noise of its
/// magnitude (see [`nearly_equal`]). Fewer than two observations give `NaN`.
pub fn pearson_correlation(x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return f64::NAN;
    }

    match (is_constant(x), is_constant(y)) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let dx = &x - mean(x);
    let dy = &y - mean(y);

    let covariance = dx.dot(&dy);
    let var_x = dx.dot(&dx);
    let var_y = dy.dot(&dy);

    (covariance / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

// Relative tolerance for treating two floats as the same value
const RELATIVE_TOLERANCE: f64 = 1e-12;

/// True when `a` and `b` differ by no more than rounding noise relative to
/// their magnitude. `NaN` is never nearly equal to anything.
pub fn nearly_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= RELATIVE_TOLERANCE * a.abs().max(b.abs())
}

fn is_constant(values: ArrayView1<f64>) -> bool {
    if values.iter().any(|v| v.is_nan()) {
        return false;
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    nearly_equal(min, max)
}

// Columns of `returns` are tickers; the result is symmetric with a unit diagonal
pub fn correlation_matrix(tickers: &[String], returns: &Array2<f64>) -> CorrelationMatrix {
    let n = tickers.len();
    let mut values = Array2::<f64>::eye(n);

    for i in 0..n {
        for j in (i + 1)..n {
            let corr = pearson_correlation(returns.column(i), returns.column(j));
            values[[i, j]] = corr;
            values[[j, i]] = corr;
        }
    }

    CorrelationMatrix {
        tickers: tickers.to_vec(),
        values,
    }
}

// Sum of mean return times weight. Weights must cover exactly the summary's tickers.
pub fn portfolio_return(
    summary: &StatisticsSummary,
    weights: Option<&PortfolioWeights>,
) -> StatsResult<f64> {
    let weights = weights.ok_or_else(|| StatsError::weight_mismatch("no weights supplied"))?;

    if weights.len() != summary.tickers.len() {
        return Err(StatsError::weight_mismatch(format!(
            "{} tickers but {} weights",
            summary.tickers.len(),
            weights.len()
        )));
    }

    let mut total = 0.0;
    for ticker in &summary.tickers {
        let weight = weights
            .get(ticker)
            .ok_or_else(|| StatsError::weight_mismatch(format!("no weight for {}", ticker)))?;
        total += summary.mean_of(ticker)? * weight;
    }

    Ok(total)
}
