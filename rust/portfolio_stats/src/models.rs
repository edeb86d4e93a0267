// src/models.rs

use chrono::NaiveDate;
use ndarray::Array2;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{StatsError, StatsResult};

// Adjusted close prices, one column per ticker, all columns aligned on `dates`.
// Ticker order is the caller's order and drives every later pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    tickers: Vec<String>,
    closes: Vec<Vec<f64>>,
}

impl PriceTable {
    pub fn new(dates: Vec<NaiveDate>, columns: Vec<(String, Vec<f64>)>) -> StatsResult<Self> {
        if columns.is_empty() {
            return Err(StatsError::malformed("no tickers supplied"));
        }

        if let Some(pair) = dates.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(StatsError::malformed(format!(
                "dates must be ascending and unique ({} followed by {})",
                pair[0], pair[1]
            )));
        }

        let mut seen = HashSet::new();
        let mut tickers = Vec::with_capacity(columns.len());
        let mut closes = Vec::with_capacity(columns.len());

        for (ticker, column) in columns {
            if !seen.insert(ticker.clone()) {
                return Err(StatsError::malformed(format!("duplicate ticker {}", ticker)));
            }
            if column.len() != dates.len() {
                return Err(StatsError::malformed(format!(
                    "{} has {} prices for {} dates",
                    ticker,
                    column.len(),
                    dates.len()
                )));
            }
            tickers.push(ticker);
            closes.push(column);
        }

        Ok(PriceTable {
            dates,
            tickers,
            closes,
        })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    // Number of dates (rows)
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn column(&self, ticker: &str) -> Option<&[f64]> {
        self.tickers
            .iter()
            .position(|t| t == ticker)
            .map(|idx| self.closes[idx].as_slice())
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.tickers
            .iter()
            .zip(self.closes.iter())
            .map(|(ticker, column)| (ticker.as_str(), column.as_slice()))
    }
}

// Fractional returns of one ticker, one entry per date after the first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSeries {
    pub ticker: String,
    pub points: Vec<(NaiveDate, f64)>, // Date, Return
}

impl ReturnSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, r)| *r).collect()
    }

    /// Arithmetic mean of the series; `NaN` when the series is empty.
    pub fn mean(&self) -> f64 {
        if self.points.is_empty() {
            return f64::NAN;
        }
        self.points.iter().map(|(_, r)| r).sum::<f64>() / self.points.len() as f64
    }
}

// All return series of a PriceTable, in ticker order and sharing the same dates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnTable {
    dates: Vec<NaiveDate>,
    series: Vec<ReturnSeries>,
}

impl ReturnTable {
    pub(crate) fn new(dates: Vec<NaiveDate>, series: Vec<ReturnSeries>) -> Self {
        ReturnTable { dates, series }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    // Number of return observations per ticker
    pub fn observations(&self) -> usize {
        self.dates.len()
    }

    pub fn tickers(&self) -> Vec<String> {
        self.series.iter().map(|s| s.ticker.clone()).collect()
    }

    pub fn get(&self, ticker: &str) -> Option<&ReturnSeries> {
        self.series.iter().find(|s| s.ticker == ticker)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReturnSeries> {
        self.series.iter()
    }

    pub fn mean_return(&self, ticker: &str) -> StatsResult<f64> {
        self.get(ticker)
            .map(ReturnSeries::mean)
            .ok_or_else(|| StatsError::UnknownTicker(ticker.to_string()))
    }

    // Rows are dates, columns are tickers
    pub fn to_matrix(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.dates.len(), self.series.len()), |(row, col)| {
            self.series[col].points[row].1
        })
    }
}

// Ticker -> Weight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioWeights(HashMap<String, f64>);

impl PortfolioWeights {
    pub fn new(weights: HashMap<String, f64>) -> Self {
        PortfolioWeights(weights)
    }

    // Pairs a ticker list with a weight list of the same length
    pub fn from_lists(tickers: &[String], weights: &[f64]) -> StatsResult<Self> {
        if tickers.len() != weights.len() {
            return Err(StatsError::weight_mismatch(format!(
                "{} tickers but {} weights",
                tickers.len(),
                weights.len()
            )));
        }

        let map: HashMap<String, f64> = tickers
            .iter()
            .cloned()
            .zip(weights.iter().copied())
            .collect();

        if map.len() != tickers.len() {
            return Err(StatsError::weight_mismatch("duplicate ticker in weight list"));
        }

        Ok(PortfolioWeights(map))
    }

    pub fn get(&self, ticker: &str) -> Option<f64> {
        self.0.get(ticker).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tickers(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}

// Pairwise Pearson correlation, indexed in ticker order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub tickers: Vec<String>,
    pub values: Array2<f64>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.values[[i, j]]
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.tickers.iter().position(|t| t == a)?;
        let j = self.tickers.iter().position(|t| t == b)?;
        Some(self.at(i, j))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSummary {
    pub tickers: Vec<String>,
    pub observations: usize,
    pub mean_return: BTreeMap<String, f64>,
    pub std_return: BTreeMap<String, f64>,
    pub correlation_matrix: CorrelationMatrix,
}

impl StatisticsSummary {
    pub fn mean_of(&self, ticker: &str) -> StatsResult<f64> {
        self.mean_return
            .get(ticker)
            .copied()
            .ok_or_else(|| StatsError::UnknownTicker(ticker.to_string()))
    }

    pub fn std_of(&self, ticker: &str) -> StatsResult<f64> {
        self.std_return
            .get(ticker)
            .copied()
            .ok_or_else(|| StatsError::UnknownTicker(ticker.to_string()))
    }
}
