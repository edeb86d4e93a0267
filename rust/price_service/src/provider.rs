// src/provider.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use portfolio_stats::PriceTable;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

use crate::error::QueryError;
use crate::models::PriceRequest;

// Date -> Adjusted close
pub type PriceHistory = BTreeMap<NaiveDate, f64>;

/// Anything that can turn a [`PriceRequest`] into an aligned [`PriceTable`].
#[async_trait]
pub trait PriceSeriesProvider: Send + Sync {
    async fn fetch_prices(&self, request: &PriceRequest) -> Result<PriceTable, QueryError>;
}

// Restricts each history to [start, end) and keeps only dates every ticker has.
// Column order follows `histories`.
pub fn align_histories(
    histories: Vec<(String, PriceHistory)>,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<PriceTable, QueryError> {
    if start_date >= end_date {
        return Err(QueryError::InvalidRange {
            start: start_date,
            end: end_date,
        });
    }

    let mut in_range = Vec::with_capacity(histories.len());

    for (ticker, history) in histories {
        let filtered: PriceHistory = history
            .range(start_date..end_date)
            .map(|(date, price)| (*date, *price))
            .collect();

        if filtered.is_empty() {
            return Err(QueryError::NoData(ticker));
        }
        in_range.push((ticker, filtered));
    }

    let mut common: Option<BTreeSet<NaiveDate>> = None;
    for (_, history) in &in_range {
        let dates: BTreeSet<NaiveDate> = history.keys().copied().collect();
        common = Some(match common {
            Some(existing) => existing.intersection(&dates).copied().collect(),
            None => dates,
        });
    }

    let dates: Vec<NaiveDate> = common.unwrap_or_default().into_iter().collect();
    if dates.is_empty() {
        let tickers: Vec<&str> = in_range.iter().map(|(t, _)| t.as_str()).collect();
        return Err(QueryError::NoData(tickers.join(",")));
    }

    for (ticker, history) in &in_range {
        let dropped = history.len() - dates.len();
        if dropped > 0 {
            warn!(ticker = %ticker, dropped, "dropping dates missing from other tickers");
        }
    }

    let columns = in_range
        .into_iter()
        .map(|(ticker, history)| {
            let column = dates.iter().map(|date| history[date]).collect();
            (ticker, column)
        })
        .collect();

    debug!(rows = dates.len(), "aligned price histories");

    Ok(PriceTable::new(dates, columns)?)
}
