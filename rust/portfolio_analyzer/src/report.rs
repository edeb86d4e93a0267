// src/report.rs

use std::fmt;

use crate::analysis::Analysis;

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.6}", value)
    }
}

// Console rendering of an analysis: summary sections, then one paragraph per advisory
pub struct TextReport<'a>(pub &'a Analysis);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let analysis = self.0;
        let summary = &analysis.summary;
        let width = summary
            .tickers
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max(6);

        writeln!(f, "Returns for Each Stock:")?;
        for ticker in &summary.tickers {
            let mean = summary.mean_return.get(ticker).copied().unwrap_or(f64::NAN);
            writeln!(f, "{:<width$}  {}", ticker, format_value(mean), width = width)?;
        }

        writeln!(f, "\nPortfolio Return:")?;
        match analysis.portfolio_return {
            Some(value) => writeln!(f, "{}", format_value(value))?,
            None => writeln!(f, "not available (no weights supplied)")?,
        }

        writeln!(f, "\nStandard Deviations of Returns:")?;
        for ticker in &summary.tickers {
            let std = summary.std_return.get(ticker).copied().unwrap_or(f64::NAN);
            writeln!(f, "{:<width$}  {}", ticker, format_value(std), width = width)?;
        }

        writeln!(f, "\nCorrelation Matrix:")?;
        let matrix = &summary.correlation_matrix;
        write!(f, "{:<width$}", "", width = width)?;
        for ticker in &matrix.tickers {
            write!(f, "  {:>width$}", ticker, width = width)?;
        }
        writeln!(f)?;
        for (i, row_ticker) in matrix.tickers.iter().enumerate() {
            write!(f, "{:<width$}", row_ticker, width = width)?;
            for j in 0..matrix.len() {
                let value = matrix.at(i, j);
                let cell = if value.is_nan() {
                    "n/a".to_string()
                } else {
                    format!("{:.4}", value)
                };
                write!(f, "  {:>width$}", cell, width = width)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "\nRecommendations:")?;
        for advisory in &analysis.advisories {
            writeln!(f, "{}\n", advisory)?;
        }

        Ok(())
    }
}

pub fn render_text(analysis: &Analysis) -> String {
    TextReport(analysis).to_string()
}

pub fn render_json(analysis: &Analysis) -> serde_json::Result<String> {
    serde_json::to_string_pretty(analysis)
}
