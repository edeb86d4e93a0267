// src/handlers.rs

use crate::analysis::analyze;
use crate::models::{AnalysisRequest, AnalysisResponse};
use actix_web::{get, post, web, HttpResponse, Responder};
use portfolio_stats::{PriceTable, Thresholds};
use tracing::{info, warn};
use validator::Validate;

#[post("/analyze")]
pub async fn analyze_portfolio(params: web::Json<AnalysisRequest>) -> impl Responder {
    let params = params.into_inner();

    if let Err(err) = params.validate() {
        warn!(error = %err, "rejected analysis request");
        return HttpResponse::BadRequest().json(AnalysisResponse::failure(format!(
            "Invalid request: {}",
            err
        )));
    }

    // Rebuild the table in the caller's ticker order
    let mut columns = params.columns;
    let mut ordered = Vec::with_capacity(params.tickers.len());
    for ticker in &params.tickers {
        match columns.remove(ticker) {
            Some(column) => ordered.push((ticker.clone(), column)),
            None => {
                return HttpResponse::BadRequest().json(AnalysisResponse::failure(format!(
                    "No price column for ticker {}",
                    ticker
                )));
            }
        }
    }

    let prices = match PriceTable::new(params.dates, ordered) {
        Ok(prices) => prices,
        Err(err) => {
            return HttpResponse::BadRequest().json(AnalysisResponse::failure(err.to_string()));
        }
    };

    let defaults = Thresholds::default();
    let thresholds = Thresholds {
        correlation: params.correlation_threshold.unwrap_or(defaults.correlation),
        volatility: params.volatility_threshold.unwrap_or(defaults.volatility),
    };

    match analyze(&prices, params.weights.as_deref(), &thresholds) {
        Ok(analysis) => {
            info!(
                tickers = prices.tickers().len(),
                advisories = analysis.advisories.len(),
                "analysis succeeded"
            );
            HttpResponse::Ok().json(AnalysisResponse {
                success: true,
                message: format!("Analyzed {} tickers over {} dates", prices.tickers().len(), prices.len()),
                summary: Some(analysis.summary),
                portfolio_return: analysis.portfolio_return,
                advisories: Some(analysis.advisories),
            })
        }
        Err(err) => {
            warn!(error = %err, "analysis failed");
            HttpResponse::BadRequest().json(AnalysisResponse::failure(err.to_string()))
        }
    }
}

#[get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}
