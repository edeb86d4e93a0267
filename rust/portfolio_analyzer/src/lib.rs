// src/lib.rs

pub mod analysis;
pub mod config;
pub mod handlers;
pub mod models;
pub mod report;

pub async fn run_server(bind: &str) -> std::io::Result<()> {
    use actix_web::{App, HttpServer};
    use handlers::{analyze_portfolio, health_check};

    tracing::info!(bind, "starting analysis server");

    HttpServer::new(|| {
        App::new()
            .service(analyze_portfolio)
            .service(health_check)
    })
    .bind(bind)?
    .run()
    .await
}
