// src/lib.rs

pub mod csv_source;
pub mod error;
pub mod loader;
pub mod models;
pub mod provider;

pub use csv_source::CsvPriceSource;
pub use error::QueryError;
pub use loader::AlphaVantageClient;
pub use models::PriceRequest;
pub use provider::{align_histories, PriceHistory, PriceSeriesProvider};
