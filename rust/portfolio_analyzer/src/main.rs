// src/main.rs

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use portfolio_analyzer::analysis::run_analysis;
use portfolio_analyzer::config::{AnalyzerConfig, ApiSettings};
use portfolio_analyzer::report::{render_json, render_text};
use portfolio_analyzer::run_server;
use portfolio_stats::{Thresholds, CORRELATION_THRESHOLD, VOLATILITY_THRESHOLD};
use price_service::{AlphaVantageClient, CsvPriceSource, PriceSeriesProvider};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Portfolio returns, volatility, correlation and diversification advice
#[derive(Parser)]
#[command(name = "wealth-watch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a portfolio (prompts for anything not given on the command line)
    Analyze(AnalyzeArgs),

    /// Serve the analysis over HTTP
    Serve(ServeArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Tickers separated by commas
    #[arg(short, long)]
    tickers: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(short, long)]
    start: Option<String>,

    /// End date (YYYY-MM-DD), exclusive
    #[arg(short, long)]
    end: Option<String>,

    /// Weights separated by commas, one per ticker
    #[arg(short, long)]
    weights: Option<String>,

    /// Read prices from a wide CSV file instead of Alpha Vantage
    #[arg(long)]
    prices: Option<PathBuf>,

    #[arg(long, default_value_t = CORRELATION_THRESHOLD)]
    correlation_threshold: f64,

    #[arg(long, default_value_t = VOLATILITY_THRESHOLD)]
    volatility_threshold: f64,

    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Args)]
struct ServeArgs {
    #[arg(long, env = "WEALTH_WATCH_BIND", default_value = "127.0.0.1:8080")]
    bind: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn value_or_prompt(value: Option<String>, label: &str) -> io::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => prompt(label),
    }
}

fn build_config(args: &AnalyzeArgs) -> Result<AnalyzerConfig> {
    let interactive = args.tickers.is_none();

    let tickers = value_or_prompt(
        args.tickers.clone(),
        "Enter tickers separated by commas(In capital letters please): ",
    )?;
    let start = value_or_prompt(args.start.clone(), "Enter start date (YYYY-MM-DD): ")?;
    let end = value_or_prompt(args.end.clone(), "Enter end date (YYYY-MM-DD): ")?;

    // Only ask for weights when the run is interactive
    let weights = match (&args.weights, interactive) {
        (Some(weights), _) => Some(weights.clone()),
        (None, true) => Some(prompt("Enter weights separated by commas: ")?),
        (None, false) => None,
    };

    let config = AnalyzerConfig::from_inputs(&tickers, &start, &end, weights.as_deref())?
        .with_thresholds(Thresholds {
            correlation: args.correlation_threshold,
            volatility: args.volatility_threshold,
        })
        .with_prices_file(args.prices.clone());

    Ok(config)
}

fn provider_for(config: &AnalyzerConfig) -> Result<Box<dyn PriceSeriesProvider>> {
    if let Some(path) = &config.prices_file {
        return Ok(Box::new(CsvPriceSource::new(path.clone())));
    }

    let settings = ApiSettings::from_env()?;
    let client = match settings.base_url {
        Some(base_url) => AlphaVantageClient::with_base_url(base_url, settings.api_key),
        None => AlphaVantageClient::new(settings.api_key),
    };
    Ok(Box::new(client))
}

async fn analyze(args: AnalyzeArgs) -> Result<()> {
    let config = build_config(&args)?;
    let provider = provider_for(&config)?;

    let analysis = run_analysis(&config, provider.as_ref())
        .await
        .context("portfolio analysis failed")?;

    match args.format {
        OutputFormat::Text => println!("{}", render_text(&analysis)),
        OutputFormat::Json => println!("{}", render_json(&analysis)?),
    }

    Ok(())
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so reports on stdout stay clean
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => analyze(args).await?,
        Commands::Serve(args) => {
            info!("Starting analysis server at http://{}", args.bind);
            run_server(&args.bind).await?
        }
    }

    Ok(())
}
