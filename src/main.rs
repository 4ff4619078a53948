//! Numisma command line
//!
//! The `numisma` command exposes the SDK's two services from a shell.
//!
//! ## Commands
//!
//! - `rates`: Current gold and silver prices per gram
//! - `value`: Value a collection exported as JSON
//! - `search`: Find catalog candidates for a free-text query

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::Level;

use numisma_sdk::telemetry::init_tracing;
use numisma_sdk::{
    CollectionValuation, Currency, JsonCollection, NormalizedRate, NumismaSdk, SearchOutcome,
    ValuationBasis,
};

#[derive(Parser)]
#[command(name = "numisma")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Bullion valuation and catalog candidate search for coin collections", long_about = None)]
struct Cli {
    /// Currency to value in (USD, EUR, GBP)
    #[arg(short, long, global = true, default_value = "EUR", env = "NUMISMA_CURRENCY")]
    currency: Currency,

    /// Only use cached quotes
    #[arg(long, global = true)]
    offline: bool,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = 10)]
    timeout_secs: u64,

    /// Quote cache directory (default: platform cache dir)
    #[arg(long, global = true, env = "NUMISMA_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output and JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current gold and silver prices per gram
    Rates,

    /// Value every item in a collection export
    Value {
        /// Path to the collection JSON (array of items or {"items": [...]})
        path: PathBuf,
    },

    /// Search for catalog candidates
    Search {
        /// Free-text query, e.g. "Libertad silver 1oz"
        #[arg(required = true)]
        query: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    init_tracing(cli.json, level);

    let mut builder = NumismaSdk::builder()
        .currency(cli.currency)
        .offline(cli.offline)
        .timeout(Duration::from_secs(cli.timeout_secs));
    if let Some(dir) = &cli.cache_dir {
        builder = builder.cache_dir(dir);
    }
    let sdk = builder.build().context("Failed to initialise SDK")?;

    match cli.command {
        Commands::Rates => cmd_rates(&sdk, cli.json),
        Commands::Value { path } => cmd_value(&sdk, &path, cli.json),
        Commands::Search { query } => cmd_search(&sdk, &query.join(" "), cli.json),
    }
}

fn cmd_rates(sdk: &NumismaSdk, json: bool) -> Result<()> {
    let rates = sdk.rates().context("Failed to fetch market rates")?;
    if json {
        return print_json(&rates);
    }
    print_rates(&rates);
    Ok(())
}

fn cmd_value(sdk: &NumismaSdk, path: &Path, json: bool) -> Result<()> {
    let store = JsonCollection::new(path);
    let valuation = sdk
        .value_collection(&store)
        .with_context(|| format!("Failed to value {}", path.display()))?;
    if json {
        return print_json(&valuation);
    }
    print_valuation(&valuation, sdk.currency());
    Ok(())
}

fn cmd_search(sdk: &NumismaSdk, query: &str, json: bool) -> Result<()> {
    let outcome = sdk.search_candidates(query);
    if json {
        return print_json(&outcome);
    }
    print_outcome(query, &outcome);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{out}");
    Ok(())
}

fn print_rates(rates: &NormalizedRate) {
    println!("Gold:   {:>10.2} {}/g", rates.gold_per_gram, rates.currency);
    println!("Silver: {:>10.2} {}/g", rates.silver_per_gram, rates.currency);
    match &rates.fx_symbol {
        Some(symbol) => println!(
            "FX:     {:>10.4} ({}, {:?})",
            rates.fx_rate, symbol, rates.fx_correction
        ),
        None => println!("FX:     {:>10.4}", rates.fx_rate),
    }
    println!("As of:  {}", rates.fetched_at.format("%Y-%m-%d %H:%M:%S UTC"));
}

fn print_valuation(valuation: &CollectionValuation, currency: Currency) {
    if let Some(warning) = &valuation.warning {
        println!("Warning: {warning}");
    }
    for (item, result) in &valuation.items {
        let basis = match result.basis {
            ValuationBasis::Market => "market",
            ValuationBasis::AcquisitionFallback => "purchase",
        };
        let mass = item
            .mass_grams
            .map(|m| format!("{m:.2} g"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<30} {:>10} {:>12.2} {} ({basis})",
            item.material, mass, result.estimated_value, currency
        );
    }

    let s = &valuation.summary;
    println!();
    println!("Items:             {} ({} at market)", s.item_count, s.market_valued);
    println!("Market value:      {:.2} {}", s.market_value, currency);
    println!("Active investment: {:.2} {}", s.active_investment, currency);
    println!(
        "Unrealized gain:   {:.2} {} ({:+.1}%)",
        s.unrealized_gain, currency, s.unrealized_gain_pct
    );
}

fn print_outcome(query: &str, outcome: &SearchOutcome) {
    if let Some(warning) = &outcome.warning {
        println!("Warning: {warning}");
    }
    if outcome.candidates.is_empty() {
        println!("No candidates found for '{query}'");
        return;
    }
    for (i, c) in outcome.candidates.iter().enumerate() {
        println!("{}. {} [{} {}]", i + 1, c.display_title, c.metal, c.size);
        if let Some(image) = &c.image_url {
            println!("   image:  {image}");
        }
        println!("   source: {} ({})", c.source_url, c.source_label);
    }
}
