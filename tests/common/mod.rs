//! Shared test fixtures for the Numisma SDK integration tests.
//!
//! Provides in-memory stand-ins for the quote provider and the encyclopedia
//! so every test runs without network access, plus a few sample articles and
//! an SDK builder wired to a temporary cache directory.

#![allow(dead_code)]

use numisma_sdk::models::{ArticlePage, PriceQuote};
use numisma_sdk::{
    EncyclopediaSource, NumismaError, NumismaSdk, NumismaSdkBuilder, QuoteSource, Result,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ---------------------------------------------------------------------------
// StubQuotes
// ---------------------------------------------------------------------------

/// Quote source answering from a fixed price table.
///
/// Symbols missing from the table fail with a fetch error. Every requested
/// symbol is recorded in `calls`, which stays readable after the stub has
/// been moved into an SDK.
#[derive(Clone, Default)]
pub struct StubQuotes {
    prices: HashMap<String, f64>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl StubQuotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, symbol: &str, price: f64) -> Self {
        self.prices.insert(symbol.to_string(), price);
        self
    }

    /// Gold 2000, silver 25 and EURUSD 1.10.
    pub fn market() -> Self {
        Self::new()
            .with("GC=F", 2000.0)
            .with("SI=F", 25.0)
            .with("EURUSD=X", 1.10)
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn called(&self, symbol: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|s| s == symbol)
    }
}

impl QuoteSource for StubQuotes {
    fn last_price(&self, symbol: &str) -> Result<PriceQuote> {
        self.calls.lock().unwrap().push(symbol.to_string());
        match self.prices.get(symbol) {
            Some(price) => Ok(PriceQuote::new(symbol, *price).with_currency("USD")),
            None => Err(NumismaError::Fetch(format!("no quote for {}", symbol))),
        }
    }
}

// ---------------------------------------------------------------------------
// StubEncyclopedia
// ---------------------------------------------------------------------------

/// Encyclopedia answering searches with a fixed title list and pages from a
/// map. Titles without a page fail to fetch.
#[derive(Clone, Default)]
pub struct StubEncyclopedia {
    titles: Vec<String>,
    pages: HashMap<String, ArticlePage>,
    search_error: Option<String>,
    pub queries: Arc<Mutex<Vec<String>>>,
    pub fetched: Arc<Mutex<Vec<String>>>,
}

impl StubEncyclopedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a search hit with no page behind it.
    pub fn hit(mut self, title: &str) -> Self {
        self.titles.push(title.to_string());
        self
    }

    /// Add a search hit backed by `page`.
    pub fn article(mut self, page: ArticlePage) -> Self {
        self.titles.push(page.title.clone());
        self.pages.insert(page.title.clone(), page);
        self
    }

    pub fn failing(message: &str) -> Self {
        Self {
            search_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn fetched_titles(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> Option<String> {
        self.queries.lock().unwrap().last().cloned()
    }
}

impl EncyclopediaSource for StubEncyclopedia {
    fn label(&self) -> &str {
        "Stub Encyclopedia"
    }

    fn search(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        self.queries.lock().unwrap().push(query.to_string());
        if let Some(message) = &self.search_error {
            return Err(NumismaError::Fetch(message.clone()));
        }
        Ok(self.titles.iter().take(limit).cloned().collect())
    }

    fn page(&self, title: &str) -> Result<ArticlePage> {
        self.fetched.lock().unwrap().push(title.to_string());
        self.pages
            .get(title)
            .cloned()
            .ok_or_else(|| NumismaError::NotFound(format!("page {}", title)))
    }
}

// ---------------------------------------------------------------------------
// Sample articles
// ---------------------------------------------------------------------------

/// A Libertad article naming silver and gold in 1 oz and 1/4 oz.
pub fn libertad_page() -> ArticlePage {
    let summary = "The Libertad is a bullion coin series minted by the Mexican Mint \
                   since 1981."
        .to_string();
    ArticlePage {
        title: "Libertad (coin)".to_string(),
        full_text: format!(
            "{summary}\n\n== Issues ==\nSilver Libertads are issued in 1 oz and \
             1/4 oz sizes. Gold Libertads followed with the same weights."
        ),
        summary,
        image_urls: vec![
            "https://upload.wikimedia.org/x/Libertad_silver_obverse.jpg".to_string(),
            "https://upload.wikimedia.org/x/Flag_of_Mexico.svg".to_string(),
            "https://upload.wikimedia.org/x/Libertad_gold_1981.jpg".to_string(),
        ],
        url: "https://en.wikipedia.org/wiki/Libertad_(coin)".to_string(),
    }
}

/// An article whose text names every metal and three sizes.
pub fn everything_page() -> ArticlePage {
    ArticlePage {
        title: "Panda coin".to_string(),
        summary: "The Panda is a series of bullion coins issued by the People's Bank \
                  of China."
            .to_string(),
        full_text: "Issued in silver, gold, platinum and copper. Weights: 1 oz, \
                    1/4 oz and 1/10 oz."
            .to_string(),
        image_urls: vec!["https://upload.wikimedia.org/x/Panda_reverse.jpg".to_string()],
        url: "https://en.wikipedia.org/wiki/Panda_coin".to_string(),
    }
}

// ---------------------------------------------------------------------------
// SDK
// ---------------------------------------------------------------------------

/// Builder wired to the stubs and a fresh temporary cache directory.
///
/// Returns `(NumismaSdkBuilder, tempfile::TempDir)`. The caller must keep the
/// `TempDir` alive for the duration of the test.
pub fn builder(quotes: StubQuotes, encyclopedia: StubEncyclopedia) -> (NumismaSdkBuilder, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let builder = NumismaSdk::builder()
        .cache_dir(tmp_dir.path())
        .quote_source(quotes)
        .encyclopedia(encyclopedia);
    (builder, tmp_dir)
}

/// An EUR SDK over the stubs with caching enabled.
pub fn sdk(quotes: StubQuotes, encyclopedia: StubEncyclopedia) -> (NumismaSdk, tempfile::TempDir) {
    let (builder, tmp_dir) = builder(quotes, encyclopedia);
    (builder.build().unwrap(), tmp_dir)
}

pub fn approx(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected} +/- {tolerance}, got {actual}"
    );
}
