//! Numisma SDK for Rust.
//!
//! Two services for coin collectors:
//!
//! - **Valuation**: live gold and silver spot prices are fetched, sanity
//!   checked and converted to a per-gram price in your currency, then applied
//!   to each coin's declared material and weight.
//! - **Candidate search**: a free-text query such as `"Libertad silver 1oz"`
//!   is matched against Wikipedia and expanded into a few metal/size variants
//!   ready to be proposed to a catalog.
//!
//! # Quick start
//!
//! ```no_run
//! use numisma_sdk::{InventoryItem, NumismaSdk};
//!
//! let sdk = NumismaSdk::builder().build().unwrap();
//!
//! // Current per-gram prices
//! let rates = sdk.rates().unwrap();
//! println!("gold: {:.2} {}/g", rates.gold_per_gram, rates.currency);
//!
//! // Value a coin
//! let coin = InventoryItem::new("Plata .999", Some(31.1), 35.0);
//! let value = sdk.value_item(&coin).unwrap();
//!
//! // Find catalog candidates
//! let outcome = sdk.search_candidates("Libertad silver 1oz");
//! for c in &outcome.candidates {
//!     println!("{} ({} {})", c.display_title, c.metal, c.size);
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod collection;
pub mod config;
pub mod error;
pub mod feeds;
pub mod models;
pub mod normalizer;
pub mod search;
pub mod telemetry;
pub mod valuation;

#[cfg(feature = "async")]
pub use async_client::AsyncNumismaSdk;
pub use cache::QuoteCache;
pub use collection::{CollectionStore, JsonCollection};
pub use config::FxBand;
pub use error::{NumismaError, Result};
pub use feeds::{QuoteSource, YahooQuoteSource};
pub use models::{
    CatalogIngestion, CatalogProposal, CollectionValuation, Currency, InventoryItem, Metal,
    NormalizedRate, QueryIntent, SearchOutcome, ValuationBasis, ValuationResult, VariantCandidate,
};
pub use search::{EncyclopediaSource, WikipediaSource};

use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{info, warn};

use crate::cache::CachingQuoteSource;
use crate::normalizer::RateNormalizer;
use crate::search::CandidateSearch;

// ---------------------------------------------------------------------------
// NumismaSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`NumismaSdk`] instance.
///
/// Use [`NumismaSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](NumismaSdkBuilder::build) to create the SDK.
pub struct NumismaSdkBuilder {
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    quote_ttl: Duration,
    currency: Currency,
    fx_band: Option<FxBand>,
    fx_symbols: Option<Vec<String>>,
    quote_source: Option<Box<dyn QuoteSource + Send>>,
    encyclopedia: Option<Box<dyn EncyclopediaSource + Send>>,
}

impl Default for NumismaSdkBuilder {
    fn default() -> Self {
        Self {
            cache_dir: None,
            offline: false,
            timeout: config::DEFAULT_TIMEOUT,
            quote_ttl: config::DEFAULT_QUOTE_TTL,
            currency: Currency::Eur,
            fx_band: None,
            fx_symbols: None,
            quote_source: None,
            encyclopedia: None,
        }
    }
}

impl NumismaSdkBuilder {
    /// Set a custom cache directory for recent quotes.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/numisma-sdk` on Linux).
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, quotes are only served from the cache while they are
    /// fresh; valuation fails once they expire. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the timeout applied to every HTTP request.
    ///
    /// Defaults to 10 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// How long a fetched quote may be reused. Zero disables the cache.
    ///
    /// Defaults to 5 minutes.
    pub fn quote_ttl(mut self, ttl: Duration) -> Self {
        self.quote_ttl = ttl;
        self
    }

    /// Currency valuations are expressed in. Defaults to EUR.
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Override the plausible FX band for the target currency.
    pub fn fx_band(mut self, band: FxBand) -> Self {
        self.fx_band = Some(band);
        self
    }

    /// Override the FX symbols tried, in order, for the target currency.
    pub fn fx_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fx_symbols = Some(symbols.into_iter().map(Into::into).collect());
        self
    }

    /// Use a custom quote source instead of Yahoo Finance.
    pub fn quote_source(mut self, source: impl QuoteSource + Send + 'static) -> Self {
        self.quote_source = Some(Box::new(source));
        self
    }

    /// Use a custom encyclopedic source instead of English Wikipedia.
    pub fn encyclopedia(mut self, source: impl EncyclopediaSource + Send + 'static) -> Self {
        self.encyclopedia = Some(Box::new(source));
        self
    }

    /// Build the SDK.
    ///
    /// Fails if the target currency has no built-in FX defaults and no
    /// explicit band and symbols were given, or if the HTTP client or cache
    /// directory cannot be set up. Nothing is fetched eagerly.
    pub fn build(self) -> Result<NumismaSdk> {
        let defaults = config::fx_defaults(self.currency);
        let (fx_symbols, fx_band) = match (self.fx_symbols, self.fx_band, defaults) {
            (Some(symbols), Some(band), _) => (symbols, band),
            (symbols, band, Some((default_symbols, default_band))) => (
                symbols.unwrap_or(default_symbols),
                band.unwrap_or(default_band),
            ),
            _ => {
                return Err(NumismaError::InvalidArgument(format!(
                    "No FX defaults for {}; set fx_band and fx_symbols explicitly",
                    self.currency
                )))
            }
        };

        // Only build an HTTP client when a default source needs one.
        let client = match (&self.quote_source, &self.encyclopedia) {
            (Some(_), Some(_)) => None,
            _ => Some(http_client(self.timeout)?),
        };

        let quotes = self
            .quote_source
            .or_else(|| {
                client
                    .clone()
                    .map(|c| Box::new(YahooQuoteSource::new(c)) as Box<dyn QuoteSource + Send>)
            })
            .ok_or_else(|| NumismaError::InvalidArgument("No quote source configured".into()))?;
        let encyclopedia = self
            .encyclopedia
            .or_else(|| {
                client
                    .map(|c| Box::new(WikipediaSource::new(c)) as Box<dyn EncyclopediaSource + Send>)
            })
            .ok_or_else(|| NumismaError::InvalidArgument("No encyclopedia configured".into()))?;

        let cache = QuoteCache::new(self.cache_dir, self.offline, self.quote_ttl)?;

        Ok(NumismaSdk {
            quotes,
            encyclopedia,
            cache: RefCell::new(cache),
            currency: self.currency,
            fx_band,
            fx_symbols,
        })
    }
}

fn http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(config::USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()?)
}

// ---------------------------------------------------------------------------
// NumismaSdk
// ---------------------------------------------------------------------------

/// The main entry point for the Numisma SDK.
///
/// Owns the quote and encyclopedia sources and the quote cache. Every call
/// runs synchronously to completion; there is no background refresh.
///
/// Created via [`NumismaSdk::builder()`].
pub struct NumismaSdk {
    quotes: Box<dyn QuoteSource + Send>,
    encyclopedia: Box<dyn EncyclopediaSource + Send>,
    /// Recent quotes, reused while younger than the configured TTL.
    pub cache: RefCell<QuoteCache>,
    currency: Currency,
    fx_band: FxBand,
    fx_symbols: Vec<String>,
}

impl NumismaSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> NumismaSdkBuilder {
        NumismaSdkBuilder::default()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    // -- Valuation ---------------------------------------------------------

    /// Fetch and normalize current gold and silver prices per gram.
    ///
    /// Fails as a whole if any required quote is unavailable.
    pub fn rates(&self) -> Result<NormalizedRate> {
        let pair = format!("USD{}", self.currency);
        let source = CachingQuoteSource::new(&*self.quotes, &self.cache, pair);
        RateNormalizer::new(&source, self.currency, self.fx_band).normalize_rates(&self.fx_symbols)
    }

    /// Value a single item at current rates.
    pub fn value_item(&self, item: &InventoryItem) -> Result<ValuationResult> {
        let rates = self.rates()?;
        Ok(valuation::estimate_value(item, &rates))
    }

    /// Value every item in `store` and summarize the portfolio.
    ///
    /// Rates are fetched once for the whole pass. If they cannot be fetched,
    /// every item is valued at its acquisition price and the reason is
    /// reported in [`CollectionValuation::warning`]; only a failure to read
    /// the store itself is an error.
    pub fn value_collection(&self, store: &dyn CollectionStore) -> Result<CollectionValuation> {
        let items = store.items()?;

        let (rates, warning) = match self.rates() {
            Ok(rates) => (Some(rates), None),
            Err(e) => {
                warn!(error = %e, "Valuing collection at acquisition prices");
                (None, Some(format!("Market prices unavailable: {}", e)))
            }
        };

        let results: Vec<ValuationResult> = items
            .iter()
            .map(|item| match &rates {
                Some(r) => valuation::estimate_value(item, r),
                None => ValuationResult::fallback(item),
            })
            .collect();

        let summary = valuation::summarize(&items, &results);
        info!(
            items = summary.item_count,
            market_valued = summary.market_valued,
            market_value = summary.market_value,
            "Collection valued"
        );

        Ok(CollectionValuation {
            items: items.into_iter().zip(results).collect(),
            summary,
            rates,
            warning,
        })
    }

    // -- Candidate search --------------------------------------------------

    /// Search for catalog candidates matching a free-text query.
    ///
    /// Never fails; see [`SearchOutcome::warning`].
    pub fn search_candidates(&self, query: &str) -> SearchOutcome {
        CandidateSearch::new(&*self.encyclopedia).search(query)
    }

    /// Validate a proposal and hand it to the catalog for review.
    pub fn propose(&self, sink: &dyn CatalogIngestion, proposal: CatalogProposal) -> Result<()> {
        let proposal = proposal.validate()?;
        info!(title = %proposal.title, from_web = proposal.from_web, "Proposing catalog entry");
        sink.propose(proposal)
    }

    /// Forget all cached quotes so the next call refetches.
    pub fn refresh(&self) -> Result<()> {
        self.cache.borrow_mut().clear()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for NumismaSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.cache.borrow();
        write!(
            f,
            "NumismaSdk(currency={}, fx_symbols=[{}], source={}, cache_dir={}, offline={})",
            self.currency,
            self.fx_symbols.join(", "),
            self.encyclopedia.label(),
            cache.cache_dir.display(),
            cache.offline
        )
    }
}
