//! Short-lived on-disk cache of market quotes.
//!
//! Spot prices go stale within minutes, so entries carry the time they were
//! stored and are ignored once older than the configured TTL. Entries are
//! keyed by instrument and currency pair and persisted as one JSON file so
//! repeated CLI invocations do not hammer the quote provider.

use crate::config;
use crate::error::{NumismaError, Result};
use crate::feeds::QuoteSource;
use crate::models::PriceQuote;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

const CACHE_FILE: &str = "quotes.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedQuote {
    quote: PriceQuote,
    stored_at: DateTime<Utc>,
}

/// Stores recent quotes under the cache directory.
pub struct QuoteCache {
    /// Directory where the cache file lives.
    pub cache_dir: PathBuf,
    /// If true, quotes are only ever served from the cache.
    pub offline: bool,
    ttl: Duration,
    entries: Option<HashMap<String, CachedQuote>>,
}

impl QuoteCache {
    /// Create a new quote cache.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache
    /// directory. Creates the directory if it does not exist. A zero `ttl`
    /// disables caching entirely.
    pub fn new(cache_dir: Option<PathBuf>, offline: bool, ttl: Duration) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            cache_dir: dir,
            offline,
            ttl,
            entries: None,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    fn path(&self) -> PathBuf {
        self.cache_dir.join(CACHE_FILE)
    }

    fn key(instrument: &str, pair: &str) -> String {
        format!("{}|{}", instrument, pair)
    }

    /// Lazily read the cache file. A corrupt file is deleted and treated as
    /// empty.
    fn entries(&mut self) -> &mut HashMap<String, CachedQuote> {
        if self.entries.is_none() {
            let path = self.path();
            let loaded = match read_entries(&path) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Corrupt quote cache -- removing");
                    let _ = fs::remove_file(&path);
                    HashMap::new()
                }
            };
            self.entries = Some(loaded);
        }
        self.entries.get_or_insert_with(HashMap::new)
    }

    /// Return the cached quote for `(instrument, pair)` if it is younger than
    /// the TTL.
    pub fn get(&mut self, instrument: &str, pair: &str) -> Option<PriceQuote> {
        if !self.is_enabled() {
            return None;
        }
        let ttl = self.ttl;
        let key = Self::key(instrument, pair);
        let entry = self.entries().get(&key)?;

        let fresh = Utc::now()
            .signed_duration_since(entry.stored_at)
            .to_std()
            .map(|age| age < ttl)
            .unwrap_or(false);

        if fresh {
            Some(entry.quote.clone())
        } else {
            debug!(key = %key, "Cached quote expired");
            None
        }
    }

    /// Store a quote. Non-positive prices are never cached.
    pub fn put(&mut self, instrument: &str, pair: &str, quote: &PriceQuote) -> Result<()> {
        let cacheable = quote.raw_price.is_finite() && quote.raw_price > 0.0;
        if !self.is_enabled() || !cacheable {
            return Ok(());
        }
        let key = Self::key(instrument, pair);
        self.entries().insert(
            key,
            CachedQuote {
                quote: quote.clone(),
                stored_at: Utc::now(),
            },
        );
        self.save()
    }

    /// Write the cache to a temp file and rename it over the old one, so an
    /// interrupted write never leaves a truncated cache behind.
    fn save(&mut self) -> Result<()> {
        let path = self.path();
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(&*self.entries())?;

        let result = (|| -> Result<()> {
            fs::write(&tmp, &body)?;
            fs::rename(&tmp, &path)?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }

    /// Drop every cached quote.
    pub fn clear(&mut self) -> Result<()> {
        self.entries = Some(HashMap::new());
        let path = self.path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<HashMap<String, CachedQuote>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

// ---------------------------------------------------------------------------
// CachingQuoteSource
// ---------------------------------------------------------------------------

/// A [`QuoteSource`] that consults a [`QuoteCache`] before the network.
///
/// `pair` labels the currency pair the quotes will be converted for, so a
/// quote fetched for one target currency is not reused for another.
pub struct CachingQuoteSource<'a> {
    inner: &'a dyn QuoteSource,
    cache: &'a RefCell<QuoteCache>,
    pair: String,
}

impl<'a> CachingQuoteSource<'a> {
    pub fn new(inner: &'a dyn QuoteSource, cache: &'a RefCell<QuoteCache>, pair: impl Into<String>) -> Self {
        Self {
            inner,
            cache,
            pair: pair.into(),
        }
    }
}

impl QuoteSource for CachingQuoteSource<'_> {
    fn last_price(&self, symbol: &str) -> Result<PriceQuote> {
        if let Some(quote) = self.cache.borrow_mut().get(symbol, &self.pair) {
            debug!(symbol = %symbol, pair = %self.pair, "Quote served from cache");
            return Ok(quote);
        }

        if self.cache.borrow().offline {
            return Err(NumismaError::Fetch(format!(
                "No fresh cached quote for {} and offline mode is enabled",
                symbol
            )));
        }

        let quote = self.inner.last_price(symbol)?;
        if let Err(e) = self.cache.borrow_mut().put(symbol, &self.pair, &quote) {
            warn!(symbol = %symbol, error = %e, "Could not write quote cache");
        }
        Ok(quote)
    }
}
