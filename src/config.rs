use std::path::PathBuf;
use std::time::Duration;

use crate::models::Currency;

pub const YAHOO_CHART_BASE: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
pub const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";
pub const USER_AGENT: &str = concat!(
    "numisma-sdk/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/numisma/numisma-sdk)"
);

/// Gold futures, quoted in USD per troy ounce.
pub const GOLD_SYMBOL: &str = "GC=F";
/// Silver futures, quoted in USD per troy ounce.
pub const SILVER_SYMBOL: &str = "SI=F";

pub const TROY_OUNCE_GRAMS: f64 = 31.1035;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_QUOTE_TTL: Duration = Duration::from_secs(5 * 60);

pub const SEARCH_RESULT_LIMIT: usize = 3;
pub const SUMMARY_SCAN_CHARS: usize = 800;
pub const MAX_IMAGES_SCANNED: usize = 15;
pub const MAX_CANDIDATES: usize = 4;
pub const MAX_METALS_PER_SEARCH: usize = 3;
pub const MAX_SIZES_PER_METAL: usize = 2;
pub const CANDIDATE_SUMMARY_CHARS: usize = 200;

/// Plausible band for a quoted FX rate, expressed as units of the quote
/// currency (USD) per unit of the target currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FxBand {
    pub min: f64,
    pub max: f64,
    /// Substituted whenever a quote is still outside `[min, max]` after
    /// inversion correction.
    pub fallback: f64,
}

impl FxBand {
    pub const fn new(min: f64, max: f64, fallback: f64) -> Self {
        Self { min, max, fallback }
    }

    pub fn contains(&self, rate: f64) -> bool {
        rate >= self.min && rate <= self.max
    }
}

/// Default Yahoo symbols and sanity band for converting USD quotes into
/// `currency`. Returns `None` for currencies without a built-in default;
/// those need an explicit band and symbol list on the builder.
pub fn fx_defaults(currency: Currency) -> Option<(Vec<String>, FxBand)> {
    match currency {
        Currency::Usd => Some((Vec::new(), FxBand::new(1.0, 1.0, 1.0))),
        Currency::Eur => Some((
            vec!["EURUSD=X".to_string(), "EUR=X".to_string()],
            FxBand::new(1.0, 2.0, 1.10),
        )),
        Currency::Gbp => Some((
            vec!["GBPUSD=X".to_string(), "GBP=X".to_string()],
            FxBand::new(1.0, 2.0, 1.27),
        )),
        Currency::Chf => None,
    }
}

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("numisma-sdk")
    } else {
        PathBuf::from(".numisma-sdk-cache")
    }
}
