//! Turns raw bullion and FX quotes into per-gram prices in a target
//! currency.
//!
//! Bullion is quoted in USD per troy ounce. The FX quote is expected as USD
//! per unit of the target currency (e.g. `EURUSD=X` ≈ 1.08), but providers
//! sometimes hand back the inverse pair or garbage, so the rate is checked
//! against a plausible [`FxBand`] and repaired before use.

use chrono::Utc;
use tracing::{debug, warn};

use crate::config::{self, FxBand};
use crate::error::{NumismaError, Result};
use crate::feeds::QuoteSource;
use crate::models::{Currency, FxCorrection, NormalizedRate, PriceQuote};

// ---------------------------------------------------------------------------
// RateNormalizer
// ---------------------------------------------------------------------------

pub struct RateNormalizer<'a> {
    source: &'a dyn QuoteSource,
    currency: Currency,
    band: FxBand,
}

impl<'a> RateNormalizer<'a> {
    pub fn new(source: &'a dyn QuoteSource, currency: Currency, band: FxBand) -> Self {
        Self {
            source,
            currency,
            band,
        }
    }

    /// Fetch gold, silver and FX quotes and derive per-gram prices.
    ///
    /// `fx_symbols` are tried in order until one quotes successfully; they
    /// are ignored when the target currency is USD. If gold, silver or every
    /// FX symbol fails, the call fails with one error naming each failure.
    pub fn normalize_rates(&self, fx_symbols: &[String]) -> Result<NormalizedRate> {
        let mut failures: Vec<String> = Vec::new();

        let gold = self.fetch(config::GOLD_SYMBOL, &mut failures);
        let silver = self.fetch(config::SILVER_SYMBOL, &mut failures);
        let fx = self.fetch_fx(fx_symbols, &mut failures);

        let (gold, silver, (fx_rate, fx_symbol, fx_correction)) = match (gold, silver, fx) {
            (Some(g), Some(s), Some(fx)) => (g, s, fx),
            _ => {
                return Err(NumismaError::Fetch(format!(
                    "Market rates unavailable: {}",
                    failures.join("; ")
                )))
            }
        };

        let rate = NormalizedRate {
            gold_per_gram: per_gram(gold.raw_price, fx_rate),
            silver_per_gram: per_gram(silver.raw_price, fx_rate),
            currency: self.currency,
            fetched_at: Utc::now(),
            gold_per_ounce: gold.raw_price,
            silver_per_ounce: silver.raw_price,
            fx_rate,
            fx_symbol,
            fx_correction,
        };
        debug!(
            currency = %rate.currency,
            gold_per_gram = rate.gold_per_gram,
            silver_per_gram = rate.silver_per_gram,
            fx_rate = rate.fx_rate,
            "Normalized market rates"
        );
        Ok(rate)
    }

    fn fetch(&self, symbol: &str, failures: &mut Vec<String>) -> Option<PriceQuote> {
        match self.source.last_price(symbol) {
            Ok(quote) => Some(quote),
            Err(e) => {
                failures.push(format!("{}: {}", symbol, e));
                None
            }
        }
    }

    fn fetch_fx(
        &self,
        symbols: &[String],
        failures: &mut Vec<String>,
    ) -> Option<(f64, Option<String>, FxCorrection)> {
        if self.currency == Currency::Usd {
            return Some((1.0, None, FxCorrection::Identity));
        }
        if symbols.is_empty() {
            failures.push(format!("no FX symbol configured for {}", self.currency));
            return None;
        }

        let mut fx_failures = Vec::new();
        for symbol in symbols {
            match self.source.last_price(symbol) {
                Ok(quote) => {
                    let (rate, correction) = correct_fx_rate(quote.raw_price, &self.band);
                    if correction != FxCorrection::None {
                        warn!(
                            symbol = %symbol,
                            raw = quote.raw_price,
                            corrected = rate,
                            correction = ?correction,
                            "FX quote outside plausible band"
                        );
                    }
                    return Some((rate, Some(symbol.clone()), correction));
                }
                Err(e) => {
                    debug!(symbol = %symbol, error = %e, "FX symbol failed, trying next");
                    fx_failures.push(format!("{}: {}", symbol, e));
                }
            }
        }

        failures.extend(fx_failures);
        None
    }
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

/// Repair an FX quote against `band`.
///
/// A positive rate below the band is read as the inverse pair and replaced
/// by its reciprocal. Whatever is still outside the band afterwards
/// (including zero, negative and non-finite rates) is replaced by the
/// band's fallback.
pub fn correct_fx_rate(raw: f64, band: &FxBand) -> (f64, FxCorrection) {
    let mut rate = raw;
    let mut correction = FxCorrection::None;

    if rate > 0.0 && rate < band.min {
        rate = 1.0 / rate;
        correction = FxCorrection::Inverted;
    }

    if !rate.is_finite() || rate <= 0.0 || !band.contains(rate) {
        return (band.fallback, FxCorrection::Fallback);
    }
    (rate, correction)
}

/// Convert a per-troy-ounce price to a per-gram price in the target
/// currency. Non-positive inputs give zero.
pub fn per_gram(price_per_ounce: f64, fx_rate: f64) -> f64 {
    if price_per_ounce > 0.0 && fx_rate > 0.0 {
        (price_per_ounce / fx_rate) / config::TROY_OUNCE_GRAMS
    } else {
        0.0
    }
}
