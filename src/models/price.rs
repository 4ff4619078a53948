use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NumismaError;

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Chf,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Chf => "CHF",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = NumismaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "CHF" => Ok(Currency::Chf),
            other => Err(NumismaError::InvalidArgument(format!(
                "Unsupported currency: '{}'",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// PriceQuote — one scalar last price for an instrument
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub instrument_id: String,
    pub raw_price: f64,
    /// Currency the instrument is quoted in, as reported by the provider.
    pub currency: Option<String>,
    pub as_of: DateTime<Utc>,
}

impl PriceQuote {
    pub fn new(instrument_id: impl Into<String>, raw_price: f64) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            raw_price,
            currency: None,
            as_of: Utc::now(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

// ---------------------------------------------------------------------------
// FxCorrection — how the FX quote was repaired, if at all
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FxCorrection {
    /// The quote was in band and used as-is.
    None,
    /// The quote was below the band and replaced by its reciprocal.
    Inverted,
    /// The quote was unusable and the band's fallback rate was substituted.
    Fallback,
    /// The target currency is the quote currency; no FX was needed.
    Identity,
}

// ---------------------------------------------------------------------------
// NormalizedRate — per-gram bullion prices in the target currency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRate {
    pub gold_per_gram: f64,
    pub silver_per_gram: f64,
    pub currency: Currency,
    pub fetched_at: DateTime<Utc>,
    /// Raw gold quote, quote currency per troy ounce.
    pub gold_per_ounce: f64,
    /// Raw silver quote, quote currency per troy ounce.
    pub silver_per_ounce: f64,
    /// Effective FX rate after correction (quote currency per target unit).
    pub fx_rate: f64,
    /// Symbol that produced the FX quote, if one was needed.
    pub fx_symbol: Option<String>,
    pub fx_correction: FxCorrection,
}
