//! Yahoo Finance chart endpoint as a [`QuoteSource`].

use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use super::QuoteSource;
use crate::config;
use crate::error::{NumismaError, Result};
use crate::models::PriceQuote;

pub struct YahooQuoteSource {
    client: Client,
    base_url: String,
}

impl YahooQuoteSource {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: config::YAHOO_CHART_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl QuoteSource for YahooQuoteSource {
    fn last_price(&self, symbol: &str) -> Result<PriceQuote> {
        let url = format!("{}/{}", self.base_url, symbol);
        debug!(symbol = %symbol, url = %url, "Fetching quote");

        let resp = self
            .client
            .get(&url)
            .query(&[("range", "1d"), ("interval", "1m")])
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(NumismaError::Fetch(format!(
                "Quote for {} unavailable: HTTP {}",
                symbol, status
            )));
        }

        let body = resp.text()?;
        parse_chart(symbol, &body)
    }
}

/// Extract the last price from a chart response body.
///
/// The fast `meta.regularMarketPrice` field is preferred; when the provider
/// leaves it out, the last non-null close of the intraday series is used.
pub fn parse_chart(symbol: &str, body: &str) -> Result<PriceQuote> {
    let envelope: ChartEnvelope = serde_json::from_str(body)
        .map_err(|e| NumismaError::Parse(format!("Unexpected quote payload for {}: {}", symbol, e)))?;

    if let Some(err) = envelope.chart.error {
        return Err(NumismaError::Fetch(format!(
            "Quote for {} rejected: {}",
            symbol,
            err.description.unwrap_or_else(|| "unknown error".to_string())
        )));
    }

    let result = envelope
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| NumismaError::Parse(format!("Quote payload for {} has no result", symbol)))?;

    let series_close = result
        .indicators
        .and_then(|i| i.quote.into_iter().next())
        .and_then(|q| q.close.into_iter().rev().flatten().next());

    let price = result
        .meta
        .regular_market_price
        .or(series_close)
        .ok_or_else(|| {
            NumismaError::PartialData(format!("Quote payload for {} carries no price", symbol))
        })?;

    let as_of = result
        .meta
        .regular_market_time
        .and_then(|t| DateTime::<Utc>::from_timestamp(t, 0))
        .unwrap_or_else(Utc::now);

    Ok(PriceQuote {
        instrument_id: symbol.to_string(),
        raw_price: price,
        currency: result.meta.currency,
        as_of,
    })
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    currency: Option<String>,
    regular_market_price: Option<f64>,
    regular_market_time: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    close: Vec<Option<f64>>,
}
