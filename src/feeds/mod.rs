//! Market quote sources.

pub mod yahoo;

pub use yahoo::YahooQuoteSource;

use crate::error::Result;
use crate::models::PriceQuote;

/// Something that can quote a last price for an instrument symbol.
///
/// A single attempt is made per call; callers decide whether to fall back
/// to another symbol.
pub trait QuoteSource {
    fn last_price(&self, symbol: &str) -> Result<PriceQuote>;
}
