//! Market valuation of collection items from normalized bullion rates.

use crate::models::{
    InventoryItem, Metal, NormalizedRate, PortfolioSummary, ValuationBasis, ValuationResult,
};
use crate::search::vocabulary::METALS;

/// Silver purity markers in priority order. Plain substring matches, so
/// `".925"`, `"925"` and `"9999"` all count.
const FINENESS_MARKERS: &[(&str, f64)] = &[
    ("999", 0.999),
    ("925", 0.925),
    ("900", 0.900),
    ("800", 0.800),
];

const DEFAULT_SILVER_FINENESS: f64 = 0.900;

/// Estimate the current value of `item` at `rate`.
///
/// Gold is valued at full weight, silver at weight times [`fineness`].
/// Items without a usable mass, or of any other material, are valued at
/// their acquisition price.
pub fn estimate_value(item: &InventoryItem, rate: &NormalizedRate) -> ValuationResult {
    let Some(mass) = item.usable_mass() else {
        return ValuationResult::fallback(item);
    };

    match classify_material(&item.material) {
        Some(Metal::Gold) => ValuationResult::market(mass * rate.gold_per_gram),
        Some(Metal::Silver) => {
            ValuationResult::market(mass * rate.silver_per_gram * fineness(&item.material))
        }
        _ => ValuationResult::fallback(item),
    }
}

/// Which bullion metal a material string describes. Gold is checked before
/// silver; platinum and copper are not valued.
pub fn classify_material(material: &str) -> Option<Metal> {
    let lower = material.to_lowercase();
    [Metal::Gold, Metal::Silver].into_iter().find(|metal| {
        METALS
            .iter()
            .filter(|e| e.metal == *metal)
            .any(|e| e.names.iter().any(|n| lower.contains(n)))
    })
}

/// Silver fineness declared in a material string, defaulting to 0.900.
///
/// ```
/// use numisma_sdk::valuation::fineness;
///
/// assert_eq!(fineness("Plata .999 .925"), 0.999);
/// assert_eq!(fineness("Sterling silver 925"), 0.925);
/// assert_eq!(fineness("Plata 9999"), 0.999);
/// assert_eq!(fineness("Plata"), 0.900);
/// ```
pub fn fineness(material: &str) -> f64 {
    FINENESS_MARKERS
        .iter()
        .find(|(marker, _)| material.contains(*marker))
        .map(|(_, f)| *f)
        .unwrap_or(DEFAULT_SILVER_FINENESS)
}

/// Aggregate per-item results into a portfolio view.
///
/// `items` and `results` are zipped; extra entries in either are ignored.
pub fn summarize(items: &[InventoryItem], results: &[ValuationResult]) -> PortfolioSummary {
    let mut summary = PortfolioSummary {
        item_count: 0,
        market_valued: 0,
        fallback_valued: 0,
        market_value: 0.0,
        active_investment: 0.0,
        unrealized_gain: 0.0,
        unrealized_gain_pct: 0.0,
    };

    for (item, result) in items.iter().zip(results) {
        summary.item_count += 1;
        match result.basis {
            ValuationBasis::Market => summary.market_valued += 1,
            ValuationBasis::AcquisitionFallback => summary.fallback_valued += 1,
        }
        summary.market_value += result.estimated_value;
        summary.active_investment += item.acquisition_price;
    }

    summary.unrealized_gain = summary.market_value - summary.active_investment;
    if summary.active_investment > 0.0 {
        summary.unrealized_gain_pct = summary.unrealized_gain / summary.active_investment * 100.0;
    }
    summary
}
