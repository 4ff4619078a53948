use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// InventoryItem — a coin held in the collection (read-only here)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Free-text material description, e.g. `"Plata .925"` or `"Gold 22k"`.
    #[serde(default)]
    pub material: String,
    /// Mass in grams. Collection exports are inconsistent here, so numbers,
    /// numeric strings and garbage are all accepted; garbage becomes `None`.
    #[serde(default, deserialize_with = "lenient_mass")]
    pub mass_grams: Option<f64>,
    #[serde(default)]
    pub acquisition_price: f64,
}

impl InventoryItem {
    pub fn new(material: impl Into<String>, mass_grams: Option<f64>, acquisition_price: f64) -> Self {
        Self {
            material: material.into(),
            mass_grams,
            acquisition_price,
        }
    }

    /// Build an item from a textual mass field, treating anything that is not
    /// a number as absent.
    pub fn from_text(material: impl Into<String>, mass: Option<&str>, acquisition_price: f64) -> Self {
        Self::new(material, mass.and_then(parse_mass), acquisition_price)
    }

    /// Mass usable for a market valuation: present, finite and positive.
    pub fn usable_mass(&self) -> Option<f64> {
        self.mass_grams.filter(|m| m.is_finite() && *m > 0.0)
    }
}

/// Parse a mass such as `"31.1"`, `" 15,55 "` or `"27 g"`.
pub fn parse_mass(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().trim_end_matches(['g', 'G']).trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|m| m.is_finite())
}

fn lenient_mass<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => parse_mass(&s),
        _ => None,
    })
}

// ---------------------------------------------------------------------------
// ValuationResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationBasis {
    Market,
    AcquisitionFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub estimated_value: f64,
    pub basis: ValuationBasis,
}

impl ValuationResult {
    pub fn market(estimated_value: f64) -> Self {
        Self {
            estimated_value,
            basis: ValuationBasis::Market,
        }
    }

    pub fn fallback(item: &InventoryItem) -> Self {
        Self {
            estimated_value: item.acquisition_price,
            basis: ValuationBasis::AcquisitionFallback,
        }
    }
}

// ---------------------------------------------------------------------------
// PortfolioSummary — aggregated view over the items still held
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub item_count: usize,
    pub market_valued: usize,
    pub fallback_valued: usize,
    pub market_value: f64,
    pub active_investment: f64,
    pub unrealized_gain: f64,
    /// Gain relative to the active investment, in percent. Zero when nothing
    /// was invested.
    pub unrealized_gain_pct: f64,
}

/// Result of valuing a whole collection in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionValuation {
    pub items: Vec<(InventoryItem, ValuationResult)>,
    pub summary: PortfolioSummary,
    /// Rates behind the market valuations; `None` when they could not be
    /// fetched and every item fell back to its acquisition price.
    pub rates: Option<super::NormalizedRate>,
    pub warning: Option<String>,
}
