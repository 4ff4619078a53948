use serde::{Deserialize, Serialize};

use super::VariantCandidate;
use crate::error::{NumismaError, Result};

// ---------------------------------------------------------------------------
// CatalogProposal — a candidate offered to the catalog for human review
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProposal {
    pub title: String,
    pub country: String,
    pub year: Option<i32>,
    pub material: String,
    pub mass_grams: Option<f64>,
    pub diameter_mm: Option<f64>,
    pub image_url: Option<String>,
    /// True when the proposal was prefilled from a web search rather than
    /// typed in by hand.
    pub from_web: bool,
}

impl CatalogProposal {
    /// Prefill a proposal from a search candidate. Country, year and
    /// dimensions are left for the curator.
    pub fn from_candidate(candidate: &VariantCandidate) -> Self {
        Self {
            title: candidate.display_title.clone(),
            material: candidate.metal.label().to_string(),
            image_url: candidate.image_url.clone(),
            from_web: true,
            ..Self::default()
        }
    }

    /// Check required fields and drop meaningless measurements.
    ///
    /// Title, country and material must be non-blank. Non-positive mass or
    /// diameter is cleared rather than rejected.
    pub fn validate(mut self) -> Result<Self> {
        let missing: Vec<&str> = [
            ("title", &self.title),
            ("country", &self.country),
            ("material", &self.material),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(NumismaError::InvalidArgument(format!(
                "Catalog proposal is missing required fields: {}",
                missing.join(", ")
            )));
        }

        self.mass_grams = self.mass_grams.filter(|m| m.is_finite() && *m > 0.0);
        self.diameter_mm = self.diameter_mm.filter(|d| d.is_finite() && *d > 0.0);
        self.image_url = self.image_url.filter(|u| !u.trim().is_empty());
        Ok(self)
    }
}

/// Receives validated proposals for human-in-the-loop confirmation.
/// Implemented by the catalog owner; this crate never persists anything.
pub trait CatalogIngestion {
    fn propose(&self, proposal: CatalogProposal) -> Result<()>;
}
