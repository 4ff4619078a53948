use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Metal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metal {
    Gold,
    Silver,
    Platinum,
    Copper,
}

impl Metal {
    /// Display name used in candidate summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Metal::Gold => "Gold",
            Metal::Silver => "Silver",
            Metal::Platinum => "Platinum",
            Metal::Copper => "Copper",
        }
    }

    /// Chemical symbol, lower-cased.
    pub fn symbol(&self) -> &'static str {
        match self {
            Metal::Gold => "au",
            Metal::Silver => "ag",
            Metal::Platinum => "pt",
            Metal::Copper => "cu",
        }
    }
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// QueryIntent — what a free-text search is asking for
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QueryIntent {
    pub base_subject: String,
    pub requested_metal: Option<Metal>,
    pub mentioned_sizes: BTreeSet<String>,
}

// ---------------------------------------------------------------------------
// ArticlePage — a page as returned by an encyclopedic source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ArticlePage {
    pub title: String,
    pub summary: String,
    pub full_text: String,
    /// Image URLs in the order the source lists them.
    pub image_urls: Vec<String>,
    pub url: String,
}

// ---------------------------------------------------------------------------
// CandidateArticle — the page chosen by the miner, images already filtered
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleImage {
    pub url: String,
    /// Metal whose name or symbol appears in the file name, if any.
    pub metal: Option<Metal>,
    /// 10 when the file name repeats a word from the article title,
    /// 5 when it only names a coin face. Other images are not kept.
    pub relevance: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateArticle {
    pub title: String,
    pub full_text: String,
    pub summary: String,
    pub images: Vec<ArticleImage>,
    pub source_url: String,
    /// Human-readable name of the source, e.g. `"Wikipedia (EN)"`.
    pub source_label: String,
}

impl CandidateArticle {
    pub fn image_urls(&self) -> impl Iterator<Item = &str> {
        self.images.iter().map(|i| i.url.as_str())
    }
}

// ---------------------------------------------------------------------------
// VariantCandidate — one display rendering of the mined subject
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantCandidate {
    pub display_title: String,
    pub display_summary: String,
    pub image_url: Option<String>,
    pub source_url: String,
    pub source_label: String,
    pub metal: Metal,
    /// A size token such as `"1 oz"`, or `"standard"` when the article
    /// names none.
    pub size: String,
}

/// Outcome of a candidate search. Failures never escape as errors; they
/// leave `candidates` empty and set `warning`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SearchOutcome {
    pub intent: QueryIntent,
    pub candidates: Vec<VariantCandidate>,
    pub warning: Option<String>,
}
