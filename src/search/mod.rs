//! Candidate search: free-text query in, ranked catalog variants out.
//!
//! The pipeline is [`decompose`] → [`SourceMiner::mine`] → [`synthesize`].
//! Each stage is usable on its own; [`CandidateSearch`] runs all three and
//! turns any failure into a warning on an empty [`SearchOutcome`].

pub mod decompose;
pub mod miner;
pub mod synthesize;
pub mod vocabulary;
pub mod wikipedia;

pub use decompose::decompose;
pub use miner::SourceMiner;
pub use synthesize::synthesize;
pub use wikipedia::WikipediaSource;

use tracing::{info, warn};

use crate::error::Result;
use crate::models::{ArticlePage, SearchOutcome};

// ---------------------------------------------------------------------------
// EncyclopediaSource
// ---------------------------------------------------------------------------

/// A searchable source of encyclopedic articles.
pub trait EncyclopediaSource {
    /// Name shown next to candidates drawn from this source.
    fn label(&self) -> &str;

    /// Titles matching `query`, best first, at most `limit` of them.
    fn search(&self, query: &str, limit: usize) -> Result<Vec<String>>;

    /// Fetch the article with exactly this title. Implementations must not
    /// substitute a "did you mean" suggestion.
    fn page(&self, title: &str) -> Result<ArticlePage>;
}

// ---------------------------------------------------------------------------
// CandidateSearch
// ---------------------------------------------------------------------------

/// Runs the full candidate pipeline against one source.
pub struct CandidateSearch<'a> {
    source: &'a dyn EncyclopediaSource,
}

impl<'a> CandidateSearch<'a> {
    pub fn new(source: &'a dyn EncyclopediaSource) -> Self {
        Self { source }
    }

    /// Search for catalog candidates matching `query`.
    ///
    /// Never fails: an unreachable source yields no candidates and a
    /// warning. Finding no relevant article is not a warning.
    pub fn search(&self, query: &str) -> SearchOutcome {
        let intent = decompose(query);
        match SourceMiner::new(self.source).mine(&intent) {
            Ok(Some(article)) => {
                let candidates = synthesize(&article, &intent);
                info!(
                    query = %query,
                    article = %article.title,
                    candidates = candidates.len(),
                    "Candidate search finished"
                );
                SearchOutcome {
                    intent,
                    candidates,
                    warning: None,
                }
            }
            Ok(None) => {
                info!(query = %query, "No candidates found");
                SearchOutcome {
                    intent,
                    candidates: Vec::new(),
                    warning: None,
                }
            }
            Err(e) => {
                warn!(query = %query, error = %e, "Candidate search failed");
                SearchOutcome {
                    intent,
                    candidates: Vec::new(),
                    warning: Some(format!("Search error: {}", e)),
                }
            }
        }
    }
}
