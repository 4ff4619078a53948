//! Finds the encyclopedia article behind a query and pulls its images.

use tracing::{debug, warn};

use super::vocabulary::{
    contains_any, metal_in_filename, COIN_PHOTO_TERMS, CONFIRMATION_TERMS, IMAGE_DENYLIST,
    NUMISMATIC_TITLE_TERMS,
};
use super::EncyclopediaSource;
use crate::config;
use crate::error::Result;
use crate::models::{ArticleImage, ArticlePage, CandidateArticle, QueryIntent};

// ---------------------------------------------------------------------------
// SourceMiner
// ---------------------------------------------------------------------------

/// Searches an [`EncyclopediaSource`] for the article describing a coin.
pub struct SourceMiner<'a> {
    source: &'a dyn EncyclopediaSource,
}

impl<'a> SourceMiner<'a> {
    pub fn new(source: &'a dyn EncyclopediaSource) -> Self {
        Self { source }
    }

    /// Find the first numismatic article for `intent`.
    ///
    /// Returns `Ok(None)` when none of the top search hits is about a coin.
    /// A failure fetching one hit only skips that hit; a failure of the
    /// search itself is returned as an error.
    pub fn mine(&self, intent: &QueryIntent) -> Result<Option<CandidateArticle>> {
        let query = format!("{} coin", intent.base_subject);
        let query = query.trim();
        debug!(query = %query, source = self.source.label(), "Searching encyclopedia");

        let titles = self.source.search(query, config::SEARCH_RESULT_LIMIT)?;
        debug!(hits = titles.len(), "Encyclopedia search returned");

        let article = first_relevant(&titles, |title| self.source.page(title)).map(|page| {
            let images = extract_images(&page.image_urls, &page.title);
            CandidateArticle {
                title: page.title,
                full_text: page.full_text,
                summary: page.summary,
                images,
                source_url: page.url,
                source_label: self.source.label().to_string(),
            }
        });

        if article.is_none() {
            debug!(query = %query, "No numismatic article among search hits");
        }
        Ok(article)
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Walk `titles` in order and return the first page that passes both the
/// title filter and the summary confirmation.
///
/// Only the first [`config::SEARCH_RESULT_LIMIT`] titles are considered.
/// `fetch` errors are logged and the title is skipped.
pub fn first_relevant<F>(titles: &[String], mut fetch: F) -> Option<ArticlePage>
where
    F: FnMut(&str) -> Result<ArticlePage>,
{
    titles
        .iter()
        .take(config::SEARCH_RESULT_LIMIT)
        .filter(|title| is_numismatic_title(title))
        .find_map(|title| match fetch(title) {
            Ok(page) if confirms_numismatic(&page.summary) => Some(page),
            Ok(_) => {
                debug!(title = %title, "Summary does not read like a coin article");
                None
            }
            Err(e) => {
                warn!(title = %title, error = %e, "Skipping candidate article");
                None
            }
        })
}

pub fn is_numismatic_title(title: &str) -> bool {
    contains_any(title, NUMISMATIC_TITLE_TERMS)
}

/// Check the opening of a summary for coin vocabulary.
pub fn confirms_numismatic(summary: &str) -> bool {
    let head: String = summary.chars().take(config::SUMMARY_SCAN_CHARS).collect();
    contains_any(&head, CONFIRMATION_TERMS)
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// Keep the coin photographs among the first
/// [`config::MAX_IMAGES_SCANNED`] references, tagging each with the metal
/// its file name suggests.
///
/// A file name repeating a title word scores 10, one naming an obverse,
/// reverse or coin scores 5. Anything else is dropped, as are drawings and
/// site chrome.
pub fn extract_images(urls: &[String], title: &str) -> Vec<ArticleImage> {
    let title_lower = title.to_lowercase().replace("coin", "");
    let title_words: Vec<&str> = title_lower
        .split_whitespace()
        .filter(|w| w.chars().count() > 3)
        .collect();

    urls.iter()
        .take(config::MAX_IMAGES_SCANNED)
        .filter_map(|url| {
            let filename = url.rsplit('/').next().unwrap_or(url).to_lowercase();
            if IMAGE_DENYLIST.iter().any(|d| filename.contains(d)) {
                return None;
            }

            let relevance = if title_words.iter().any(|w| filename.contains(w)) {
                10
            } else if COIN_PHOTO_TERMS.iter().any(|w| filename.contains(w)) {
                5
            } else {
                debug!(image = %filename, "Image names neither the coin nor a coin face");
                return None;
            };

            Some(ArticleImage {
                url: url.clone(),
                metal: metal_in_filename(&filename),
                relevance,
            })
        })
        .collect()
}
