//! [`EncyclopediaSource`] backed by the MediaWiki Action API.

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::EncyclopediaSource;
use crate::config;
use crate::error::{NumismaError, Result};
use crate::models::ArticlePage;

/// Wikipedia article search and retrieval over blocking HTTP.
pub struct WikipediaSource {
    client: Client,
    endpoint: String,
    label: String,
}

impl WikipediaSource {
    /// English Wikipedia using the given HTTP client (and its timeout).
    pub fn new(client: Client) -> Self {
        Self {
            client,
            endpoint: config::WIKIPEDIA_API_URL.to_string(),
            label: "Wikipedia (EN)".to_string(),
        }
    }

    /// Point at another MediaWiki `api.php`, e.g. a different language
    /// edition.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>, label: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self.label = label.into();
        self
    }

    fn get_json<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(NumismaError::Fetch(format!(
                "{} answered {}",
                self.endpoint, status
            )));
        }

        let body = resp.text()?;
        serde_json::from_str(&body).map_err(|e| {
            NumismaError::Parse(format!("Unexpected MediaWiki response: {}", e))
        })
    }

    fn image_urls(&self, title: &str) -> Result<Vec<String>> {
        let resp: ImagesResponse = self.get_json(&[
            ("action", "query"),
            ("generator", "images"),
            ("titles", title),
            ("gimlimit", "max"),
            ("prop", "imageinfo"),
            ("iiprop", "url"),
            ("redirects", "1"),
        ])?;

        Ok(resp
            .query
            .map(|q| q.pages)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.imageinfo.into_iter().next().map(|i| i.url))
            .collect())
    }
}

impl EncyclopediaSource for WikipediaSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn search(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        let limit = limit.to_string();
        let resp: SearchResponse = self.get_json(&[
            ("action", "query"),
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", limit.as_str()),
            ("srprop", ""),
        ])?;

        let titles: Vec<String> = resp.query.search.into_iter().map(|h| h.title).collect();
        debug!(query = %query, titles = ?titles, "Wikipedia search");
        Ok(titles)
    }

    fn page(&self, title: &str) -> Result<ArticlePage> {
        let resp: PageResponse = self.get_json(&[
            ("action", "query"),
            ("prop", "extracts|info"),
            ("explaintext", "1"),
            ("inprop", "url"),
            ("titles", title),
            ("redirects", "1"),
        ])?;

        let page = resp
            .query
            .pages
            .into_iter()
            .next()
            .ok_or_else(|| NumismaError::Parse(format!("No page entry for '{}'", title)))?;

        if page.missing {
            return Err(NumismaError::NotFound(format!(
                "Wikipedia has no article titled '{}'",
                title
            )));
        }

        let full_text = page.extract.ok_or_else(|| {
            NumismaError::PartialData(format!("Article '{}' has no text extract", title))
        })?;
        let image_urls = self.image_urls(&page.title)?;

        Ok(ArticlePage {
            summary: intro_of(&full_text).to_string(),
            url: page.fullurl.unwrap_or_default(),
            title: page.title,
            full_text,
            image_urls,
        })
    }
}

/// Lead section of a plain-text extract: everything before the first
/// `== Heading ==` line.
pub fn intro_of(text: &str) -> &str {
    match text.find("\n==") {
        Some(idx) => text[..idx].trim(),
        None => text.trim(),
    }
}

// ---------------------------------------------------------------------------
// Wire types (formatversion=2)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: SearchQuery,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct PageResponse {
    query: PageQuery,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    pages: Vec<PageEntry>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    title: String,
    #[serde(default)]
    missing: bool,
    extract: Option<String>,
    fullurl: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    query: Option<ImagesQuery>,
}

#[derive(Debug, Deserialize)]
struct ImagesQuery {
    #[serde(default)]
    pages: Vec<ImagePage>,
}

#[derive(Debug, Deserialize)]
struct ImagePage {
    #[serde(default)]
    imageinfo: Vec<ImageInfo>,
}

#[derive(Debug, Deserialize)]
struct ImageInfo {
    url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intro_stops_at_first_heading() {
        let text = "The Libertad is a coin.\nIt is silver.\n\n\n== History ==\nMinted since 1982.";
        assert_eq!(intro_of(text), "The Libertad is a coin.\nIt is silver.");
        assert_eq!(intro_of("  No sections here. "), "No sections here.");
    }

    #[test]
    fn missing_page_deserializes() {
        let body = r#"{"batchcomplete":true,"query":{"pages":[{"ns":0,"title":"Nope","missing":true}]}}"#;
        let resp: PageResponse = serde_json::from_str(body).unwrap();
        assert!(resp.query.pages[0].missing);
        assert!(resp.query.pages[0].extract.is_none());
    }
}
