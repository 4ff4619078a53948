//! Turns one mined article into a short list of metal/size variants.

use super::vocabulary::{metals_in, sizes_in, STANDARD_SIZE};
use crate::config;
use crate::models::{CandidateArticle, Metal, QueryIntent, VariantCandidate};

const REQUESTED_METAL_SCORE: u8 = 10;
const OTHER_METAL_SCORE: u8 = 5;

/// Build up to [`config::MAX_CANDIDATES`] variants of the article's
/// subject, the requested metal first.
///
/// Variants are the cross product of the metals and sizes the article text
/// mentions, with at most [`config::MAX_METALS_PER_SEARCH`] metals and
/// [`config::MAX_SIZES_PER_METAL`] sizes per metal.
pub fn synthesize(article: &CandidateArticle, intent: &QueryIntent) -> Vec<VariantCandidate> {
    ranked_variants(article, intent)
        .into_iter()
        .map(|(_, candidate)| candidate)
        .collect()
}

/// Same as [`synthesize`], keeping each candidate's score.
pub(crate) fn ranked_variants(
    article: &CandidateArticle,
    intent: &QueryIntent,
) -> Vec<(u8, VariantCandidate)> {
    let metals_found = metals_in(&article.full_text);
    let mut sizes_found = sizes_in(&article.full_text);
    if sizes_found.is_empty() {
        sizes_found.push(STANDARD_SIZE);
    }

    let mut metal_order: Vec<Metal> = Vec::with_capacity(metals_found.len());
    if let Some(requested) = intent.requested_metal {
        if metals_found.contains(&requested) {
            metal_order.push(requested);
        }
    }
    for metal in metals_found {
        if !metal_order.contains(&metal) {
            metal_order.push(metal);
        }
    }

    let mut variants = Vec::with_capacity(config::MAX_CANDIDATES);
    'metals: for &metal in metal_order.iter().take(config::MAX_METALS_PER_SEARCH) {
        for &size in sizes_found.iter().take(config::MAX_SIZES_PER_METAL) {
            if variants.len() >= config::MAX_CANDIDATES {
                break 'metals;
            }
            let score = if intent.requested_metal == Some(metal) {
                REQUESTED_METAL_SCORE
            } else {
                OTHER_METAL_SCORE
            };
            variants.push((score, build_variant(article, metal, size)));
        }
    }

    // Vec::sort_by is stable, so equal scores keep generation order.
    variants.sort_by(|a, b| b.0.cmp(&a.0));
    variants
}

fn build_variant(article: &CandidateArticle, metal: Metal, size: &str) -> VariantCandidate {
    let mut detail = metal.label().to_string();
    if size != STANDARD_SIZE {
        detail.push_str(" - ");
        detail.push_str(size);
    }
    let summary_head: String = article
        .summary
        .chars()
        .take(config::CANDIDATE_SUMMARY_CHARS)
        .collect();

    VariantCandidate {
        display_title: article.title.clone(),
        display_summary: format!("**{}**\n\n{}...", detail, summary_head),
        image_url: image_for(article, metal),
        source_url: article.source_url.clone(),
        source_label: article.source_label.clone(),
        metal,
        size: size.to_string(),
    }
}

/// Prefer an image tagged with `metal`; otherwise share the first image.
fn image_for(article: &CandidateArticle, metal: Metal) -> Option<String> {
    article
        .images
        .iter()
        .find(|img| img.metal == Some(metal))
        .or_else(|| article.images.first())
        .map(|img| img.url.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleImage;
    use crate::search::decompose;

    fn article(full_text: &str) -> CandidateArticle {
        CandidateArticle {
            title: "Mexican Libertad".to_string(),
            full_text: full_text.to_string(),
            summary: "The Libertad is a bullion coin minted by the Mexican Mint.".to_string(),
            images: vec![
                ArticleImage {
                    url: "https://img.example/Libertad_obverse.jpg".to_string(),
                    metal: None,
                    relevance: 10,
                },
                ArticleImage {
                    url: "https://img.example/Libertad_gold_1oz.jpg".to_string(),
                    metal: Some(Metal::Gold),
                    relevance: 10,
                },
            ],
            source_url: "https://en.wikipedia.org/wiki/Mexican_Libertad".to_string(),
            source_label: "Wikipedia (EN)".to_string(),
        }
    }

    #[test]
    fn requested_metal_scores_ten_and_leads() {
        let art = article("Struck in silver, gold, platinum and copper in 1 oz, 1/2 oz and 1/4 oz.");
        let intent = decompose("libertad gold");

        let ranked = ranked_variants(&art, &intent);
        assert_eq!(ranked.len(), 4);
        assert_eq!(ranked[0].0, 10);
        assert_eq!(ranked[0].1.metal, Metal::Gold);
        assert!(ranked[2..].iter().all(|(score, _)| *score == 5));
    }

    #[test]
    fn other_metals_score_five() {
        let art = article("Struck in silver and gold.");
        let intent = decompose("libertad");

        let ranked = ranked_variants(&art, &intent);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|(score, _)| *score == 5));
        assert_eq!(ranked[0].1.metal, Metal::Silver);
        assert_eq!(ranked[0].1.size, STANDARD_SIZE);
    }
}
