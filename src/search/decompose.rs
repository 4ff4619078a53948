//! Lexical decomposition of a free-text coin query.

use std::collections::BTreeSet;

use super::vocabulary::{first_metal, size_spellings, sizes_in, METALS, SIZE_TOKENS};
use crate::models::QueryIntent;

/// Split `query` into a base subject plus metal and size hints.
///
/// The first metal named (see [`METALS`] for precedence) becomes
/// `requested_metal`. Every metal synonym and size token is then removed
/// from the lower-cased query, and what remains, with whitespace collapsed,
/// is the base subject.
///
/// ```
/// use numisma_sdk::search::decompose;
/// use numisma_sdk::models::Metal;
///
/// let intent = decompose("Libertad silver 1oz");
/// assert_eq!(intent.base_subject, "libertad");
/// assert_eq!(intent.requested_metal, Some(Metal::Silver));
/// assert!(intent.mentioned_sizes.contains("1 oz"));
/// ```
pub fn decompose(query: &str) -> QueryIntent {
    let lower = query.to_lowercase();

    let requested_metal = first_metal(&lower);
    let mentioned_sizes: BTreeSet<String> =
        sizes_in(&lower).into_iter().map(str::to_string).collect();

    let mut base = lower;
    for entry in METALS {
        for name in entry.names {
            base = base.replace(name, " ");
        }
    }
    for token in SIZE_TOKENS {
        for spelling in size_spellings(token) {
            base = base.replace(spelling.as_str(), " ");
        }
    }

    QueryIntent {
        base_subject: base.split_whitespace().collect::<Vec<_>>().join(" "),
        requested_metal,
        mentioned_sizes,
    }
}
