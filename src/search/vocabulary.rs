//! Fixed word lists driving query decomposition, article filtering and
//! variant detection.
//!
//! Everything here is a flat substring scan over lower-cased text. Table
//! order is significant: it decides which metal wins when several match and
//! the order in which detected metals and sizes are reported.

use crate::models::Metal;

/// A metal and the words (English first, then Spanish) that name it.
#[derive(Debug, Clone, Copy)]
pub struct MetalEntry {
    pub metal: Metal,
    pub names: &'static [&'static str],
}

pub const METALS: &[MetalEntry] = &[
    MetalEntry {
        metal: Metal::Silver,
        names: &["silver", "plata"],
    },
    MetalEntry {
        metal: Metal::Gold,
        names: &["gold", "oro"],
    },
    MetalEntry {
        metal: Metal::Platinum,
        names: &["platinum", "platino"],
    },
    MetalEntry {
        metal: Metal::Copper,
        names: &["copper", "cobre"],
    },
];

pub const SIZE_TOKENS: &[&str] = &["1 oz", "1/2 oz", "1/4 oz", "1/10 oz", "2 oz", "5 oz"];

/// Size used when an article names no bullion size at all.
pub const STANDARD_SIZE: &str = "standard";

/// A search hit is only considered if its title contains one of these.
pub const NUMISMATIC_TITLE_TERMS: &[&str] = &[
    "moneda",
    "coin",
    "numismatic",
    "mint",
    "currency",
    "onza",
    "dólar",
    "peso",
    "real",
    "denario",
];

/// The start of a fetched summary must contain one of these.
pub const CONFIRMATION_TERMS: &[&str] = &["coin", "mint", "bullion", "currency"];

/// File-name markers of drawings, heraldry and site chrome.
pub const IMAGE_DENYLIST: &[&str] = &[".svg", "logo", "icon", "flag", "coat", "emblem"];

/// File-name words typical of coin photographs.
pub const COIN_PHOTO_TERMS: &[&str] = &["obverse", "reverse", "coin"];

/// First metal (in table order) named anywhere in `text`.
pub fn first_metal(text: &str) -> Option<Metal> {
    let lower = text.to_lowercase();
    METALS
        .iter()
        .find(|e| e.names.iter().any(|n| lower.contains(n)))
        .map(|e| e.metal)
}

/// Every metal named in `text`, in table order.
pub fn metals_in(text: &str) -> Vec<Metal> {
    let lower = text.to_lowercase();
    METALS
        .iter()
        .filter(|e| e.names.iter().any(|n| lower.contains(n)))
        .map(|e| e.metal)
        .collect()
}

/// Metal named by a file name, either in words or by chemical symbol.
pub fn metal_in_filename(filename: &str) -> Option<Metal> {
    let lower = filename.to_lowercase();
    METALS
        .iter()
        .find(|e| e.names.iter().any(|n| lower.contains(n)) || lower.contains(e.metal.symbol()))
        .map(|e| e.metal)
}

/// The written forms a size token is recognised by: as listed, and with
/// its spaces removed (`"1 oz"` and `"1oz"`).
pub fn size_spellings(token: &str) -> [String; 2] {
    [token.to_string(), token.replace(' ', "")]
}

/// Every size token mentioned in `text`, in table order.
pub fn sizes_in(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    SIZE_TOKENS
        .iter()
        .copied()
        .filter(|t| size_spellings(t).iter().any(|s| lower.contains(s.as_str())))
        .collect()
}

pub fn contains_any(text: &str, terms: &[&str]) -> bool {
    let lower = text.to_lowercase();
    terms.iter().any(|t| lower.contains(t))
}
