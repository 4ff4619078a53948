//! Smoke test for the Numisma Rust SDK against the live services.
//!
//! Fetches real quotes from Yahoo Finance and real articles from English
//! Wikipedia, so results vary from run to run. Assertions only check shape
//! and sanity bounds.
//!
//! Run with:
//! ```sh
//! cargo test --test smoke_test -- --ignored --nocapture
//! ```

use numisma_sdk::{Currency, InventoryItem, NumismaSdk, ValuationBasis};
use std::time::Duration;

fn section(name: &str) {
    eprintln!("\n{}", "=".repeat(60));
    eprintln!("  {}", name);
    eprintln!("{}", "=".repeat(60));
}

fn live_sdk(currency: Currency) -> (NumismaSdk, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let sdk = NumismaSdk::builder()
        .cache_dir(tmp.path())
        .currency(currency)
        .timeout(Duration::from_secs(20))
        .build()
        .unwrap();
    (sdk, tmp)
}

#[test]
#[ignore]
fn live_rates_are_plausible() {
    section("Rates");
    for currency in [Currency::Usd, Currency::Eur, Currency::Gbp] {
        let (sdk, _tmp) = live_sdk(currency);
        let rates = sdk.rates().unwrap();
        eprintln!(
            "  {}: gold {:.2}/g silver {:.4}/g fx {:.4} ({:?})",
            currency, rates.gold_per_gram, rates.silver_per_gram, rates.fx_rate, rates.fx_correction
        );
        assert!(rates.gold_per_gram > 10.0 && rates.gold_per_gram < 1000.0);
        assert!(rates.silver_per_gram > 0.1 && rates.silver_per_gram < 50.0);
    }
}

#[test]
#[ignore]
fn live_collection_valuation() {
    section("Valuation");
    let (sdk, _tmp) = live_sdk(Currency::Eur);
    let items = vec![
        InventoryItem::new("Oro", Some(31.1035), 1800.0),
        InventoryItem::new("Plata .999", Some(31.1035), 25.0),
        InventoryItem::new("Bronce", Some(5.0), 2.0),
    ];
    let valuation = sdk.value_collection(&items).unwrap();
    eprintln!("  {:#?}", valuation.summary);

    assert!(valuation.warning.is_none(), "{:?}", valuation.warning);
    assert_eq!(valuation.summary.market_valued, 2);
    assert_eq!(valuation.items[2].1.basis, ValuationBasis::AcquisitionFallback);
}

#[test]
#[ignore]
fn live_candidate_search() {
    section("Candidate search");
    let (sdk, _tmp) = live_sdk(Currency::Eur);
    for query in ["Krugerrand gold", "Britannia silver 1oz", "Maple Leaf"] {
        let outcome = sdk.search_candidates(query);
        eprintln!(
            "  {query}: {} candidates, warning={:?}",
            outcome.candidates.len(),
            outcome.warning
        );
        for c in &outcome.candidates {
            eprintln!("    {} [{} {}] {:?}", c.display_title, c.metal, c.size, c.image_url);
        }
        assert!(outcome.warning.is_none());
        assert!(outcome.candidates.len() <= 4);
    }
}
