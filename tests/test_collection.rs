//! Collection import and catalog proposal tests.

mod common;

use common::{libertad_page, StubEncyclopedia, StubQuotes};
use numisma_sdk::models::parse_mass;
use numisma_sdk::{
    CatalogIngestion, CatalogProposal, CollectionStore, InventoryItem, JsonCollection,
    NumismaError, Result,
};
use std::cell::RefCell;
use std::io::Write;

fn write_json(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ---------------------------------------------------------------------------
// JsonCollection
// ---------------------------------------------------------------------------

#[test]
fn reads_bare_array() {
    let file = write_json(
        r#"[
            {"material": "Plata .999", "massGrams": 31.1, "acquisitionPrice": 35.0},
            {"material": "Oro", "massGrams": "7,78", "acquisitionPrice": 420.0}
        ]"#,
    );
    let items = JsonCollection::new(file.path()).items().unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0], InventoryItem::new("Plata .999", Some(31.1), 35.0));
    assert_eq!(items[1].mass_grams, Some(7.78));
}

#[test]
fn reads_wrapped_items() {
    let file = write_json(r#"{"items": [{"material": "Gold", "massGrams": 3.11}]}"#);
    let items = JsonCollection::new(file.path()).items().unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].acquisition_price, 0.0);
}

#[test]
fn garbage_mass_becomes_none() {
    let file = write_json(
        r#"[
            {"material": "Silver", "massGrams": "unknown", "acquisitionPrice": 10},
            {"material": "Silver", "massGrams": null, "acquisitionPrice": 10},
            {"material": "Silver", "acquisitionPrice": 10}
        ]"#,
    );
    let items = JsonCollection::new(file.path()).items().unwrap();
    assert!(items.iter().all(|i| i.mass_grams.is_none()));
}

#[test]
fn invalid_file_is_a_parse_error() {
    let file = write_json(r#"{"coins": 3}"#);
    let err = JsonCollection::new(file.path()).items().unwrap_err();
    assert!(matches!(err, NumismaError::Parse(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    let err = JsonCollection::new(tmp.path().join("absent.json")).items().unwrap_err();
    assert!(matches!(err, NumismaError::Io(_)));
}

#[test]
fn mass_text_is_parsed_leniently() {
    assert_eq!(parse_mass("31.1"), Some(31.1));
    assert_eq!(parse_mass(" 15,55 "), Some(15.55));
    assert_eq!(parse_mass("27 g"), Some(27.0));
    assert_eq!(parse_mass(""), None);
    assert_eq!(parse_mass("n/a"), None);
    assert_eq!(
        InventoryItem::from_text("Plata", Some("abc"), 5.0).mass_grams,
        None
    );
}

// ---------------------------------------------------------------------------
// Catalog proposals
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RecordingCatalog {
    received: RefCell<Vec<CatalogProposal>>,
}

impl CatalogIngestion for RecordingCatalog {
    fn propose(&self, proposal: CatalogProposal) -> Result<()> {
        self.received.borrow_mut().push(proposal);
        Ok(())
    }
}

#[test]
fn proposal_is_prefilled_from_candidate() {
    let (sdk, _tmp) = common::sdk(
        StubQuotes::new(),
        StubEncyclopedia::new().article(libertad_page()),
    );
    let outcome = sdk.search_candidates("Libertad gold");
    let candidate = &outcome.candidates[0];

    let proposal = CatalogProposal::from_candidate(candidate);
    assert_eq!(proposal.title, "Libertad (coin)");
    assert_eq!(proposal.material, "Gold");
    assert_eq!(proposal.image_url, candidate.image_url);
    assert!(proposal.from_web);
    assert!(proposal.country.is_empty());
}

#[test]
fn proposal_requires_title_country_material() {
    let err = CatalogProposal {
        title: "Libertad".to_string(),
        ..CatalogProposal::default()
    }
    .validate()
    .unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("country"), "{msg}");
    assert!(msg.contains("material"), "{msg}");
    assert!(!msg.contains("title"), "{msg}");
}

#[test]
fn validation_clears_meaningless_measurements() {
    let proposal = CatalogProposal {
        title: "Libertad".to_string(),
        country: "Mexico".to_string(),
        material: "Silver".to_string(),
        mass_grams: Some(0.0),
        diameter_mm: Some(-1.0),
        image_url: Some("  ".to_string()),
        ..CatalogProposal::default()
    }
    .validate()
    .unwrap();

    assert_eq!(proposal.mass_grams, None);
    assert_eq!(proposal.diameter_mm, None);
    assert_eq!(proposal.image_url, None);
}

#[test]
fn sdk_only_forwards_valid_proposals() {
    let (sdk, _tmp) = common::sdk(StubQuotes::new(), StubEncyclopedia::new());
    let catalog = RecordingCatalog::default();

    let invalid = CatalogProposal::default();
    assert!(sdk.propose(&catalog, invalid).is_err());
    assert!(catalog.received.borrow().is_empty());

    let valid = CatalogProposal {
        title: "Britannia".to_string(),
        country: "United Kingdom".to_string(),
        year: Some(2021),
        material: "Silver .999".to_string(),
        mass_grams: Some(31.1),
        ..CatalogProposal::default()
    };
    sdk.propose(&catalog, valid.clone()).unwrap();
    assert_eq!(catalog.received.borrow().as_slice(), &[valid]);
}
