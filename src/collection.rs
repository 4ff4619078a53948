//! Read access to the collection being valued.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{NumismaError, Result};
use crate::models::InventoryItem;

/// Yields the items currently held in a collection. The valuation code only
/// ever reads from it.
pub trait CollectionStore {
    fn items(&self) -> Result<Vec<InventoryItem>>;
}

impl CollectionStore for Vec<InventoryItem> {
    fn items(&self) -> Result<Vec<InventoryItem>> {
        Ok(self.clone())
    }
}

/// A collection exported to a JSON file.
///
/// Accepts either a bare array of items or an object with an `items` array.
pub struct JsonCollection {
    path: PathBuf,
}

impl JsonCollection {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CollectionFile {
    Bare(Vec<InventoryItem>),
    Wrapped { items: Vec<InventoryItem> },
}

impl CollectionStore for JsonCollection {
    fn items(&self) -> Result<Vec<InventoryItem>> {
        let contents = fs::read_to_string(&self.path)?;
        let parsed: CollectionFile = serde_json::from_str(&contents).map_err(|e| {
            NumismaError::Parse(format!(
                "{} is not a collection export: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(match parsed {
            CollectionFile::Bare(items) | CollectionFile::Wrapped { items } => items,
        })
    }
}
