//! Catalog
//!
//! Read-only lookup from item identifier to unit price and offer. A
//! [`PriceList`] is an immutable snapshot; a [`CatalogSource`] produces a fresh
//! snapshot on demand.

use std::path::PathBuf;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    items::ItemId,
    offers::{OfferDetails, OfferType},
};

pub mod file;

pub use file::FileCatalog;

/// Errors raised while producing a catalog snapshot.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,

        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("failed to parse YAML catalog: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// JSON parsing error
    #[error("failed to parse JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// The same item appears more than once
    #[error("item {0} is listed more than once")]
    DuplicateItem(ItemId),

    /// An entry had a blank name
    #[error("catalog entry {0} has an empty name")]
    EmptyItemId(usize),
}

/// Price and offer for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Item identifier
    pub item_id: ItemId,

    /// Price of a single unit, validated when priced
    pub unit_price: f64,

    /// Offer applied when pricing the item
    pub offer_type: OfferType,

    /// Configured offer parameters, informational only
    pub offer_details: Option<OfferDetails>,
}

impl CatalogEntry {
    /// Create an entry without offer parameters.
    pub fn new(item_id: impl Into<ItemId>, unit_price: f64, offer_type: OfferType) -> Self {
        Self {
            item_id: item_id.into(),
            unit_price,
            offer_type,
            offer_details: None,
        }
    }

    /// Attach offer parameters to the entry.
    #[must_use]
    pub fn with_offer_details(mut self, details: OfferDetails) -> Self {
        self.offer_details = Some(details);
        self
    }
}

/// Lookup of catalog entries by item identifier.
pub trait Catalog {
    /// Find the entry for `item_id`, if the item is known.
    fn lookup(&self, item_id: &ItemId) -> Option<&CatalogEntry>;
}

/// Produces catalog snapshots.
pub trait CatalogSource {
    /// Load a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the snapshot cannot be produced.
    fn snapshot(&self) -> Result<PriceList, CatalogError>;
}

/// In-memory catalog snapshot.
#[derive(Debug, Clone, Default)]
pub struct PriceList {
    entries: FxHashMap<ItemId, CatalogEntry>,
}

impl PriceList {
    /// Create an empty price list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a price list from entries.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateItem`] if two entries share an
    /// identifier, or [`CatalogError::EmptyItemId`] for a blank identifier.
    pub fn from_entries(
        entries: impl IntoIterator<Item = CatalogEntry>,
    ) -> Result<Self, CatalogError> {
        let mut list = Self::new();

        for (idx, entry) in entries.into_iter().enumerate() {
            if entry.item_id.is_empty() {
                return Err(CatalogError::EmptyItemId(idx));
            }

            list.insert(entry)?;
        }

        Ok(list)
    }

    /// Add an entry.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateItem`] if the item is already listed.
    pub fn insert(&mut self, entry: CatalogEntry) -> Result<&mut Self, CatalogError> {
        if self.entries.contains_key(&entry.item_id) {
            return Err(CatalogError::DuplicateItem(entry.item_id));
        }

        self.entries.insert(entry.item_id.clone(), entry);

        Ok(self)
    }

    /// Number of items listed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no items are listed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }
}

impl Catalog for PriceList {
    fn lookup(&self, item_id: &ItemId) -> Option<&CatalogEntry> {
        self.entries.get(item_id)
    }
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn lookup(&self, item_id: &ItemId) -> Option<&CatalogEntry> {
        (**self).lookup(item_id)
    }
}

impl CatalogSource for PriceList {
    fn snapshot(&self) -> Result<PriceList, CatalogError> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn fruit_list() -> Result<PriceList, CatalogError> {
        PriceList::from_entries([
            CatalogEntry::new("APPLE", 0.60, OfferType::NoOffer),
            CatalogEntry::new("MELON", 0.20, OfferType::Bogo)
                .with_offer_details(OfferDetails::Bogo {
                    buy: Some(1),
                    free: Some(1),
                }),
        ])
    }

    #[test]
    fn lookup_finds_entries_case_insensitively() -> TestResult {
        let list = fruit_list()?;

        let melon = list.lookup(&ItemId::new("melon")).ok_or("melon missing")?;

        assert_eq!(melon.offer_type, OfferType::Bogo);
        assert_eq!(
            melon.offer_details,
            Some(OfferDetails::Bogo {
                buy: Some(1),
                free: Some(1)
            })
        );

        Ok(())
    }

    #[test]
    fn lookup_unknown_item_is_none() -> TestResult {
        let list = fruit_list()?;

        assert!(list.lookup(&ItemId::new("KIWI")).is_none());

        Ok(())
    }

    #[test]
    fn from_entries_rejects_duplicates() {
        let result = PriceList::from_entries([
            CatalogEntry::new("APPLE", 0.60, OfferType::NoOffer),
            CatalogEntry::new("apple", 0.50, OfferType::Bogo),
        ]);

        assert!(matches!(
            result,
            Err(CatalogError::DuplicateItem(id)) if id.as_str() == "APPLE"
        ));
    }

    #[test]
    fn from_entries_rejects_blank_names() {
        let result = PriceList::from_entries([
            CatalogEntry::new("APPLE", 0.60, OfferType::NoOffer),
            CatalogEntry::new("  ", 0.50, OfferType::NoOffer),
        ]);

        assert!(matches!(result, Err(CatalogError::EmptyItemId(1))));
    }

    #[test]
    fn len_and_is_empty() -> TestResult {
        assert!(PriceList::new().is_empty());
        assert_eq!(fruit_list()?.len(), 2);

        Ok(())
    }

    #[test]
    fn price_list_snapshot_is_a_copy() -> TestResult {
        let list = fruit_list()?;
        let snapshot = list.snapshot()?;

        assert_eq!(snapshot.len(), list.len());
        assert_eq!(
            snapshot.lookup(&ItemId::new("APPLE")),
            list.lookup(&ItemId::new("APPLE"))
        );

        Ok(())
    }
}
