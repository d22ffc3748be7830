//! Catalog Files

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, de::IgnoredAny};
use tracing::{debug, warn};

use crate::{
    catalog::{CatalogEntry, CatalogError, CatalogSource, PriceList},
    items::ItemId,
    offers::{OfferDetails, OfferType},
};

/// Catalog document, as written in YAML or JSON.
#[derive(Debug, Deserialize)]
pub struct CatalogDocument {
    /// Configured fruits
    pub fruits: Vec<FruitConfig>,
}

/// A single configured fruit.
#[derive(Debug, Deserialize)]
pub struct FruitConfig {
    /// Fruit name, used as the item identifier
    pub name: ItemId,

    /// Unit price
    pub price: f64,

    /// Offer name; missing or unrecognised names mean no offer
    #[serde(rename = "type", default)]
    pub offer_type: OfferType,

    /// Offer parameters
    #[serde(default)]
    pub offer: Option<OfferConfig>,
}

/// Configured offer parameters, kept even when they cannot be understood.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OfferConfig {
    /// Parameters for a known offer
    Known(OfferDetails),

    /// Anything else; dropped when the entry is built
    Unrecognised(IgnoredAny),
}

impl From<FruitConfig> for CatalogEntry {
    fn from(config: FruitConfig) -> Self {
        let offer_details = match config.offer {
            Some(OfferConfig::Known(details)) => Some(details),
            Some(OfferConfig::Unrecognised(_)) => {
                warn!(item = %config.name, "unrecognised offer parameters, ignoring them");

                None
            }
            None => None,
        };

        CatalogEntry {
            item_id: config.name,
            unit_price: config.price,
            offer_type: config.offer_type,
            offer_details,
        }
    }
}

impl CatalogDocument {
    /// Parse a YAML catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] if the document is malformed.
    pub fn from_yaml_str(contents: &str) -> Result<Self, CatalogError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Parse a JSON catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] if the document is malformed.
    pub fn from_json_str(contents: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Convert the document into a price list.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if an entry is blank or duplicated.
    pub fn into_price_list(self) -> Result<PriceList, CatalogError> {
        PriceList::from_entries(self.fruits.into_iter().map(CatalogEntry::from))
    }
}

/// Serialisation format of a catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// YAML document
    Yaml,

    /// JSON document
    Json,
}

impl CatalogFormat {
    /// Guess the format from a file extension, defaulting to YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => CatalogFormat::Json,
            _ => CatalogFormat::Yaml,
        }
    }
}

/// Catalog source backed by a file, re-read on every snapshot.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
    format: CatalogFormat,
}

impl FileCatalog {
    /// Create a source for `path`, picking the format from its extension.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = CatalogFormat::from_path(&path);

        Self { path, format }
    }

    /// Override the detected format.
    #[must_use]
    pub fn with_format(mut self, format: CatalogFormat) -> Self {
        self.format = format;
        self
    }

    /// Path of the catalog file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format used to parse the file.
    pub fn format(&self) -> CatalogFormat {
        self.format
    }
}

impl CatalogSource for FileCatalog {
    fn snapshot(&self) -> Result<PriceList, CatalogError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;

        let document = match self.format {
            CatalogFormat::Yaml => CatalogDocument::from_yaml_str(&contents)?,
            CatalogFormat::Json => CatalogDocument::from_json_str(&contents)?,
        };

        let list = document.into_price_list()?;

        debug!(path = %self.path.display(), items = list.len(), "loaded catalog");

        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;
    use testresult::TestResult;

    use crate::catalog::Catalog;

    use super::*;

    const YAML: &str = "\
fruits:
  - name: apple
    price: 0.60
    type: NoOffer
  - name: MELON
    price: 0.20
    type: BOGO
    offer: { type: BOGO, buy: 1, free: 1 }
  - name: Lime
    price: 0.20
    type: ThreeForTwo
    offer: { type: ThreeForTwo, payCount: 2, groupSize: 3 }
  - name: BANANA
    price: 0.25
";

    const JSON: &str = r#"{
  "fruits": [
    {"name": "APPLE", "price": 0.6, "type": "NoOffer"},
    {"name": "MELON", "price": 0.2, "type": "TwoForOne", "colour": "green"}
  ]
}"#;

    #[test]
    fn yaml_document_parses_offers() -> TestResult {
        let list = CatalogDocument::from_yaml_str(YAML)?.into_price_list()?;

        assert_eq!(list.len(), 4);

        let lime = list.lookup(&ItemId::new("LIME")).ok_or("lime missing")?;

        assert_eq!(lime.offer_type, OfferType::ThreeForTwo);
        assert_eq!(
            lime.offer_details,
            Some(OfferDetails::ThreeForTwo {
                pay_count: Some(2),
                group_size: Some(3)
            })
        );

        let banana = list.lookup(&ItemId::new("banana")).ok_or("banana missing")?;

        assert_eq!(banana.offer_type, OfferType::NoOffer);
        assert_eq!(banana.offer_details, None);

        Ok(())
    }

    #[test]
    fn json_document_ignores_unknown_fields_and_offers() -> TestResult {
        let list = CatalogDocument::from_json_str(JSON)?.into_price_list()?;

        let melon = list.lookup(&ItemId::new("MELON")).ok_or("melon missing")?;

        assert_eq!(melon.offer_type, OfferType::NoOffer);
        assert!((melon.unit_price - 0.2).abs() < f64::EPSILON);

        Ok(())
    }

    #[test]
    fn format_is_detected_from_extension() {
        assert_eq!(
            CatalogFormat::from_path(Path::new("offer.json")),
            CatalogFormat::Json
        );
        assert_eq!(
            CatalogFormat::from_path(Path::new("offer.JSON")),
            CatalogFormat::Json
        );
        assert_eq!(
            CatalogFormat::from_path(Path::new("fruits.yml")),
            CatalogFormat::Yaml
        );
        assert_eq!(
            CatalogFormat::from_path(Path::new("fruits")),
            CatalogFormat::Yaml
        );
    }

    #[test]
    fn file_catalog_reads_json_and_yaml() -> TestResult {
        let dir = tempdir()?;
        let json_path = dir.path().join("offer.json");
        let yaml_path = dir.path().join("offer.yml");

        fs::write(&json_path, JSON)?;
        fs::write(&yaml_path, YAML)?;

        assert_eq!(FileCatalog::new(&json_path).snapshot()?.len(), 2);
        assert_eq!(FileCatalog::new(&yaml_path).snapshot()?.len(), 4);

        Ok(())
    }

    #[test]
    fn file_catalog_rereads_on_every_snapshot() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("fruits.yml");

        fs::write(&path, YAML)?;

        let source = FileCatalog::new(&path);

        assert_eq!(source.snapshot()?.len(), 4);

        fs::write(&path, "fruits:\n  - name: KIWI\n    price: 0.30\n")?;

        assert_eq!(source.snapshot()?.len(), 1);

        fs::remove_file(&path)?;

        assert!(matches!(source.snapshot(), Err(CatalogError::Io { .. })));

        Ok(())
    }

    #[test]
    fn file_catalog_missing_file_reports_path() {
        let source = FileCatalog::new("/definitely/not/here/fruits.yml");

        match source.snapshot() {
            Err(CatalogError::Io { path, .. }) => {
                assert_eq!(path, PathBuf::from("/definitely/not/here/fruits.yml"));
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn file_catalog_with_format_overrides_extension() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("catalog.txt");

        fs::write(&path, JSON)?;

        let source = FileCatalog::new(&path).with_format(CatalogFormat::Json);

        assert_eq!(source.format(), CatalogFormat::Json);
        assert_eq!(source.path(), path.as_path());
        assert_eq!(source.snapshot()?.len(), 2);

        Ok(())
    }

    #[test]
    fn incomplete_offer_parameters_still_load() -> TestResult {
        let yaml = "\
fruits:
  - name: APPLE
    price: 0.60
  - name: MELON
    price: 0.20
    type: BOGO
    offer: { type: BOGO }
";
        let list = CatalogDocument::from_yaml_str(yaml)?.into_price_list()?;

        let melon = list.lookup(&ItemId::new("MELON")).ok_or("melon missing")?;

        assert_eq!(melon.offer_type, OfferType::Bogo);
        assert_eq!(
            melon.offer_details,
            Some(OfferDetails::Bogo {
                buy: None,
                free: None
            })
        );

        Ok(())
    }

    #[test]
    fn unrecognised_offer_parameters_are_dropped() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("fruits.yml");

        fs::write(
            &path,
            "\
fruits:
  - name: APPLE
    price: 0.60
  - name: MELON
    price: 0.20
    type: BOGO
    offer: { type: HalfPrice }
  - name: LIME
    price: 0.20
    type: ThreeForTwo
    offer: 3
",
        )?;

        let list = FileCatalog::new(&path).snapshot()?;

        assert_eq!(list.len(), 3);

        let melon = list.lookup(&ItemId::new("MELON")).ok_or("melon missing")?;
        let lime = list.lookup(&ItemId::new("LIME")).ok_or("lime missing")?;

        assert_eq!(melon.offer_type, OfferType::Bogo);
        assert_eq!(melon.offer_details, None);
        assert_eq!(lime.offer_type, OfferType::ThreeForTwo);
        assert_eq!(lime.offer_details, None);

        Ok(())
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let result = CatalogDocument::from_yaml_str("fruits: [name: APPLE");

        assert!(matches!(result, Err(CatalogError::Yaml(_))));
    }
}
