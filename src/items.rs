//! Items

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a purchasable item (a fruit name).
///
/// Identifiers compare case-insensitively: the stored form is trimmed and
/// upper-cased, so `" apple "` and `"APPLE"` name the same item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create an identifier from any name, normalising it.
    pub fn new(name: impl AsRef<str>) -> Self {
        ItemId(name.as_ref().trim().to_uppercase())
    }

    /// The normalised identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is empty after normalisation.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(name: &str) -> Self {
        ItemId::new(name)
    }
}

impl From<String> for ItemId {
    fn from(name: String) -> Self {
        ItemId::new(name)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;

        Ok(ItemId::new(raw))
    }
}

/// A requested quantity of one item.
///
/// The quantity is signed so that a malformed request can still be expressed;
/// pricing rejects negative quantities.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LineRequest {
    /// Item being bought
    #[serde(rename = "name")]
    pub item_id: ItemId,

    /// Number of units
    pub quantity: i64,
}

impl LineRequest {
    /// Create a new line request.
    pub fn new(item_id: impl Into<ItemId>, quantity: i64) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
        }
    }
}
