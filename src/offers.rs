//! Offers

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

/// Promotional scheme attached to a catalog item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OfferType {
    /// Full price for every unit.
    #[default]
    NoOffer,

    /// Buy one, get one free.
    Bogo,

    /// Three for the price of two.
    ThreeForTwo,
}

impl OfferType {
    /// Name used in configuration and output.
    pub fn name(self) -> &'static str {
        match self {
            OfferType::NoOffer => "NoOffer",
            OfferType::Bogo => "BOGO",
            OfferType::ThreeForTwo => "ThreeForTwo",
        }
    }

    /// Parse a configured offer name, returning `None` if it is not recognised.
    ///
    /// Matching ignores case, surrounding whitespace, `_` and `-`.
    pub fn parse(value: &str) -> Option<Self> {
        let normalised: String = value
            .trim()
            .chars()
            .filter(|c| !matches!(*c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalised.as_str() {
            "nooffer" | "none" => Some(OfferType::NoOffer),
            "bogo" | "buyonegetone" => Some(OfferType::Bogo),
            "threefortwo" | "3for2" => Some(OfferType::ThreeForTwo),
            _ => None,
        }
    }

    /// Lenient conversion used for catalog data: missing or unknown values
    /// fall back to [`OfferType::NoOffer`].
    pub fn from_config(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return OfferType::NoOffer;
        };

        OfferType::parse(value).unwrap_or_else(|| {
            warn!(offer = value, "unrecognised offer type, pricing without discount");

            OfferType::NoOffer
        })
    }
}

impl fmt::Display for OfferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for OfferType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for OfferType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;

        Ok(OfferType::from_config(raw.as_deref()))
    }
}

/// Offer parameters stored alongside a catalog entry.
///
/// These are carried as metadata only; pricing always uses the fixed ratio of
/// the entry's [`OfferType`]. Any parameter may be left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum OfferDetails {
    /// Buy `buy`, get `free` free.
    #[serde(rename = "BOGO")]
    Bogo {
        /// Units that must be bought
        #[serde(default)]
        buy: Option<u32>,

        /// Units given free
        #[serde(default)]
        free: Option<u32>,
    },

    /// Pay for `pay_count` out of every `group_size`.
    #[serde(rename = "ThreeForTwo", rename_all = "camelCase")]
    ThreeForTwo {
        /// Units paid for in each group
        #[serde(default)]
        pay_count: Option<u32>,

        /// Units per group
        #[serde(default)]
        group_size: Option<u32>,
    },
}
