//! Product listing management models.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Action to perform on a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingAction {
    /// Create a new listing
    Add,
    /// Update an existing listing, addressed by SKU
    Update,
    /// Remove a listing
    Remove,
}

impl ListingAction {
    /// Returns the action name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingAction::Add => "add",
            ListingAction::Update => "update",
            ListingAction::Remove => "remove",
        }
    }
}

impl fmt::Display for ListingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(ListingAction::Add),
            "update" => Ok(ListingAction::Update),
            "remove" => Ok(ListingAction::Remove),
            other => Err(Error::InvalidInput(format!(
                "Invalid listing action '{}'; expected add, update or remove",
                other
            ))),
        }
    }
}

/// A product listing document.
///
/// The listing schema is category-specific, so the document is opaque JSON.
/// Updates require a top-level `sku` string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductListing(pub Value);

impl ProductListing {
    /// Wrap a listing document.
    pub fn new(document: Value) -> Self {
        Self(document)
    }

    /// The listing's SKU, if present.
    pub fn sku(&self) -> Option<&str> {
        self.0.get("sku").and_then(Value::as_str)
    }
}
