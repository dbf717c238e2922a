//! Bulk feed payloads for price and inventory updates.
//!
//! Feed documents are forwarded to the upstream as-is, so they are held as
//! opaque JSON rather than a fixed structure.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Kind of bulk feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    /// Price feed
    Price,
    /// Inventory feed
    Inventory,
}

impl FeedType {
    /// Value of the `feedType` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedType::Price => "price",
            FeedType::Inventory => "inventory",
        }
    }
}

/// A bulk price update document.
///
/// # Example
///
/// ```
/// use walmart_rs::models::BulkPriceUpdate;
/// use serde_json::json;
///
/// let update = BulkPriceUpdate::new(json!({
///     "PriceHeader": { "version": "1.7" },
///     "Price": [{
///         "sku": "SKU-1",
///         "pricing": [{ "currentPrice": { "currency": "USD", "amount": 19.99 } }]
///     }]
/// }));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BulkPriceUpdate(pub Value);

impl BulkPriceUpdate {
    /// Wrap a price feed document.
    pub fn new(document: Value) -> Self {
        Self(document)
    }
}

/// A bulk inventory update document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BulkInventoryUpdate(pub Value);

impl BulkInventoryUpdate {
    /// Wrap an inventory feed document.
    pub fn new(document: Value) -> Self {
        Self(document)
    }
}

/// Acknowledgement of a submitted feed.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    /// Identifier to poll the feed status with
    #[serde(rename = "feedId")]
    pub feed_id: String,
    /// Any other fields returned by the upstream
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Serialize a feed document into a request body.
pub(crate) fn to_body<T: Serialize>(document: &T) -> Result<Vec<u8>> {
    let body = serde_json::to_vec(document)?;
    if body == b"null" {
        return Err(Error::InvalidInput("feed document is empty".to_string()));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feed_body_is_document() {
        let update = BulkInventoryUpdate::new(json!({ "inventory": [{ "sku": "A" }] }));
        let body = to_body(&update).unwrap();
        let parsed: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed, json!({ "inventory": [{ "sku": "A" }] }));
    }

    #[test]
    fn test_null_feed_rejected() {
        let update = BulkPriceUpdate::new(Value::Null);
        assert!(matches!(to_body(&update), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_feed_response() {
        let response: FeedResponse = serde_json::from_value(json!({
            "feedId": "F129C19240844B97A3C6AD8F1A2C4997@AU8BAQA",
            "additionalAttributes": null
        }))
        .unwrap();
        assert_eq!(response.feed_id, "F129C19240844B97A3C6AD8F1A2C4997@AU8BAQA");
        assert!(response.extra.contains_key("additionalAttributes"));

        assert!(serde_json::from_value::<FeedResponse>(json!({})).is_err());
    }

    #[test]
    fn test_feed_type_query_value() {
        assert_eq!(FeedType::Price.as_str(), "price");
        assert_eq!(FeedType::Inventory.as_str(), "inventory");
    }
}
