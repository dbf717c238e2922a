//! Catalog item models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::primitives::Sku;

/// Price attached to a catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPrice {
    /// ISO currency code (e.g. "USD")
    pub currency: String,
    /// Price amount
    pub amount: Decimal,
}

/// A seller catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Marketplace the item is listed on
    pub mart: String,
    /// Seller SKU
    pub sku: Sku,
    /// Item condition (e.g. "New")
    pub condition: String,
    /// Walmart product ID
    pub wpid: String,
    /// Universal product code
    pub upc: String,
    /// Global trade item number
    pub gtin: String,
    /// Display name
    pub product_name: String,
    /// Category path
    pub shelf: String,
    /// Product type
    pub product_type: String,
    /// Current price
    pub price: ItemPrice,
    /// Publication status (e.g. "PUBLISHED")
    pub published_status: String,
    /// Reasons an item is unpublished; shape is not fixed upstream
    #[serde(default)]
    pub unpublished_reasons: Value,
    /// Variant group identifier
    #[serde(default)]
    pub variant_group_id: Value,
    /// Variant group details
    #[serde(default)]
    pub variant_group_info: Value,
    /// Lifecycle status (e.g. "ACTIVE")
    pub lifecycle_status: String,
}

impl Item {
    /// Returns `true` if the item is currently published.
    pub fn is_published(&self) -> bool {
        self.published_status.eq_ignore_ascii_case("PUBLISHED")
    }
}

/// One page of the item listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsPage {
    /// Items on this page
    #[serde(alias = "ItemResponse")]
    pub item_response: Vec<Item>,
    /// Total number of items in the catalog, when reported
    #[serde(default)]
    pub total_items: Option<u64>,
    /// Cursor for the next page; absent or empty on the last page
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl ItemsPage {
    /// Cursor to request the following page, if there is one.
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item_json() -> Value {
        serde_json::json!({
            "mart": "WALMART_US",
            "sku": "SKU-1",
            "condition": "New",
            "wpid": "0RCPILAXM0C1",
            "upc": "",
            "gtin": "00886859001018",
            "productName": "Garden Hose",
            "shelf": "[\"Home\",\"Garden\"]",
            "productType": "Hoses",
            "price": { "currency": "USD", "amount": 24.99 },
            "publishedStatus": "PUBLISHED",
            "unpublishedReasons": { "reason": [] },
            "variantGroupId": null,
            "lifecycleStatus": "ACTIVE"
        })
    }

    #[test]
    fn test_item_deserialize() {
        let item: Item = serde_json::from_value(item_json()).unwrap();
        assert_eq!(item.sku.as_str(), "SKU-1");
        assert_eq!(item.product_name, "Garden Hose");
        assert_eq!(item.price.amount, dec!(24.99));
        assert!(item.is_published());
        assert!(item.variant_group_id.is_null());
        assert!(item.variant_group_info.is_null());
        assert!(item.unpublished_reasons.is_object());
    }

    #[test]
    fn test_item_missing_required_field() {
        let mut json = item_json();
        json.as_object_mut().unwrap().remove("sku");
        assert!(serde_json::from_value::<Item>(json).is_err());
    }

    #[test]
    fn test_page_next_cursor() {
        let page: ItemsPage = serde_json::from_value(serde_json::json!({
            "ItemResponse": [item_json()],
            "totalItems": 1,
            "nextCursor": ""
        }))
        .unwrap();
        assert_eq!(page.item_response.len(), 1);
        assert_eq!(page.next_cursor(), None);

        let page: ItemsPage = serde_json::from_value(serde_json::json!({
            "itemResponse": [],
            "nextCursor": "AoE"
        }))
        .unwrap();
        assert_eq!(page.next_cursor(), Some("AoE"));
    }
}
