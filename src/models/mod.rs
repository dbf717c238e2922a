//! Data models for the Walmart Marketplace API.
//!
//! Models are organized by domain:
//!
//! - [`primitives`] - Identifiers like `PurchaseOrderId`, `Sku`, and `Environment`
//! - [`item`] - Catalog items and item listing pages
//! - [`order`] - Purchase orders and the released orders listing
//! - [`shipment`] - Shipment confirmation payloads
//! - [`feed`] - Bulk price and inventory feeds
//! - [`product`] - Product listing management

pub mod primitives;
pub mod item;
pub mod order;
pub mod shipment;
pub mod feed;
pub mod product;

// Re-export commonly used types
pub use primitives::*;
pub use item::*;
pub use order::*;
pub use shipment::*;
pub use feed::{BulkInventoryUpdate, BulkPriceUpdate, FeedResponse, FeedType};
pub use product::*;
