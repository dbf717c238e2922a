//! # walmart-rs
//!
//! A typed async client for the Walmart Marketplace REST API.
//!
//! This crate covers the seller-facing parts of the marketplace: catalog
//! items, bulk price and inventory feeds, the purchase order lifecycle,
//! and product listing management.
//!
//! ## Features
//!
//! - **Authentication**: OAuth2 client-credentials with lazy, single-flight token refresh
//! - **Resilience**: Exponential backoff retries for server and network failures
//! - **Items**: Cursor-paginated catalog listing, as a `Stream` or collected
//! - **Orders**: Released orders, lookup, acknowledge, ship, return/refund
//! - **Feeds**: Bulk price and inventory updates
//! - **Type Safety**: Strongly-typed models; schema mismatches surface as errors
//! - **Async-first**: Built on Tokio and reqwest
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use walmart_rs::{AuthTokenManager, Environment, PurchaseOrderId, WalmartClient};
//!
//! #[tokio::main]
//! async fn main() -> walmart_rs::Result<()> {
//!     let base_url = Environment::Sandbox.api_base_url();
//!     let auth = AuthTokenManager::new(base_url, "client-id", "client-secret");
//!     let client = WalmartClient::new(base_url, auth)?;
//!
//!     // Every catalog item, following cursors until the last page
//!     let items = client.items().all().await?;
//!     println!("Found {} items", items.len());
//!
//!     // Orders waiting to be acknowledged
//!     for order in client.orders().released().await? {
//!         let id = PurchaseOrderId::new(&order.purchase_order_id);
//!         client.orders().acknowledge(&id).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust,no_run
//! use walmart_rs::{Error, PurchaseOrderId, WalmartClient};
//!
//! # async fn example(client: WalmartClient) {
//! match client.orders().get(&PurchaseOrderId::new("1089")).await {
//!     Ok(order) => println!("{:?}", order.ordered_at()),
//!     Err(Error::Api { status: 404, .. }) => println!("no such order"),
//!     Err(err) if err.is_retryable() => println!("still failing after retries: {err}"),
//!     Err(err) => println!("request failed: {err}"),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use auth::{AuthTokenManager, Credentials};
pub use client::{ClientConfig, RetryConfig, WalmartClient};
pub use error::{Error, Result};
pub use models::{Environment, PurchaseOrderId, Sku};

/// Prelude module for convenient imports.
///
/// ```rust
/// use walmart_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::auth::{AuthTokenManager, Credentials};
    pub use crate::client::{ClientConfig, PaginatedStream, RetryConfig, WalmartClient};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        // Primitives
        Environment, PurchaseOrderId, Sku,
        // Catalog
        Item, ItemPrice, ItemsPage,
        // Orders
        Order, OrderLine, OrderShipment, ReleasedOrdersPage,
        // Feeds and listings
        BulkInventoryUpdate, BulkPriceUpdate, FeedResponse, ListingAction, ProductListing,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_order_id_creation() {
        let id = PurchaseOrderId::new("108915114139071");
        assert_eq!(id.as_str(), "108915114139071");
    }

    #[test]
    fn test_environment_urls() {
        assert_eq!(
            Environment::Production.api_base_url(),
            "https://marketplace.walmartapis.com"
        );
        assert_eq!(
            Environment::Sandbox.api_base_url(),
            "https://sandbox.walmartapis.com"
        );
    }

    #[test]
    fn test_client_defaults_to_endpoint_retry_policy() {
        let client = WalmartClient::from_credentials(
            Environment::Sandbox.api_base_url(),
            "id",
            "secret",
        )
        .unwrap();
        assert_eq!(client.inner.config.retry.max_attempts, 20);
    }
}
