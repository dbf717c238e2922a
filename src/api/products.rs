//! Products service for listing management.

use std::sync::Arc;

use reqwest::Method;

use crate::client::{ApiCall, ClientInner};
use crate::models::{ListingAction, ProductListing};
use crate::{Error, Result};

/// Service for product listing management.
///
/// Listing writes are not idempotent, so they are sent once and never
/// retried.
///
/// # Example
///
/// ```no_run
/// use walmart_rs::models::{ListingAction, ProductListing};
/// use serde_json::json;
///
/// # async fn example(client: walmart_rs::WalmartClient) -> walmart_rs::Result<()> {
/// let listing = ProductListing::new(json!({ "sku": "SKU-1", "productName": "Garden Hose" }));
/// let status = client.products().manage(ListingAction::Update, &listing).await?;
/// println!("{}", status);
/// # Ok(())
/// # }
/// ```
pub struct ProductsService {
    inner: Arc<ClientInner>,
}

impl ProductsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Add, update or remove a product listing.
    ///
    /// `Add` and `Remove` post to `/v3/products`; `Update` puts to
    /// `/v3/products/{sku}` and requires the listing to carry a `sku`.
    ///
    /// Returns the raw confirmation body.
    pub async fn manage(&self, action: ListingAction, listing: &ProductListing) -> Result<String> {
        let (method, path) = match action {
            ListingAction::Add | ListingAction::Remove => {
                (Method::POST, "/v3/products".to_string())
            }
            ListingAction::Update => {
                let sku = listing.sku().ok_or_else(|| {
                    Error::InvalidInput("a listing update requires a 'sku' field".to_string())
                })?;
                let path = format!("/v3/products/{}", urlencoding::encode(sku));
                (Method::PUT, path)
            }
        };

        let body = serde_json::to_vec(listing)?;
        tracing::debug!(%action, "managing product listing");
        self.inner
            .execute(
                ApiCall::new(method, path, "Error while managing product listing")
                    .json_body(body)
                    .without_retry(),
            )
            .await
    }

    /// Create a new listing.
    pub async fn add(&self, listing: &ProductListing) -> Result<String> {
        self.manage(ListingAction::Add, listing).await
    }

    /// Update the listing identified by its `sku`.
    pub async fn update(&self, listing: &ProductListing) -> Result<String> {
        self.manage(ListingAction::Update, listing).await
    }

    /// Remove a listing.
    pub async fn remove(&self, listing: &ProductListing) -> Result<String> {
        self.manage(ListingAction::Remove, listing).await
    }
}
