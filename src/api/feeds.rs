//! Feeds service for bulk price and inventory updates.

use std::sync::Arc;

use reqwest::Method;

use crate::client::{ApiCall, ClientInner};
use crate::models::feed::to_body;
use crate::models::{BulkInventoryUpdate, BulkPriceUpdate, FeedResponse, FeedType};
use crate::Result;

/// Service for bulk feed submissions.
///
/// The feed document is serialized straight into the request body.
///
/// # Example
///
/// ```no_run
/// use walmart_rs::models::BulkPriceUpdate;
/// use serde_json::json;
///
/// # async fn example(client: walmart_rs::WalmartClient) -> walmart_rs::Result<()> {
/// let update = BulkPriceUpdate::new(json!({
///     "PriceHeader": { "version": "1.7" },
///     "Price": [{
///         "sku": "SKU-1",
///         "pricing": [{ "currentPrice": { "currency": "USD", "amount": 19.99 } }]
///     }]
/// }));
/// let response = client.feeds().bulk_update_price(&update).await?;
/// println!("Feed submitted: {}", response.feed_id);
/// # Ok(())
/// # }
/// ```
pub struct FeedsService {
    inner: Arc<ClientInner>,
}

impl FeedsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Submit a bulk price update feed.
    pub async fn bulk_update_price(&self, update: &BulkPriceUpdate) -> Result<FeedResponse> {
        self.submit(FeedType::Price, to_body(update)?, "Error while updating price")
            .await
    }

    /// Submit a bulk inventory update feed.
    pub async fn bulk_update_inventory(
        &self,
        update: &BulkInventoryUpdate,
    ) -> Result<FeedResponse> {
        self.submit(
            FeedType::Inventory,
            to_body(update)?,
            "Error while updating inventory",
        )
        .await
    }

    async fn submit(
        &self,
        feed_type: FeedType,
        body: Vec<u8>,
        context: &'static str,
    ) -> Result<FeedResponse> {
        tracing::debug!(feed_type = feed_type.as_str(), bytes = body.len(), "submitting feed");
        self.inner
            .fetch(
                ApiCall::new(Method::POST, "/v3/feeds", context)
                    .query("feedType", feed_type.as_str())
                    .json_body(body),
            )
            .await
    }
}
