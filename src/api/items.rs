//! Items service for the seller catalog.

use std::sync::Arc;

use futures_util::TryStreamExt;
use reqwest::Method;

use crate::client::paginated::{
    CursorPage, PaginatedStream, DEFAULT_PAGE_SIZE, FIRST_PAGE_CURSOR,
};
use crate::client::{ApiCall, ClientInner};
use crate::models::{Item, ItemsPage};
use crate::Result;

/// Service for catalog item operations.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: walmart_rs::WalmartClient) -> walmart_rs::Result<()> {
/// // Fetch the whole catalog, page by page
/// let items = client.items().all().await?;
/// for item in &items {
///     println!("{} {}", item.sku, item.price.amount);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ItemsService {
    inner: Arc<ClientInner>,
}

impl ItemsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Fetch a single page of items.
    ///
    /// Pass `None` (or `"*"`) for the first page and the previous page's
    /// [`ItemsPage::next_cursor`] for the following ones.
    pub async fn list_page(&self, cursor: Option<&str>) -> Result<ItemsPage> {
        fetch_page(&self.inner, cursor.unwrap_or(FIRST_PAGE_CURSOR).to_string()).await
    }

    /// Stream every item in the catalog, fetching pages lazily.
    pub fn stream(&self) -> PaginatedStream<Item> {
        let inner = self.inner.clone();
        PaginatedStream::new(move |cursor: String| {
            let inner = inner.clone();
            Box::pin(async move {
                let page = fetch_page(&inner, cursor).await?;
                let next_cursor = page.next_cursor().map(String::from);
                Ok(CursorPage {
                    items: page.item_response,
                    next_cursor,
                })
            })
        })
    }

    /// Fetch every item in the catalog.
    ///
    /// Follows `nextCursor` until a page omits it, issuing exactly one
    /// request per page, and returns the items in page order.
    pub async fn all(&self) -> Result<Vec<Item>> {
        let items: Vec<Item> = self.stream().try_collect().await?;
        tracing::debug!(count = items.len(), "fetched all items");
        Ok(items)
    }
}

async fn fetch_page(inner: &ClientInner, cursor: String) -> Result<ItemsPage> {
    inner
        .fetch(
            ApiCall::new(Method::GET, "/v3/items", "Error while fetching items")
                .query("limit", DEFAULT_PAGE_SIZE.to_string())
                .query("nextCursor", cursor),
        )
        .await
}
