//! Cursor-paginated stream for lazy iteration over API results.
//!
//! This module provides a [`PaginatedStream`] that implements the `Stream`
//! trait. Each page names the cursor of the next one; iteration ends on the
//! first page without a cursor.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;

use crate::Result;

/// Number of items requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// Cursor value that requests the first page.
pub const FIRST_PAGE_CURSOR: &str = "*";

/// One page of results and the cursor of the page after it.
#[derive(Debug, Clone)]
pub struct CursorPage<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Cursor of the next page, `None` on the last page.
    pub next_cursor: Option<String>,
}

/// Type alias for a boxed future used internally.
type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A stream that lazily fetches pages from a cursor-paginated endpoint.
///
/// This stream yields individual items from each page and requests the
/// next page only once the current one is exhausted, so each page is
/// fetched exactly once.
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
///
/// # async fn example(client: walmart_rs::WalmartClient) -> walmart_rs::Result<()> {
/// let mut stream = client.items().stream();
///
/// while let Some(result) = stream.next().await {
///     let item = result?;
///     println!("{}: {}", item.sku, item.product_name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PaginatedStream<T> {
    /// Function to fetch a page by cursor.
    fetch_page: Box<dyn Fn(String) -> BoxFuture<'static, Result<CursorPage<T>>> + Send + Sync>,
    /// Items of the current page not yet yielded.
    current_items: VecDeque<T>,
    /// Cursor of the next page to fetch, `None` once exhausted.
    next_cursor: Option<String>,
    /// Current in-flight fetch future.
    pending_fetch: Option<BoxFuture<'static, Result<CursorPage<T>>>>,
}

impl<T> PaginatedStream<T>
where
    T: Send + 'static,
{
    /// Create a new paginated stream starting at the first page.
    pub fn new<F>(fetch_page: F) -> Self
    where
        F: Fn(String) -> BoxFuture<'static, Result<CursorPage<T>>> + Send + Sync + 'static,
    {
        Self {
            fetch_page: Box::new(fetch_page),
            current_items: VecDeque::new(),
            next_cursor: Some(FIRST_PAGE_CURSOR.to_string()),
            pending_fetch: None,
        }
    }
}

impl<T> Stream for PaginatedStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            if let Some(item) = this.current_items.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if let Some(fut) = this.pending_fetch.as_mut() {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(Ok(page)) => {
                        this.pending_fetch = None;
                        this.current_items = page.items.into();
                        // An empty cursor means there is no next page.
                        this.next_cursor = page.next_cursor.filter(|c| !c.is_empty());
                        // Empty pages with a cursor still continue to the next fetch.
                        continue;
                    }
                    Poll::Ready(Err(e)) => {
                        this.pending_fetch = None;
                        this.next_cursor = None; // Stop on error
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => {
                        return Poll::Pending;
                    }
                }
            }

            if let Some(cursor) = this.next_cursor.take() {
                this.pending_fetch = Some((this.fetch_page)(cursor));
                continue;
            }

            return Poll::Ready(None);
        }
    }
}

impl<T> Unpin for PaginatedStream<T> {}
