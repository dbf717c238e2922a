//! HTTP client and service layer for the Walmart Marketplace API.
//!
//! This module provides the main entry point [`WalmartClient`], its
//! configuration, the retry policy applied to endpoint calls, and the
//! cursor-paginated stream used by listing endpoints.
//!
//! # Example
//!
//! ```no_run
//! use walmart_rs::{ClientConfig, RetryConfig, WalmartClient, AuthTokenManager};
//! use std::time::Duration;
//!
//! # async fn example() -> walmart_rs::Result<()> {
//! let base_url = "https://marketplace.walmartapis.com";
//! let auth = AuthTokenManager::new(base_url, "client-id", "client-secret");
//! let config = ClientConfig::default().with_retry(
//!     RetryConfig::default()
//!         .with_max_attempts(3)
//!         .with_base_delay(Duration::from_millis(500)),
//! );
//! let client = WalmartClient::with_config(base_url, auth, config)?;
//!
//! let orders = client.orders().released().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod paginated;
mod retry;

pub use config::{ClientConfig, RetryConfig};
pub use http::WalmartClient;
pub use paginated::{CursorPage, PaginatedStream, DEFAULT_PAGE_SIZE};
pub use retry::retry;
pub(crate) use http::{ApiCall, ClientInner};
