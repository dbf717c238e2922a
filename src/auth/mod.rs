//! Authentication for the Walmart Marketplace API.
//!
//! The marketplace uses an OAuth2 client-credentials flow: the client ID
//! and secret are exchanged (HTTP Basic) for a short-lived access token,
//! which is then presented on every request in the `WM_SEC.ACCESS_TOKEN`
//! header alongside a fresh `WM_QOS.CORRELATION_ID` and the
//! `WM_SVC.NAME` of the caller.
//!
//! [`AuthTokenManager`] holds the token, refreshes it lazily when it is
//! within 30 seconds of expiring, and adds the headers to outgoing
//! requests.
//!
//! ```no_run
//! use walmart_rs::{AuthTokenManager, Environment};
//!
//! # async fn example() -> walmart_rs::Result<()> {
//! let auth = AuthTokenManager::new(
//!     Environment::Sandbox.api_base_url(),
//!     "your-client-id",
//!     "your-client-secret",
//! );
//! auth.refresh().await?;
//! assert!(!auth.needs_refresh().await);
//! # Ok(())
//! # }
//! ```

mod token;

pub use token::{
    AuthTokenManager, Credentials, ACCESS_TOKEN_HEADER, CORRELATION_ID_HEADER,
    DEFAULT_REFRESH_MARGIN_SECS, DEFAULT_SERVICE_NAME, SERVICE_NAME_HEADER,
};
