//! HTTP client implementation for the Walmart Marketplace API.

use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::api::{FeedsService, ItemsService, OrdersService, ProductsService};
use crate::auth::AuthTokenManager;
use crate::{Error, Result};

use super::config::{ClientConfig, RetryConfig};
use super::retry::retry;

/// The main client for interacting with the Walmart Marketplace API.
///
/// The client owns the HTTP connection pool, the [`AuthTokenManager`] and
/// the retry policy. Endpoint operations are grouped into services
/// obtained from the client.
///
/// # Example
///
/// ```no_run
/// use walmart_rs::{AuthTokenManager, Environment, PurchaseOrderId, WalmartClient};
///
/// # async fn example() -> walmart_rs::Result<()> {
/// let base_url = Environment::Sandbox.api_base_url();
/// let auth = AuthTokenManager::new(base_url, "client-id", "client-secret");
/// let client = WalmartClient::new(base_url, auth)?;
///
/// let items = client.items().all().await?;
/// let order = client.orders().get(&PurchaseOrderId::new("108915114139071")).await?;
/// # Ok(())
/// # }
/// ```
pub struct WalmartClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) auth: AuthTokenManager,
    pub(crate) config: ClientConfig,
    pub(crate) base_url: String,
}

impl WalmartClient {
    /// Create a client with the default configuration.
    pub fn new(base_url: impl Into<String>, auth: AuthTokenManager) -> Result<Self> {
        Self::with_config(base_url, auth, ClientConfig::default())
    }

    /// Create a client with a custom configuration.
    pub fn with_config(
        base_url: impl Into<String>,
        auth: AuthTokenManager,
        config: ClientConfig,
    ) -> Result<Self> {
        let base_url = base_url.into();
        let parsed = url::Url::parse(&base_url)?;
        if parsed.cannot_be_a_base() {
            return Err(Error::Config(format!("{} cannot be used as a base URL", base_url)));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                auth,
                config,
                base_url: base_url.trim_end_matches('/').to_string(),
            }),
        })
    }

    /// Create a client and its token manager from client credentials.
    pub fn from_credentials(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self> {
        let base_url = base_url.into();
        let auth = AuthTokenManager::new(base_url.clone(), client_id, client_secret);
        Self::new(base_url, auth)
    }

    /// Create a client from `WALMART_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let auth = AuthTokenManager::from_env()?;
        let base_url = auth.credentials().base_url().to_string();
        Self::new(base_url, auth)
    }

    /// Get the items service.
    pub fn items(&self) -> ItemsService {
        ItemsService::new(self.inner.clone())
    }

    /// Get the bulk feeds service.
    pub fn feeds(&self) -> FeedsService {
        FeedsService::new(self.inner.clone())
    }

    /// Get the orders service.
    pub fn orders(&self) -> OrdersService {
        OrdersService::new(self.inner.clone())
    }

    /// Get the product listings service.
    pub fn products(&self) -> ProductsService {
        ProductsService::new(self.inner.clone())
    }

    /// Get the token manager.
    pub fn auth(&self) -> &AuthTokenManager {
        &self.inner.auth
    }

    /// Get the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }
}

/// A request to an API endpoint, rebuilt on every attempt.
pub(crate) struct ApiCall {
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    body: Option<Vec<u8>>,
    context: &'static str,
    retried: bool,
}

impl ApiCall {
    /// `context` describes the operation and becomes the error message.
    pub(crate) fn new(method: Method, path: impl Into<String>, context: &'static str) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            context,
            retried: true,
        }
    }

    pub(crate) fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    pub(crate) fn json_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Send at most once, regardless of the client's retry policy.
    pub(crate) fn without_retry(mut self) -> Self {
        self.retried = false;
        self
    }
}

impl ClientInner {
    /// Execute `call` and parse the response body as `T`.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, call: ApiCall) -> Result<T> {
        let body = self.execute(call).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(error = %e, "response did not match the expected schema");
            Error::Json(e)
        })
    }

    /// Execute `call` and return the raw response body.
    pub(crate) async fn execute(&self, call: ApiCall) -> Result<String> {
        let no_retry = RetryConfig::no_retry();
        let policy = if call.retried {
            &self.config.retry
        } else {
            &no_retry
        };

        retry(policy, call.context, || self.send_once(&call)).await
    }

    async fn send_once(&self, call: &ApiCall) -> Result<String> {
        let url = format!("{}{}", self.base_url, call.path);

        let mut builder = self
            .http
            .request(call.method.clone(), &url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if !call.query.is_empty() {
            builder = builder.query(&call.query);
        }
        if let Some(body) = &call.body {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body.clone());
        }

        let request = self.auth.inject_auth_headers(builder.build()?).await?;

        tracing::debug!(method = %call.method, path = %call.path, "sending request");
        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_client_error() || status.is_server_error() {
            return Err(Error::from_api_response(status.as_u16(), call.context, body));
        }

        Ok(body)
    }
}

impl Clone for WalmartClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for WalmartClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalmartClient")
            .field("base_url", &self.inner.base_url)
            .field("config", &self.inner.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        let auth = AuthTokenManager::new("not a url", "id", "secret");
        let err = WalmartClient::new("not a url", auth).unwrap_err();
        assert!(matches!(err, Error::UrlParse(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = WalmartClient::from_credentials("https://example.com/", "id", "secret").unwrap();
        assert_eq!(client.base_url(), "https://example.com");
    }

    #[test]
    fn test_debug_omits_credentials() {
        let client = WalmartClient::from_credentials("https://example.com", "id", "hunter2").unwrap();
        assert!(!format!("{:?}", client).contains("hunter2"));
    }
}
