//! Access token management for the Walmart Marketplace API.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{Error, Result};

/// Per-request correlation identifier header.
pub const CORRELATION_ID_HEADER: HeaderName = HeaderName::from_static("wm_qos.correlation_id");
/// Calling service name header.
pub const SERVICE_NAME_HEADER: HeaderName = HeaderName::from_static("wm_svc.name");
/// Access token header.
pub const ACCESS_TOKEN_HEADER: HeaderName = HeaderName::from_static("wm_sec.access_token");

/// Service name sent when none is configured.
pub const DEFAULT_SERVICE_NAME: &str = "walmart-rs";

/// Seconds subtracted from the advertised token lifetime.
pub const DEFAULT_REFRESH_MARGIN_SECS: i64 = 30;

const TOKEN_PATH: &str = "/v3/token";

/// Client credentials for the token exchange.
#[derive(Clone)]
pub struct Credentials {
    base_url: String,
    client_id: String,
    client_secret: SecretString,
}

impl Credentials {
    /// Create credentials for `base_url`.
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
        }
    }

    /// Read `WALMART_BASE_URL`, `WALMART_CLIENT_ID` and
    /// `WALMART_CLIENT_SECRET` from the environment.
    pub fn from_env() -> Result<Self> {
        fn var(name: &str) -> Result<String> {
            std::env::var(name).map_err(|_| Error::Config(format!("{} must be set", name)))
        }

        Ok(Self::new(
            var("WALMART_BASE_URL")?,
            var("WALMART_CLIENT_ID")?,
            var("WALMART_CLIENT_SECRET")?,
        ))
    }

    /// The API base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The client identifier.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    fn basic_auth(&self) -> String {
        let raw = format!("{}:{}", self.client_id, self.client_secret.expose_secret());
        format!("Basic {}", STANDARD.encode(raw))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Owns the bearer token and injects authentication headers.
///
/// Tokens are obtained lazily with a client-credentials exchange the first
/// time a request needs one and replaced once they are within the safety
/// margin of their expiry.
///
/// # Thread Safety
///
/// `AuthTokenManager` is cheap to clone and can be shared across tasks.
/// Refreshes are single-flight: when several requests find the token
/// stale at once, one of them exchanges credentials and the others wait
/// for and reuse its result.
///
/// # Example
///
/// ```no_run
/// use walmart_rs::AuthTokenManager;
///
/// # async fn example() -> walmart_rs::Result<()> {
/// let auth = AuthTokenManager::new(
///     "https://marketplace.walmartapis.com",
///     "client-id",
///     "client-secret",
/// );
///
/// let request = reqwest::Client::new()
///     .get("https://marketplace.walmartapis.com/v3/items")
///     .build()?;
/// let request = auth.inject_auth_headers(request).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AuthTokenManager {
    inner: Arc<AuthInner>,
}

struct AuthInner {
    http: reqwest::Client,
    credentials: Credentials,
    service_name: HeaderValue,
    refresh_margin: Duration,
    token: RwLock<Option<AccessToken>>,
    refresh_lock: Mutex<()>,
}

#[derive(Clone)]
struct AccessToken {
    value: SecretString,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    #[serde(default)]
    #[allow(dead_code)]
    token_type: Option<String>,
}

impl AuthTokenManager {
    /// Create a manager for `base_url` with the given client credentials.
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self::from_credentials(Credentials::new(base_url, client_id, client_secret))
    }

    /// Create a manager from existing credentials.
    pub fn from_credentials(credentials: Credentials) -> Self {
        Self::with_http_client(credentials, reqwest::Client::new())
    }

    /// Create a manager that performs token exchanges with `http`.
    pub fn with_http_client(credentials: Credentials, http: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(AuthInner {
                http,
                credentials,
                service_name: HeaderValue::from_static(DEFAULT_SERVICE_NAME),
                refresh_margin: Duration::seconds(DEFAULT_REFRESH_MARGIN_SECS),
                token: RwLock::new(None),
                refresh_lock: Mutex::new(()),
            }),
        }
    }

    /// Create a manager from `WALMART_*` environment variables.
    ///
    /// See [`Credentials::from_env`].
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_credentials(Credentials::from_env()?))
    }

    /// Set the value sent in the service name header.
    ///
    /// Must be called before the manager is cloned or shared.
    pub fn with_service_name(mut self, name: impl AsRef<str>) -> Result<Self> {
        let value = HeaderValue::from_str(name.as_ref())
            .map_err(|_| Error::InvalidInput(format!("Invalid service name: {}", name.as_ref())))?;
        self.inner_mut()?.service_name = value;
        Ok(self)
    }

    /// Set how many seconds before the advertised expiry a token is
    /// considered stale.
    ///
    /// Must be called before the manager is cloned or shared.
    pub fn with_refresh_margin(mut self, secs: i64) -> Result<Self> {
        let margin = Duration::try_seconds(secs).ok_or_else(|| {
            Error::InvalidInput(format!("Refresh margin of {} seconds is out of range", secs))
        })?;
        self.inner_mut()?.refresh_margin = margin;
        Ok(self)
    }

    fn inner_mut(&mut self) -> Result<&mut AuthInner> {
        Arc::get_mut(&mut self.inner).ok_or_else(|| {
            Error::Config("token manager is already shared; configure it before cloning".into())
        })
    }

    /// The credentials this manager authenticates with.
    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// Returns `true` if no token is held or the held token has reached
    /// its (margin-adjusted) expiry.
    pub async fn needs_refresh(&self) -> bool {
        match self.inner.token.read().await.as_ref() {
            Some(token) => token.is_stale(Utc::now()),
            None => true,
        }
    }

    /// Expiry of the current token, margin already applied.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.inner.token.read().await.as_ref().map(|t| t.expires_at)
    }

    /// Exchange the client credentials for a new access token.
    ///
    /// The stored token is replaced only when the exchange succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if the token endpoint answers with
    /// a non-success status or a body lacking `access_token`/`expires_in`,
    /// and [`Error::Http`] if it cannot be reached.
    pub async fn refresh(&self) -> Result<()> {
        let _guard = self.inner.refresh_lock.lock().await;
        self.exchange_and_store().await.map(|_| ())
    }

    /// Add the correlation, service name and access token headers to
    /// `request`, refreshing the token first if it is stale.
    pub async fn inject_auth_headers(&self, mut request: reqwest::Request) -> Result<reqwest::Request> {
        let token = self.current_token().await?;
        self.apply_headers(request.headers_mut(), &token)?;
        Ok(request)
    }

    fn apply_headers(&self, headers: &mut HeaderMap, token: &SecretString) -> Result<()> {
        let mut token_value = HeaderValue::from_str(token.expose_secret())
            .map_err(|_| Error::InvalidInput("Invalid token format".to_string()))?;
        token_value.set_sensitive(true);

        headers.insert(CORRELATION_ID_HEADER, correlation_id());
        headers.insert(SERVICE_NAME_HEADER, self.inner.service_name.clone());
        headers.insert(ACCESS_TOKEN_HEADER, token_value);
        Ok(())
    }

    /// Returns a fresh token, refreshing at most once across concurrent
    /// callers.
    async fn current_token(&self) -> Result<SecretString> {
        if let Some(token) = self.fresh_token().await {
            return Ok(token);
        }

        let _guard = self.inner.refresh_lock.lock().await;
        // Another caller may have refreshed while we waited for the lock.
        if let Some(token) = self.fresh_token().await {
            return Ok(token);
        }
        self.exchange_and_store().await
    }

    async fn fresh_token(&self) -> Option<SecretString> {
        self.inner
            .token
            .read()
            .await
            .as_ref()
            .filter(|t| !t.is_stale(Utc::now()))
            .map(|t| t.value.clone())
    }

    /// Callers must hold `refresh_lock`.
    async fn exchange_and_store(&self) -> Result<SecretString> {
        let token = self.exchange_token().await?;
        let value = token.value.clone();
        *self.inner.token.write().await = Some(token);
        Ok(value)
    }

    async fn exchange_token(&self) -> Result<AccessToken> {
        let credentials = &self.inner.credentials;
        let url = format!("{}{}", credentials.base_url(), TOKEN_PATH);

        let mut authorization = HeaderValue::from_str(&credentials.basic_auth())
            .map_err(|_| Error::Authentication("client credentials are not valid header text".into()))?;
        authorization.set_sensitive(true);

        tracing::debug!(client_id = credentials.client_id(), "requesting access token");

        let response = self
            .inner
            .http
            .post(&url)
            .query(&[("grant_type", "client_credentials")])
            .header(AUTHORIZATION, authorization)
            .header(ACCEPT, "application/json")
            .header(CORRELATION_ID_HEADER, correlation_id())
            .header(SERVICE_NAME_HEADER, self.inner.service_name.clone())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Authentication(format!(
                "Token exchange failed ({}): {}",
                status.as_u16(),
                body
            )));
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            Error::Authentication(format!("Malformed token response: {}", e))
        })?;

        let expires_at = Duration::try_seconds(token.expires_in)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .and_then(|at| at.checked_sub_signed(self.inner.refresh_margin))
            .ok_or_else(|| {
                Error::Authentication(format!(
                    "Token lifetime of {} seconds is out of range",
                    token.expires_in
                ))
            })?;
        tracing::debug!(%expires_at, "access token refreshed");

        Ok(AccessToken {
            value: SecretString::from(token.access_token),
            expires_at,
        })
    }
}

fn correlation_id() -> HeaderValue {
    let id = Uuid::new_v4().hyphenated().to_string();
    // A hyphenated UUID is always valid header text.
    HeaderValue::from_str(&id).unwrap_or_else(|_| HeaderValue::from_static("unknown"))
}

impl std::fmt::Debug for AuthTokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthTokenManager")
            .field("credentials", &self.inner.credentials)
            .field("service_name", &self.inner.service_name)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn token_server(expires_in: i64) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/token"))
            .and(query_param("grant_type", "client_credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok-1",
                "token_type": "Bearer",
                "expires_in": expires_in
            })))
            .mount(&server)
            .await;
        server
    }

    fn request() -> reqwest::Request {
        reqwest::Client::new()
            .get("http://localhost/v3/items")
            .build()
            .unwrap()
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let auth = AuthTokenManager::new("http://localhost", "id", "super-secret");
        let debug_str = format!("{:?}", auth);
        assert!(!debug_str.contains("super-secret"));
        assert!(debug_str.contains("REDACTED"));
    }

    #[test]
    fn test_basic_auth_encoding() {
        let credentials = Credentials::new("http://localhost/", "id", "secret");
        assert_eq!(credentials.basic_auth(), "Basic aWQ6c2VjcmV0");
        assert_eq!(credentials.base_url(), "http://localhost");
    }

    #[tokio::test]
    async fn test_needs_refresh_without_token() {
        let auth = AuthTokenManager::new("http://localhost", "id", "secret");
        assert!(auth.needs_refresh().await);
        assert!(auth.expires_at().await.is_none());
    }

    #[tokio::test]
    async fn test_refresh_sets_margin_adjusted_expiry() {
        let server = token_server(900).await;
        let auth = AuthTokenManager::new(server.uri(), "id", "secret");

        let before = Utc::now();
        auth.refresh().await.unwrap();
        let after = Utc::now();

        assert!(!auth.needs_refresh().await);
        let expires_at = auth.expires_at().await.unwrap();
        assert!(expires_at >= before + Duration::seconds(870));
        assert!(expires_at <= after + Duration::seconds(870));
    }

    #[tokio::test]
    async fn test_stale_after_expiry_passes() {
        let server = token_server(900).await;
        let auth = AuthTokenManager::new(server.uri(), "id", "secret");
        auth.refresh().await.unwrap();

        // Move the stored expiry into the past instead of waiting for it.
        if let Some(token) = auth.inner.token.write().await.as_mut() {
            token.expires_at = Utc::now() - Duration::seconds(1);
        }
        assert!(auth.needs_refresh().await);
    }

    #[tokio::test]
    async fn test_lifetime_within_margin_is_immediately_stale() {
        let server = token_server(30).await;
        let auth = AuthTokenManager::new(server.uri(), "id", "secret");
        auth.refresh().await.unwrap();
        assert!(auth.needs_refresh().await);
    }

    #[tokio::test]
    async fn test_exchange_request_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/token"))
            .and(header("authorization", "Basic aWQ6c2VjcmV0"))
            .and(header("wm_svc.name", "inventory-sync"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok",
                "expires_in": 900
            })))
            .expect(1)
            .mount(&server)
            .await;

        let auth = AuthTokenManager::new(server.uri(), "id", "secret")
            .with_service_name("inventory-sync")
            .unwrap();
        auth.refresh().await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let correlation = requests[0].headers.get("wm_qos.correlation_id").unwrap();
        assert!(Uuid::parse_str(correlation.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_inject_adds_required_headers() {
        let server = token_server(900).await;
        let auth = AuthTokenManager::new(server.uri(), "id", "secret");

        let first = auth.inject_auth_headers(request()).await.unwrap();
        let second = auth.inject_auth_headers(request()).await.unwrap();

        for req in [&first, &second] {
            assert_eq!(req.headers()["wm_sec.access_token"], "tok-1");
            assert_eq!(req.headers()["wm_svc.name"], DEFAULT_SERVICE_NAME);
        }
        assert_ne!(
            first.headers()["wm_qos.correlation_id"],
            second.headers()["wm_qos.correlation_id"]
        );
        // The token was fetched once and then reused.
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_refresh_is_single_flight() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "access_token": "tok", "expires_in": 900 }))
                    .set_delay(std::time::Duration::from_millis(100)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let auth = AuthTokenManager::new(server.uri(), "id", "secret");
        let calls = (0..8).map(|_| {
            let auth = auth.clone();
            tokio::spawn(async move { auth.inject_auth_headers(request()).await })
        });

        for handle in calls.collect::<Vec<_>>() {
            let req = handle.await.unwrap().unwrap();
            assert_eq!(req.headers()["wm_sec.access_token"], "tok");
        }
    }

    #[tokio::test]
    async fn test_exchange_failure_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/token"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
            .mount(&server)
            .await;

        let auth = AuthTokenManager::new(server.uri(), "id", "wrong");
        let err = auth.inject_auth_headers(request()).await.unwrap_err();
        assert!(err.is_auth_error());
        assert!(err.to_string().contains("invalid_client"));
        assert!(auth.needs_refresh().await);
    }

    #[tokio::test]
    async fn test_malformed_token_body_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "access_token": "tok" })),
            )
            .mount(&server)
            .await;

        let auth = AuthTokenManager::new(server.uri(), "id", "secret");
        let err = auth.refresh().await.unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
        assert!(auth.needs_refresh().await);
    }

    #[tokio::test]
    async fn test_out_of_range_lifetime_is_auth_error() {
        let server = token_server(10_000_000_000_000).await;
        let auth = AuthTokenManager::new(server.uri(), "id", "secret");

        let err = auth.refresh().await.unwrap_err();
        assert!(err.is_auth_error(), "expected auth error, got {:?}", err);
        assert!(err.to_string().contains("out of range"));
        assert!(auth.needs_refresh().await);

        let err = auth.inject_auth_headers(request()).await.unwrap_err();
        assert!(err.is_auth_error());
    }

    #[test]
    fn test_out_of_range_refresh_margin_rejected() {
        let auth = AuthTokenManager::new("http://localhost", "id", "secret");
        let err = auth.with_refresh_margin(i64::MAX).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let auth = AuthTokenManager::new("http://localhost", "id", "secret");
        assert!(auth.with_refresh_margin(60).is_ok());
    }

    #[tokio::test]
    async fn test_stale_token_replaced_on_next_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "access_token": "tok-1", "expires_in": 900 })),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v3/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "access_token": "tok-2", "expires_in": 900 })),
            )
            .mount(&server)
            .await;

        let auth = AuthTokenManager::new(server.uri(), "id", "secret");
        let first = auth.inject_auth_headers(request()).await.unwrap();
        assert_eq!(first.headers()["wm_sec.access_token"], "tok-1");

        if let Some(token) = auth.inner.token.write().await.as_mut() {
            token.expires_at = Utc::now() - Duration::seconds(1);
        }

        let second = auth.inject_auth_headers(request()).await.unwrap();
        assert_eq!(second.headers()["wm_sec.access_token"], "tok-2");
        assert!(!auth.needs_refresh().await);
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[test]
    fn test_configure_after_clone_fails() {
        let auth = AuthTokenManager::new("http://localhost", "id", "secret");
        let _shared = auth.clone();
        assert!(matches!(auth.with_refresh_margin(10), Err(Error::Config(_))));
    }
}
