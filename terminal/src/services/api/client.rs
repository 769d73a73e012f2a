//! # API Client
//!
//! Main HTTP client for trading API communication. Every endpoint wrapper goes
//! through [`ApiClient::request`], which owns header defaults, bearer token
//! attachment and error normalization.

use super::error::RequestError;
use crate::core::config::ClientConfig;
use crate::core::service::ApiService;
use crate::session::SessionStore;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{AuthResponse, ProfileUpdate, UserProfile};
use std::borrow::Cow;

/// Per-call request options.
///
/// Headers given here are merged over the defaults; on a name clash the caller wins.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<serde_json::Value>,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    pub fn post<B: Serialize + ?Sized>(body: &B) -> Result<Self, RequestError> {
        Self::with_body(Method::POST, body)
    }

    pub fn put<B: Serialize + ?Sized>(body: &B) -> Result<Self, RequestError> {
        Self::with_body(Method::PUT, body)
    }

    fn with_body<B: Serialize + ?Sized>(method: Method, body: &B) -> Result<Self, RequestError> {
        let body = serde_json::to_value(body)
            .map_err(|e| RequestError::InvalidRequest(format!("Unserializable body: {}", e)))?;
        Ok(Self {
            method,
            body: Some(body),
            ..Self::default()
        })
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Percent-encode one path segment (symbol, search text) for use in an endpoint.
pub(crate) fn segment(raw: &str) -> Cow<'_, str> {
    urlencoding::encode(raw)
}

/// HTTP client for the trading API.
///
/// Reads the bearer token from the [`SessionStore`] on every call and never writes it.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Create a client for `config.api_base_url` with `config.request_timeout`.
    pub fn new(config: &ClientConfig, session: SessionStore) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                Client::new()
            });

        Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Get the base URL for API requests.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// `Content-Type: application/json`, plus `Authorization: Bearer <token>` only
    /// when a non-empty token is stored.
    fn default_headers(&self) -> Result<HeaderMap, RequestError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| RequestError::InvalidRequest(format!("Stored token is not a valid header value: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    /// Issue `options.method` against `base_url + endpoint` and decode the JSON body.
    #[tracing::instrument(skip(self, options), fields(method = %options.method))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, RequestError> {
        let start = std::time::Instant::now();
        let url = format!("{}{}", self.base_url, endpoint);

        let mut headers = self.default_headers()?;
        headers.extend(options.headers);

        let mut builder = self.client.request(options.method, &url).headers(headers);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(body) = options.body {
            builder = builder.json(&body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(error = %e, "API request network error");
            RequestError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, status = status.as_u16(), "API response body read error");
            RequestError::Transport(e.to_string())
        })?;
        let duration = start.elapsed();

        if !status.is_success() {
            let err = RequestError::from_response(status, &String::from_utf8_lossy(&body));
            tracing::warn!(
                status = status.as_u16(),
                error = %err,
                duration_ms = duration.as_millis(),
                "API request failed"
            );
            return Err(err);
        }

        // Empty success bodies (204 on DELETE) decode as `null`
        let json: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &body
        };
        let parsed = serde_json::from_slice::<T>(json).map_err(|e| {
            tracing::error!(error = %e, status = status.as_u16(), "API response parse error");
            RequestError::Decode(e.to_string())
        })?;

        tracing::debug!(
            status = status.as_u16(),
            duration_ms = duration.as_millis(),
            "API request succeeded"
        );
        Ok(parsed)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl ApiService for ApiClient {
    async fn login(&self, email: String, password: String) -> Result<AuthResponse, RequestError> {
        crate::services::api::auth::login(self, email, password).await
    }

    async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<AuthResponse, RequestError> {
        crate::services::api::auth::register(self, name, email, password).await
    }

    async fn get_profile(&self) -> Result<UserProfile, RequestError> {
        crate::services::api::auth::get_profile(self).await
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<UserProfile, RequestError> {
        crate::services::api::auth::update_profile(self, update).await
    }
}
