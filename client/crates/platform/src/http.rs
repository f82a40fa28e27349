//! Backend API Client
//!
//! Issues JSON requests against the configured base URL. Authenticated calls
//! read the bearer token from the credential store immediately before every
//! request, so a token replaced by another screen is picked up at once.
//! There is no retry; every request can be cancelled by its caller.

use std::future::Future;
use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::config::BackendConfig;
use crate::error::{ApiError, ApiResult};
use crate::storage::{KeyValueStore, keys};

pub use reqwest::Method;

/// Correlation header attached to every request
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Successful response: status plus buffered body
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Lossy UTF-8 view of the body
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP client bound to one backend and one credential store
pub struct ApiClient<S>
where
    S: KeyValueStore,
{
    http: Client,
    config: Arc<BackendConfig>,
    store: Arc<S>,
}

impl<S> Clone for ApiClient<S>
where
    S: KeyValueStore,
{
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            config: self.config.clone(),
            store: self.store.clone(),
        }
    }
}

impl<S> ApiClient<S>
where
    S: KeyValueStore + Sync,
{
    pub fn new(config: Arc<BackendConfig>, store: Arc<S>) -> ApiResult<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Setup(e.to_string()))?;

        Ok(Self {
            http,
            config,
            store,
        })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    // ========================================================================
    // Authenticated JSON calls
    // ========================================================================

    /// GET with bearer auth, decoding the JSON body
    pub async fn get_json<T>(&self, path: &str, cancel: &CancellationToken) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let request = self.authorized(Method::GET, path).await?;
        self.execute(request, cancel).await?.json()
    }

    /// POST a JSON body with bearer auth, decoding the JSON reply
    pub async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        cancel: &CancellationToken,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorized(Method::POST, path).await?.json(body);
        self.execute(request, cancel).await?.json()
    }

    /// Like [`post_json`](Self::post_json) but ignores the reply body
    pub async fn post_unit<B>(
        &self,
        path: &str,
        body: &B,
        cancel: &CancellationToken,
    ) -> ApiResult<()>
    where
        B: Serialize + ?Sized,
    {
        let request = self.authorized(Method::POST, path).await?.json(body);
        self.execute(request, cancel).await?;
        Ok(())
    }

    /// Authenticated request with an optional JSON body; the reply is not decoded
    pub async fn send_json<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        cancel: &CancellationToken,
    ) -> ApiResult<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.authorized(method, path).await?;
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request, cancel).await
    }

    // ========================================================================
    // Public calls (login / registration)
    // ========================================================================

    /// POST a JSON body without credentials, returning the raw response
    pub async fn post_public<B>(
        &self,
        path: &str,
        body: &B,
        cancel: &CancellationToken,
    ) -> ApiResult<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        let request = self
            .http
            .request(Method::POST, self.url(path))
            .header(CONTENT_TYPE, "application/json")
            .json(body);
        self.execute(request, cancel).await
    }

    // ========================================================================
    // Absolute-URL uploads
    // ========================================================================

    /// PUT raw bytes to an absolute URL (pre-signed, no bearer token)
    pub async fn put_bytes(
        &self,
        url: &str,
        headers: HeaderMap,
        bytes: Vec<u8>,
        cancel: &CancellationToken,
    ) -> ApiResult<RawResponse> {
        let request = self.http.put(url).headers(headers).body(bytes);
        self.execute(request, cancel).await
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Read the bearer token fresh from the store
    async fn bearer(&self) -> ApiResult<String> {
        match self.store.get(keys::TOKEN).await {
            Some(token) if !token.is_empty() => Ok(format!("Bearer {}", token)),
            _ => Err(ApiError::MissingToken),
        }
    }

    async fn authorized(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let bearer = self.bearer().await?;
        Ok(self
            .http
            .request(method, self.url(path))
            .header(AUTHORIZATION, bearer))
    }

    /// Send, require a 2xx status and buffer the body
    async fn execute(
        &self,
        request: RequestBuilder,
        cancel: &CancellationToken,
    ) -> ApiResult<RawResponse> {
        let request_id = Uuid::new_v4();
        let request = request.header(
            HeaderName::from_static(REQUEST_ID_HEADER),
            HeaderValue::from_str(&request_id.to_string())
                .map_err(|e| ApiError::Setup(e.to_string()))?,
        );

        tracing::debug!(request_id = %request_id, "Sending backend request");

        let response: Response = cancellable(cancel, request.send()).await??;
        let status = response.status();
        let body = cancellable(cancel, response.bytes()).await??;

        if !status.is_success() {
            tracing::debug!(
                request_id = %request_id,
                status = status.as_u16(),
                "Backend rejected request"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        tracing::debug!(
            request_id = %request_id,
            status = status.as_u16(),
            "Backend request completed"
        );

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

/// Race a request future against its cancellation token
pub async fn cancellable<F, T, E>(cancel: &CancellationToken, fut: F) -> ApiResult<Result<T, E>>
where
    F: Future<Output = Result<T, E>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ApiError::Cancelled),
        out = fut => Ok(out),
    }
}
