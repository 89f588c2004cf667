//! Authenticated API client
//!
//! Attaches the stored bearer token to every call, performs a single
//! refresh-and-retry when the backend answers 401, parses bodies leniently
//! and reports every failure to the [`ErrorSink`] exactly once.

use std::sync::Arc;

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE,
};
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};
use sigma_core::CredentialStore;
use sigma_domain::ClientConfig;
use tracing::{debug, instrument, warn};

use super::auth::{AccessTokenProvider, StoredCredentials};
use super::download::{filename_from_disposition, Download};
use super::errors::{body_message, ApiError};
use super::sink::ErrorSink;
use crate::http::HttpClient;

const JSON_CONTENT_TYPE: &str = "application/json";
const OCTET_STREAM: &str = "application/octet-stream";

/// Method, headers and body of a single call
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    /// Sent after the defaults; a name given here replaces the default value
    pub headers: Vec<(String, String)>,
    /// Pre-serialized request body
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::with_method(Method::POST)
    }

    pub fn patch() -> Self {
        Self::with_method(Method::PATCH)
    }

    pub fn with_method(method: Method) -> Self {
        Self { method, ..Self::default() }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `payload` as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if `payload` cannot be serialized
    pub fn json<T: Serialize + ?Sized>(self, payload: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to serialize body: {e}")))?;
        Ok(self.body(body))
    }

    /// Last caller-supplied value for `name`, compared case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Authenticated client for the banking backend
pub struct ApiClient {
    http: HttpClient,
    tokens: Arc<dyn AccessTokenProvider>,
    sink: ErrorSink,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a new API client reading tokens from `credentials`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the HTTP client cannot be created
    pub fn new(
        config: ClientConfig,
        credentials: Arc<dyn CredentialStore>,
        sink: ErrorSink,
    ) -> Result<Self, ApiError> {
        let http = build_http_client(&config)?;
        let tokens = Arc::new(StoredCredentials::new(&config, credentials, http.clone()));
        Ok(Self { http, tokens, sink, config })
    }

    /// Create a client with a custom token provider
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the HTTP client cannot be created
    pub fn with_token_provider(
        config: ClientConfig,
        tokens: Arc<dyn AccessTokenProvider>,
        sink: ErrorSink,
    ) -> Result<Self, ApiError> {
        let http = build_http_client(&config)?;
        Ok(Self { http, tokens, sink, config })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub const fn sink(&self) -> &ErrorSink {
        &self.sink
    }

    /// Call `endpoint` and return the parsed JSON body.
    ///
    /// Empty or malformed bodies are returned as `{}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] when no response arrived and
    /// [`ApiError::Http`] for a non-2xx final response. Either is first
    /// delivered to the error sink.
    #[instrument(skip_all, fields(method = %options.method, endpoint = %endpoint))]
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        self.request_silent(endpoint, options).await.map_err(|err| self.sink.dispatch(err))
    }

    /// Same as [`request`](Self::request) without notifying the error sink.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request)
    pub async fn request_silent(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        let response = self.send_authorized(endpoint, &options, ResponseKind::Json).await?;
        json_result(response).await
    }

    /// Call `endpoint` without a bearer token and without the refresh cycle.
    ///
    /// Failures are returned but never reach the error sink.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request)
    #[instrument(skip_all, fields(method = %options.method, endpoint = %endpoint))]
    pub async fn request_anonymous(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        let url = self.config.endpoint_url(endpoint);
        let response = self.send(&url, &options, None, ResponseKind::Json).await?;
        json_result(response).await
    }

    /// Download a binary resource.
    ///
    /// The filename comes from `Content-Disposition`, else
    /// `fallback_filename`.
    ///
    /// # Errors
    ///
    /// As [`request`](Self::request); the message of an HTTP failure falls back
    /// to the raw response text.
    #[instrument(skip_all, fields(method = %options.method, endpoint = %endpoint))]
    pub async fn download(
        &self,
        endpoint: &str,
        options: RequestOptions,
        fallback_filename: &str,
    ) -> Result<Download, ApiError> {
        self.download_inner(endpoint, &options, fallback_filename)
            .await
            .map_err(|err| self.sink.dispatch(err))
    }

    async fn download_inner(
        &self,
        endpoint: &str,
        options: &RequestOptions,
        fallback_filename: &str,
    ) -> Result<Download, ApiError> {
        let response = self.send_authorized(endpoint, options, ResponseKind::Binary).await?;
        let status = response.status();

        if !status.is_success() {
            let text = read_text(response).await;
            let body = parse_body(&text);
            let message = body_message(&body)
                .map(str::to_string)
                .or_else(|| Some(text.trim().to_string()).filter(|t| !t.is_empty()))
                .unwrap_or_else(|| format!("Request failed ({})", status.as_u16()));
            return Err(ApiError::Http { status: status.as_u16(), message, body });
        }

        let headers = response.headers();
        let content_type = header_str(headers, &CONTENT_TYPE)
            .or_else(|| options.header_value("accept"))
            .unwrap_or(OCTET_STREAM)
            .to_string();
        let filename = header_str(headers, &CONTENT_DISPOSITION)
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| fallback_filename.to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::network(format!("Failed to read download: {e}")))?;

        debug!(size = bytes.len(), %filename, "Download complete");
        Ok(Download { bytes: bytes.to_vec(), filename, content_type })
    }

    /// Send once with the stored token; on 401 refresh and resend once.
    async fn send_authorized(
        &self,
        endpoint: &str,
        options: &RequestOptions,
        kind: ResponseKind,
    ) -> Result<Response, ApiError> {
        let url = self.config.endpoint_url(endpoint);
        let token = self.tokens.access_token().await;

        let response = self.send(&url, options, token.as_deref(), kind).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let Some(rejected) = token else {
            return Ok(response);
        };

        match self.tokens.refresh(&rejected).await {
            Ok(fresh) => {
                debug!("Retrying with refreshed access token");
                self.send(&url, options, Some(&fresh), kind).await
            }
            Err(err) => {
                warn!(error = %err, "Token refresh failed");
                Ok(response)
            }
        }
    }

    async fn send(
        &self,
        url: &str,
        options: &RequestOptions,
        token: Option<&str>,
        kind: ResponseKind,
    ) -> Result<Response, ApiError> {
        let headers = build_headers(options, token, kind)?;
        let mut request = self.http.request(options.method.clone(), url).headers(headers);
        if let Some(body) = &options.body {
            request = request.body(body.clone());
        }

        self.http.send(request).await.map_err(ApiError::from)
    }
}

fn build_http_client(config: &ClientConfig) -> Result<HttpClient, ApiError> {
    let mut builder = HttpClient::builder().timeout(config.timeout());
    if let Some(agent) = &config.user_agent {
        builder = builder.user_agent(agent.clone());
    }

    builder.build().map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))
}

/// What the caller reads back from a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseKind {
    Json,
    /// Bodiless binary calls carry no `Content-Type`
    Binary,
}

/// Defaults first, then caller headers replacing defaults of the same name.
fn build_headers(
    options: &RequestOptions,
    token: Option<&str>,
    kind: ResponseKind,
) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    if kind == ResponseKind::Json || options.body.is_some() {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    }

    if let Some(token) = token {
        let value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ApiError::InvalidRequest("Stored access token is not a valid header".into()))?;
        headers.insert(AUTHORIZATION, value);
    }

    for (name, value) in &options.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ApiError::InvalidRequest(format!("Invalid header name: {name}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| ApiError::InvalidRequest(format!("Invalid value for header {name}")))?;
        headers.insert(name, value);
    }

    Ok(headers)
}

async fn json_result(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    let body = parse_body(&read_text(response).await);

    if status.is_success() {
        debug!(status = status.as_u16(), "Request succeeded");
        Ok(body)
    } else {
        debug!(status = status.as_u16(), "Request failed");
        Err(ApiError::http(status.as_u16(), body))
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok()).filter(|value| !value.is_empty())
}

async fn read_text(response: Response) -> String {
    match response.text().await {
        Ok(text) => text,
        Err(err) => {
            debug!(error = %err, "Failed to read response body");
            String::new()
        }
    }
}

/// Parse a body as JSON; empty or malformed text becomes `{}`.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Object(Map::new());
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::Object(Map::new()))
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ClientConfig>,
    credentials: Option<Arc<dyn CredentialStore>>,
    sink: Option<ErrorSink>,
}

impl ApiClientBuilder {
    /// Set the client configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the credential store
    pub fn credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the error sink; a fresh sink is used otherwise
    pub fn sink(mut self, sink: ErrorSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if the credential store is missing or client creation
    /// fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let credentials = self
            .credentials
            .ok_or_else(|| ApiError::Config("Credential store not set".to_string()))?;

        ApiClient::new(config, credentials, self.sink.unwrap_or_default())
    }
}
