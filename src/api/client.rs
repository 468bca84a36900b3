// TVDB Client - Rust client for TheTVDB JSON API
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! HTTP client for TheTVDB API
//!
//! This module provides the request/response pipeline every route goes through:
//! - Header construction from the credential state (token, version, languages)
//! - One request per call, no retries
//! - Status classification (401 → `Unauthorized`, 404 → `ResourceNotFound`)
//! - JSON envelope unwrapping with `errors`/`links` side channel
//!
//! # Architecture
//!
//! ## Client Structure
//! `TvdbClient` is generic over a [`Transport`]; the default is
//! [`ReqwestTransport`]. It owns:
//! - Credential state, changed only through `&mut self` setters
//! - The errors/links of the most recent JSON call, behind a mutex so that
//!   requests can be issued through `&self`
//!
//! ## Status classification
//! - 2xx: raw response returned unchanged
//! - 401: `TvdbError::Unauthorized`, no re-authentication attempt
//! - 404: `TvdbError::ResourceNotFound`
//! - anything else: `TransportError::Status` carrying the status and body
//! - failure before a status is known: the transport error, unchanged

use crate::api::credentials::{AccessToken, Credentials, DEFAULT_LANGUAGE, DEFAULT_VERSION};
use crate::api::envelope::{JsonEnvelope, JsonErrors, JsonLinks};
use crate::api::headers::build_request_headers;
use crate::error::{Result, TvdbError};
use crate::transport::{ApiRequest, RawResponse, ReqwestTransport, Transport, TransportError};
use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, instrument, Span};

/// Production API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.thetvdb.com";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for TvdbClient
/// Provides a builder pattern for client customization
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub version: String,
    pub languages: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("tvdb-client/{}", env!("CARGO_PKG_VERSION")),
            version: DEFAULT_VERSION.to_string(),
            languages: vec![DEFAULT_LANGUAGE.to_string()],
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn version<S: Into<String>>(mut self, version: S) -> Self {
        self.config.version = version.into();
        self
    }

    pub fn languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Query parameters and JSON body for one call
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub json: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Serialize `body` as the JSON request body
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `body` cannot be represented as JSON
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| TvdbError::invalid_argument(format!("Invalid request body: {}", e)))?;
        self.json = Some(value);
        Ok(self)
    }
}

/// Errors and links of the most recent JSON call
#[derive(Debug, Clone, Default)]
struct LastEnvelope {
    errors: JsonErrors,
    links: JsonLinks,
}

/// Main HTTP client for TheTVDB API
///
/// # Example
/// ```rust,no_run
/// use tvdb_client::api::client::TvdbClient;
/// use reqwest::Method;
///
/// # async fn example() -> tvdb_client::error::Result<()> {
/// let mut client = TvdbClient::with_defaults()?;
/// client.set_token("eyJhbGciOi...");
/// client.set_accepted_languages(["nl", "en"])?;
///
/// let series = client
///     .perform_api_call_with_json_response(Method::GET, "/series/80379")
///     .await?;
/// println!("{}", series["seriesName"]);
///
/// if let Some(next) = client.last_links().get("next") {
///     println!("next page: {}", next);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TvdbClient<T: Transport = ReqwestTransport> {
    transport: T,
    credentials: Credentials,
    last: Mutex<LastEnvelope>,
}

impl TvdbClient<ReqwestTransport> {
    /// Create a client for the production API with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Create a client from configuration
    ///
    /// # Errors
    /// Returns error if:
    /// - The configured version is not an `x.y.z` triplet
    /// - The language list is empty
    /// - The base URL does not parse or the HTTP client cannot be built
    pub fn new(config: ClientConfig) -> Result<Self> {
        let credentials = credentials_from_config(&config)?;
        let transport = ReqwestTransport::new(&config.base_url, config.timeout, &config.user_agent)?;
        Ok(Self::from_parts(transport, credentials))
    }
}

impl<T: Transport> TvdbClient<T> {
    /// Create a client around a custom transport with default credentials
    pub fn with_transport(transport: T) -> Self {
        Self::from_parts(transport, Credentials::default())
    }

    fn from_parts(transport: T, credentials: Credentials) -> Self {
        Self {
            transport,
            credentials,
            last: Mutex::new(LastEnvelope::default()),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    // ===== Credential state =====

    /// Store the bearer token used by subsequent requests
    pub fn set_token<S: Into<String>>(&mut self, token: S) {
        self.credentials.set_token(token);
    }

    pub fn clear_token(&mut self) {
        self.credentials.clear_token();
    }

    pub fn token(&self) -> Option<&str> {
        self.credentials.token()
    }

    pub fn token_expires_at(&self) -> Option<DateTime<Utc>> {
        self.credentials.access_token().map(AccessToken::expires_at)
    }

    /// True when no token is set or the stored one is about to expire
    pub fn token_needs_refresh(&self) -> bool {
        self.credentials
            .access_token()
            .map_or(true, AccessToken::is_expired)
    }

    /// Set the API version sent with every request
    ///
    /// # Errors
    /// Returns `InvalidArgument` unless `version` matches `x.y.z` (all numeric);
    /// the previous version is kept.
    pub fn set_version<S: AsRef<str>>(&mut self, version: S) -> Result<()> {
        self.credentials.set_version(version)
    }

    pub fn version(&self) -> &str {
        self.credentials.version()
    }

    /// Replace the accepted languages, most preferred first
    pub fn set_accepted_languages<I, S>(&mut self, languages: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.credentials.set_accepted_languages(languages)
    }

    pub fn accepted_languages(&self) -> &[String] {
        self.credentials.accepted_languages()
    }

    // ===== Side channel =====

    /// `errors` object of the most recent JSON call (empty if it had none)
    pub fn last_json_errors(&self) -> JsonErrors {
        self.lock_last().errors.clone()
    }

    /// `links` object of the most recent JSON call (empty if it had none)
    pub fn last_links(&self) -> JsonLinks {
        self.lock_last().links.clone()
    }

    fn lock_last(&self) -> std::sync::MutexGuard<'_, LastEnvelope> {
        self.last.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ===== Request execution =====

    /// Perform one request and return the raw response
    ///
    /// # Errors
    /// - `Unauthorized` on HTTP 401
    /// - `ResourceNotFound` on HTTP 404
    /// - `Transport` for any other non-2xx status or a network failure
    pub async fn perform_api_call(&self, method: Method, path: &str) -> Result<RawResponse> {
        self.perform_api_call_with_options(method, path, RequestOptions::default())
            .await
    }

    /// Perform one request with query parameters and/or a JSON body
    #[instrument(
        name = "tvdb_request",
        skip_all,
        fields(
            http.method = %method,
            http.path = %path,
            http.status_code = tracing::field::Empty,
        )
    )]
    pub async fn perform_api_call_with_options(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<RawResponse> {
        let headers = build_request_headers(&self.credentials)?;

        let mut request = ApiRequest::new(method, path, headers);
        request.query = options.query;
        request.body = options.json;

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, "request failed before a response was received");
                return Err(e.into());
            }
        };

        Span::current().record("http.status_code", response.status);
        classify_response(path, response)
    }

    /// Perform one request and return only the response headers
    ///
    /// Same error policy as [`perform_api_call`](Self::perform_api_call).
    pub async fn request_headers(&self, method: Method, path: &str) -> Result<HeaderMap> {
        let response = self.perform_api_call(method, path).await?;
        Ok(response.headers)
    }

    /// Perform one request and decode the JSON envelope
    ///
    /// Returns the value under `data` when present, else the whole object.
    /// The `errors` and `links` of the envelope replace those returned by
    /// [`last_json_errors`](Self::last_json_errors) and
    /// [`last_links`](Self::last_links).
    ///
    /// # Errors
    /// Any error of [`perform_api_call`](Self::perform_api_call), or `Parse`
    /// when the body is not a JSON object. The side channel is left untouched
    /// on failure.
    pub async fn perform_api_call_with_json_response(
        &self,
        method: Method,
        path: &str,
    ) -> Result<Value> {
        self.perform_api_call_with_json_response_options(method, path, RequestOptions::default())
            .await
    }

    pub async fn perform_api_call_with_json_response_options(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value> {
        let envelope = self.fetch_envelope_with_options(method, path, options).await?;
        Ok(envelope.payload)
    }

    /// Perform one request and return the full decoded envelope
    pub async fn fetch_envelope(&self, method: Method, path: &str) -> Result<JsonEnvelope> {
        self.fetch_envelope_with_options(method, path, RequestOptions::default())
            .await
    }

    pub async fn fetch_envelope_with_options(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<JsonEnvelope> {
        let response = self.perform_api_call_with_options(method, path, options).await?;

        let envelope = JsonEnvelope::decode(&response.body).map_err(|e| {
            debug!(path, error = %e, "response body is not a JSON envelope");
            e
        })?;

        if envelope.has_errors() {
            debug!(path, count = envelope.errors.len(), "response carries partial errors");
        }

        {
            let mut last = self.lock_last();
            last.errors = envelope.errors.clone();
            last.links = envelope.links.clone();
        }

        Ok(envelope)
    }
}

fn credentials_from_config(config: &ClientConfig) -> Result<Credentials> {
    let mut credentials = Credentials::default();
    credentials.set_version(&config.version)?;
    credentials.set_accepted_languages(config.languages.iter().cloned())?;
    Ok(credentials)
}

/// Map a raw response onto the client's error taxonomy
fn classify_response(path: &str, response: RawResponse) -> Result<RawResponse> {
    if response.is_success() {
        return Ok(response);
    }

    match response.status {
        401 => {
            debug!(path, "request was not authorized");
            Err(TvdbError::unauthorized(path))
        }
        404 => {
            debug!(path, "resource not found");
            Err(TvdbError::not_found(path))
        }
        status => {
            debug!(path, status, "unexpected response status");
            Err(TransportError::Status {
                status,
                body: response.text(),
            }
            .into())
        }
    }
}

// ===== TESTS =====
