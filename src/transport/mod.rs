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


//! HTTP transport boundary
//!
//! The transport is the only I/O boundary of the client. It sends exactly one
//! request and hands back the raw status, headers and body. It never
//! interprets status codes: that is the job of [`crate::api::client`].
//!
//! Production code uses [`ReqwestTransport`]. Tests substitute a double that
//! replays canned responses.

mod reqwest;

pub use self::reqwest::ReqwestTransport;

use ::reqwest::header::HeaderMap;
use ::reqwest::Method;
use serde_json::Value;
use std::future::Future;
use thiserror::Error;

/// One outgoing request, built per call and never persisted
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the transport's base URI (e.g. "/series/80379")
    pub path: String,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    /// Optional JSON request body
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new<S: Into<String>>(method: Method, path: S, headers: HeaderMap) -> Self {
        Self {
            method,
            path: path.into(),
            headers,
            query: Vec::new(),
            body: None,
        }
    }
}

/// Raw result of an HTTP exchange
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// True for 2xx status codes
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures raised below the classification layer
#[derive(Error, Debug)]
pub enum TransportError {
    /// Network-level failure from reqwest (connect, timeout, body read)
    #[error("HTTP client error: {0}")]
    Request(#[from] ::reqwest::Error),

    /// The service answered with a status the client does not classify
    #[error("Server responded with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The request path could not be joined onto the base URI
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// Connection failure reported by a transport that does not use reqwest
    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Sends one HTTP request and returns its raw result
///
/// Implementations must not retry and must return every HTTP status as a
/// [`RawResponse`]; only failures that happen before a status is obtained
/// are reported as [`TransportError`].
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}
