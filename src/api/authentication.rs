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


//! Authentication API
//!
//! # API Endpoints
//! - `POST /login` with `{"apikey", "userkey", "username"}` → `{"token": "..."}`
//! - `GET /refresh_token` → `{"token": "..."}`
//!
//! Tokens are valid for 24 hours. A token can be refreshed while it is still
//! valid; once it has expired the caller has to log in again.

use crate::api::client::{RequestOptions, TvdbClient};
use crate::error::{Result, TvdbError};
use crate::transport::Transport;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Credentials accepted by `/login`
///
/// `user_key` and `username` are only needed for user-scoped routes.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct LoginCredentials {
    #[serde(rename = "apikey")]
    pub api_key: String,

    #[serde(rename = "userkey", skip_serializing_if = "Option::is_none")]
    pub user_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl LoginCredentials {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_user<U: Into<String>, K: Into<String>>(mut self, username: U, user_key: K) -> Self {
        self.username = Some(username.into());
        self.user_key = Some(user_key.into());
        self
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("api_key", &"***")
            .field("user_key", &self.user_key.as_ref().map(|_| "***"))
            .field("username", &self.username)
            .finish()
    }
}

impl<T: Transport> TvdbClient<T> {
    /// Log in and store the returned token
    ///
    /// # Errors
    /// - `Unauthorized` when the service rejects the credentials
    /// - `Parse` when the response has no string `token`
    pub async fn login(&mut self, credentials: &LoginCredentials) -> Result<()> {
        let options = RequestOptions::new().json(credentials)?;
        let response = self
            .perform_api_call_with_json_response_options(Method::POST, "/login", options)
            .await?;

        let token = extract_token(response)?;
        self.set_token(token);
        info!("logged in");
        Ok(())
    }

    /// Exchange the current token for a fresh one
    ///
    /// # Errors
    /// `Unauthorized` when the current token is missing or already expired
    pub async fn refresh_token(&mut self) -> Result<()> {
        let response = self
            .perform_api_call_with_json_response(Method::GET, "/refresh_token")
            .await?;

        let token = extract_token(response)?;
        self.set_token(token);
        info!("token refreshed");
        Ok(())
    }
}

fn extract_token(response: Value) -> Result<String> {
    #[derive(Deserialize)]
    struct TokenResponse {
        token: String,
    }

    let parsed: TokenResponse = serde_json::from_value(response).map_err(TvdbError::from)?;
    Ok(parsed.token)
}
