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


//! Credential state: bearer token, API version and accepted languages
//!
//! Values only change through the explicit setters below. The version is
//! validated when it is set, so an invalid value is never stored.

use crate::error::{Result, TvdbError};
use chrono::{DateTime, Duration, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// API version used when none is configured
pub const DEFAULT_VERSION: &str = "2.1.1";

/// Language sent when none is configured
pub const DEFAULT_LANGUAGE: &str = "en";

/// Lifetime of a token issued by /login or /refresh_token
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

lazy_static! {
    static ref VERSION_PATTERN: Regex = Regex::new(r"^\d+\.\d+\.\d+$").unwrap();
}

/// Bearer token with the time it was stored
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub token: String,
    pub obtained_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(token: String) -> Self {
        Self {
            token,
            obtained_at: Utc::now(),
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.obtained_at + Duration::hours(TOKEN_LIFETIME_HOURS)
    }

    /// Check if the token is expired (with 5 minute buffer)
    pub fn is_expired(&self) -> bool {
        Utc::now() + Duration::minutes(5) >= self.expires_at()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"***")
            .field("obtained_at", &self.obtained_at)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    token: Option<AccessToken>,
    version: String,
    languages: Vec<String>,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            token: None,
            version: DEFAULT_VERSION.to_string(),
            languages: vec![DEFAULT_LANGUAGE.to_string()],
        }
    }
}

impl Credentials {
    /// Store the token verbatim; no format validation
    pub fn set_token<S: Into<String>>(&mut self, token: S) {
        self.token = Some(AccessToken::new(token.into()));
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.token.as_str())
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    /// Replace the API version
    ///
    /// # Errors
    /// Returns `InvalidArgument` when `version` is not a numeric `x.y.z`
    /// triplet; the stored version is left untouched.
    pub fn set_version<S: AsRef<str>>(&mut self, version: S) -> Result<()> {
        let version = version.as_ref();
        if !VERSION_PATTERN.is_match(version) {
            return Err(TvdbError::invalid_argument(format!(
                "version does not match pattern x.y.z (where x, y and z are numeric): '{}'",
                version
            )));
        }
        self.version = version.to_string();
        Ok(())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Replace the accepted languages, most preferred first
    ///
    /// # Errors
    /// Returns `InvalidArgument` for an empty list; there must always be a
    /// primary language.
    pub fn set_accepted_languages<I, S>(&mut self, languages: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let languages: Vec<String> = languages.into_iter().map(Into::into).collect();
        if languages.is_empty() {
            return Err(TvdbError::invalid_argument(
                "accepted languages must contain at least one language",
            ));
        }
        self.languages = languages;
        Ok(())
    }

    pub fn accepted_languages(&self) -> &[String] {
        &self.languages
    }
}
