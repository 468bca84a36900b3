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


//! Request header construction
//!
//! Pure function of [`Credentials`]: no I/O, no mutation.

use crate::api::credentials::Credentials;
use crate::error::{Result, TvdbError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE};

/// Media type prefix for versioned requests; the version is appended
pub const VERSIONED_MEDIA_TYPE: &str = "application/vnd.thetvdb.v";

/// Build the header set for one request
///
/// - `Content-Type: application/json`
/// - `Accept: application/vnd.thetvdb.v{version}`
/// - `Accept-Language: {languages, most preferred first}`
/// - `Authorization: Bearer {token}` once a token is set
///
/// # Errors
/// Returns `InvalidArgument` if a configured value cannot be sent as a header
pub fn build_request_headers(credentials: &Credentials) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        ACCEPT,
        header_value(
            &format!("{}{}", VERSIONED_MEDIA_TYPE, credentials.version()),
            "version",
        )?,
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        header_value(&accept_language(credentials), "accepted languages")?,
    );

    if let Some(token) = credentials.token() {
        // Never echo the token back in the error message
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| TvdbError::invalid_argument("token contains characters not allowed in a header"))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

/// Accept-Language value: the configured languages in preference order
pub fn accept_language(credentials: &Credentials) -> String {
    credentials.accepted_languages().join(", ")
}

fn header_value(value: &str, what: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| TvdbError::invalid_argument(format!("Invalid {} header '{}': {}", what, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_without_token() {
        let creds = Credentials::default();
        let headers = build_request_headers(&creds).unwrap();

        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/vnd.thetvdb.v2.1.1");
        assert_eq!(headers.get(ACCEPT_LANGUAGE).unwrap(), "en");
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_headers_follow_credentials() {
        let mut creds = Credentials::default();
        creds.set_token("abc.def.ghi");
        creds.set_version("3.0.0").unwrap();
        creds.set_accepted_languages(["nl", "en"]).unwrap();

        let headers = build_request_headers(&creds).unwrap();

        let auth = headers.get(AUTHORIZATION).unwrap();
        assert_eq!(auth, "Bearer abc.def.ghi");
        assert!(auth.is_sensitive());
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/vnd.thetvdb.v3.0.0");
        assert_eq!(headers.get(ACCEPT_LANGUAGE).unwrap(), "nl, en");
    }

    #[test]
    fn test_unsendable_token() {
        let mut creds = Credentials::default();
        creds.set_token("line\nbreak");

        let err = build_request_headers(&creds).unwrap_err();
        assert!(matches!(err, TvdbError::InvalidArgument(_)));
        assert!(!err.to_string().contains("line"));
    }
}
