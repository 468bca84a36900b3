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


//! JSON response envelope decoding
//!
//! Every JSON response is an object that may carry three well-known keys
//! next to arbitrary others:
//!
//! ```json
//! {
//!   "data":   { ... },                         // primary payload
//!   "errors": { "invalidLanguage": "..." },    // partial-error metadata
//!   "links":  { "first": 1, "last": 4, "next": 2, "prev": null }
//! }
//! ```
//!
//! Shapes vary per route, so the body is kept as a [`serde_json::Value`] and
//! only these three keys are extracted.

use crate::error::Result;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Key holding the primary payload
pub const DATA_KEY: &str = "data";

/// Key holding partial-error metadata
pub const ERRORS_KEY: &str = "errors";

/// Key holding pagination links
pub const LINKS_KEY: &str = "links";

/// Partial-error messages keyed by error name
pub type JsonErrors = HashMap<String, String>;

/// Pagination links keyed by relation (first, last, next, previous)
pub type JsonLinks = HashMap<String, i64>;

/// Decoded response envelope
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonEnvelope {
    /// Value under `data` when present, else the whole decoded object
    pub payload: Value,
    pub errors: JsonErrors,
    pub links: JsonLinks,
}

impl JsonEnvelope {
    /// Decode a response body
    ///
    /// # Errors
    /// Returns `Parse` when the body is not JSON or is JSON but not an object
    pub fn decode(body: &[u8]) -> Result<Self> {
        let object: Map<String, Value> = serde_json::from_slice(body)?;
        Ok(Self::from_object(object))
    }

    /// Build an envelope from an already decoded object
    ///
    /// `errors` and `links` are extracted whether or not `data` is present.
    /// They stay in the payload when there is no `data` key.
    pub fn from_object(mut object: Map<String, Value>) -> Self {
        let errors = object
            .get(ERRORS_KEY)
            .and_then(Value::as_object)
            .map(extract_errors)
            .unwrap_or_default();

        let links = object
            .get(LINKS_KEY)
            .and_then(Value::as_object)
            .map(extract_links)
            .unwrap_or_default();

        let payload = match object.remove(DATA_KEY) {
            Some(data) => data,
            None => Value::Object(object),
        };

        Self {
            payload,
            errors,
            links,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Page number for a link relation such as "next" or "last"
    pub fn link(&self, relation: &str) -> Option<i64> {
        self.links.get(relation).copied()
    }
}

fn extract_errors(errors: &Map<String, Value>) -> JsonErrors {
    errors
        .iter()
        .map(|(key, value)| {
            let message = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), message)
        })
        .collect()
}

// The service sends null for missing previous/next pages; those are skipped
fn extract_links(links: &Map<String, Value>) -> JsonLinks {
    links
        .iter()
        .filter_map(|(key, value)| value.as_i64().map(|page| (key.clone(), page)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TvdbError;
    use serde_json::json;

    #[test]
    fn test_data_key_is_unwrapped() {
        let envelope = JsonEnvelope::decode(br#"{"foo":"bar","data":{"barfoo":"foobar"}}"#).unwrap();
        assert_eq!(envelope.payload, json!({"barfoo": "foobar"}));
        assert!(envelope.errors.is_empty());
        assert!(envelope.links.is_empty());
    }

    #[test]
    fn test_without_data_returns_whole_object() {
        let envelope = JsonEnvelope::decode(br#"{"foo":"bar","baz":"foobar"}"#).unwrap();
        assert_eq!(envelope.payload, json!({"foo": "bar", "baz": "foobar"}));
        assert!(envelope.errors.is_empty());
        assert!(envelope.links.is_empty());
    }

    #[test]
    fn test_errors_extracted_and_kept_in_payload() {
        let body = br#"{"foo":"bar","errors":{"invalidLanguage":"not found","invalidQueryParams":"invalid param a","invalidFilters":"invalid filter b"}}"#;
        let envelope = JsonEnvelope::decode(body).unwrap();

        assert_eq!(envelope.errors.len(), 3);
        assert_eq!(envelope.errors["invalidLanguage"], "not found");
        assert_eq!(envelope.errors["invalidQueryParams"], "invalid param a");
        assert_eq!(envelope.errors["invalidFilters"], "invalid filter b");
        assert!(envelope.has_errors());
        assert_eq!(envelope.payload["errors"]["invalidFilters"], "invalid filter b");
    }

    #[test]
    fn test_links_extracted_alongside_data() {
        let body = br#"{"data":[1,2],"links":{"previous":null,"next":2,"first":1,"last":3}}"#;
        let envelope = JsonEnvelope::decode(body).unwrap();

        assert_eq!(envelope.payload, json!([1, 2]));
        assert_eq!(envelope.links.len(), 3);
        assert_eq!(envelope.link("next"), Some(2));
        assert_eq!(envelope.link("previous"), None);
    }

    #[test]
    fn test_non_object_errors_reset() {
        let envelope = JsonEnvelope::decode(br#"{"errors":"oops","links":[1,2]}"#).unwrap();
        assert!(envelope.errors.is_empty());
        assert!(envelope.links.is_empty());
    }

    #[test]
    fn test_non_string_error_values_rendered() {
        let envelope = JsonEnvelope::decode(br#"{"errors":{"code":42}}"#).unwrap();
        assert_eq!(envelope.errors["code"], "42");
    }

    #[test]
    fn test_malformed_bodies_fail() {
        for body in [&b"ABC"[..], b"{'a:'hello'}", b"", b"\"ABC\"", b"[1,2,3]", b"42"] {
            let result = JsonEnvelope::decode(body);
            assert!(
                matches!(result, Err(TvdbError::Parse { .. })),
                "{}",
                String::from_utf8_lossy(body)
            );
        }
    }
}
