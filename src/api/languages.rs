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


//! Languages API
//!
//! # API Endpoints
//! - `GET /languages` - all languages the service has translations for
//! - `GET /languages/{id}` - a single language

use crate::api::client::TvdbClient;
use crate::error::Result;
use crate::transport::Transport;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Language record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: u32,

    /// ISO 639-1 code, usable with `set_accepted_languages`
    pub abbreviation: String,

    pub name: String,

    #[serde(default)]
    pub english_name: Option<String>,
}

impl<T: Transport> TvdbClient<T> {
    /// List all available languages
    pub async fn languages(&self) -> Result<Vec<Language>> {
        let data = self
            .perform_api_call_with_json_response(Method::GET, "/languages")
            .await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Get a single language by id
    ///
    /// # Errors
    /// `ResourceNotFound` for an unknown id
    pub async fn language(&self, id: u32) -> Result<Language> {
        let data = self
            .perform_api_call_with_json_response(Method::GET, &format!("/languages/{}", id))
            .await?;
        Ok(serde_json::from_value(data)?)
    }
}
