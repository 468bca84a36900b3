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


//! TheTVDB API client implementation
//!
//! The request/response pipeline lives in [`client`], built from
//! [`credentials`], [`headers`] and [`envelope`]. Route modules add typed
//! calls on top of it.

pub mod authentication;
pub mod client;
pub mod credentials;
pub mod envelope;
pub mod headers;
pub mod languages;

// Re-export commonly used types
pub use authentication::LoginCredentials;
pub use client::{ClientConfig, RequestOptions, TvdbClient};
pub use credentials::{AccessToken, Credentials};
pub use envelope::{JsonEnvelope, JsonErrors, JsonLinks};
pub use languages::Language;
