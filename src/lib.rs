//! Client library for TheTVDB JSON API
//!
//! Authenticates with a bearer token, sends versioned, language-scoped
//! requests and unwraps the `data` / `errors` / `links` response envelope.

pub mod api;
pub mod error;
pub mod transport;

pub use api::{ClientConfig, JsonEnvelope, LoginCredentials, RequestOptions, TvdbClient};
pub use error::{Result, TvdbError};
pub use reqwest::Method;
pub use transport::{ApiRequest, RawResponse, ReqwestTransport, Transport, TransportError};
