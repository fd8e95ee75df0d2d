//! HTTP collaborator used to fetch i18n payloads.

mod http;

use std::future::Future;

pub use http::HttpTransport;
pub use reqwest::Url;
use thiserror::Error;

use crate::types::{
    Language,
    StoreIdentifier,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request could not be sent or the response body could not be read
    #[error("Request failed: {0}")]
    Request(String),
    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
    /// The API key cannot be sent as a header value
    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),
    #[error("Invalid base URL '{0}'")]
    InvalidUrl(String),
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    #[must_use]
    pub fn no_content() -> Self {
        Self::new(204, "")
    }
}

/// Performs GET requests.
///
/// Timeouts and any retry policy belong to the implementation; callers issue each request once.
pub trait Transport: Send + Sync {
    fn get(&self, url: &Url) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// URLs of the i18n endpoints under one base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Root every endpoint path is appended to
    base: Url,
}

impl Endpoints {
    /// # Errors
    /// Returns [`TransportError::InvalidUrl`] if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let base =
            Url::parse(base_url).map_err(|_| TransportError::InvalidUrl(base_url.to_string()))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(TransportError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { base })
    }

    /// `GET /i18n/{languageCode}`
    #[must_use]
    pub fn base_texts(&self, language: Language) -> Url {
        self.with_segments(&["i18n", language.code()])
    }

    /// `GET /store/{storeIdentifier}/i18n`
    #[must_use]
    pub fn store_texts(&self, store: &StoreIdentifier) -> Url {
        self.with_segments(&["store", store.as_str(), "i18n"])
    }

    /// Appends percent-encoded path segments to the base URL.
    fn with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
