//! Per-fetch outcome, tagged before the two fetches are joined.

use thiserror::Error;

use crate::input::{
    PayloadError,
    TextBundle,
};
use crate::transport::{
    HttpResponse,
    TransportError,
};

/// Why a single i18n fetch did not produce a bundle.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Unexpected HTTP status {0}")]
    Status(u16),
    #[error("Response body is empty")]
    EmptyBody,
    #[error("Invalid payload: {0}")]
    Payload(#[from] PayloadError),
}

impl FetchError {
    /// `true` when the backend answered that the resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status(404))
    }
}

/// Result of one fetch.
///
/// `Empty` and `Failed` are kept apart so the join point can apply a different
/// policy to each source.
#[derive(Debug)]
pub enum FetchOutcome {
    /// 200 with a decodable JSON object (possibly `{}`)
    Loaded(TextBundle),
    /// 204, or 200 with a blank body
    Empty,
    Failed(FetchError),
}

impl FetchOutcome {
    /// Classifies a transport result and decodes the body.
    #[must_use]
    pub fn from_response(
        result: Result<HttpResponse, TransportError>,
        key_path: Option<&str>,
    ) -> Self {
        let response = match result {
            Ok(response) => response,
            Err(e) => return Self::Failed(e.into()),
        };

        match response.status {
            204 => Self::Empty,
            200 if response.body.trim().is_empty() => Self::Empty,
            200 => match TextBundle::from_payload(&response.body, key_path) {
                Ok(bundle) => Self::Loaded(bundle),
                Err(e) => Self::Failed(e.into()),
            },
            status => Self::Failed(FetchError::Status(status)),
        }
    }
}
