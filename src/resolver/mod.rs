//! Localization resolution
//!
//! ベース翻訳とストア別の上書きを並行して取得し、結合して UI 用のテキストを作る。

mod merge;
mod outcome;
mod pending;
mod session;

use std::sync::Arc;

use tracing::Instrument;

pub use merge::{
    ResolveError,
    ResolvedTextBundle,
    merge,
};
pub use outcome::{
    FetchError,
    FetchOutcome,
};
pub use pending::PendingResolution;
pub use session::LocalizationSession;

use crate::config::{
    ConfigError,
    PayloadConfig,
    SdkConfig,
    ValidationError,
};
use crate::transport::{
    Endpoints,
    HttpTransport,
    Transport,
    TransportError,
    Url,
};
use crate::types::{
    Language,
    StoreIdentifier,
};

/// Resolves widget texts for a language and a store.
#[derive(Debug)]
pub struct LocalizationResolver<T> {
    /// HTTP collaborator
    transport: T,
    /// i18n endpoint URLs
    endpoints: Endpoints,
    /// Key paths inside the payloads
    payload: PayloadConfig,
}

impl<T: Transport> LocalizationResolver<T> {
    #[must_use]
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self { transport, endpoints, payload: PayloadConfig::default() }
    }

    #[must_use]
    pub fn with_payload_config(mut self, payload: PayloadConfig) -> Self {
        self.payload = payload;
        self
    }

    /// Builds a resolver for the endpoints and payload layout described by `config`.
    ///
    /// # Errors
    /// Returns [`ConfigError::ValidationErrors`] if the configured base URL is unusable.
    pub fn from_config(config: &SdkConfig, transport: T) -> Result<Self, ConfigError> {
        let endpoints = Endpoints::new(config.base_url()).map_err(|e| {
            ConfigError::ValidationErrors(vec![ValidationError::new("apiBaseUrl", e.to_string())])
        })?;
        Ok(Self::new(transport, endpoints).with_payload_config(config.payload.clone()))
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches the base and override texts concurrently and merges them.
    ///
    /// Only a base failure is returned as an error; a failed override fetch falls back to the
    /// base texts. Dropping the returned future cancels both requests.
    pub async fn resolve(
        &self,
        language: Language,
        store: &StoreIdentifier,
    ) -> Result<ResolvedTextBundle, ResolveError> {
        let span = tracing::debug_span!("resolve", %language, %store);
        async {
            let base_url = self.endpoints.base_texts(language);
            let override_url = self.endpoints.store_texts(store);

            // 両方の結果が揃うまで待ってからポリシーを適用する
            let (base, overrides) = futures::future::join(
                self.fetch(&base_url, self.payload.base_key_path.as_deref()),
                self.fetch(&override_url, self.payload.override_key_path.as_deref()),
            )
            .await;

            let resolved = merge(base, overrides)?;
            tracing::debug!(texts = resolved.texts().len(), "Resolved texts");
            Ok(resolved)
        }
        .instrument(span)
        .await
    }

    /// Issues one GET and tags its outcome.
    async fn fetch(&self, url: &Url, key_path: Option<&str>) -> FetchOutcome {
        let result = self.transport.get(url).await;
        FetchOutcome::from_response(result, key_path)
    }
}

impl<T: Transport + 'static> LocalizationResolver<T> {
    /// Runs [`resolve`](Self::resolve) on the tokio runtime.
    ///
    /// The returned handle can cancel the in-flight requests; dropping it does the same.
    #[must_use]
    pub fn spawn(self: Arc<Self>, language: Language, store: StoreIdentifier) -> PendingResolution {
        let handle = tokio::spawn(async move { self.resolve(language, &store).await });
        PendingResolution::new(handle)
    }
}

impl LocalizationResolver<HttpTransport> {
    /// Resolver talking to the configured backend over HTTP.
    ///
    /// # Errors
    /// - Invalid base URL
    /// - API key that cannot be sent as a header
    /// - HTTP client construction failure
    pub fn http(config: &SdkConfig) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(config).map_err(client_config_error)?;
        Self::from_config(config, transport)
    }
}

/// Reports an unusable API key against its field; other client failures are not config mistakes.
fn client_config_error(error: TransportError) -> ConfigError {
    match error {
        TransportError::InvalidApiKey(_) => {
            ConfigError::ValidationErrors(vec![ValidationError::new("apiKey", error.to_string())])
        }
        other => ConfigError::HttpClient(other),
    }
}
