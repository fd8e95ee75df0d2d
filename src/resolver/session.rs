//! ウィジェットセッションの翻訳状態

use super::{
    LocalizationResolver,
    ResolveError,
    ResolvedTextBundle,
};
use crate::config::{
    ConfigError,
    SdkConfig,
    ValidationError,
};
use crate::transport::Transport;
use crate::types::{
    Language,
    StoreIdentifier,
};

/// Texts for the lifetime of one widget.
///
/// Holds the last successfully resolved bundle. A language change resolves again; a failed
/// resolution keeps the previous bundle so the UI can stay in a degraded but usable state.
#[derive(Debug)]
pub struct LocalizationSession<T> {
    /// Resolver bound to the session's backend
    resolver: LocalizationResolver<T>,
    /// Requested language
    language: Language,
    /// Store whose overrides apply
    store: StoreIdentifier,
    /// Last resolved bundle and the language it was resolved for
    bundle: Option<(Language, ResolvedTextBundle)>,
}

impl<T: Transport> LocalizationSession<T> {
    #[must_use]
    pub const fn new(
        resolver: LocalizationResolver<T>,
        language: Language,
        store: StoreIdentifier,
    ) -> Self {
        Self { resolver, language, store, bundle: None }
    }

    /// Creates a session from a validated configuration.
    ///
    /// # Errors
    /// - Validation errors in `config`
    /// - Unusable base URL
    pub fn from_config(config: &SdkConfig, transport: T) -> Result<Self, ConfigError> {
        config.validate().map_err(ConfigError::ValidationErrors)?;
        let store = config.store().map_err(|e| {
            ConfigError::ValidationErrors(vec![ValidationError::new("storeName", e.to_string())])
        })?;
        let resolver = LocalizationResolver::from_config(config, transport)?;
        Ok(Self::new(resolver, config.language, store))
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub const fn store(&self) -> &StoreIdentifier {
        &self.store
    }

    /// Last resolved bundle, if any.
    #[must_use]
    pub fn bundle(&self) -> Option<&ResolvedTextBundle> {
        self.bundle.as_ref().map(|(_, bundle)| bundle)
    }

    /// Language of [`bundle`](Self::bundle); differs from [`language`](Self::language) after a
    /// failed language change.
    #[must_use]
    pub fn bundle_language(&self) -> Option<Language> {
        self.bundle.as_ref().map(|(language, _)| *language)
    }

    /// Resolves texts for the current language and store.
    pub async fn refresh(&mut self) -> Result<&ResolvedTextBundle, ResolveError> {
        let language = self.language;
        let result = self.resolver.resolve(language, &self.store).await;
        match result {
            Ok(resolved) => Ok(&self.bundle.insert((language, resolved)).1),
            Err(e) => {
                tracing::warn!(error = %e, %language, "Keeping previous texts");
                Err(e)
            }
        }
    }

    /// Switches language and resolves again.
    ///
    /// Does nothing if the language is unchanged and a bundle for it is already present.
    /// The new texts are available through [`bundle`](Self::bundle).
    pub async fn set_language(&mut self, language: Language) -> Result<(), ResolveError> {
        if self.language == language && self.bundle_language() == Some(language) {
            tracing::debug!(%language, "Language unchanged");
            return Ok(());
        }

        tracing::debug!(from = %self.language, to = %language, "Changing language");
        self.language = language;
        self.refresh().await.map(|_| ())
    }
}
