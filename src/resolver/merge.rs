//! Join point of a resolution: applies the error policy and merges the two bundles.

use serde::Serialize;
use thiserror::Error;

use super::outcome::{
    FetchError,
    FetchOutcome,
};
use crate::input::TextBundle;
use crate::types::TextKey;

#[derive(Error, Debug)]
pub enum ResolveError {
    /// The base language bundle could not be loaded; no bundle is produced
    #[error("Failed to fetch base texts: {0}")]
    BaseFetchFailed(#[source] FetchError),
    /// The resolved bundle has no text for this key
    #[error("No text resolved for '{0}'")]
    MissingKey(TextKey),
    #[error("Resolution was cancelled")]
    Cancelled,
    #[error("Resolution task failed: {0}")]
    TaskFailed(String),
}

/// Final texts handed to the widget UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedTextBundle {
    /// Merged texts; the key set is the base bundle's
    texts: TextBundle,
}

impl ResolvedTextBundle {
    #[must_use]
    pub fn get(&self, key: TextKey) -> Option<&str> {
        self.texts.get(key)
    }

    /// Text for `key`, reported as [`ResolveError::MissingKey`] when absent.
    pub fn text(&self, key: TextKey) -> Result<&str, ResolveError> {
        self.texts.get(key).ok_or(ResolveError::MissingKey(key))
    }

    /// Known keys with no resolved text.
    #[must_use]
    pub fn missing_keys(&self) -> Vec<TextKey> {
        TextKey::ALL.iter().copied().filter(|key| !self.texts.contains(*key)).collect()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.texts.len() == TextKey::ALL.len()
    }

    #[must_use]
    pub const fn texts(&self) -> &TextBundle {
        &self.texts
    }

    pub fn iter(&self) -> impl Iterator<Item = (TextKey, &str)> {
        self.texts.iter()
    }
}

/// Combines the two fetch outcomes.
///
/// - base `Loaded` is required; `Empty` or `Failed` ⇒ [`ResolveError::BaseFetchFailed`]
/// - override `Empty` or `Failed` ⇒ no overrides (failures are logged)
/// - override values replace base values key by key; override-only keys are dropped
pub fn merge(base: FetchOutcome, overrides: FetchOutcome) -> Result<ResolvedTextBundle, ResolveError> {
    let base = match base {
        FetchOutcome::Loaded(bundle) => bundle,
        FetchOutcome::Empty => return Err(ResolveError::BaseFetchFailed(FetchError::EmptyBody)),
        FetchOutcome::Failed(e) => return Err(ResolveError::BaseFetchFailed(e)),
    };

    let overrides = match overrides {
        FetchOutcome::Loaded(bundle) => bundle,
        FetchOutcome::Empty => {
            tracing::debug!("Store defines no text overrides");
            TextBundle::new()
        }
        FetchOutcome::Failed(e) if e.is_not_found() => {
            tracing::debug!("Store text overrides not found");
            TextBundle::new()
        }
        FetchOutcome::Failed(e) => {
            tracing::warn!(error = %e, "Failed to fetch store text overrides, using base texts");
            TextBundle::new()
        }
    };

    for (key, _) in overrides.iter().filter(|(key, _)| !base.contains(*key)) {
        tracing::debug!(%key, "Ignoring override for key missing from base texts");
    }

    let texts: TextBundle = base
        .into_iter()
        .map(|(key, text)| match overrides.get(key) {
            Some(custom) => (key, custom.to_string()),
            None => (key, text),
        })
        .collect();

    let resolved = ResolvedTextBundle { texts };
    let missing = resolved.missing_keys();
    if !missing.is_empty() {
        tracing::warn!(?missing, "Base texts are incomplete");
    }

    Ok(resolved)
}
