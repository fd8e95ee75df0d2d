use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::transport::TransportError;
use crate::types::{
    Language,
    ParseError,
    StoreIdentifier,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "payload.baseKeyPath")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error(transparent)]
    HttpClient(TransportError),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Backend environment the widget talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Environment {
    Staging,
    #[default]
    Global,
    Japan,
    Korea,
}

impl Environment {
    #[must_use]
    pub const fn api_base_url(self) -> &'static str {
        match self {
            Self::Staging => "https://staging.virtusize.com",
            Self::Global => "https://api.virtusize.com",
            Self::Japan => "https://api.virtusize.jp",
            Self::Korea => "https://api.virtusize.kr",
        }
    }
}

/// Widget session configuration.
///
/// Passed explicitly to every component that needs it; there is no process-wide copy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SdkConfig {
    pub api_key: String,
    pub store_name: String,
    pub language: Language,
    pub environment: Environment,

    /// Overrides the environment's base URL (self-hosted backends, tests).
    pub api_base_url: Option<String>,

    /// Per-request timeout enforced by the HTTP transport.
    pub request_timeout_ms: u64,

    pub payload: PayloadConfig,
}

/// Where the texts live inside each i18n payload.
///
/// `None` means the texts sit at the top level of the JSON object.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayloadConfig {
    pub base_key_path: Option<String>,
    pub override_key_path: Option<String>,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            store_name: String::new(),
            language: Language::default(),
            environment: Environment::default(),
            api_base_url: None,
            request_timeout_ms: 10_000,
            payload: PayloadConfig::default(),
        }
    }
}

impl SdkConfig {
    /// # Errors
    /// - Required field is empty
    /// - Invalid base URL
    /// - Zero timeout
    /// - Key path with empty segments
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.api_key.trim().is_empty() {
            errors.push(ValidationError::new(
                "apiKey",
                "The API key cannot be empty. Please specify the key issued for your store",
            ));
        }

        if self.store_name.trim().is_empty() {
            errors.push(ValidationError::new(
                "storeName",
                "The store name cannot be empty. Example: \"virtusize\"",
            ));
        }

        if let Some(url) = &self.api_base_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            errors.push(ValidationError::new(
                "apiBaseUrl",
                format!("Invalid URL '{url}': it must start with http:// or https://"),
            ));
        }

        if self.request_timeout_ms == 0 {
            errors.push(ValidationError::new(
                "requestTimeoutMs",
                "The timeout must be greater than zero",
            ));
        }

        for (field, path) in [
            ("payload.baseKeyPath", &self.payload.base_key_path),
            ("payload.overrideKeyPath", &self.payload.override_key_path),
        ] {
            if let Some(path) = path
                && path.split('.').any(str::is_empty)
            {
                errors.push(ValidationError::new(
                    field,
                    format!("Invalid key path '{path}': segments cannot be empty. Example: \"keys.apparel.inpage\""),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Base URL of the i18n endpoints.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or_else(|| self.environment.api_base_url())
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// # Errors
    /// Returns an error if `storeName` is blank.
    pub fn store(&self) -> Result<StoreIdentifier, ParseError> {
        StoreIdentifier::new(self.store_name.clone())
    }
}
