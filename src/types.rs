//! Core types used throughout the crate.

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};
use thiserror::Error;

/// Error returned when a value cannot be turned into one of the closed types below.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unsupported language: '{0}'")]
    UnsupportedLanguage(String),
    #[error("Unknown text key: '{0}'")]
    UnknownTextKey(String),
    #[error("Store identifier cannot be empty")]
    EmptyStoreIdentifier,
}

/// Languages supported by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Japanese,
    Korean,
}

impl Language {
    /// Every supported language, in display order.
    pub const ALL: [Self; 3] = [Self::English, Self::Japanese, Self::Korean];

    /// Language code used in the i18n endpoint path.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Japanese => "ja",
            Self::Korean => "ko",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ParseError;

    /// Accepts `en`, `en-US`, `ja_JP`, as well as the legacy `jp` / `kr` codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        let primary = normalized.split('_').next().unwrap_or_default();
        match primary {
            "en" => Ok(Self::English),
            "ja" | "jp" => Ok(Self::Japanese),
            "ko" | "kr" => Ok(Self::Korean),
            _ => Err(ParseError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Name of the retailer whose text overrides apply.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreIdentifier(String);

impl StoreIdentifier {
    /// # Errors
    /// Returns [`ParseError::EmptyStoreIdentifier`] for empty or whitespace-only names.
    pub fn new(name: impl Into<String>) -> Result<Self, ParseError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ParseError::EmptyStoreIdentifier);
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StoreIdentifier {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Declares [`TextKey`] together with its wire names.
macro_rules! text_keys {
    ($($variant:ident => $wire:literal,)+) => {
        /// Named text fields shown by the widget.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum TextKey {
            $($variant,)+
        }

        impl TextKey {
            /// Every key the widget knows about.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Key as it appears in i18n payloads.
            #[must_use]
            pub const fn wire_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            /// Looks up a key by its wire name.
            #[must_use]
            pub fn from_wire_name(name: &str) -> Option<Self> {
                match name {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

text_keys! {
    DefaultAccessoryText => "defaultAccessoryText",
    HasProductAccessoryTopText => "hasProductAccessoryTopText",
    HasProductAccessoryBottomText => "hasProductAccessoryBottomText",
    OneSizeCloseTopText => "oneSizeCloseTopText",
    OneSizeSmallerTopText => "oneSizeSmallerTopText",
    OneSizeLargerTopText => "oneSizeLargerTopText",
    OneSizeCloseBottomText => "oneSizeCloseBottomText",
    OneSizeSmallerBottomText => "oneSizeSmallerBottomText",
    OneSizeLargerBottomText => "oneSizeLargerBottomText",
    BodyProfileOneSizeText => "bodyProfileOneSizeText",
    SizeComparisonMultiSizeText => "sizeComparisonMultiSizeText",
    WillFitResultText => "willFitResultText",
    WillNotFitResultText => "willNotFitResultText",
    BodyDataEmptyText => "bodyDataEmptyText",
}

impl fmt::Display for TextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for TextKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire_name(s).ok_or_else(|| ParseError::UnknownTextKey(s.to_string()))
    }
}

impl Serialize for TextKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}
