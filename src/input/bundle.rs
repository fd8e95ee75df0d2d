//! Text bundle input definitions
//!
//! i18n エンドポイントのレスポンスを検証し、既知のキーだけを持つバンドルに変換する。

use std::collections::{
    BTreeMap,
    HashMap,
};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::types::TextKey;

/// Errors raised while decoding an i18n payload.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Payload is not a JSON object")]
    NotAnObject,
    #[error("Key path '{0}' not found in payload")]
    MissingPath(String),
    #[error("Invalid value for '{key}': expected a string, found {found}")]
    InvalidValue { key: TextKey, found: &'static str },
}

/// Mapping from widget text keys to strings, as delivered by one i18n source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TextBundle {
    /// Decoded texts
    texts: BTreeMap<TextKey, String>,
}

impl TextBundle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a payload body into a bundle.
    ///
    /// When `key_path` is set (e.g. `keys.apparel.inpage`), the texts are read from the
    /// nested object at that path instead of the top level.
    ///
    /// Keys outside [`TextKey`] are ignored and `null` values are skipped.
    pub fn from_payload(body: &str, key_path: Option<&str>) -> Result<Self, PayloadError> {
        let json: Value = serde_json::from_str(body)?;
        if !json.is_object() {
            return Err(PayloadError::NotAnObject);
        }

        let scoped = match key_path {
            Some(path) => descend(&json, path)?,
            None => &json,
        };

        // A known key is a leaf even when it holds an object, so the bad value is reported
        let is_text_key = |name: &str| TextKey::from_wire_name(name).is_some();
        let mut bundle = Self::new();
        for (name, value) in flatten_json_until(scoped, ".", None, is_text_key) {
            let Some(key) = TextKey::from_wire_name(&name) else {
                tracing::debug!(key = %name, "Ignoring unknown text key");
                continue;
            };
            match value {
                Value::String(text) => {
                    bundle.insert(key, text);
                }
                Value::Null => {}
                other => {
                    return Err(PayloadError::InvalidValue { key, found: value_kind(&other) });
                }
            }
        }

        Ok(bundle)
    }

    pub fn insert(&mut self, key: TextKey, text: impl Into<String>) -> Option<String> {
        self.texts.insert(key, text.into())
    }

    #[must_use]
    pub fn get(&self, key: TextKey) -> Option<&str> {
        self.texts.get(&key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: TextKey) -> bool {
        self.texts.contains_key(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TextKey, &str)> {
        self.texts.iter().map(|(key, text)| (*key, text.as_str()))
    }
}

impl FromIterator<(TextKey, String)> for TextBundle {
    fn from_iter<T: IntoIterator<Item = (TextKey, String)>>(iter: T) -> Self {
        Self { texts: iter.into_iter().collect() }
    }
}

impl IntoIterator for TextBundle {
    type Item = (TextKey, String);
    type IntoIter = std::collections::btree_map::IntoIter<TextKey, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.texts.into_iter()
    }
}

/// Walks a dot-separated path of object keys.
fn descend<'a>(json: &'a Value, path: &str) -> Result<&'a Value, PayloadError> {
    let mut current = json;
    for segment in path.split('.') {
        current = current
            .get(segment)
            .filter(|value| value.is_object())
            .ok_or_else(|| PayloadError::MissingPath(path.to_string()))?;
    }
    Ok(current)
}

/// Name of a JSON value's type, for error messages.
const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Flatten nested JSON object into a dot-separated map of leaf values.
///
/// Unlike a plain string map, leaves keep their JSON type so callers can
/// tell `null` and non-string values apart from text.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use virtusize_i18n::input::bundle::flatten_json;
///
/// let json = json!({
///     "inpage": {
///         "willFitResultText": "Your recommended size is ",
///         "bodyDataEmptyText": null
///     }
/// });
///
/// let flattened = flatten_json(&json, ".", None);
/// assert_eq!(flattened.get("inpage.willFitResultText"), Some(&json!("Your recommended size is ")));
/// assert_eq!(flattened.get("inpage.bodyDataEmptyText"), Some(&json!(null)));
/// ```
#[must_use]
pub fn flatten_json(json: &Value, separator: &str, prefix: Option<&str>) -> HashMap<String, Value> {
    flatten_json_until(json, separator, prefix, |_| false)
}

/// Like [`flatten_json`], but keys for which `is_leaf` holds are kept whole, objects included.
#[must_use]
pub fn flatten_json_until(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
    is_leaf: impl Fn(&str) -> bool,
) -> HashMap<String, Value> {
    let mut result = HashMap::new();
    flatten_json_value(json, separator, prefix, &is_leaf, &mut result);
    result
}

/// Recursive worker for [`flatten_json_until`].
fn flatten_json_value(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
    is_leaf: &dyn Fn(&str) -> bool,
    result: &mut HashMap<String, Value>,
) {
    match json {
        Value::Object(map) if !prefix.is_some_and(is_leaf) => {
            for (key, value) in map {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_json_value(value, separator, Some(&full_key), is_leaf, result);
            }
        }
        _ => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), json.clone());
            }
        }
    }
}
