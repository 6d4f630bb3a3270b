//! Canonical image record as delivered by the metadata provider.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

const ID_KEYS: &[&str] = &["ID", "id", "Id"];
const VIEW_LINK_KEYS: &[&str] = &["webViewLink", "WebViewLink", "web_view_link"];
const NAME_KEYS: &[&str] = &["name", "Name"];
const THUMBNAIL_KEYS: &[&str] = &["thumbnailLink", "ThumbnailLink", "thumbnail_link"];
const MIME_TYPE_KEYS: &[&str] = &["mimeType", "MimeType", "mime_type"];
const ALT_TEXT_KEYS: &[&str] = &["altText", "AltText", "alt_text"];

/// Metadata for one gallery image.
///
/// Providers disagree on field casing (`ID` vs `id`, `WebViewLink` vs `webViewLink`),
/// so every field accepts its known spellings and is normalized here, once.
/// The first spelling with a usable value wins, so `ID` beats `id`.
/// Blank strings, nulls and values of the wrong type are all `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    /// Direct identifier. Numeric ids are kept as their decimal text.
    pub id: Option<String>,

    /// View link that embeds the identifier after `/d/`.
    pub web_view_link: Option<String>,

    /// File name.
    pub name: Option<String>,

    /// Thumbnail URL.
    pub thumbnail_link: Option<String>,

    /// MIME type reported by the provider.
    pub mime_type: Option<String>,

    /// Curated alternative text.
    pub alt_text: Option<String>,
}

impl ImageRecord {
    /// Creates a record with only a direct identifier.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Creates a record with only a view link.
    #[must_use]
    pub fn with_view_link(link: impl Into<String>) -> Self {
        Self {
            web_view_link: Some(link.into()),
            ..Self::default()
        }
    }

    /// Normalizes one element of the image list.
    ///
    /// Never fails: anything that is not an object becomes an empty record,
    /// which resolves to no identifier downstream.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let Value::Object(fields) = value else {
            return Self::default();
        };

        Self {
            id: first_of(fields, ID_KEYS, identifier),
            web_view_link: first_of(fields, VIEW_LINK_KEYS, text),
            name: first_of(fields, NAME_KEYS, text),
            thumbnail_link: first_of(fields, THUMBNAIL_KEYS, text),
            mime_type: first_of(fields, MIME_TYPE_KEYS, text),
            alt_text: first_of(fields, ALT_TEXT_KEYS, text),
        }
    }

    /// Sets the file name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl<'de> Deserialize<'de> for ImageRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(|value| Self::from_json(&value))
    }
}

fn first_of(
    fields: &Map<String, Value>,
    keys: &[&str],
    convert: fn(&Value) -> Option<String>,
) -> Option<String> {
    keys.iter()
        .find_map(|key| fields.get(*key).and_then(convert))
}

fn text(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        _ => text(value),
    }
}
