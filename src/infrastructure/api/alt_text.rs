//! Alt-text catalog: image id to caption, loaded from a JSON object file.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::entities::ImageRecord;
use crate::domain::services::IdentifierResolver;

/// Failure to read the catalog file.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum AltTextError {
    #[error("failed to read alt-text file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid alt-text file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Captions keyed by image id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AltTextCatalog {
    entries: HashMap<String, String>,
}

impl AltTextCatalog {
    /// Loads the catalog. A missing or empty file yields an empty catalog.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or is not a JSON object of strings.
    pub fn load(path: &Path) -> Result<Self, AltTextError> {
        if !path.exists() {
            debug!(path = ?path, "Alt-text file not found, using empty catalog");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let entries: HashMap<String, String> = serde_json::from_str(&content)?;
        info!(count = entries.len(), "Loaded alt texts");
        Ok(Self { entries })
    }

    /// Builds a catalog from pairs.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Caption for an id, if one is set and non-blank.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries
            .get(id)
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overwrites `alt_text` on records whose resolved id has a caption.
    pub fn enrich(&self, records: &mut [ImageRecord]) {
        if self.entries.is_empty() {
            return;
        }
        for record in records.iter_mut() {
            let Some(id) = IdentifierResolver::resolve_id(record) else {
                continue;
            };
            if let Some(text) = self.get(id.as_str()) {
                record.alt_text = Some(text.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let catalog = AltTextCatalog::load(&dir.path().join("alt_texts.json")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_and_get() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("alt_texts.json");
        std::fs::write(&path, r#"{"A1": "Cutting the cake", "A2": ""}"#).unwrap();

        let catalog = AltTextCatalog::load(&path).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("A1"), Some("Cutting the cake"));
        assert_eq!(catalog.get("A2"), None);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("alt_texts.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        assert!(matches!(
            AltTextCatalog::load(&path),
            Err(AltTextError::Json(_))
        ));
    }

    #[test]
    fn test_enrich_matches_resolved_ids() {
        let catalog = AltTextCatalog::from_entries([("A1", "First dance"), ("XYZ9", "Bouquet")]);
        let mut records = vec![
            ImageRecord::with_id("A1"),
            ImageRecord::with_view_link("https://drive/d/XYZ9/view"),
            ImageRecord::with_id("B2").named("b2.jpg"),
            ImageRecord::default(),
        ];

        catalog.enrich(&mut records);

        assert_eq!(records[0].alt_text.as_deref(), Some("First dance"));
        assert_eq!(records[1].alt_text.as_deref(), Some("Bouquet"));
        assert_eq!(records[2].alt_text, None);
        assert_eq!(records[3].alt_text, None);
    }
}
