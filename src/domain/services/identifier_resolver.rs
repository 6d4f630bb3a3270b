//! Derives a stable image identifier from a heterogeneous record.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::entities::{ImageId, ImageRecord, ResolvedImage};

static VIEW_LINK_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/d/([^/?#]+)").expect("view link pattern is valid"));

/// Stateless resolver for image identifiers and labels.
pub struct IdentifierResolver;

impl IdentifierResolver {
    /// Returns the direct id when present, else the segment after `/d/` in the view link.
    #[must_use]
    pub fn resolve_id(record: &ImageRecord) -> Option<ImageId> {
        if let Some(id) = record.id.as_deref().and_then(ImageId::new) {
            return Some(id);
        }

        let link = record.web_view_link.as_deref()?;
        let captures = VIEW_LINK_ID_RE.captures(link)?;
        captures.get(1).and_then(|m| ImageId::new(m.as_str()))
    }

    /// Resolves the identifier and picks a display name.
    ///
    /// Alt text wins over the file name; with neither, the label is positional.
    #[must_use]
    pub fn resolve(record: &ImageRecord, index: usize) -> Option<ResolvedImage> {
        let id = Self::resolve_id(record)?;
        Some(ResolvedImage {
            id,
            display_name: Self::display_name(record, index),
            record: record.clone(),
        })
    }

    /// Label for a record, whether or not it resolves.
    #[must_use]
    pub fn display_name(record: &ImageRecord, index: usize) -> String {
        record
            .alt_text
            .as_deref()
            .or(record.name.as_deref())
            .map_or_else(|| format!("Image {index}"), str::to_owned)
    }
}
