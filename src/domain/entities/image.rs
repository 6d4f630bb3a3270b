//! Domain types for gallery images.

use std::sync::Arc;

use super::ImageRecord;

/// Resolved identifier of a gallery image.
/// Addresses the image on the CDN or through the proxy, whatever the record shape was.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageId(String);

impl ImageId {
    /// Creates an `ImageId`, rejecting empty or whitespace-only input.
    /// Accepted input is kept verbatim.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        (!id.trim().is_empty()).then_some(Self(id))
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which rendition of an image is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageVariant {
    /// Gallery-sized rendition shown in a slot.
    #[default]
    Thumbnail,
    /// Enlarged rendition shown after activation.
    Large,
}

impl std::fmt::Display for ImageVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Thumbnail => write!(f, "thumbnail"),
            Self::Large => write!(f, "large"),
        }
    }
}

/// Image record after identifier resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    /// Stable identifier.
    pub id: ImageId,
    /// Human-readable label (alt text, name, or positional fallback).
    pub display_name: String,
    /// Record the image was resolved from.
    pub record: ImageRecord,
}

/// Where a loaded image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Served from the in-memory LRU cache.
    MemoryCache,
    /// Downloaded from the network.
    Network,
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MemoryCache => write!(f, "memory"),
            Self::Network => write!(f, "network"),
        }
    }
}

/// A decoded image ready for display.
#[derive(Clone)]
pub struct LoadedImage {
    /// The image ID.
    pub id: ImageId,
    /// Rendition that was loaded.
    pub variant: ImageVariant,
    /// Decoded pixels.
    pub image: Arc<image::DynamicImage>,
    /// Where the pixels came from.
    pub source: ImageSource,
}

impl LoadedImage {
    /// Returns `(width, height)` in pixels.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }
}

impl std::fmt::Debug for LoadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (width, height) = self.dimensions();
        f.debug_struct("LoadedImage")
            .field("id", &self.id)
            .field("variant", &self.variant)
            .field("width", &width)
            .field("height", &height)
            .field("source", &self.source)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_id_rejects_blank() {
        assert!(ImageId::new("").is_none());
        assert!(ImageId::new("   ").is_none());
    }

    #[test]
    fn test_image_id_keeps_input_verbatim() {
        let id = ImageId::new(" abc123 ").unwrap();
        assert_eq!(id.as_str(), " abc123 ");
    }

    #[test]
    fn test_loaded_image_dimensions() {
        let loaded = LoadedImage {
            id: ImageId::new("A1").unwrap(),
            variant: ImageVariant::Thumbnail,
            image: Arc::new(image::DynamicImage::new_rgb8(12, 7)),
            source: ImageSource::Network,
        };
        assert_eq!(loaded.dimensions(), (12, 7));
    }
}
