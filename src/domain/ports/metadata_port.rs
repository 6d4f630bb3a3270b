//! Port for obtaining the list of gallery images.

use async_trait::async_trait;

use crate::domain::entities::ImageRecord;
use crate::domain::errors::MetadataError;

/// Source of image records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataPort: Send + Sync {
    /// Fetches every image record, in display order.
    async fn fetch_images(&self) -> Result<Vec<ImageRecord>, MetadataError>;
}
