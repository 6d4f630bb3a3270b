//! Infrastructure layer with external service adapters.

/// Gallery API client and alt-text catalog.
pub mod api;
/// Application configuration.
pub mod config;
/// Image fetching and caching.
pub mod image;

#[cfg(test)]
pub(crate) mod test_server;

pub use api::{AltTextCatalog, HttpMetadataClient};
pub use config::{AppConfig, CliArgs, GallerySettings, LogLevel, SourceKind, StorageManager};
pub use image::{CacheStats, HttpImageFetcher, MemoryImageCache};
