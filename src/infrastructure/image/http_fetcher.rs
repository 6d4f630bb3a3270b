//! HTTP image fetcher with decode validation and a memory cache in front.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, header};
use tracing::{debug, trace};

use crate::domain::entities::{ImageSource, LoadedImage};
use crate::domain::errors::LoadError;
use crate::domain::ports::{FetchRequest, ImageFetchPort};

use super::memory_cache::{CacheStats, MemoryImageCache};

const USER_AGENT: &str = concat!("galeria/", env!("CARGO_PKG_VERSION"));

/// Downloads images over HTTP and decodes them off the async runtime.
///
/// A request succeeds only when the body decodes as an image.
pub struct HttpImageFetcher {
    client: Client,
    memory_cache: Arc<MemoryImageCache>,
}

impl HttpImageFetcher {
    /// Creates a fetcher.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(timeout: Duration, memory_cache: Arc<MemoryImageCache>) -> Result<Self, LoadError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            memory_cache,
        })
    }

    /// Returns memory cache statistics.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.memory_cache.stats()
    }

    async fn download(&self, url: &str) -> Result<Bytes, LoadError> {
        let response = self
            .client
            .get(url)
            .header(header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus {
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?)
    }
}

/// Decodes image bytes on the blocking pool.
///
/// # Errors
/// Returns [`LoadError::Decode`] if the bytes are not a supported image.
pub async fn decode_image(bytes: Bytes) -> Result<image::DynamicImage, LoadError> {
    tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
        .await
        .map_err(|e| LoadError::decode(format!("decode task failed: {e}")))?
        .map_err(|e| LoadError::decode(e.to_string()))
}

#[async_trait]
impl ImageFetchPort for HttpImageFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<LoadedImage, LoadError> {
        if let Some(img) = self.memory_cache.get(&request.id, request.variant).await {
            trace!(id = %request.id, "Serving image from memory");
            return Ok(LoadedImage {
                id: request.id.clone(),
                variant: request.variant,
                image: img,
                source: ImageSource::MemoryCache,
            });
        }

        let bytes = self.download(&request.url).await?;
        debug!(id = %request.id, size = bytes.len(), "Downloaded image");

        let img = Arc::new(decode_image(bytes).await?);
        self.memory_cache
            .put(request.id.clone(), request.variant, Arc::clone(&img))
            .await;

        Ok(LoadedImage {
            id: request.id.clone(),
            variant: request.variant,
            image: img,
            source: ImageSource::Network,
        })
    }
}

impl std::fmt::Debug for HttpImageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpImageFetcher").finish_non_exhaustive()
    }
}
