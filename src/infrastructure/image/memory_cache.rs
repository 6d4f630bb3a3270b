//! In-memory LRU cache of decoded images.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::domain::entities::{ImageId, ImageVariant};

/// Default maximum number of images to cache in memory.
pub const DEFAULT_CACHE_SIZE: usize = 50;

type CacheKey = (ImageId, ImageVariant);

/// LRU cache of decoded images keyed by id and rendition.
/// Only successful loads are ever stored.
pub struct MemoryImageCache {
    cache: RwLock<LruCache<CacheKey, Arc<image::DynamicImage>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryImageCache {
    /// Creates a new cache with the specified capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: RwLock::new(LruCache::new(cap)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Looks up an image, promoting it on hit.
    pub async fn get(&self, id: &ImageId, variant: ImageVariant) -> Option<Arc<image::DynamicImage>> {
        let mut cache = self.cache.write().await;
        let key = (id.clone(), variant);
        if let Some(img) = cache.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(id = %id, %variant, "Memory cache hit");
            Some(Arc::clone(img))
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(id = %id, %variant, "Memory cache miss");
            None
        }
    }

    /// Stores a decoded image.
    pub async fn put(&self, id: ImageId, variant: ImageVariant, image: Arc<image::DynamicImage>) {
        let mut cache = self.cache.write().await;
        debug!(id = %id, %variant, "Storing image in memory cache");
        cache.put((id, variant), image);
    }

    /// Drops every entry.
    pub async fn clear(&self) {
        self.cache.write().await.clear();
        debug!("Cleared memory image cache");
    }

    /// Best-effort entry count; 0 while a writer holds the lock.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.try_read().map(|c| c.len()).unwrap_or(0)
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }
}

impl Default for MemoryImageCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached images.
    pub size: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} images, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ImageId {
        ImageId::new(s).unwrap()
    }

    fn img() -> Arc<image::DynamicImage> {
        Arc::new(image::DynamicImage::new_rgb8(10, 10))
    }

    #[tokio::test]
    async fn test_variants_are_separate_entries() {
        let cache = MemoryImageCache::new(10);
        cache.put(id("A1"), ImageVariant::Thumbnail, img()).await;

        assert!(cache.get(&id("A1"), ImageVariant::Thumbnail).await.is_some());
        assert!(cache.get(&id("A1"), ImageVariant::Large).await.is_none());
    }

    #[tokio::test]
    async fn test_cache_eviction() {
        let cache = MemoryImageCache::new(2);

        cache.put(id("a"), ImageVariant::Thumbnail, img()).await;
        cache.put(id("b"), ImageVariant::Thumbnail, img()).await;
        cache.put(id("c"), ImageVariant::Thumbnail, img()).await;

        assert!(cache.get(&id("a"), ImageVariant::Thumbnail).await.is_none());
        assert!(cache.get(&id("b"), ImageVariant::Thumbnail).await.is_some());
        assert!(cache.get(&id("c"), ImageVariant::Thumbnail).await.is_some());
    }

    #[tokio::test]
    async fn test_cache_stats() {
        let cache = MemoryImageCache::new(10);
        cache.put(id("A1"), ImageVariant::Thumbnail, img()).await;

        let _ = cache.get(&id("A1"), ImageVariant::Thumbnail).await;
        let _ = cache.get(&id("missing"), ImageVariant::Thumbnail).await;

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
        assert!(stats.to_string().contains("50.0% hit rate"));
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = MemoryImageCache::new(4);
        cache.put(id("A1"), ImageVariant::Large, img()).await;
        cache.clear().await;
        assert!(cache.is_empty());
    }
}
