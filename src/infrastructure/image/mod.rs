//! Image fetching infrastructure.
//!
//! This module provides:
//! - HTTP download with decode validation
//! - Memory caching with LRU eviction

pub mod http_fetcher;
pub mod memory_cache;

pub use http_fetcher::{HttpImageFetcher, decode_image};
pub use memory_cache::{CacheStats, DEFAULT_CACHE_SIZE, MemoryImageCache};
