//! Port for fetching and decoding a single image.

use async_trait::async_trait;

use crate::domain::entities::{ImageId, ImageVariant, LoadedImage};
use crate::domain::errors::LoadError;

/// One fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Image being fetched.
    pub id: ImageId,
    /// Rendition being fetched.
    pub variant: ImageVariant,
    /// Fully resolved URL, cache-busting token included.
    pub url: String,
}

/// Fetches image bytes and decodes them.
/// Every call must hit the source afresh unless a previous success was cached.
#[async_trait]
pub trait ImageFetchPort: Send + Sync {
    /// Performs one attempt. An error means the attempt failed and may be retried.
    async fn fetch(&self, request: &FetchRequest) -> Result<LoadedImage, LoadError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use parking_lot::Mutex;

    use crate::domain::entities::ImageSource;

    /// Scripted behavior for one image id.
    #[derive(Debug, Clone, Copy)]
    pub enum Script {
        /// Fail this many attempts, then succeed.
        FailTimes(u32),
        /// Fail every attempt.
        AlwaysFail,
    }

    /// Record of one attempt.
    #[derive(Debug, Clone)]
    pub struct Attempt {
        pub request: FetchRequest,
        pub at: tokio::time::Instant,
    }

    /// Mock fetcher with per-id scripts and an optional simulated latency.
    #[derive(Default)]
    pub struct MockImageFetcher {
        scripts: Mutex<HashMap<String, Script>>,
        latencies: Mutex<HashMap<String, Duration>>,
        attempts: Mutex<Vec<Attempt>>,
    }

    impl MockImageFetcher {
        /// Creates a fetcher where every image loads on the first attempt.
        pub fn new() -> Self {
            Self::default()
        }

        /// Scripts behavior for one id.
        pub fn script(self, id: &str, script: Script) -> Self {
            self.scripts.lock().insert(id.to_string(), script);
            self
        }

        /// Delays every attempt for one id.
        pub fn latency(self, id: &str, latency: Duration) -> Self {
            self.latencies.lock().insert(id.to_string(), latency);
            self
        }

        /// All attempts so far, in call order.
        pub fn attempts(&self) -> Vec<Attempt> {
            self.attempts.lock().clone()
        }

        /// Number of attempts made for one id.
        pub fn attempts_for(&self, id: &str) -> usize {
            self.attempts
                .lock()
                .iter()
                .filter(|a| a.request.id.as_str() == id)
                .count()
        }
    }

    #[async_trait]
    impl ImageFetchPort for MockImageFetcher {
        async fn fetch(&self, request: &FetchRequest) -> Result<LoadedImage, LoadError> {
            let key = request.id.as_str().to_string();
            let previous = self.attempts_for(&key);
            self.attempts.lock().push(Attempt {
                request: request.clone(),
                at: tokio::time::Instant::now(),
            });

            let latency = self.latencies.lock().get(&key).copied();
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }

            let script = self.scripts.lock().get(&key).copied();
            let fail = match script {
                None => false,
                Some(Script::AlwaysFail) => true,
                Some(Script::FailTimes(n)) => previous < n as usize,
            };

            if fail {
                Err(LoadError::HttpStatus { status: 503 })
            } else {
                Ok(LoadedImage {
                    id: request.id.clone(),
                    variant: request.variant,
                    image: Arc::new(image::DynamicImage::new_rgb8(8, 6)),
                    source: ImageSource::Network,
                })
            }
        }
    }
}
