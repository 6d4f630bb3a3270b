//! Drives one gallery slot from placeholder to a terminal state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::domain::entities::{
    Activation, ImageId, ImageVariant, LoadTask, LoadedImage, SlotState, SourceStrategy,
};
use crate::domain::errors::LoadError;
use crate::domain::ports::{FetchRequest, GalleryRenderer, ImageFetchPort};

use super::backoff::Backoff;

static CACHE_BUST_SEQ: AtomicU64 = AtomicU64::new(0);

/// Token that makes every attempt URL unique.
fn cache_bust_token() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let seq = CACHE_BUST_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{millis}{seq:04}")
}

/// Terminal outcome of one load task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOutcome {
    /// The image was installed.
    Displayed,
    /// The unavailable notice was installed.
    Unavailable,
}

/// Loads images through one source strategy, retrying with backoff.
pub struct SingleImageLoader {
    fetcher: Arc<dyn ImageFetchPort>,
    strategy: SourceStrategy,
    backoff: Backoff,
}

impl SingleImageLoader {
    /// Creates a loader.
    #[must_use]
    pub fn new(fetcher: Arc<dyn ImageFetchPort>, strategy: SourceStrategy, backoff: Backoff) -> Self {
        Self {
            fetcher,
            strategy,
            backoff,
        }
    }

    /// Strategy used for gallery slots.
    #[must_use]
    pub const fn strategy(&self) -> &SourceStrategy {
        &self.strategy
    }

    /// Fetches one rendition, building a fresh URL for every attempt.
    ///
    /// # Errors
    /// Returns the last attempt's error once the backoff ceiling is reached.
    pub async fn fetch_with_backoff(
        &self,
        id: &ImageId,
        strategy: &SourceStrategy,
        variant: ImageVariant,
    ) -> Result<LoadedImage, LoadError> {
        self.backoff
            .run(|| {
                let request = FetchRequest {
                    id: id.clone(),
                    variant,
                    url: strategy.url_for(id, variant, &cache_bust_token()),
                };
                let fetcher = Arc::clone(&self.fetcher);
                async move {
                    debug!(id = %request.id, url = %request.url, "Fetching image");
                    fetcher.fetch(&request).await
                }
            })
            .await
    }

    /// Runs one task to completion. Only the task's own slot is touched.
    pub async fn load(&self, task: LoadTask, renderer: &dyn GalleryRenderer) -> SlotOutcome {
        let LoadTask { slot, image, index } = task;

        renderer.update_slot(slot, SlotState::Loading);

        match self
            .fetch_with_backoff(&image.id, &self.strategy, ImageVariant::Thumbnail)
            .await
        {
            Ok(loaded) => {
                debug!(
                    index,
                    id = %image.id,
                    source = %loaded.source,
                    "Image displayed"
                );
                let activation = Activation {
                    image,
                    strategy: self.strategy.clone(),
                };
                renderer.update_slot(
                    slot,
                    SlotState::Displayed {
                        image: loaded,
                        activation,
                    },
                );
                SlotOutcome::Displayed
            }
            Err(e) => {
                warn!(index, id = %image.id, error = %e, "Image unavailable after retries");
                renderer.update_slot(slot, SlotState::Unavailable);
                SlotOutcome::Unavailable
            }
        }
    }
}

impl std::fmt::Debug for SingleImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleImageLoader")
            .field("strategy", &self.strategy)
            .field("backoff", &self.backoff)
            .finish_non_exhaustive()
    }
}
