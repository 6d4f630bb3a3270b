//! Gallery load use case: metadata to terminal slot states.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::application::dto::GallerySummary;
use crate::application::services::{BatchCoordinator, SingleImageLoader};
use crate::domain::entities::{GalleryStatus, LoadTask, SlotState};
use crate::domain::errors::MetadataError;
use crate::domain::ports::{GalleryRenderer, MetadataPort};
use crate::domain::services::IdentifierResolver;

/// Loads every gallery image in batches and reports progress to a renderer.
#[derive(Clone)]
pub struct LoadGalleryUseCase {
    metadata: Arc<dyn MetadataPort>,
    loader: Arc<SingleImageLoader>,
    coordinator: BatchCoordinator,
}

impl LoadGalleryUseCase {
    /// Creates the use case.
    #[must_use]
    pub const fn new(
        metadata: Arc<dyn MetadataPort>,
        loader: Arc<SingleImageLoader>,
        coordinator: BatchCoordinator,
    ) -> Self {
        Self {
            metadata,
            loader,
            coordinator,
        }
    }

    /// Returns the loader shared with the enlarged view.
    #[must_use]
    pub fn loader(&self) -> Arc<SingleImageLoader> {
        Arc::clone(&self.loader)
    }

    /// Runs the whole pipeline once.
    ///
    /// Every created slot ends displayed or unavailable before this returns.
    ///
    /// # Errors
    /// Returns error if the image list cannot be fetched; no slots are created then.
    pub async fn execute(
        &self,
        renderer: &dyn GalleryRenderer,
    ) -> Result<GallerySummary, MetadataError> {
        renderer.set_status(GalleryStatus::Fetching);
        debug!("Fetching image list");

        let records = match self.metadata.fetch_images().await {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "Failed to fetch image list");
                renderer.set_status(GalleryStatus::Failed {
                    message: e.user_message(),
                });
                return Err(e);
            }
        };

        if records.is_empty() {
            info!("Image list is empty");
            renderer.set_status(GalleryStatus::Empty);
            return Ok(GallerySummary::default());
        }

        let total = records.len();
        let mut tasks = Vec::with_capacity(total);
        let mut unresolved = 0;

        for (index, record) in records.iter().enumerate() {
            match IdentifierResolver::resolve(record, index) {
                Some(image) => {
                    let slot = renderer.create_slot(index, &image.display_name);
                    tasks.push(LoadTask::new(slot, image, index));
                }
                None => {
                    warn!(index, "Record has no derivable image id");
                    let label = IdentifierResolver::display_name(record, index);
                    let slot = renderer.create_slot(index, &label);
                    renderer.update_slot(slot, SlotState::Unavailable);
                    unresolved += 1;
                }
            }
        }

        renderer.set_status(GalleryStatus::Loading { total });
        info!(
            total,
            loadable = tasks.len(),
            batch_size = self.coordinator.batch_size(),
            strategy = self.loader.strategy().label(),
            "Loading gallery"
        );

        let loader = self.loader.as_ref();
        let outcomes = self
            .coordinator
            .run_all(tasks, move |task| loader.load(task, renderer))
            .await;

        let summary = GallerySummary::from_outcomes(total, unresolved, &outcomes);
        renderer.set_status(GalleryStatus::Complete {
            displayed: summary.displayed,
            unavailable: summary.unavailable(),
        });
        info!(
            total,
            displayed = summary.displayed,
            unavailable = summary.unavailable(),
            "Gallery load finished"
        );

        Ok(summary)
    }
}
