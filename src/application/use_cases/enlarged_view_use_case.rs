//! Enlarged view: loads the large rendition of an activated slot.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::services::SingleImageLoader;
use crate::domain::entities::{Activation, EnlargedState, ImageVariant, LoadedImage};
use crate::domain::errors::LoadError;
use crate::domain::ports::GalleryRenderer;

/// Message shown when the large rendition cannot be loaded.
pub const ENLARGED_FAILURE_MESSAGE: &str = "Could not load the image. Try again later.";

/// Opens and closes the enlarged view.
#[derive(Debug, Clone)]
pub struct EnlargedViewUseCase {
    loader: Arc<SingleImageLoader>,
}

impl EnlargedViewUseCase {
    /// Creates the use case around the gallery's loader.
    #[must_use]
    pub const fn new(loader: Arc<SingleImageLoader>) -> Self {
        Self { loader }
    }

    /// Shows a loading state, then the large rendition or the failure message.
    ///
    /// Uses the strategy carried by the activation and the same backoff contract
    /// as gallery slots.
    ///
    /// # Errors
    /// Returns the last load error once every attempt has failed.
    pub async fn open(
        &self,
        activation: &Activation,
        renderer: &dyn GalleryRenderer,
    ) -> Result<LoadedImage, LoadError> {
        let image = &activation.image;
        debug!(id = %image.id, strategy = activation.strategy.label(), "Opening enlarged view");

        renderer.update_enlarged(EnlargedState::Loading {
            id: image.id.clone(),
            display_name: image.display_name.clone(),
        });

        match self
            .loader
            .fetch_with_backoff(&image.id, &activation.strategy, ImageVariant::Large)
            .await
        {
            Ok(loaded) => {
                renderer.update_enlarged(EnlargedState::Displayed {
                    image: loaded.clone(),
                    display_name: image.display_name.clone(),
                });
                Ok(loaded)
            }
            Err(e) => {
                warn!(id = %image.id, error = %e, "Enlarged image unavailable");
                renderer.update_enlarged(EnlargedState::Failed {
                    id: image.id.clone(),
                    message: ENLARGED_FAILURE_MESSAGE.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Hides the enlarged view.
    pub fn close(&self, renderer: &dyn GalleryRenderer) {
        renderer.update_enlarged(EnlargedState::Closed);
    }
}
