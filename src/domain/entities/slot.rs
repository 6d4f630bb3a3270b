//! Visual state exposed to renderers.

use super::{ImageId, LoadedImage, ResolvedImage, SourceStrategy};

/// Handle to one renderer slot. Assigned by the renderer when the slot is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub usize);

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// What activating a displayed slot opens: the same image through the same strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    /// Image to enlarge.
    pub image: ResolvedImage,
    /// Strategy that loaded the slot.
    pub strategy: SourceStrategy,
}

/// State of one gallery slot.
#[derive(Debug, Clone)]
pub enum SlotState {
    /// Placeholder while attempts are in flight.
    Loading,
    /// Image installed; can be activated.
    Displayed {
        /// Loaded pixels.
        image: LoadedImage,
        /// Activation target.
        activation: Activation,
    },
    /// Terminal failure notice.
    Unavailable,
}

impl SlotState {
    /// Returns true once no further mutation is expected.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Displayed { .. } | Self::Unavailable)
    }

    /// Returns true if an image is shown.
    #[must_use]
    pub const fn is_displayed(&self) -> bool {
        matches!(self, Self::Displayed { .. })
    }

    /// Returns the activation target for displayed slots.
    #[must_use]
    pub const fn activation(&self) -> Option<&Activation> {
        match self {
            Self::Displayed { activation, .. } => Some(activation),
            _ => None,
        }
    }
}

/// State of the enlarged view.
#[derive(Debug, Clone)]
pub enum EnlargedState {
    /// Large rendition is loading.
    Loading {
        /// Image being enlarged.
        id: ImageId,
        /// Label shown while loading.
        display_name: String,
    },
    /// Large rendition is shown.
    Displayed {
        /// Loaded pixels.
        image: LoadedImage,
        /// Label.
        display_name: String,
    },
    /// Every attempt failed.
    Failed {
        /// Image that failed.
        id: ImageId,
        /// User-facing message.
        message: String,
    },
    /// View hidden.
    Closed,
}

/// Page-level gallery status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryStatus {
    /// Image list is being fetched.
    Fetching,
    /// Slots created; loaders running.
    Loading {
        /// Number of slots.
        total: usize,
    },
    /// Every slot reached a terminal state.
    Complete {
        /// Slots showing an image.
        displayed: usize,
        /// Slots showing the unavailable notice.
        unavailable: usize,
    },
    /// The provider returned no images.
    Empty,
    /// The image list could not be fetched.
    Failed {
        /// User-facing message.
        message: String,
    },
}

impl GalleryStatus {
    /// Message shown when the provider returns no images.
    pub const EMPTY_MESSAGE: &'static str = "No images found.";
}
