//! Port through which the pipeline exposes visual state.

use crate::domain::entities::{EnlargedState, GalleryStatus, SlotId, SlotState};

/// UI layer receiving gallery state.
///
/// Calls are fire-and-forget mutations; implementations must not block.
pub trait GalleryRenderer: Send + Sync {
    /// Updates the page-level status banner.
    fn set_status(&self, status: GalleryStatus);

    /// Appends a slot labelled `label` for the record at `index`.
    fn create_slot(&self, index: usize, label: &str) -> SlotId;

    /// Replaces the content of one slot.
    fn update_slot(&self, slot: SlotId, state: SlotState);

    /// Replaces the content of the enlarged view.
    fn update_enlarged(&self, state: EnlargedState);
}
