//! Renderer that forwards every update to the UI loop over a channel.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::mpsc;
use tracing::trace;

use crate::domain::entities::{EnlargedState, GalleryStatus, SlotId, SlotState};
use crate::domain::ports::GalleryRenderer;

/// One renderer call, as data.
#[derive(Debug, Clone)]
pub enum RenderUpdate {
    /// Page-level status changed.
    Status(GalleryStatus),
    /// A slot was appended.
    SlotCreated {
        /// Handle assigned to the slot.
        slot: SlotId,
        /// Record position.
        index: usize,
        /// Slot caption.
        label: String,
    },
    /// A slot changed state.
    Slot {
        /// Target slot.
        slot: SlotId,
        /// New state.
        state: SlotState,
    },
    /// The enlarged view changed state.
    Enlarged(EnlargedState),
}

/// Update tagged with the load it belongs to.
#[derive(Debug, Clone)]
pub struct GalleryEvent {
    /// Load generation; the UI drops events from older generations.
    pub generation: u64,
    /// The update itself.
    pub update: RenderUpdate,
}

/// Forwards updates to an unbounded channel. Never blocks.
#[derive(Debug)]
pub struct ChannelRenderer {
    generation: u64,
    next_slot: AtomicUsize,
    tx: mpsc::UnboundedSender<GalleryEvent>,
}

impl ChannelRenderer {
    /// Creates a renderer for one load generation.
    #[must_use]
    pub const fn new(generation: u64, tx: mpsc::UnboundedSender<GalleryEvent>) -> Self {
        Self {
            generation,
            next_slot: AtomicUsize::new(0),
            tx,
        }
    }

    /// Generation this renderer tags events with.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    fn send(&self, update: RenderUpdate) {
        let event = GalleryEvent {
            generation: self.generation,
            update,
        };
        if self.tx.send(event).is_err() {
            trace!(generation = self.generation, "UI loop gone, dropping update");
        }
    }
}

impl GalleryRenderer for ChannelRenderer {
    fn set_status(&self, status: GalleryStatus) {
        self.send(RenderUpdate::Status(status));
    }

    fn create_slot(&self, index: usize, label: &str) -> SlotId {
        let slot = SlotId(self.next_slot.fetch_add(1, Ordering::Relaxed));
        self.send(RenderUpdate::SlotCreated {
            slot,
            index,
            label: label.to_string(),
        });
        slot
    }

    fn update_slot(&self, slot: SlotId, state: SlotState) {
        self.send(RenderUpdate::Slot { slot, state });
    }

    fn update_enlarged(&self, state: EnlargedState) {
        self.send(RenderUpdate::Enlarged(state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_are_tagged_and_ordered() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let renderer = ChannelRenderer::new(7, tx);

        renderer.set_status(GalleryStatus::Fetching);
        let first = renderer.create_slot(0, "Image 0");
        let second = renderer.create_slot(1, "Image 1");
        renderer.update_slot(second, SlotState::Unavailable);

        assert_eq!(first, SlotId(0));
        assert_eq!(second, SlotId(1));

        let events: Vec<GalleryEvent> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| e.generation == 7));
        assert!(matches!(
            &events[2].update,
            RenderUpdate::SlotCreated { slot: SlotId(1), index: 1, label } if label == "Image 1"
        ));
        assert!(matches!(
            events[3].update,
            RenderUpdate::Slot {
                slot: SlotId(1),
                state: SlotState::Unavailable
            }
        ));
    }

    #[test]
    fn test_closed_channel_is_ignored() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let renderer = ChannelRenderer::new(1, tx);

        renderer.set_status(GalleryStatus::Empty);
        assert_eq!(renderer.create_slot(0, "x"), SlotId(0));
    }
}
