//! Renderer for headless runs: logs every change and keeps a per-slot table.

use parking_lot::Mutex;
use tracing::{error, info, warn};

use crate::domain::entities::{EnlargedState, GalleryStatus, SlotId, SlotState};
use crate::domain::ports::GalleryRenderer;

/// Last known state of one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRow {
    /// Record position.
    pub index: usize,
    /// Slot caption.
    pub label: String,
    /// Short state name.
    pub state: &'static str,
    /// Loaded image size, when displayed.
    pub dimensions: Option<(u32, u32)>,
}

/// Logs renderer calls and records the final table.
#[derive(Debug, Default)]
pub struct LogRenderer {
    rows: Mutex<Vec<SlotRow>>,
    status: Mutex<Option<GalleryStatus>>,
}

impl LogRenderer {
    /// Creates an empty renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every slot.
    #[must_use]
    pub fn rows(&self) -> Vec<SlotRow> {
        self.rows.lock().clone()
    }

    /// Latest page-level status.
    #[must_use]
    pub fn status(&self) -> Option<GalleryStatus> {
        self.status.lock().clone()
    }

    /// Lines for the stdout summary, one per slot.
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        self.rows
            .lock()
            .iter()
            .map(|row| match row.dimensions {
                Some((w, h)) => format!("{:>3}  {:<11} {w}x{h}  {}", row.index, row.state, row.label),
                None => format!("{:>3}  {:<11} {}", row.index, row.state, row.label),
            })
            .collect()
    }
}

const fn state_name(state: &SlotState) -> &'static str {
    match state {
        SlotState::Loading => "loading",
        SlotState::Displayed { .. } => "displayed",
        SlotState::Unavailable => "unavailable",
    }
}

impl GalleryRenderer for LogRenderer {
    fn set_status(&self, status: GalleryStatus) {
        match &status {
            GalleryStatus::Failed { message } => error!(%message, "Gallery failed"),
            GalleryStatus::Empty => warn!("{}", GalleryStatus::EMPTY_MESSAGE),
            other => info!(status = ?other, "Gallery status"),
        }
        *self.status.lock() = Some(status);
    }

    fn create_slot(&self, index: usize, label: &str) -> SlotId {
        let mut rows = self.rows.lock();
        rows.push(SlotRow {
            index,
            label: label.to_string(),
            state: "created",
            dimensions: None,
        });
        SlotId(rows.len() - 1)
    }

    fn update_slot(&self, slot: SlotId, state: SlotState) {
        let mut rows = self.rows.lock();
        let Some(row) = rows.get_mut(slot.0) else {
            warn!(%slot, "Update for unknown slot");
            return;
        };
        row.state = state_name(&state);
        if let SlotState::Displayed { image, .. } = &state {
            row.dimensions = Some(image.dimensions());
        }
        info!(index = row.index, label = %row.label, state = row.state, "Slot updated");
    }

    fn update_enlarged(&self, state: EnlargedState) {
        match state {
            EnlargedState::Failed { id, message } => warn!(%id, %message, "Enlarged view failed"),
            other => info!(state = ?other, "Enlarged view"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::entities::{
        Activation, ImageId, ImageRecord, ImageSource, ImageVariant, LoadedImage, SourceStrategy,
    };
    use crate::domain::services::IdentifierResolver;

    #[test]
    fn test_summary_lines() {
        let renderer = LogRenderer::new();
        let ok = renderer.create_slot(0, "ceremony.jpg");
        let bad = renderer.create_slot(1, "Image 1");

        let image = IdentifierResolver::resolve(&ImageRecord::with_id("A1"), 0).unwrap();
        renderer.update_slot(
            ok,
            SlotState::Displayed {
                image: LoadedImage {
                    id: ImageId::new("A1").unwrap(),
                    variant: ImageVariant::Thumbnail,
                    image: Arc::new(image::DynamicImage::new_rgb8(8, 6)),
                    source: ImageSource::Network,
                },
                activation: Activation {
                    image,
                    strategy: SourceStrategy::direct_default(),
                },
            },
        );
        renderer.update_slot(bad, SlotState::Unavailable);

        assert_eq!(
            renderer.summary_lines(),
            vec![
                "  0  displayed   8x6  ceremony.jpg".to_string(),
                "  1  unavailable Image 1".to_string(),
            ]
        );
    }

    #[test]
    fn test_records_status() {
        let renderer = LogRenderer::new();
        renderer.set_status(GalleryStatus::Empty);
        assert_eq!(renderer.status(), Some(GalleryStatus::Empty));
    }
}
