//! Gallery load DTOs.

use crate::application::services::SlotOutcome;

/// Result of one gallery load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GallerySummary {
    /// Records returned by the provider.
    pub total: usize,
    /// Slots showing an image.
    pub displayed: usize,
    /// Slots that exhausted their retries.
    pub failed: usize,
    /// Records without a derivable identifier.
    pub unresolved: usize,
}

impl GallerySummary {
    /// Builds a summary from loader outcomes plus the unresolved count.
    #[must_use]
    pub fn from_outcomes(total: usize, unresolved: usize, outcomes: &[SlotOutcome]) -> Self {
        let displayed = outcomes
            .iter()
            .filter(|o| **o == SlotOutcome::Displayed)
            .count();
        Self {
            total,
            displayed,
            failed: outcomes.len() - displayed,
            unresolved,
        }
    }

    /// Slots showing the unavailable notice.
    #[must_use]
    pub const fn unavailable(&self) -> usize {
        self.failed + self.unresolved
    }

    /// Returns true if the provider had no images.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl std::fmt::Display for GallerySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} images: {} displayed, {} unavailable",
            self.total,
            self.displayed,
            self.unavailable()
        )
    }
}
