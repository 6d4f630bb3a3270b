//! Application layer with the loading pipeline, use cases, and DTOs.

/// Data transfer objects.
pub mod dto;
/// Pipeline services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::GallerySummary;
pub use services::{Backoff, BackoffPolicy, BatchCoordinator, SingleImageLoader, SlotOutcome};
pub use use_cases::{EnlargedViewUseCase, LoadGalleryUseCase};
