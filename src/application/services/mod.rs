//! Loading pipeline services.

mod backoff;
mod batch_coordinator;
mod image_loader;

pub use backoff::{
    BACKOFF_BASE, BACKOFF_JITTER_MAX, BACKOFF_MAX, Backoff, BackoffPolicy, DEFAULT_MAX_ATTEMPTS,
    JitterSource, RandomJitter,
};
pub use batch_coordinator::{BatchCoordinator, DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE};
pub use image_loader::{SingleImageLoader, SlotOutcome};
