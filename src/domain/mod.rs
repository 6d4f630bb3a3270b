//! Domain layer with core entities, pure services, and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Pure domain services.
pub mod services;

pub use entities::{ImageId, ImageRecord, LoadTask, ResolvedImage, SlotId, SlotState};
pub use errors::{LoadError, MetadataError};
pub use ports::{GalleryRenderer, ImageFetchPort, MetadataPort};
pub use services::IdentifierResolver;
