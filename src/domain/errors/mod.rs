//! Domain error types.

mod load_error;
mod metadata_error;

pub use load_error::LoadError;
pub use metadata_error::MetadataError;
