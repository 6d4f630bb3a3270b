//! Use case implementations.

mod enlarged_view_use_case;
mod load_gallery_use_case;

pub use enlarged_view_use_case::{ENLARGED_FAILURE_MESSAGE, EnlargedViewUseCase};
pub use load_gallery_use_case::LoadGalleryUseCase;
