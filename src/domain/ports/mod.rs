mod image_fetch_port;
mod metadata_port;
mod renderer_port;

pub use image_fetch_port::{FetchRequest, ImageFetchPort};
#[cfg(test)]
pub use metadata_port::MockMetadataPort;
pub use metadata_port::MetadataPort;
pub use renderer_port::GalleryRenderer;
