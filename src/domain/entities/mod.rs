//! Domain entity definitions.

mod image;
mod image_record;
mod load_task;
mod slot;
mod source;

pub use image::{ImageId, ImageSource, ImageVariant, LoadedImage, ResolvedImage};
pub use image_record::ImageRecord;
pub use load_task::{BatchPlan, LoadTask};
pub use slot::{Activation, EnlargedState, GalleryStatus, SlotId, SlotState};
pub use source::{DEFAULT_CDN_BASE, SourceStrategy};
