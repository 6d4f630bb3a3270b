//! Renderer adapters.

mod channel_renderer;
mod log_renderer;

pub use channel_renderer::{ChannelRenderer, GalleryEvent, RenderUpdate};
pub use log_renderer::{LogRenderer, SlotRow};
