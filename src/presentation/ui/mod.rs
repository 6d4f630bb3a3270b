//! UI screens.

mod app;
mod gallery_screen;

pub use app::App;
pub use gallery_screen::{GalleryScreen, GalleryViewState, SlotView};
