mod enlarged_view;
mod gallery_grid;
mod image_preview;
mod slot_card;
mod status_bar;

pub use enlarged_view::{EnlargedContent, EnlargedView};
pub use gallery_grid::{CARD_HEIGHT, CARD_WIDTH, GridLayout};
pub use image_preview::ImageManager;
pub use slot_card::{LOADING_TEXT, SlotCard, SlotCardStyle, UNAVAILABLE_TEXT, truncate_label};
pub use status_bar::{StatusBar, StatusLevel};
