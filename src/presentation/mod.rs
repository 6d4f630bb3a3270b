//! Presentation layer with renderers, UI components, and event handling.

/// Event handling.
pub mod events;
/// Renderer adapters for the loading pipeline.
pub mod renderers;
/// UI screens.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use renderers::{ChannelRenderer, LogRenderer};
pub use ui::App;
