//! Galeria - a terminal gallery for remote image collections.
//!
//! This crate fetches an image list from a gallery API and loads every image
//! in fixed-size batches with retry and exponential backoff, rendering into a
//! TUI grid or a headless log.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the loading pipeline, use cases, and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing HTTP adapters and configuration.
pub mod infrastructure;
/// Presentation layer containing renderers, UI components, and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "galeria";
