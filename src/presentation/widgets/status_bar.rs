//! Status bar widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::domain::entities::GalleryStatus;

/// Status bar severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Informational.
    Info,
    /// Success.
    Success,
    /// Warning.
    Warning,
    /// Error.
    Error,
}

impl StatusLevel {
    /// Returns color for level.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// One-line bar: a colored message on the left, hints on the right.
#[derive(Debug, Clone)]
pub struct StatusBar {
    message: String,
    hints: String,
    level: StatusLevel,
}

impl StatusBar {
    /// Creates a bar with a message.
    #[must_use]
    pub fn new(message: impl Into<String>, level: StatusLevel) -> Self {
        Self {
            message: message.into(),
            hints: String::new(),
            level,
        }
    }

    /// Bar describing the page-level gallery status.
    ///
    /// `ready` is the number of slots that already reached a terminal state.
    #[must_use]
    pub fn from_status(status: &GalleryStatus, ready: usize) -> Self {
        match status {
            GalleryStatus::Fetching => Self::new("Fetching image list…", StatusLevel::Info),
            GalleryStatus::Loading { total } => {
                Self::new(format!("Loading images {ready}/{total}"), StatusLevel::Info)
            }
            GalleryStatus::Complete {
                displayed,
                unavailable: 0,
            } => Self::new(format!("{displayed} images loaded"), StatusLevel::Success),
            GalleryStatus::Complete {
                displayed,
                unavailable,
            } => Self::new(
                format!("{displayed} images loaded, {unavailable} unavailable"),
                StatusLevel::Warning,
            ),
            GalleryStatus::Empty => Self::new(GalleryStatus::EMPTY_MESSAGE, StatusLevel::Warning),
            GalleryStatus::Failed { message } => Self::new(message.clone(), StatusLevel::Error),
        }
    }

    /// Sets right-aligned hints.
    #[must_use]
    pub fn hints(mut self, hints: impl Into<String>) -> Self {
        self.hints = hints.into();
        self
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the level.
    #[must_use]
    pub const fn level(&self) -> StatusLevel {
        self.level
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.level.color())
            .add_modifier(Modifier::BOLD);
        let hint_style = Style::default().fg(Color::DarkGray);

        let width = area.width as usize;
        let message_width = self.message.width();
        let hints_width = self.hints.width();

        let mut spans = vec![Span::styled(self.message.as_str(), style)];

        if !self.hints.is_empty() && message_width + hints_width < width {
            let padding = width - message_width - hints_width;
            spans.push(Span::raw(" ".repeat(padding)));
            spans.push(Span::styled(self.hints.as_str(), hint_style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(bar: &StatusBar, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_status_messages() {
        let failed = StatusBar::from_status(
            &GalleryStatus::Failed {
                message: "Failed to load images: HTTP error: 500".to_string(),
            },
            0,
        );
        assert_eq!(failed.level(), StatusLevel::Error);
        assert_eq!(failed.message(), "Failed to load images: HTTP error: 500");

        let empty = StatusBar::from_status(&GalleryStatus::Empty, 0);
        assert_eq!(empty.message(), "No images found.");

        let loading = StatusBar::from_status(&GalleryStatus::Loading { total: 9 }, 4);
        assert_eq!(loading.message(), "Loading images 4/9");
    }

    #[test]
    fn test_hints_right_aligned() {
        let bar = StatusBar::new("ok", StatusLevel::Success).hints("q quit");
        let line = rendered(&bar, 20);
        assert!(line.starts_with("ok"));
        assert!(line.ends_with("q quit"));
    }

    #[test]
    fn test_hints_dropped_when_narrow() {
        let bar = StatusBar::new("a long status message", StatusLevel::Info).hints("q quit");
        let line = rendered(&bar, 22);
        assert!(!line.contains("quit"));
    }
}
