//! One gallery slot: a bordered card with a caption and the thumbnail.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph, StatefulWidget, Widget},
};
use ratatui_image::StatefulImage;
use ratatui_image::protocol::StatefulProtocol;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::domain::entities::SlotState;

pub const LOADING_TEXT: &str = "Loading…";
pub const UNAVAILABLE_TEXT: &str = "Image unavailable";

pub struct SlotCardStyle {
    pub border: Style,
    pub border_selected: Style,
    pub title: Style,
    pub placeholder: Style,
    pub unavailable: Style,
}

impl Default for SlotCardStyle {
    fn default() -> Self {
        Self {
            border: Style::default().fg(Color::DarkGray),
            border_selected: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            title: Style::default().fg(Color::White),
            placeholder: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            unavailable: Style::default().fg(Color::Red),
        }
    }
}

/// Truncates `text` to `max` terminal columns, marking the cut with an ellipsis.
#[must_use]
pub fn truncate_label(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

pub struct SlotCard<'a> {
    label: &'a str,
    state: &'a SlotState,
    selected: bool,
    protocol: Option<&'a mut StatefulProtocol>,
    style: SlotCardStyle,
}

impl<'a> SlotCard<'a> {
    #[must_use]
    pub fn new(label: &'a str, state: &'a SlotState) -> Self {
        Self {
            label,
            state,
            selected: false,
            protocol: None,
            style: SlotCardStyle::default(),
        }
    }

    #[must_use]
    pub const fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Protocol used to draw a displayed thumbnail.
    #[must_use]
    pub fn protocol(mut self, protocol: &'a mut StatefulProtocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    fn placeholder(text: &str, style: Style, area: Rect, buf: &mut Buffer) {
        let y = area.y + area.height.saturating_sub(1) / 2;
        let line = Rect::new(area.x, y, area.width, 1.min(area.height));
        Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center)
            .render(line, buf);
    }
}

impl Widget for SlotCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.selected {
            self.style.border_selected
        } else {
            self.style.border
        };
        let title_width = area.width.saturating_sub(4) as usize;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if self.selected {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(border_style)
            .title(format!(" {} ", truncate_label(self.label, title_width)))
            .title_style(self.style.title);

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }

        match (self.state, self.protocol) {
            (SlotState::Displayed { .. }, Some(protocol)) => {
                StatefulImage::default().render(inner, buf, protocol);
            }
            (SlotState::Loading | SlotState::Displayed { .. }, _) => {
                Self::placeholder(LOADING_TEXT, self.style.placeholder, inner, buf);
            }
            (SlotState::Unavailable, _) => {
                Self::placeholder(UNAVAILABLE_TEXT, self.style.unavailable, inner, buf);
            }
        }
    }
}
