//! Popup showing the large rendition of the activated image.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, StatefulWidget, Widget, Wrap},
};
use ratatui_image::StatefulImage;
use ratatui_image::protocol::StatefulProtocol;

use super::slot_card::{LOADING_TEXT, truncate_label};

const CLOSE_HINT: &str = " Esc to close ";

/// What the popup body shows.
pub enum EnlargedContent<'a> {
    /// Large rendition still loading.
    Loading,
    /// Image ready to draw.
    Image(&'a mut StatefulProtocol),
    /// Failure message.
    Failed(&'a str),
}

pub struct EnlargedView<'a> {
    title: &'a str,
    content: EnlargedContent<'a>,
}

impl<'a> EnlargedView<'a> {
    #[must_use]
    pub const fn new(title: &'a str, content: EnlargedContent<'a>) -> Self {
        Self { title, content }
    }

    /// Popup rect: 90% of `area`, centered.
    #[must_use]
    pub fn popup_area(area: Rect) -> Rect {
        let [vertical] = Layout::vertical([Constraint::Percentage(90)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::horizontal([Constraint::Percentage(90)])
            .flex(Flex::Center)
            .areas(vertical);
        popup
    }
}

impl Widget for EnlargedView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = Self::popup_area(area);
        Clear.render(popup, buf);

        let title_width = popup.width.saturating_sub(4) as usize;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", truncate_label(self.title, title_width)))
            .title_style(Style::default().add_modifier(Modifier::BOLD))
            .title_bottom(Line::from(CLOSE_HINT).right_aligned())
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(popup);
        block.render(popup, buf);
        if inner.is_empty() {
            return;
        }

        let centered = |height: u16| {
            let [line] = Layout::vertical([Constraint::Length(height)])
                .flex(Flex::Center)
                .areas(inner);
            line
        };

        match self.content {
            EnlargedContent::Image(protocol) => {
                StatefulImage::default().render(inner, buf, protocol);
            }
            EnlargedContent::Loading => {
                Paragraph::new(LOADING_TEXT)
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center)
                    .render(centered(1), buf);
            }
            EnlargedContent::Failed(message) => {
                Paragraph::new(message)
                    .style(Style::default().fg(Color::Red))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .render(centered(2), buf);
            }
        }
    }
}
