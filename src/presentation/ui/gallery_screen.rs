//! Gallery screen: view state fed by renderer events, and its widget.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    widgets::{Paragraph, StatefulWidget, Widget},
};

use crate::domain::entities::{
    Activation, EnlargedState, GalleryStatus, ImageId, SlotId, SlotState,
};
use crate::presentation::events::Direction;
use crate::presentation::renderers::{GalleryEvent, RenderUpdate};
use crate::presentation::widgets::{
    EnlargedContent, EnlargedView, GridLayout, ImageManager, SlotCard, StatusBar,
};

const GALLERY_HINTS: &str = "←↓↑→ move  Enter open  r reload  q quit";
const ENLARGED_HINTS: &str = "Esc close  q quit";

/// One slot as the screen knows it.
#[derive(Debug, Clone)]
pub struct SlotView {
    /// Renderer handle.
    pub slot: SlotId,
    /// Record position.
    pub index: usize,
    /// Caption.
    pub label: String,
    /// Latest state.
    pub state: SlotState,
}

/// Everything the gallery screen draws.
#[derive(Debug)]
pub struct GalleryViewState {
    generation: u64,
    status: GalleryStatus,
    slots: Vec<SlotView>,
    selected: usize,
    columns: usize,
    enlarged: EnlargedState,
    enlarged_target: Option<ImageId>,
    enlarged_title: String,
}

impl Default for GalleryViewState {
    fn default() -> Self {
        Self {
            generation: 0,
            status: GalleryStatus::Fetching,
            slots: Vec::new(),
            selected: 0,
            columns: 1,
            enlarged: EnlargedState::Closed,
            enlarged_target: None,
            enlarged_title: String::new(),
        }
    }
}

impl GalleryViewState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts over for a new load generation.
    pub fn reset(&mut self, generation: u64) {
        *self = Self {
            generation,
            columns: self.columns,
            ..Self::default()
        };
    }

    /// Applies one event. Returns true if anything visible changed.
    ///
    /// Gallery events from older generations are dropped. Enlarged-view events
    /// only apply to the image currently opened.
    pub fn apply(&mut self, event: GalleryEvent) -> bool {
        match event.update {
            RenderUpdate::Enlarged(state) => self.apply_enlarged(state),
            _ if event.generation != self.generation => false,
            RenderUpdate::Status(status) => {
                self.status = status;
                true
            }
            RenderUpdate::SlotCreated { slot, index, label } => {
                self.slots.push(SlotView {
                    slot,
                    index,
                    label,
                    state: SlotState::Loading,
                });
                true
            }
            RenderUpdate::Slot { slot, state } => {
                match self.slots.iter_mut().find(|view| view.slot == slot) {
                    Some(view) => {
                        view.state = state;
                        true
                    }
                    None => false,
                }
            }
        }
    }

    fn apply_enlarged(&mut self, state: EnlargedState) -> bool {
        let id = match &state {
            EnlargedState::Closed => {
                self.close_enlarged();
                return true;
            }
            EnlargedState::Loading { id, .. } | EnlargedState::Failed { id, .. } => id,
            EnlargedState::Displayed { image, .. } => &image.id,
        };
        if self.enlarged_target.as_ref() != Some(id) {
            return false;
        }
        self.enlarged = state;
        true
    }

    /// Moves the selection within the grid.
    pub fn move_selection(&mut self, direction: Direction) {
        let Some(last) = self.slots.len().checked_sub(1) else {
            return;
        };
        self.selected = match direction {
            Direction::Left => self.selected.saturating_sub(1),
            Direction::Right => (self.selected + 1).min(last),
            Direction::Up => self.selected.checked_sub(self.columns).unwrap_or(self.selected),
            Direction::Down => (self.selected + self.columns).min(last),
        };
    }

    /// Activation target of the selected slot, if it shows an image.
    #[must_use]
    pub fn selected_activation(&self) -> Option<Activation> {
        self.slots
            .get(self.selected)
            .and_then(|view| view.state.activation())
            .cloned()
    }

    /// Marks the enlarged view as loading `activation`.
    pub fn open_enlarged(&mut self, activation: &Activation) {
        let image = &activation.image;
        self.enlarged_target = Some(image.id.clone());
        self.enlarged_title.clone_from(&image.display_name);
        self.enlarged = EnlargedState::Loading {
            id: image.id.clone(),
            display_name: image.display_name.clone(),
        };
    }

    pub fn close_enlarged(&mut self) {
        self.enlarged_target = None;
        self.enlarged = EnlargedState::Closed;
    }

    #[must_use]
    pub const fn is_enlarged_open(&self) -> bool {
        self.enlarged_target.is_some()
    }

    /// Slots that reached a terminal state.
    #[must_use]
    pub fn ready_count(&self) -> usize {
        self.slots.iter().filter(|view| view.state.is_terminal()).count()
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn status(&self) -> &GalleryStatus {
        &self.status
    }

    #[must_use]
    pub fn slots(&self) -> &[SlotView] {
        &self.slots
    }

    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub const fn enlarged(&self) -> &EnlargedState {
        &self.enlarged
    }
}

/// Draws the grid, the status bar, and the enlarged popup when open.
pub struct GalleryScreen<'a> {
    images: &'a mut ImageManager,
}

impl<'a> GalleryScreen<'a> {
    #[must_use]
    pub const fn new(images: &'a mut ImageManager) -> Self {
        Self { images }
    }

    fn render_grid(&mut self, area: Rect, buf: &mut Buffer, state: &mut GalleryViewState) {
        let grid = GridLayout::new(area);
        state.columns = grid.columns();

        if state.slots.is_empty() {
            let text = match &state.status {
                GalleryStatus::Failed { message } => message.as_str(),
                GalleryStatus::Empty => GalleryStatus::EMPTY_MESSAGE,
                _ => "",
            };
            let [line] = Layout::vertical([Constraint::Length(1)])
                .flex(Flex::Center)
                .areas(area);
            Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .render(line, buf);
            return;
        }

        for (index, rect) in grid.cells(state.slots.len(), state.selected) {
            let view = &state.slots[index];
            let mut card =
                SlotCard::new(&view.label, &view.state).selected(index == state.selected);
            if let SlotState::Displayed { image, .. } = &view.state {
                card = card.protocol(self.images.slot_protocol(view.slot, image));
            }
            card.render(rect, buf);
        }
    }

    fn render_enlarged(&mut self, area: Rect, buf: &mut Buffer, state: &GalleryViewState) {
        let title = state.enlarged_title.as_str();
        let content = match &state.enlarged {
            EnlargedState::Closed => return,
            EnlargedState::Loading { .. } => EnlargedContent::Loading,
            EnlargedState::Displayed { image, .. } => {
                EnlargedContent::Image(self.images.enlarged_protocol(image))
            }
            EnlargedState::Failed { message, .. } => EnlargedContent::Failed(message),
        };
        EnlargedView::new(title, content).render(area, buf);
    }
}

impl StatefulWidget for GalleryScreen<'_> {
    type State = GalleryViewState;

    fn render(mut self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [grid_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        self.render_grid(grid_area, buf, state);

        let hints = if state.is_enlarged_open() {
            ENLARGED_HINTS
        } else {
            GALLERY_HINTS
        };
        StatusBar::from_status(&state.status, state.ready_count())
            .hints(hints)
            .render(status_area, buf);

        self.render_enlarged(grid_area, buf, state);
    }
}
