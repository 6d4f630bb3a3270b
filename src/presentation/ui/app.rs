//! Main application orchestrator.

use std::sync::Arc;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::application::use_cases::{EnlargedViewUseCase, LoadGalleryUseCase};
use crate::domain::entities::Activation;
use crate::presentation::events::{EventHandler, EventResult, GalleryAction};
use crate::presentation::renderers::{ChannelRenderer, GalleryEvent};
use crate::presentation::ui::{GalleryScreen, GalleryViewState};
use crate::presentation::widgets::ImageManager;

/// Terminal gallery: runs loads in background tasks and redraws on every update.
pub struct App {
    load_gallery: Arc<LoadGalleryUseCase>,
    enlarged_view: Arc<EnlargedViewUseCase>,
    event_tx: mpsc::UnboundedSender<GalleryEvent>,
    event_rx: mpsc::UnboundedReceiver<GalleryEvent>,
    generation: u64,
    gallery_task: Option<JoinHandle<()>>,
    enlarged_task: Option<JoinHandle<()>>,
    view: GalleryViewState,
    images: ImageManager,
}

impl App {
    #[must_use]
    pub fn new(
        load_gallery: Arc<LoadGalleryUseCase>,
        enlarged_view: Arc<EnlargedViewUseCase>,
        images: ImageManager,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        Self {
            load_gallery,
            enlarged_view,
            event_tx,
            event_rx,
            generation: 0,
            gallery_task: None,
            enlarged_task: None,
            view: GalleryViewState::new(),
            images,
        }
    }

    /// Loads the gallery and processes input until the user quits.
    ///
    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.start_load();

        let result = self.run_event_loop(terminal).await;

        self.shutdown();
        info!("Application exiting normally");
        result
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();

        terminal.draw(|frame| self.render(frame))?;

        loop {
            tokio::select! {
                biased;

                Some(event) = self.event_rx.recv() => {
                    if self.drain_events(event) {
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }

                maybe_event = terminal_events.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if self.handle_terminal_event(&event) == EventResult::Exit {
                                break;
                            }
                            terminal.draw(|frame| self.render(frame))?;
                        }
                        Some(Err(e)) => warn!(error = %e, "Terminal event error"),
                        None => break,
                    }
                }
            }
        }

        Ok(())
    }

    /// Applies `first` and everything already queued behind it.
    fn drain_events(&mut self, first: GalleryEvent) -> bool {
        let mut changed = self.view.apply(first);
        while let Ok(event) = self.event_rx.try_recv() {
            changed |= self.view.apply(event);
        }
        changed
    }

    fn handle_terminal_event(&mut self, event: &Event) -> EventResult {
        let Event::Key(key) = event else {
            return EventResult::Continue;
        };
        match EventHandler::action_for(key, self.view.is_enlarged_open()) {
            Some(action) => self.handle_action(action),
            None => EventResult::Continue,
        }
    }

    fn handle_action(&mut self, action: GalleryAction) -> EventResult {
        match action {
            GalleryAction::Quit => return EventResult::Exit,
            GalleryAction::Reload => self.start_load(),
            GalleryAction::Open => {
                if let Some(activation) = self.view.selected_activation() {
                    self.open_enlarged(activation);
                }
            }
            GalleryAction::Close => self.close_enlarged(),
            GalleryAction::Move(direction) => self.view.move_selection(direction),
        }
        EventResult::Continue
    }

    fn renderer(&self) -> Arc<ChannelRenderer> {
        Arc::new(ChannelRenderer::new(self.generation, self.event_tx.clone()))
    }

    /// Cancels any running load and starts a fresh one.
    fn start_load(&mut self) {
        if let Some(task) = self.gallery_task.take() {
            task.abort();
        }
        self.close_enlarged();

        self.generation += 1;
        self.view.reset(self.generation);
        self.images.clear();
        debug!(generation = self.generation, "Starting gallery load");

        let renderer = self.renderer();
        let use_case = Arc::clone(&self.load_gallery);
        self.gallery_task = Some(tokio::spawn(async move {
            match use_case.execute(renderer.as_ref()).await {
                Ok(summary) => debug!(%summary, "Gallery task finished"),
                Err(e) => warn!(error = %e, "Gallery load failed"),
            }
        }));
    }

    fn open_enlarged(&mut self, activation: Activation) {
        if let Some(task) = self.enlarged_task.take() {
            task.abort();
        }
        self.view.open_enlarged(&activation);

        let renderer = self.renderer();
        let use_case = Arc::clone(&self.enlarged_view);
        self.enlarged_task = Some(tokio::spawn(async move {
            // Failures already reach the view through the renderer.
            match use_case.open(&activation, renderer.as_ref()).await {
                Ok(loaded) => debug!(id = %loaded.id, "Enlarged image ready"),
                Err(e) => debug!(id = %activation.image.id, error = %e, "Enlarged image failed"),
            }
        }));
    }

    fn close_enlarged(&mut self) {
        if let Some(task) = self.enlarged_task.take() {
            task.abort();
        }
        if self.view.is_enlarged_open() {
            self.enlarged_view.close(self.renderer().as_ref());
        }
        self.view.close_enlarged();
        self.images.close_enlarged();
    }

    fn shutdown(&mut self) {
        for task in [self.gallery_task.take(), self.enlarged_task.take()]
            .into_iter()
            .flatten()
        {
            task.abort();
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        frame.render_stateful_widget(
            GalleryScreen::new(&mut self.images),
            frame.area(),
            &mut self.view,
        );
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("generation", &self.generation)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}
