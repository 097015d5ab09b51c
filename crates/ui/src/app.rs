use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Frame, Terminal, backend::CrosstermBackend, widgets::Block};
use tokio::sync::mpsc;

use dossier_core::{Error, Result};
use dossier_protocol::{Backend, StreamEvent};

use crate::components::{DocPanel, Footer, Header, Landing, SupportModal, Thread};
use crate::event::KeyAction;
use crate::layout::ChatLayout;
use crate::state::{AppState, QUICK_PROMPTS, Screen};
use crate::theme::Theme;

/// Main TUI application.
///
/// Owns the session state and the backend handle. Stream events produced
/// by the in-flight request are forwarded over an mpsc channel and
/// applied on the render loop, so all state mutation stays on one task.
pub struct App {
    state: AppState,
    backend: Arc<dyn Backend>,
    events_tx: mpsc::UnboundedSender<StreamEvent>,
    events_rx: mpsc::UnboundedReceiver<StreamEvent>,
}

impl App {
    pub fn new(backend: Arc<dyn Backend>, retain: usize) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self { state: AppState::new(retain), backend, events_tx, events_rx }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Run the TUI until the user quits
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        let result = self.event_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        while !self.state.should_quit {
            self.drain_stream_events();

            terminal.draw(|frame| draw(frame, &self.state))?;
            self.state.tick = self.state.tick.wrapping_add(1);

            if event::poll(Duration::from_millis(50))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                let action = KeyAction::from_key(key, &self.state);
                self.apply_action(action);
            }
        }
        Ok(())
    }

    /// Apply every stream event queued since the last frame
    pub fn drain_stream_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.state.session.apply_event(event);
        }
    }

    pub fn apply_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => self.state.should_quit = true,
            KeyAction::Back => self.back(),
            KeyAction::Submit => self.submit(),
            KeyAction::Insert(c) => {
                self.state.input.insert_char(c);
                self.state.input.reset_history_navigation();
            }
            KeyAction::Backspace => {
                self.state.input.backspace();
                self.state.input.reset_history_navigation();
            }
            KeyAction::Delete => self.state.input.delete(),
            KeyAction::MoveLeft => self.state.input.move_left(),
            KeyAction::MoveRight => self.state.input.move_right(),
            KeyAction::MoveHome => self.state.input.move_home(),
            KeyAction::MoveEnd => self.state.input.move_end(),
            KeyAction::HistoryPrev => self.state.input.navigate_up(),
            KeyAction::HistoryNext => self.state.input.navigate_down(),
            KeyAction::OpenDocuments => self.state.open_latest_documents(),
            KeyAction::NextDocument => self.state.panel.next_document(),
            KeyAction::PrevDocument => self.state.panel.prev_document(),
            KeyAction::ScrollUp => {
                if self.state.panel.open {
                    self.state.panel.scroll_up();
                } else {
                    self.state.thread_scroll = self.state.thread_scroll.saturating_add(1);
                }
            }
            KeyAction::ScrollDown => {
                if self.state.panel.open {
                    self.state.panel.scroll_down();
                } else {
                    self.state.thread_scroll = self.state.thread_scroll.saturating_sub(1);
                }
            }
            KeyAction::ToggleSupport => self.state.support_open = !self.state.support_open,
            KeyAction::QuickPrompt(idx) => {
                if let Some(prompt) = QUICK_PROMPTS.get(idx) {
                    self.state.input.set(*prompt);
                }
            }
            KeyAction::Ignore => {}
        }
    }

    /// Submit the composed input: stage the exchange on the session and
    /// spawn the streaming request, forwarding its events to the loop.
    /// Empty input and submissions while streaming are no-ops.
    fn submit(&mut self) {
        let text = self.state.input.buffer.clone();

        match self.state.session.begin_exchange(&text) {
            Ok(query) => {
                self.state.input.add_to_history(query.text.clone());
                self.state.input.clear();
                self.state.screen = Screen::Chat;
                self.state.thread_scroll = 0;

                let backend = Arc::clone(&self.backend);
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    match backend.stream_query(query).await {
                        Ok(mut stream) => {
                            while let Some(event) = stream.next().await {
                                if tx.send(event).is_err() {
                                    break;
                                }
                            }
                        }
                        Err(e) => {
                            let _ = tx.send(StreamEvent::TransportError(e.to_string()));
                        }
                    }
                });
            }
            Err(Error::EmptyInput | Error::Busy) => {}
            Err(e) => tracing::warn!("submission failed: {}", e),
        }
    }

    fn back(&mut self) {
        if self.state.support_open {
            self.state.support_open = false;
        } else if self.state.panel.open {
            self.state.panel.close();
        } else if self.state.screen == Screen::Chat {
            self.state.screen = Screen::Landing;
        } else {
            self.state.should_quit = true;
        }
    }
}

fn draw(frame: &mut Frame<'_>, state: &AppState) {
    match state.screen {
        Screen::Landing => Landing::new(state, frame.area()).render(frame),
        Screen::Chat => {
            frame.render_widget(Block::default().style(Theme::base()), frame.area());
            let layout = ChatLayout::calculate(frame.area(), state.panel.open);

            Header::new(state).render(frame, layout.header);
            Thread::new(state).render(frame, layout.thread);
            if let Some(panel_area) = layout.panel {
                DocPanel::new(state).render(frame, panel_area);
            }
            Footer::new(state).render(frame, layout.footer);
        }
    }

    if state.support_open {
        SupportModal::render(frame, frame.area());
    }
}
