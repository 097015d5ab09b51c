pub mod input;

pub use input::InputState;

use dossier_core::CitedDocument;
use dossier_session::ChatSession;

/// Canned questions offered on the landing screen
pub const QUICK_PROMPTS: [&str; 3] = [
    "Who killed JFK?",
    "Tell me about the Warren Commission",
    "What happened on November 22, 1963?",
];

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Landing card with stats and quick prompts
    #[default]
    Landing,
    /// Message thread
    Chat,
}

/// State of the cited-documents side panel
#[derive(Debug, Clone, Default)]
pub struct PanelState {
    pub open: bool,
    pub documents: Vec<CitedDocument>,
    pub selected: usize,
    pub scroll: u16,
}

impl PanelState {
    /// Open the panel on the first document of the given set
    pub fn open_with(&mut self, documents: Vec<CitedDocument>) {
        if documents.is_empty() {
            return;
        }
        self.documents = documents;
        self.selected = 0;
        self.scroll = 0;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.scroll = 0;
    }

    pub fn current(&self) -> Option<&CitedDocument> {
        self.documents.get(self.selected)
    }

    pub fn next_document(&mut self) {
        if !self.documents.is_empty() {
            self.selected = (self.selected + 1) % self.documents.len();
            self.scroll = 0;
        }
    }

    pub fn prev_document(&mut self) {
        if !self.documents.is_empty() {
            self.selected = (self.selected + self.documents.len() - 1) % self.documents.len();
            self.scroll = 0;
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

/// Top-level TUI state
#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub input: InputState,
    pub session: ChatSession,
    pub panel: PanelState,
    pub support_open: bool,
    pub should_quit: bool,
    /// Thread scroll offset, in lines up from the bottom
    pub thread_scroll: u16,
    /// Render tick, drives the streaming placeholder animation
    pub tick: u64,
}

impl AppState {
    pub fn new(retain: usize) -> Self {
        Self {
            screen: Screen::default(),
            input: InputState::new(),
            session: ChatSession::new(retain),
            panel: PanelState::default(),
            support_open: false,
            should_quit: false,
            thread_scroll: 0,
            tick: 0,
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.session.is_streaming()
    }

    /// Open the document panel on the latest archive message that cites
    /// documents, if any.
    pub fn open_latest_documents(&mut self) {
        let documents = self
            .session
            .transcript()
            .messages()
            .iter()
            .rev()
            .find(|m| m.is_archive() && m.has_documents())
            .and_then(|m| m.documents.clone());

        if let Some(documents) = documents {
            self.panel.open_with(documents);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(dossier_core::DEFAULT_RETAIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_protocol::StreamEvent;

    #[test]
    fn test_app_state_defaults() {
        let state = AppState::default();
        assert_eq!(state.screen, Screen::Landing);
        assert!(!state.is_streaming());
        assert!(!state.panel.open);
        assert!(!state.support_open);
    }

    #[test]
    fn test_panel_open_with_documents() {
        let mut panel = PanelState::default();
        panel.open_with(vec![
            CitedDocument::new("a.txt", "alpha"),
            CitedDocument::new("b.txt", "beta"),
        ]);

        assert!(panel.open);
        assert_eq!(panel.current().unwrap().path, "a.txt");

        panel.next_document();
        assert_eq!(panel.current().unwrap().path, "b.txt");
        panel.next_document();
        assert_eq!(panel.current().unwrap().path, "a.txt");

        panel.prev_document();
        assert_eq!(panel.current().unwrap().path, "b.txt");
    }

    #[test]
    fn test_panel_ignores_empty_document_set() {
        let mut panel = PanelState::default();
        panel.open_with(vec![]);
        assert!(!panel.open);
    }

    #[test]
    fn test_tab_switch_resets_scroll() {
        let mut panel = PanelState::default();
        panel.open_with(vec![
            CitedDocument::new("a.txt", "alpha"),
            CitedDocument::new("b.txt", "beta"),
        ]);
        panel.scroll_down();
        panel.scroll_down();
        assert_eq!(panel.scroll, 2);

        panel.next_document();
        assert_eq!(panel.scroll, 0);
    }

    #[test]
    fn test_open_latest_documents_picks_newest_cited_message() {
        let mut state = AppState::default();

        state.session.begin_exchange("q1").unwrap();
        state
            .session
            .apply_event(StreamEvent::documents(vec![CitedDocument::new("old.txt", "old")]));
        state.session.apply_event(StreamEvent::Done);

        state.session.begin_exchange("q2").unwrap();
        state
            .session
            .apply_event(StreamEvent::documents(vec![CitedDocument::new("new.txt", "new")]));
        state.session.apply_event(StreamEvent::Done);

        state.open_latest_documents();
        assert!(state.panel.open);
        assert_eq!(state.panel.current().unwrap().path, "new.txt");
    }

    #[test]
    fn test_open_latest_documents_noop_without_citations() {
        let mut state = AppState::default();
        state.open_latest_documents();
        assert!(!state.panel.open);
    }

    #[test]
    fn test_quick_prompts_present() {
        assert_eq!(QUICK_PROMPTS.len(), 3);
        assert!(QUICK_PROMPTS[0].contains("JFK"));
    }
}
