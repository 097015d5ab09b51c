use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::state::{AppState, Screen};

/// High-level action mapped from a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Exit the application
    Quit,
    /// Context-dependent step back: close overlay/panel, leave chat,
    /// quit from the landing screen
    Back,
    /// Submit the composed input
    Submit,
    Insert(char),
    Backspace,
    Delete,
    MoveLeft,
    MoveRight,
    MoveHome,
    MoveEnd,
    /// Older submitted message into the composer
    HistoryPrev,
    /// Newer submitted message into the composer
    HistoryNext,
    /// Open the cited-documents panel for the latest cited response
    OpenDocuments,
    NextDocument,
    PrevDocument,
    ScrollUp,
    ScrollDown,
    ToggleSupport,
    /// Fill the composer with a canned landing prompt
    QuickPrompt(usize),
    Ignore,
}

impl KeyAction {
    /// Map a key press to an action given the current UI mode.
    ///
    /// The composer is always live; panel and overlay modes only claim
    /// the navigation keys (Esc, Tab, Up/Down).
    pub fn from_key(key: KeyEvent, state: &AppState) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if state.support_open {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => KeyAction::ToggleSupport,
                _ => KeyAction::Ignore,
            };
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('d') => KeyAction::OpenDocuments,
                KeyCode::Char('s') => KeyAction::ToggleSupport,
                _ => KeyAction::Ignore,
            };
        }

        if state.panel.open {
            match key.code {
                KeyCode::Esc => return KeyAction::Back,
                KeyCode::Tab => return KeyAction::NextDocument,
                KeyCode::BackTab => return KeyAction::PrevDocument,
                KeyCode::Up => return KeyAction::ScrollUp,
                KeyCode::Down => return KeyAction::ScrollDown,
                _ => {}
            }
        }

        match key.code {
            KeyCode::Enter => KeyAction::Submit,
            KeyCode::Esc => KeyAction::Back,
            KeyCode::Backspace => KeyAction::Backspace,
            KeyCode::Delete => KeyAction::Delete,
            KeyCode::Left => KeyAction::MoveLeft,
            KeyCode::Right => KeyAction::MoveRight,
            KeyCode::Home => KeyAction::MoveHome,
            KeyCode::End => KeyAction::MoveEnd,
            KeyCode::Up => KeyAction::HistoryPrev,
            KeyCode::Down => KeyAction::HistoryNext,
            KeyCode::PageUp => KeyAction::ScrollUp,
            KeyCode::PageDown => KeyAction::ScrollDown,
            KeyCode::Char(c) => {
                if state.screen == Screen::Landing && state.input.buffer.is_empty() {
                    if let Some(idx) = c.to_digit(10)
                        && (1..=3).contains(&idx)
                    {
                        return KeyAction::QuickPrompt(idx as usize - 1);
                    }
                }
                KeyAction::Insert(c)
            }
            _ => KeyAction::Ignore,
        }
    }
}
