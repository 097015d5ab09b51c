use crate::{state::AppState, theme::Theme};

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use unicode_width::UnicodeWidthStr;

/// Chat screen header: title with a live indicator on the left, today's
/// date on the right.
pub struct Header<'a> {
    state: &'a AppState,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        if area.height == 0 {
            return;
        }

        let indicator = if self.state.is_streaming() {
            Span::styled(" ●", Style::default().fg(Theme::AMBER))
        } else {
            Span::styled(" ●", Style::default().fg(Theme::GREEN_DIM))
        };

        let mut line = Line::from(vec![
            Span::styled(" ← ", Theme::muted()),
            Span::styled("JFK FILES", Style::default().fg(Theme::FG)),
            indicator,
        ]);

        let left_width = line.spans.iter().map(|s| s.content.width()).sum::<usize>() as u16;
        let date = chrono::Local::now().format("%b %-d, %Y").to_string();
        let date_width = date.width() as u16;

        if area.width > left_width + date_width + 1 {
            let pad = area.width - left_width - date_width - 1;
            line.spans.push(Span::styled(" ".repeat(pad as usize), Theme::base()));
            line.spans.push(Span::styled(date, Theme::muted()));
        }

        let paragraph = Paragraph::new(line).block(Block::default().style(Theme::base()));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_new() {
        let state = AppState::default();
        let header = Header::new(&state);
        assert!(!header.state.is_streaming());
    }
}
