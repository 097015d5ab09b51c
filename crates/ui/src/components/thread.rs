use crate::{state::AppState, theme::Theme};

use dossier_core::{Author, Message};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

/// Message thread: author-tagged messages with streamed content, a
/// pulsing placeholder while a response is pending, and annotation rows
/// for response time and cited documents.
pub struct Thread<'a> {
    state: &'a AppState,
}

impl<'a> Thread<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        frame.render_widget(Block::default().style(Theme::base()), area);
        if area.width < 6 || area.height == 0 {
            return;
        }

        let lines = self.build_lines(area.width.saturating_sub(4) as usize);

        // follow the tail unless the user scrolled up
        let visible = area.height as usize;
        let offset = (self.state.thread_scroll as usize).min(lines.len().saturating_sub(visible));
        let end = lines.len() - offset;
        let start = end.saturating_sub(visible);

        let paragraph = Paragraph::new(lines[start..end].to_vec());
        let inner = Rect { x: area.x + 2, width: area.width.saturating_sub(4), ..area };
        frame.render_widget(paragraph, inner);
    }

    /// Lay the transcript out as styled lines at the given wrap width.
    fn build_lines(&self, width: usize) -> Vec<Line<'static>> {
        let messages = self.state.session.transcript().messages();
        let mut lines: Vec<Line<'static>> = Vec::new();
        let width = width.max(16);

        for (idx, message) in messages.iter().enumerate() {
            let is_tail = idx + 1 == messages.len();

            lines.push(author_tag(message));

            if message.is_archive() && message.content.is_empty() {
                if is_tail && self.state.is_streaming() {
                    lines.push(self.pulse_line());
                }
            } else {
                let style = match message.author {
                    Author::User => Theme::base(),
                    Author::Archive => Style::default().fg(Theme::FG).bg(Theme::BG),
                };
                for wrapped in textwrap::wrap(&message.content, width) {
                    lines.push(Line::from(Span::styled(wrapped.into_owned(), style)));
                }
            }

            if let Some(time) = &message.response_time {
                lines.push(Line::from(Span::styled(
                    format!("response time: {}", time),
                    Theme::muted(),
                )));
            }

            if message.has_documents() {
                let count = message.documents.as_ref().map(|d| d.len()).unwrap_or(0);
                lines.push(Line::from(vec![
                    Span::styled("[ctrl+d] ", Style::default().fg(Theme::GREEN)),
                    Span::styled(format!("inspect documents ({})", count), Theme::muted()),
                ]));
            }

            lines.push(Line::default());
        }

        lines
    }

    /// Pulsing dots shown while the archive response is still empty
    fn pulse_line(&self) -> Line<'static> {
        let lit = (self.state.tick / 2) as usize % 3;
        let mut spans = Vec::new();
        for i in 0..3 {
            let color = if i == lit { Theme::GREEN } else { Theme::GREEN_DIM };
            spans.push(Span::styled("● ", Style::default().fg(color)));
        }
        Line::from(spans)
    }
}

fn author_tag(message: &Message) -> Line<'static> {
    match message.author {
        Author::User => Line::from(Span::styled("YOU", Theme::muted())),
        Author::Archive => Line::from(Span::styled("ARCHIVE", Style::default().fg(Theme::GREEN))),
    }
}
