use crate::{state::AppState, theme::Theme};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const INPUT_PLACEHOLDER: &str = "Type your message...";

/// Chat screen footer: input card with accent bar, then a status line
/// (streaming indicator / backend error) and key hints.
pub struct Footer<'a> {
    state: &'a AppState,
}

impl<'a> Footer<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(1)])
            .split(area);

        self.render_input_card(frame, rows[0]);
        self.render_status_line(frame, rows[1]);
    }

    fn render_input_card(&self, frame: &mut Frame<'_>, area: Rect) {
        if area.width < 10 || area.height < 1 {
            return;
        }

        frame.render_widget(Block::default().style(Style::default().bg(Theme::PANEL_BG)), area);

        let accent_color = if self.state.is_streaming() { Theme::AMBER } else { Theme::GREEN };
        let accent = Rect { width: 1, ..area };
        frame.render_widget(Block::default().style(Style::default().bg(accent_color)), accent);

        let input_area = Rect { x: area.x + 2, y: area.y + 1, width: area.width.saturating_sub(3), height: 1 };

        let mut spans = Vec::new();
        if self.state.input.buffer.is_empty() {
            let placeholder = if self.state.input.is_navigating_history() {
                "<no message>"
            } else {
                INPUT_PLACEHOLDER
            };
            spans.push(Span::styled("█", Style::default().bg(Theme::FG).fg(Theme::FG)));
            spans.push(Span::styled(placeholder, Style::default().fg(Theme::MUTED).bg(Theme::PANEL_BG)));
        } else {
            let input_style = Style::default().fg(Theme::FG).bg(Theme::PANEL_BG);
            let cursor = self.state.input.cursor.min(self.state.input.buffer.len());
            let (before, after) = self.state.input.buffer.split_at(cursor);

            if !before.is_empty() {
                spans.push(Span::styled(before.to_string(), input_style));
            }
            spans.push(Span::styled("█", Style::default().bg(Theme::FG).fg(Theme::FG)));
            if !after.is_empty() {
                spans.push(Span::styled(after.to_string(), input_style));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), input_area);
    }

    fn render_status_line(&self, frame: &mut Frame<'_>, area: Rect) {
        if area.height == 0 {
            return;
        }

        let status = if self.state.is_streaming() {
            let frame_idx = (self.state.tick / 2) as usize % SPINNER.len();
            Line::from(vec![
                Span::styled(format!(" {} ", SPINNER[frame_idx]), Style::default().fg(Theme::AMBER)),
                Span::styled("querying the archives...", Theme::muted()),
            ])
        } else if let Some(error) = self.state.session.last_backend_error() {
            Line::from(vec![
                Span::styled(" archive: ", Theme::muted()),
                Span::styled(error.to_string(), Theme::annotation()),
            ])
        } else {
            Line::default()
        };

        frame.render_widget(Paragraph::new(status).alignment(Alignment::Left), area);

        let hints = Line::from(vec![
            Span::styled("[enter]", Style::default().fg(Theme::GREEN)),
            Span::styled(" send  ", Theme::muted()),
            Span::styled("[ctrl+d]", Style::default().fg(Theme::GREEN)),
            Span::styled(" documents  ", Theme::muted()),
            Span::styled("[ctrl+s]", Style::default().fg(Theme::GREEN)),
            Span::styled(" support  ", Theme::muted()),
            Span::styled("[esc]", Style::default().fg(Theme::GREEN)),
            Span::styled(" back ", Theme::muted()),
        ]);
        frame.render_widget(Paragraph::new(hints).alignment(Alignment::Right), area);
    }
}
