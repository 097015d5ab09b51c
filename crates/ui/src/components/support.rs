use crate::{layout::centered_rect, theme::Theme};

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const SUPPORT_URL: &str = "https://www.buymeacoffee.com/voynow";

/// Centered support overlay, toggled from the chat screen.
pub struct SupportModal;

impl SupportModal {
    pub fn render(frame: &mut Frame<'_>, area: Rect) {
        let popup = centered_rect(56, 9, area);
        frame.render_widget(Clear, popup);

        let lines = vec![
            Line::default(),
            Line::from(Span::styled("SUPPORT THIS PROJECT", Style::default().fg(Theme::AMBER))),
            Line::default(),
            Line::from(Span::styled(
                "Keeping the archives online costs real money.",
                Theme::panel(),
            )),
            Line::from(Span::styled(SUPPORT_URL, Style::default().fg(Theme::GREEN).bg(Theme::PANEL_BG))),
            Line::default(),
            Line::from(Span::styled("[esc] close", Style::default().fg(Theme::MUTED).bg(Theme::PANEL_BG))),
        ];

        let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border())
                .style(Theme::panel()),
        );
        frame.render_widget(paragraph, popup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_support_url_is_https() {
        assert!(SUPPORT_URL.starts_with("https://"));
    }
}
