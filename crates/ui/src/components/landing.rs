use crate::{
    layout::LayoutMode,
    state::{AppState, QUICK_PROMPTS},
    theme::Theme,
};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

const TITLE: &str = "JFK ASSASSINATION FILES";
const SUBTITLE: &str = "Declassified and ready for querying...";
const ATTRIBUTION: &str = "National Archives and Records Administration";
const INPUT_PLACEHOLDER: &str = "Ask a question...";
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Stat tiles shown under the title, as on the original landing page
const STATS: [(&str, &str); 3] = [
    ("14,000+", "Documents"),
    ("1963-1964", "Time Period"),
    ("Jan 23rd 2025", "Archives Unlocked"),
];

/// Landing screen: status line, centered title card with stat tiles and
/// quick prompts, input card at the bottom.
pub struct Landing<'a> {
    state: &'a AppState,
    mode: LayoutMode,
}

impl<'a> Landing<'a> {
    pub fn new(state: &'a AppState, area: Rect) -> Self {
        Self { state, mode: LayoutMode::from(area.width) }
    }

    pub fn render(&self, frame: &mut Frame<'_>) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Theme::base()), area);

        self.render_status_line(frame, area);
        self.render_card(frame, area);
        self.render_footer(frame, area);
    }

    fn render_status_line(&self, frame: &mut Frame<'_>, area: Rect) {
        if area.height < 1 {
            return;
        }
        let line = Line::from(vec![
            Span::styled(" ● ", Style::default().fg(Theme::GREEN_DIM)),
            Span::styled("System Online", Theme::muted()),
        ]);
        frame.render_widget(Paragraph::new(line), Rect { height: 1, ..area });
    }

    fn render_card(&self, frame: &mut Frame<'_>, area: Rect) {
        let card_width = 72.min(area.width.saturating_sub(4));
        let card_height = 14.min(area.height.saturating_sub(8));
        let card = Rect {
            x: area.x + (area.width.saturating_sub(card_width)) / 2,
            y: area.y + (area.height.saturating_sub(card_height + 6)) / 2,
            width: card_width,
            height: card_height,
        };

        let mut lines = vec![
            Line::default(),
            Line::from(Span::styled(TITLE, Theme::archive())),
            Line::from(Span::styled(SUBTITLE, Theme::muted())),
            Line::default(),
        ];

        if self.mode != LayoutMode::Compact {
            lines.push(self.stats_line());
            lines.push(Line::default());
        }

        for (idx, prompt) in QUICK_PROMPTS.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("[{}] ", idx + 1), Style::default().fg(Theme::GREEN)),
                Span::styled(*prompt, Theme::base()),
            ]));
        }

        let content = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(content, card);
    }

    fn stats_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (idx, (value, label)) in STATS.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::styled("   |   ", Theme::border()));
            }
            spans.push(Span::styled(*value, Style::default().fg(Theme::GREEN)));
            spans.push(Span::styled(format!(" {}", label), Theme::muted()));
        }
        Line::from(spans)
    }

    fn render_footer(&self, frame: &mut Frame<'_>, area: Rect) {
        let footer_height = 4;
        if area.height <= footer_height {
            return;
        }
        let footer = Rect {
            x: area.x,
            y: area.y + area.height - footer_height,
            width: area.width,
            height: footer_height,
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(1)])
            .split(footer);

        self.render_input_card(frame, rows[0]);

        let hints = Rect { x: rows[1].x + 2, y: rows[1].y, width: rows[1].width.saturating_sub(4), height: 1 };
        let left = Paragraph::new(Line::from(Span::styled(
            format!("dossier v{}  {}", VERSION, ATTRIBUTION),
            Theme::muted(),
        )))
        .alignment(Alignment::Left);
        let right = Paragraph::new(Line::from(vec![
            Span::styled("enter", Style::default().fg(Theme::GREEN)),
            Span::styled(" begin investigation  ", Theme::muted()),
            Span::styled("esc", Style::default().fg(Theme::GREEN)),
            Span::styled(" quit", Theme::muted()),
        ]))
        .alignment(Alignment::Right);

        let half = hints.width / 2;
        frame.render_widget(left, Rect { width: half, ..hints });
        frame.render_widget(right, Rect { x: hints.x + half, width: hints.width - half, ..hints });
    }

    fn render_input_card(&self, frame: &mut Frame<'_>, area: Rect) {
        if area.width < 10 || area.height < 1 {
            return;
        }

        frame.render_widget(Block::default().style(Style::default().bg(Theme::ACTIVE)), area);

        let accent = Rect { width: 1, ..area };
        frame.render_widget(Block::default().style(Style::default().bg(Theme::GREEN)), accent);

        let input_area = Rect { x: area.x + 2, y: area.y + 1, width: area.width.saturating_sub(3), height: 1 };

        let mut spans = Vec::new();
        if self.state.input.buffer.is_empty() {
            spans.push(Span::styled("█", Style::default().bg(Theme::FG).fg(Theme::FG)));
            spans.push(Span::styled(
                INPUT_PLACEHOLDER,
                Style::default().fg(Theme::MUTED).bg(Theme::ACTIVE),
            ));
        } else {
            let input_style = Style::default().fg(Theme::FG).bg(Theme::ACTIVE);
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
}
