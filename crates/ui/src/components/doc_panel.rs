use crate::{layout::PanelSections, state::AppState, theme::Theme};

use dossier_core::docmeta;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

/// Cited-documents side panel: path header, metadata strip, selector
/// tabs, and the scrollable document body.
pub struct DocPanel<'a> {
    state: &'a AppState,
}

impl<'a> DocPanel<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let Some(document) = self.state.panel.current() else {
            return;
        };

        frame.render_widget(Block::default().style(Theme::panel()), area);
        let sections = PanelSections::new(area);

        // header: path on the left, close hint on the right
        let header = Line::from(vec![
            Span::styled(" ", Theme::panel()),
            Span::styled(document.path.clone(), Style::default().fg(Theme::GREEN).bg(Theme::PANEL_BG)),
        ]);
        frame.render_widget(Paragraph::new(header), sections.header);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "[esc] close ",
                Style::default().fg(Theme::MUTED).bg(Theme::PANEL_BG),
            )))
            .alignment(Alignment::Right),
            sections.header,
        );

        self.render_meta(frame, sections.meta);
        self.render_tabs(frame, sections.tabs);
        self.render_body(frame, sections.body);
    }

    fn render_meta(&self, frame: &mut Frame<'_>, area: Rect) {
        let Some(document) = self.state.panel.current() else {
            return;
        };

        let classification = docmeta::classification(document).unwrap_or_else(|| "Unclassified".to_string());
        let date = docmeta::first_date(document).unwrap_or_else(|| "Unknown".to_string());

        let lines = vec![
            Line::from(vec![
                Span::styled(" Document ID:    ", meta_label()),
                Span::styled(docmeta::document_id(&document.path), meta_value(Theme::GREEN)),
            ]),
            Line::from(vec![
                Span::styled(" Classification: ", meta_label()),
                Span::styled(
                    classification.clone(),
                    Style::default()
                        .fg(Theme::classification_color(&classification))
                        .bg(Theme::PANEL_BG),
                ),
            ]),
            Line::from(vec![
                Span::styled(" Date:           ", meta_label()),
                Span::styled(date, meta_value(Theme::GREEN)),
            ]),
        ];

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_tabs(&self, frame: &mut Frame<'_>, area: Rect) {
        let mut spans = vec![Span::styled(" ", Theme::panel())];
        for idx in 0..self.state.panel.documents.len() {
            let style = if idx == self.state.panel.selected {
                Style::default().fg(Theme::GREEN).bg(Theme::ACTIVE)
            } else {
                Style::default().fg(Theme::GREEN_DIM).bg(Theme::PANEL_BG)
            };
            spans.push(Span::styled(format!(" Doc {} ", idx + 1), style));
            spans.push(Span::styled(" ", Theme::panel()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_body(&self, frame: &mut Frame<'_>, area: Rect) {
        let Some(document) = self.state.panel.current() else {
            return;
        };
        if area.width < 6 || area.height == 0 {
            return;
        }

        let width = area.width.saturating_sub(4) as usize;
        let lines: Vec<Line<'static>> = textwrap::wrap(&document.text, width.max(16))
            .into_iter()
            .map(|l| Line::from(Span::styled(l.into_owned(), Theme::panel())))
            .collect();

        let max_scroll = lines.len().saturating_sub(area.height as usize);
        let offset = (self.state.panel.scroll as usize).min(max_scroll);

        let visible: Vec<Line<'static>> =
            lines.into_iter().skip(offset).take(area.height as usize).collect();
        let inner = Rect { x: area.x + 2, width: area.width.saturating_sub(4), ..area };
        frame.render_widget(Paragraph::new(visible), inner);
    }
}

fn meta_label() -> Style {
    Style::default().fg(Theme::MUTED).bg(Theme::PANEL_BG)
}

fn meta_value(color: ratatui::style::Color) -> Style {
    Style::default().fg(color).bg(Theme::PANEL_BG)
}
