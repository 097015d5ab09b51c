use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout breakpoints for responsive TUI
///
/// Based on terminal width, we render different layouts:
/// - >= 100 cols: Full layout, document panel may open
/// - 80-99 cols: Medium layout, document panel fills the whole screen
/// - < 80 cols: Compact layout, minimal chrome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Full layout (>= 100 columns)
    Full,
    /// Medium layout (80-99 columns)
    Medium,
    /// Compact layout (<= 79 columns)
    Compact,
}

impl From<u16> for LayoutMode {
    fn from(width: u16) -> Self {
        match width {
            w if w >= 100 => Self::Full,
            w if w >= 80 => Self::Medium,
            _ => Self::Compact,
        }
    }
}

impl LayoutMode {
    /// Whether the document panel opens beside the thread (Full) or
    /// replaces it (narrower modes)
    pub fn panel_splits(&self) -> bool {
        matches!(self, Self::Full)
    }
}

/// Calculated layout for the chat screen
#[derive(Debug, Clone)]
pub struct ChatLayout {
    pub mode: LayoutMode,
    /// Header bar (1 line)
    pub header: Rect,
    /// Message thread
    pub thread: Rect,
    /// Document panel column (only while a document is open)
    pub panel: Option<Rect>,
    /// Footer: input card + status line (4 lines)
    pub footer: Rect,
}

impl ChatLayout {
    /// Calculate layout based on terminal size and panel visibility
    pub fn calculate(area: Rect, panel_open: bool) -> Self {
        let mode = LayoutMode::from(area.width);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(4)])
            .split(area);

        let header = chunks[0];
        let main = chunks[1];
        let footer = chunks[2];

        let (panel, thread) = if panel_open {
            if mode.panel_splits() {
                // panel takes the left half, like the web original
                let main_chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Min(0)])
                    .split(main);
                (Some(main_chunks[0]), main_chunks[1])
            } else {
                (Some(main), main)
            }
        } else {
            (None, main)
        };

        Self { mode, header, thread, panel, footer }
    }
}

/// Vertical sections of the document panel
#[derive(Debug, Clone)]
pub struct PanelSections {
    /// Path + close hint (1 line)
    pub header: Rect,
    /// Metadata strip: id / classification / date (3 lines)
    pub meta: Rect,
    /// Document selector tabs (1 line)
    pub tabs: Rect,
    /// Scrollable document body
    pub body: Rect,
}

impl PanelSections {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        Self { header: chunks[0], meta: chunks[1], tabs: chunks[2], body: chunks[3] }
    }
}

/// Centered popup rect for overlays (support modal)
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_mode_breakpoints() {
        assert_eq!(LayoutMode::from(120), LayoutMode::Full);
        assert_eq!(LayoutMode::from(100), LayoutMode::Full);
        assert_eq!(LayoutMode::from(99), LayoutMode::Medium);
        assert_eq!(LayoutMode::from(80), LayoutMode::Medium);
        assert_eq!(LayoutMode::from(79), LayoutMode::Compact);
    }

    #[test]
    fn test_chat_layout_without_panel() {
        let layout = ChatLayout::calculate(Rect::new(0, 0, 120, 40), false);

        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.footer.height, 4);
        assert!(layout.panel.is_none());
        assert_eq!(layout.thread.height, 35);
    }

    #[test]
    fn test_chat_layout_panel_splits_in_full_mode() {
        let layout = ChatLayout::calculate(Rect::new(0, 0, 120, 40), true);

        let panel = layout.panel.unwrap();
        assert_eq!(panel.width, 60);
        assert_eq!(layout.thread.x, 60);
    }

    #[test]
    fn test_chat_layout_panel_covers_thread_when_narrow() {
        let layout = ChatLayout::calculate(Rect::new(0, 0, 90, 40), true);

        let panel = layout.panel.unwrap();
        assert_eq!(panel.width, 90);
        assert_eq!(layout.thread, panel);
    }

    #[test]
    fn test_panel_sections() {
        let sections = PanelSections::new(Rect::new(0, 0, 60, 30));

        assert_eq!(sections.header.height, 1);
        assert_eq!(sections.meta.height, 3);
        assert_eq!(sections.tabs.height, 1);
        assert_eq!(sections.body.height, 25);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(50, 10, area);

        assert_eq!(popup.x, 25);
        assert_eq!(popup.y, 15);
        assert_eq!(popup.width, 50);
        assert_eq!(popup.height, 10);
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 8);
        let popup = centered_rect(50, 10, area);

        assert_eq!(popup.width, 30);
        assert_eq!(popup.height, 8);
    }
}
