use ratatui::style::{Color, Style};
use ratatui::text::Span;

/// Phosphor terminal theme for the dossier TUI
///
/// Dark gray-green look modeled on the archive's reading-room styling:
/// near-black background, green accents for archive output, amber for
/// annotations and classification stamps.
#[derive(Debug, Clone, Copy)]
pub struct Theme;

impl Theme {
    /// Primary background: near-black (fills terminal)
    pub const BG: Color = Color::Rgb(10, 12, 14);

    /// Foreground: light gray (primary text)
    pub const FG: Color = Color::Rgb(225, 228, 230);

    /// Secondary background: dark gray (panels, cards, input)
    pub const PANEL_BG: Color = Color::Rgb(22, 26, 29);

    /// Hover/active states
    pub const ACTIVE: Color = Color::Rgb(35, 42, 46);

    /// Archive accent: phosphor green
    pub const GREEN: Color = Color::Rgb(94, 190, 120);

    /// Dim green for secondary archive chrome
    pub const GREEN_DIM: Color = Color::Rgb(52, 96, 64);

    /// Annotations and classification stamps: amber
    pub const AMBER: Color = Color::Rgb(224, 170, 92);

    /// Errors and SECRET stamps: red
    pub const RED: Color = Color::Rgb(222, 110, 110);

    /// Muted text: dimmed foreground
    pub const MUTED: Color = Color::Rgb(110, 118, 124);

    /// Border color
    pub const BORDER: Color = Color::Rgb(50, 58, 62);

    /// Base style for all text
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    /// Archive (bot) message style
    pub fn archive() -> Style {
        Style::default().fg(Self::GREEN).bg(Self::BG)
    }

    /// Annotation style (response time, stamps)
    pub fn annotation() -> Style {
        Style::default().fg(Self::AMBER).bg(Self::BG)
    }

    /// Error style
    pub fn error() -> Style {
        Style::default().fg(Self::RED).bg(Self::BG)
    }

    /// Muted style (for secondary text)
    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED).bg(Self::BG)
    }

    /// Panel style
    pub fn panel() -> Style {
        Style::default().fg(Self::FG).bg(Self::PANEL_BG)
    }

    /// Border style
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Active (selected) style
    pub fn active() -> Style {
        Style::default().fg(Self::FG).bg(Self::ACTIVE)
    }

    /// Color for a classification marker stamp
    pub fn classification_color(marker: &str) -> Color {
        match marker {
            "TOP SECRET" | "SECRET" => Self::RED,
            "CONFIDENTIAL" => Self::AMBER,
            "UNCLASSIFIED" => Self::GREEN,
            _ => Self::MUTED,
        }
    }

    /// Span with classification stamp styling
    pub fn classification_span(marker: &str) -> Span<'_> {
        Span::styled(marker, Style::default().fg(Self::classification_color(marker)))
    }
}
