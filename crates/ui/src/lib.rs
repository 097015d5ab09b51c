pub mod app;
pub mod components;
pub mod event;
pub mod layout;
pub mod state;
pub mod theme;

pub use app::App;
pub use event::KeyAction;
pub use layout::{ChatLayout, LayoutMode, PanelSections, centered_rect};
pub use state::{AppState, InputState, PanelState, QUICK_PROMPTS, Screen};
pub use theme::Theme;
