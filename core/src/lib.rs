pub mod command;
pub mod config;
pub mod menu;
pub mod scroll;
pub mod theme;
pub mod viewbox;
pub mod viewer;

pub use command::{ViewerCommand, ViewerCommandError};
pub use config::SiteConfig;
pub use menu::{hamburger_lines, LineStyle};
pub use scroll::{anchor_scroll_top, progress_width, reading_progress, scroll_top_visible, ArticleMetrics};
pub use theme::{Theme, ThemeParseError, THEME_ATTRIBUTE};
pub use viewbox::{parse_length, ViewBox};
pub use viewer::{DragAnchor, Transform, ViewerState, MAX_SCALE, MIN_SCALE};
