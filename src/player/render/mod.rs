//! Terminal rendering for the player.
//!
//! This module draws a [`TerminalView`](crate::player::view::TerminalView)
//! with ratatui: top bar, output region, and bottom bar with the controls.

mod frame;
mod terminal;
pub mod theme;

pub use frame::{body_rows, control_at, draw_view, line_spans, CHROME_ROWS, TOP_BAR_ROWS};
pub use terminal::TerminalSurface;
pub use theme::Theme;
