//! Mouse input mapping for the player.
//!
//! - hover over an output row: show that line's copy button
//! - click an output row: copy that input line
//! - click a bottom-bar control: press it
//! - wheel: scroll the output region

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::player::render::{control_at, TOP_BAR_ROWS};
use crate::player::state::Intent;
use crate::player::view::TerminalView;

/// Lines scrolled per wheel notch.
pub const WHEEL_LINES: i32 = 3;

/// Map a mouse event on a `width` x `height` screen to an intent.
pub fn map_mouse(mouse: MouseEvent, view: &TerminalView, width: u16, height: u16) -> Option<Intent> {
    let bottom_bar = height.saturating_sub(1);
    let region_row = mouse
        .row
        .checked_sub(TOP_BAR_ROWS)
        .filter(|_| mouse.row < bottom_bar)
        .map(usize::from);

    match mouse.kind {
        MouseEventKind::ScrollUp => Some(Intent::ScrollBy(-WHEEL_LINES)),
        MouseEventKind::ScrollDown => Some(Intent::ScrollBy(WHEEL_LINES)),
        MouseEventKind::Moved => Some(Intent::Hover(region_row)),
        MouseEventKind::Down(MouseButton::Left) => {
            if mouse.row == bottom_bar {
                control_at(&view.control, width, mouse.column)
                    .and_then(|button| view.control.press(button))
            } else {
                region_row.map(Intent::CopyLine)
            }
        }
        _ => None,
    }
}
