//! Keyboard input mapping for the player.
//!
//! Maps key presses to intents. Nothing here touches state; the scheduler
//! decides whether an intent applies (e.g. restart only once finished).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::player::state::Intent;

/// Map a key event to an intent.
///
/// `page` is the number of lines PageUp/PageDown scroll by.
pub fn map_key(key: KeyEvent, page: usize) -> Option<Intent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let page = i32::try_from(page.max(1)).unwrap_or(i32::MAX);

    let intent = match key.code {
        // === Quit ===
        KeyCode::Char('q') | KeyCode::Esc => Intent::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Intent::Quit,

        // === Controls ===
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => Intent::SpeedUp,
        KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Left => Intent::SlowDown,
        KeyCode::Char('r') => Intent::Restart,
        KeyCode::Enter => Intent::Init,

        // === Clipboard ===
        KeyCode::Char('c') => Intent::CopyAll,

        // === Scrolling ===
        KeyCode::Up | KeyCode::Char('k') => Intent::ScrollBy(-1),
        KeyCode::Down | KeyCode::Char('j') => Intent::ScrollBy(1),
        KeyCode::PageUp => Intent::ScrollBy(-page),
        KeyCode::PageDown => Intent::ScrollBy(page),
        KeyCode::Home => Intent::ScrollBy(i32::MIN),
        KeyCode::End => Intent::ScrollToBottom,

        _ => return None,
    };
    Some(intent)
}
