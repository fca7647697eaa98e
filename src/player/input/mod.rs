//! Input handling for the player.
//!
//! Terminal events are read on a dedicated thread and forwarded over a
//! channel; the event loop maps each one to an [`Intent`] and hands it to
//! the scheduler.

mod keyboard;
mod mouse;

pub use keyboard::map_key;
pub use mouse::{map_mouse, WHEEL_LINES};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event};
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::player::render::body_rows;
use crate::player::state::Intent;
use crate::player::view::TerminalView;

/// How often the reader thread checks whether it should stop.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Map any terminal event to an intent for a `width` x `height` screen.
pub fn map_event(event: Event, view: &TerminalView, width: u16, height: u16) -> Option<Intent> {
    match event {
        Event::Key(key) => map_key(key, body_rows(height)),
        Event::Mouse(mouse) => map_mouse(mouse, view, width, height),
        Event::Resize(_, _) => Some(Intent::Redraw),
        _ => None, // Ignore focus and paste events
    }
}

/// Background thread forwarding terminal events. Stops when dropped.
pub struct EventReader {
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl EventReader {
    pub fn spawn(tx: UnboundedSender<Event>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                match event::poll(POLL_INTERVAL) {
                    Ok(true) => match event::read() {
                        Ok(ev) => {
                            if tx.send(ev).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            warn!("failed to read terminal event: {}", e);
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(e) => {
                        warn!("failed to poll terminal events: {}", e);
                        break;
                    }
                }
            }
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
