//! Rendering surfaces.
//!
//! The scheduler presents a [`TerminalView`] after every mutation. A surface
//! decides what presenting means: the CLI draws with ratatui, tests keep the
//! serialized markup of each frame.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

use super::view::TerminalView;

/// Rows used when a surface has no real viewport.
pub const DEFAULT_VIEWPORT_ROWS: usize = 24;

/// Somewhere a view can be shown.
pub trait Surface {
    fn present(&mut self, view: &TerminalView) -> Result<()>;

    /// Number of lines of the output region visible at once.
    fn viewport_rows(&self) -> usize;
}

/// Frames recorded by a [`HeadlessSurface`], shared with the caller.
#[derive(Debug, Clone, Default)]
pub struct FrameLog {
    frames: Rc<RefCell<Vec<String>>>,
}

impl FrameLog {
    pub fn len(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.borrow().is_empty()
    }

    pub fn last(&self) -> Option<String> {
        self.frames.borrow().last().cloned()
    }

    pub fn all(&self) -> Vec<String> {
        self.frames.borrow().clone()
    }
}

/// Surface without a screen; records each presented frame as markup.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    rows: usize,
    log: FrameLog,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_ROWS)
    }
}

impl HeadlessSurface {
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            log: FrameLog::default(),
        }
    }

    /// Handle to the recorded frames, valid after the surface is boxed.
    pub fn frames(&self) -> FrameLog {
        self.log.clone()
    }
}

impl Surface for HeadlessSurface {
    fn present(&mut self, view: &TerminalView) -> Result<()> {
        self.log.frames.borrow_mut().push(view.to_html());
        Ok(())
    }

    fn viewport_rows(&self) -> usize {
        self.rows
    }
}
