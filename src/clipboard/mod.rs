//! Clipboard collaborator for copy buttons.
//!
//! The scheduler only sees the [`Clipboard`] trait. [`Copy`] implements it by
//! piping text into whichever system tool is available (pbcopy, xclip, xsel,
//! wl-copy).

mod copy;
mod error;
mod result;
mod tool;
pub mod tools;

use std::time::Duration;

pub use copy::Copy;
pub use error::ClipboardError;
pub use result::{CopyMethod, CopyResult};
pub use tool::{CopyTool, CopyToolError};

/// How long a copy confirmation stays on screen.
pub const COPY_FEEDBACK_DURATION: Duration = Duration::from_millis(2000);

/// Confirmation shown after copying a single line.
pub const COPIED_TEXT: &str = "Copied!";

/// Confirmation shown after copying every input line.
pub const COPIED_ALL_TEXT: &str = "Copied all input!";

/// Write-text access to a clipboard.
pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<CopyResult, ClipboardError>;
}

impl Clipboard for Copy {
    fn write_text(&self, text: &str) -> Result<CopyResult, ClipboardError> {
        self.text(text)
    }
}

/// Clipboard that keeps copied text in memory.
///
/// Used by embedders without a system clipboard and by tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    entries: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<CopyResult, ClipboardError> {
        self.entries.borrow_mut().push(text.to_string());
        Ok(CopyResult::new(CopyMethod::Memory, text.len()))
    }
}
