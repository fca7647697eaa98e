//! termynal - animated terminal transcripts
//!
//! Classifies a shell transcript into typed lines (input, output, comment,
//! progress, carriage-return) and plays them back with typing, per-line
//! delays, speed control, restart and auto-scroll.
//!
//! ```no_run
//! use termynal::{Document, Options, Termynal};
//!
//! # async fn demo() -> Result<(), termynal::TermynalError> {
//! let document = Document::from_text("$ echo woo\nwoo\n");
//! let termynal = Termynal::new(&document, "#termynal", Options::default())?;
//! let local = tokio::task::LocalSet::new();
//! local.run_until(async { termynal.init().await }).await.ok();
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod document;
pub mod error;
pub mod lines;
pub mod logging;
pub mod markup;
pub mod options;
pub mod player;
pub mod termynal;

pub use config::Config;
pub use document::{ContainerRef, Document};
pub use error::TermynalError;
pub use lines::{LineData, LineType};
pub use options::{Options, ResolvedOptions};
pub use termynal::{Termynal, TermynalBuilder};
