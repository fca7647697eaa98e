//! Animated playback of rendered lines
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `scheduler`: the run loop, speed control, restart, copy feedback
//! - `state`: SchedulerState and shared types (Intent, InputResult, Phase)
//! - `clock`: schedulable clock behind every wait
//! - `control`: bottom-bar speed control / restart button
//! - `view`: output region and the view model surfaces draw
//! - `surface`: Surface trait and the headless surface
//! - `render/`: ratatui surface, frame layout, theme
//! - `input/`: keyboard and mouse mapping, event reader thread
//!
//! # Usage
//!
//! ```no_run
//! use termynal::player::{Collaborators, Scheduler};
//! use termynal::markup::Element;
//! use termynal::options::ResolvedOptions;
//!
//! # async fn demo() {
//! let templates = vec![Element::new("span").with_text("hello")];
//! let scheduler = Scheduler::new(
//!     templates,
//!     ResolvedOptions::default(),
//!     Element::new("pre"),
//!     Collaborators::default(),
//! );
//! scheduler.run().await.unwrap();
//! # }
//! ```

pub mod clock;
pub mod control;
pub mod input;
pub mod progress;
pub mod render;
mod scheduler;
pub mod state;
pub mod surface;
pub mod view;

pub use clock::{Clock, TokioClock};
pub use control::{ControlBar, ControlButton, ControlMode};
pub use scheduler::{Collaborators, Scheduler};
pub use state::{InputResult, Intent, Phase, SchedulerState};
pub use surface::{FrameLog, HeadlessSurface, Surface};
pub use view::{OutputRegion, TerminalView};
