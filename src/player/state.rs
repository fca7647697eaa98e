//! Scheduler state management
//!
//! Contains the central `SchedulerState` struct that holds all playback
//! state, as well as shared types used across player modules.

use crate::options::ResolvedOptions;

/// Result of processing an intent.
///
/// Returned by the dispatcher to signal control flow decisions to the
/// event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Keep playing and handling input
    Continue,
    /// Exit the player
    Quit,
}

/// A request from the control bar, keyboard, or pointer.
///
/// The scheduler owns all mutable state; everything else only sends these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    SpeedUp,
    SlowDown,
    Restart,
    /// Start a deferred run
    Init,
    /// Scroll the output region by a number of lines, negative is up
    ScrollBy(i32),
    ScrollToBottom,
    /// Pointer moved over a visible row, or left the output region
    Hover(Option<usize>),
    /// Copy the input line shown at a visible row
    CopyLine(usize),
    CopyAll,
    Redraw,
    Quit,
}

/// Lifecycle phase of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, no run started yet
    Idle,
    /// At least one run is iterating lines
    Running,
    /// Every started run has played its last line
    Finished,
}

/// Nominal delays in milliseconds, before the speed multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timings {
    pub start_delay: f64,
    pub type_delay: f64,
    pub line_delay: f64,
}

/// Central mutable state for the scheduler.
#[derive(Debug)]
pub struct SchedulerState {
    // === Speed ===
    /// Divides every delay, read when each wait begins. Unbounded.
    pub speed_multiplier: f64,

    // === Timing ===
    pub timings: Timings,
    original_timings: Timings,

    // === Auto-scroll ===
    /// Whether new output scrolls the region to the bottom
    pub auto_scroll: bool,
    original_auto_scroll: bool,

    // === Lifecycle ===
    active_runs: usize,
    finished_runs: usize,
}

impl SchedulerState {
    pub fn new(options: &ResolvedOptions) -> Self {
        let timings = Timings {
            start_delay: options.start_delay,
            type_delay: options.type_delay,
            line_delay: options.line_delay,
        };
        Self {
            speed_multiplier: 1.0,
            timings,
            original_timings: timings,
            auto_scroll: options.auto_scroll,
            original_auto_scroll: options.auto_scroll,
            active_runs: 0,
            finished_runs: 0,
        }
    }

    /// Double playback speed and return the new multiplier.
    pub fn speed_up(&mut self) -> f64 {
        self.speed_multiplier *= 2.0;
        self.speed_multiplier
    }

    /// Halve playback speed and return the new multiplier.
    pub fn slow_down(&mut self) -> f64 {
        self.speed_multiplier /= 2.0;
        self.speed_multiplier
    }

    /// Suspend auto-scroll while the viewer is away from the bottom, and
    /// fall back to the configured behavior once they return.
    pub fn track_viewer(&mut self, at_bottom: bool) {
        self.auto_scroll = at_bottom && self.original_auto_scroll;
    }

    /// Restore timings and auto-scroll to their configured values.
    ///
    /// The speed multiplier is a viewer preference and survives.
    pub fn reset(&mut self) {
        self.timings = self.original_timings;
        self.auto_scroll = self.original_auto_scroll;
    }

    pub fn begin_run(&mut self) {
        self.active_runs += 1;
    }

    /// Mark one run as ended, `completed` when it reached its last line.
    pub fn end_run(&mut self, completed: bool) {
        self.active_runs = self.active_runs.saturating_sub(1);
        if completed {
            self.finished_runs += 1;
        }
    }

    pub fn phase(&self) -> Phase {
        if self.active_runs > 0 {
            Phase::Running
        } else if self.finished_runs > 0 {
            Phase::Finished
        } else {
            Phase::Idle
        }
    }

    /// Number of runs currently iterating; above one means overlapping runs.
    pub fn active_runs(&self) -> usize {
        self.active_runs
    }
}
