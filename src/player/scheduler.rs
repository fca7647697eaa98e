//! Animation scheduler.
//!
//! Plays cloned line templates into the output region one after another:
//! input lines are typed a character at a time, progress lines fill in
//! steps, everything else appears at once and holds for its delay. All
//! state lives behind one `Rc` handle and runs on a single thread; tasks are
//! spawned with `spawn_local`, so `init`, `restart` and the copy feedback
//! must be called from inside a tokio `LocalSet`.
//!
//! Calling `init` while a run is in progress starts a second run over a
//! fresh clone without stopping the first. Both write into the same region.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Result;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::clipboard::{Clipboard, Copy, COPIED_ALL_TEXT, COPIED_TEXT, COPY_FEEDBACK_DURATION};
use crate::lines::decorate::{
    lines_to_copy_text, prepare_input_line, transform_line_for_display, type_char, OUTPUT_AREA_ATTR,
};
use crate::lines::{LineRenderer, LineType};
use crate::markup::Element;
use crate::options::{bounded_progress_length, ResolvedOptions};

use super::clock::{scaled_delay, Clock, TokioClock};
use super::control::ControlButton;
use super::progress::ProgressBar;
use super::state::{InputResult, Intent, Phase, SchedulerState};
use super::surface::{HeadlessSurface, Surface};
use super::view::{LineId, TerminalView};

/// What the scheduler talks to besides its own state.
pub struct Collaborators {
    pub surface: Box<dyn Surface>,
    pub clock: Rc<dyn Clock>,
    pub clipboard: Box<dyn Clipboard>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            surface: Box::new(HeadlessSurface::default()),
            clock: Rc::new(TokioClock),
            clipboard: Box::new(Copy::new()),
        }
    }
}

struct Inner {
    templates: Vec<Element>,
    options: ResolvedOptions,
    renderer: LineRenderer,
    state: RefCell<SchedulerState>,
    view: RefCell<TerminalView>,
    surface: RefCell<Box<dyn Surface>>,
    clock: Rc<dyn Clock>,
    clipboard: Box<dyn Clipboard>,
    toast_generation: Cell<u64>,
}

/// Handle to a scheduler. Clones share the same state.
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<Inner>,
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("lines", &self.inner.templates.len())
            .field("state", &self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

impl Scheduler {
    /// `templates` are the canonical rendered lines; runs only ever play
    /// clones of them. `container` supplies the attributes of the view root.
    pub fn new(
        templates: Vec<Element>,
        options: ResolvedOptions,
        container: Element,
        collaborators: Collaborators,
    ) -> Self {
        let Collaborators {
            surface,
            clock,
            clipboard,
        } = collaborators;
        let view = TerminalView::new(container, options.prefix.clone(), surface.viewport_rows());
        Self {
            inner: Rc::new(Inner {
                renderer: LineRenderer::new(options.prefix.clone()),
                state: RefCell::new(SchedulerState::new(&options)),
                view: RefCell::new(view),
                surface: RefCell::new(surface),
                templates,
                options,
                clock,
                clipboard,
                toast_generation: Cell::new(0),
            }),
        }
    }

    pub fn templates(&self) -> &[Element] {
        &self.inner.templates
    }

    pub fn options(&self) -> &ResolvedOptions {
        &self.inner.options
    }

    pub fn phase(&self) -> Phase {
        self.inner.state.borrow().phase()
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.inner.state.borrow().speed_multiplier
    }

    pub fn auto_scroll(&self) -> bool {
        self.inner.state.borrow().auto_scroll
    }

    /// Number of runs currently in progress.
    pub fn active_runs(&self) -> usize {
        self.inner.state.borrow().active_runs()
    }

    /// Read the current view.
    pub fn with_view<R>(&self, f: impl FnOnce(&TerminalView) -> R) -> R {
        f(&self.inner.view.borrow())
    }

    /// Text content of every line currently in the output region.
    pub fn rendered_text(&self) -> Vec<String> {
        self.inner.view.borrow().region.text_lines()
    }

    /// Start a run in the background. Errors are logged, not returned.
    pub fn init(&self) -> JoinHandle<()> {
        let scheduler = self.clone();
        tokio::task::spawn_local(async move {
            if let Err(err) = scheduler.run().await {
                error!("playback stopped: {:#}", err);
            }
        })
    }

    /// Clear the output, show the speed control again and start over.
    pub fn restart(&self) -> JoinHandle<()> {
        info!("restarting playback");
        {
            let speed = self.speed_multiplier();
            let mut view = self.inner.view.borrow_mut();
            view.region.clear();
            view.control.switch_to_speed_control();
            view.control.show_speed(speed);
        }
        self.inner.state.borrow_mut().reset();
        self.init()
    }

    /// Play every line once.
    pub async fn run(&self) -> Result<()> {
        self.inner.state.borrow_mut().begin_run();
        info!(lines = self.inner.templates.len(), "starting playback");
        let result = self.play().await;
        self.inner.state.borrow_mut().end_run(result.is_ok());
        result
    }

    async fn play(&self) -> Result<()> {
        let lines = self.inner.templates.clone();
        self.present()?;

        let start_delay = self.inner.state.borrow().timings.start_delay;
        self.wait(start_delay).await;

        for line in lines {
            self.play_line(line).await?;
        }

        self.inner.view.borrow_mut().control.switch_to_restart();
        self.inner.state.borrow_mut().reset();
        info!("playback finished");
        self.present()
    }

    async fn play_line(&self, mut line: Element) -> Result<()> {
        let line_type = self.inner.renderer.line_type(&line);
        let delay = self
            .number_attr(&line, "delay")
            .unwrap_or_else(|| self.inner.state.borrow().timings.line_delay);
        let carriage_return = line
            .attr(&self.inner.renderer.attr_name("carriageReturn"))
            .is_some_and(|v| !v.is_empty() && v != "false");

        self.track_viewer();

        let id = match line_type {
            Some(LineType::Input) => {
                self.set_cursor(&mut line);
                self.type_line(line).await?
            }
            Some(LineType::Progress) => {
                self.set_cursor(&mut line);
                self.progress_line(line).await?
            }
            None => {
                transform_line_for_display(&mut line);
                self.mount(line, None)?
            }
        };
        self.wait(delay).await;

        let cursor_attr = self.inner.renderer.attr_name("cursor");
        {
            let mut view = self.inner.view.borrow_mut();
            if carriage_return {
                view.region.unmount(id);
            } else if let Some(el) = view.region.line_mut(id) {
                el.remove_attr(&cursor_attr);
            }
        }
        self.present()
    }

    async fn type_line(&self, mut line: Element) -> Result<LineId> {
        let type_delay = self.number_attr(&line, "typeDelay");
        let prepared = prepare_input_line(&mut line, &self.inner.renderer.attr_name("prompt"));
        let id = self.mount(line, Some(prepared.copy_text))?;

        for c in prepared.chars {
            let delay = type_delay.unwrap_or_else(|| self.inner.state.borrow().timings.type_delay);
            self.wait(delay).await;
            if let Some(el) = self.inner.view.borrow_mut().region.line_mut(id) {
                type_char(el, c);
            }
            self.track_viewer();
            self.follow_output();
            self.present()?;
        }
        Ok(id)
    }

    async fn progress_line(&self, mut line: Element) -> Result<LineId> {
        let options = &self.inner.options;
        let length = self
            .number_attr(&line, "progressLength")
            .filter(|v| *v >= 1.0)
            .map(|v| v as usize)
            .and_then(bounded_progress_length)
            .unwrap_or(options.progress_length);
        let fill = line
            .attr(&self.inner.renderer.attr_name("progressChar"))
            .filter(|v| !v.is_empty())
            .unwrap_or(options.progress_char.as_str())
            .to_string();
        let max_percent = self
            .number_attr(&line, "progressPercent")
            .unwrap_or(options.progress_percent);
        let bar = ProgressBar::new(&fill, length);

        line.children.clear();
        transform_line_for_display(&mut line);
        let id = self.mount(line, None)?;

        for step in 1..=bar.len() {
            let delay = self.inner.state.borrow().timings.type_delay;
            self.wait(delay).await;
            {
                let mut view = self.inner.view.borrow_mut();
                let area = view
                    .region
                    .line_mut(id)
                    .and_then(|el| el.find_mut(&|e: &Element| e.has_attr(OUTPUT_AREA_ATTR)));
                if let Some(area) = area {
                    area.set_text_content(bar.frame(step));
                }
            }
            self.present()?;
            if bar.percent(step) > max_percent {
                break;
            }
        }
        Ok(id)
    }

    fn set_cursor(&self, line: &mut Element) {
        line.set_attr(
            self.inner.renderer.attr_name("cursor"),
            self.inner.options.cursor.as_str(),
        );
    }

    fn number_attr(&self, line: &Element, field: &str) -> Option<f64> {
        line.attr(&self.inner.renderer.attr_name(field))
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v >= 0.0)
    }

    /// Append a line to the output region and scroll to it when following.
    fn mount(&self, line: Element, copy_text: Option<String>) -> Result<LineId> {
        let id = self.inner.view.borrow_mut().region.mount(line, copy_text);
        self.follow_output();
        self.present()?;
        Ok(id)
    }

    async fn wait(&self, ms: f64) {
        let duration = scaled_delay(ms, self.speed_multiplier());
        self.inner.clock.sleep(duration).await;
    }

    /// Re-derive auto-scroll from where the viewer is.
    fn track_viewer(&self) {
        let rows = self.inner.surface.borrow().viewport_rows();
        let at_bottom = {
            let mut view = self.inner.view.borrow_mut();
            view.region.set_viewport_rows(rows);
            view.region.is_at_bottom()
        };
        self.inner.state.borrow_mut().track_viewer(at_bottom);
    }

    fn follow_output(&self) {
        if self.auto_scroll() {
            self.inner.view.borrow_mut().region.scroll_to_bottom();
        }
    }

    fn present(&self) -> Result<()> {
        let view = self.inner.view.borrow();
        self.inner.surface.borrow_mut().present(&view)
    }

    fn present_or_log(&self) {
        if let Err(err) = self.present() {
            error!("failed to draw: {:#}", err);
        }
    }

    /// Double the speed multiplier and return it.
    pub fn speed_up(&self) -> f64 {
        let speed = self.inner.state.borrow_mut().speed_up();
        self.show_speed(speed);
        speed
    }

    /// Halve the speed multiplier and return it.
    pub fn slow_down(&self) -> f64 {
        let speed = self.inner.state.borrow_mut().slow_down();
        self.show_speed(speed);
        speed
    }

    fn show_speed(&self, speed: f64) {
        debug!(speed, "speed changed");
        self.inner.view.borrow_mut().control.show_speed(speed);
        self.present_or_log();
    }

    fn control_offers(&self, button: ControlButton) -> bool {
        self.inner.view.borrow().control.press(button).is_some()
    }

    /// React to one intent.
    ///
    /// Control intents only act while their button is on screen.
    pub fn dispatch(&self, intent: Intent) -> InputResult {
        debug!(?intent, "dispatch");
        match intent {
            Intent::SpeedUp => {
                if self.control_offers(ControlButton::SpeedUp) {
                    self.speed_up();
                }
            }
            Intent::SlowDown => {
                if self.control_offers(ControlButton::SlowDown) {
                    self.slow_down();
                }
            }
            Intent::Restart => {
                if self.control_offers(ControlButton::Restart) {
                    self.restart();
                }
            }
            Intent::Init => {
                self.init();
            }
            Intent::ScrollBy(lines) => {
                self.inner.view.borrow_mut().region.scroll_by(lines);
                self.present_or_log();
            }
            Intent::ScrollToBottom => {
                self.inner.view.borrow_mut().region.scroll_to_bottom();
                self.present_or_log();
            }
            Intent::Hover(row) => {
                if self.inner.view.borrow_mut().region.hover(row) {
                    self.present_or_log();
                }
            }
            Intent::CopyLine(row) => self.copy_line(row),
            Intent::CopyAll => self.copy_all(),
            Intent::Redraw => self.present_or_log(),
            Intent::Quit => return InputResult::Quit,
        }
        InputResult::Continue
    }

    /// Copy the full text of the input line shown at `row`.
    pub fn copy_line(&self, row: usize) {
        let text = self
            .inner
            .view
            .borrow()
            .region
            .line_at_row(row)
            .and_then(|l| l.copy_text.clone());
        if let Some(text) = text {
            self.copy(&text, COPIED_TEXT);
        }
    }

    /// Copy every input line, one per line.
    pub fn copy_all(&self) {
        let text = lines_to_copy_text(&self.inner.templates, &self.inner.renderer.type_attr());
        self.copy(&text, COPIED_ALL_TEXT);
    }

    fn copy(&self, text: &str, confirmation: &str) {
        match self.inner.clipboard.write_text(text) {
            Ok(result) => {
                debug!(tool = result.tool.name(), bytes = result.size_bytes, "copied to clipboard");
                self.show_toast(confirmation);
            }
            Err(err) => error!("failed to copy to clipboard: {}", err),
        }
    }

    fn show_toast(&self, text: &str) {
        let generation = self.inner.toast_generation.get() + 1;
        self.inner.toast_generation.set(generation);
        self.inner.view.borrow_mut().toast = Some(text.to_string());
        self.present_or_log();

        let scheduler = self.clone();
        tokio::task::spawn_local(async move {
            scheduler.inner.clock.sleep(COPY_FEEDBACK_DURATION).await;
            if scheduler.inner.toast_generation.get() == generation {
                scheduler.inner.view.borrow_mut().toast = None;
                scheduler.present_or_log();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::task::LocalSet;
    use tokio::time::{sleep, Instant};

    use super::*;
    use crate::clipboard::{ClipboardError, CopyResult, MemoryClipboard};
    use crate::lines::{Classifier, LineData};
    use crate::player::control::ControlMode;
    use crate::player::surface::FrameLog;

    #[derive(Default, Clone)]
    struct RecordingClock {
        waits: Rc<RefCell<Vec<Duration>>>,
    }

    #[async_trait(?Send)]
    impl Clock for RecordingClock {
        async fn sleep(&self, duration: Duration) {
            self.waits.borrow_mut().push(duration);
            tokio::time::sleep(duration).await;
        }
    }

    impl RecordingClock {
        fn waits_ms(&self) -> Vec<u128> {
            self.waits.borrow().iter().map(Duration::as_millis).collect()
        }
    }

    struct BrokenSurface;

    impl Surface for BrokenSurface {
        fn present(&mut self, _view: &TerminalView) -> Result<()> {
            anyhow::bail!("terminal went away")
        }

        fn viewport_rows(&self) -> usize {
            10
        }
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn write_text(&self, _text: &str) -> Result<CopyResult, ClipboardError> {
            Err(ClipboardError::NoToolAvailable)
        }
    }

    struct Fixture {
        scheduler: Scheduler,
        frames: FrameLog,
        clipboard: MemoryClipboard,
        clock: RecordingClock,
    }

    fn fast() -> ResolvedOptions {
        ResolvedOptions {
            start_delay: 0.0,
            type_delay: 10.0,
            line_delay: 100.0,
            ..ResolvedOptions::default()
        }
    }

    fn templates_for(content: &str, options: &ResolvedOptions) -> Vec<Element> {
        let lines = Classifier::new(
            &options.prompt_literal_start,
            &options.custom_prompt_literal_start,
        )
        .classify(content);
        LineRenderer::new(options.prefix.clone()).render_all(&lines)
    }

    fn fixture_with(templates: Vec<Element>, options: ResolvedOptions, rows: usize) -> Fixture {
        let surface = HeadlessSurface::new(rows);
        let frames = surface.frames();
        let clipboard = MemoryClipboard::new();
        let clock = RecordingClock::default();
        let scheduler = Scheduler::new(
            templates,
            options,
            Element::new("pre").with_attr("data-termynal", ""),
            Collaborators {
                surface: Box::new(surface),
                clock: Rc::new(clock.clone()),
                clipboard: Box::new(clipboard.clone()),
            },
        );
        Fixture {
            scheduler,
            frames,
            clipboard,
            clock,
        }
    }

    fn fixture(content: &str, options: ResolvedOptions) -> Fixture {
        let templates = templates_for(content, &options);
        fixture_with(templates, options, 24)
    }

    #[tokio::test(start_paused = true)]
    async fn plays_every_line_in_order() {
        let f = fixture("$ echo woo\nwoo", fast());
        assert_eq!(f.scheduler.phase(), Phase::Idle);

        f.scheduler.run().await.unwrap();

        assert_eq!(f.scheduler.rendered_text(), vec!["📋$ echo woo", "woo"]);
        assert_eq!(f.scheduler.phase(), Phase::Finished);
        assert_eq!(
            f.scheduler.with_view(|v| v.control.mode()),
            ControlMode::Restart
        );
    }

    #[tokio::test(start_paused = true)]
    async fn waits_follow_configured_timings() {
        let f = fixture("$ ab\nout", ResolvedOptions::default());
        f.scheduler.run().await.unwrap();
        assert_eq!(f.clock.waits_ms(), vec![600, 90, 90, 1500, 1500]);
    }

    #[tokio::test(start_paused = true)]
    async fn per_line_delays_override_defaults() {
        let options = fast();
        let renderer = LineRenderer::new("ty");
        let templates = vec![
            renderer.render(&LineData {
                delay: Some(0.0),
                ..LineData::output("now")
            }),
            Element::new("span")
                .with_attr("data-ty", "input")
                .with_attr("data-ty-typeDelay", "40")
                .with_attr("data-ty-delay", "5")
                .with_text("xy"),
        ];
        let f = fixture_with(templates, options, 24);
        f.scheduler.run().await.unwrap();
        assert_eq!(f.clock.waits_ms(), vec![0, 0, 40, 40, 5]);
    }

    #[tokio::test(start_paused = true)]
    async fn speed_up_four_times_reaches_16x() {
        let f = fixture("woo", fast());
        let seen: Vec<f64> = (0..4).map(|_| f.scheduler.speed_up()).collect();
        assert_eq!(seen, vec![2.0, 4.0, 8.0, 16.0]);
        assert_eq!(f.scheduler.with_view(|v| v.control.label().to_string()), "16x");
        assert_eq!(f.scheduler.slow_down(), 8.0);
    }

    #[tokio::test(start_paused = true)]
    async fn speed_change_applies_from_next_wait() {
        let options = ResolvedOptions {
            start_delay: 100.0,
            type_delay: 100.0,
            ..ResolvedOptions::default()
        };
        let f = fixture("$ abc", options);
        let local = LocalSet::new();
        local
            .run_until(async {
                let run = f.scheduler.init();
                sleep(Duration::from_millis(150)).await;
                f.scheduler.speed_up();
                run.await.unwrap();
            })
            .await;
        assert_eq!(f.clock.waits_ms(), vec![100, 100, 50, 50, 750]);
    }

    #[tokio::test(start_paused = true)]
    async fn faster_speed_finishes_a_typed_line_sooner() {
        let mut elapsed = Vec::new();
        for speed_ups in 0..4 {
            let f = fixture("$ a fixed length command", ResolvedOptions::default());
            for _ in 0..speed_ups {
                f.scheduler.speed_up();
            }
            let start = Instant::now();
            f.scheduler.run().await.unwrap();
            elapsed.push(start.elapsed());
        }
        assert!(elapsed.windows(2).all(|w| w[1] < w[0]), "{:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn carriage_return_line_disappears_after_its_delay() {
        let options = ResolvedOptions {
            start_delay: 0.0,
            line_delay: 1000.0,
            ..ResolvedOptions::default()
        };
        let f = fixture("Downloading 50%\r\ndone", options);
        let local = LocalSet::new();
        local
            .run_until(async {
                let run = f.scheduler.init();
                sleep(Duration::from_millis(10)).await;
                assert_eq!(f.scheduler.rendered_text(), vec!["Downloading 50%"]);

                sleep(Duration::from_millis(1000)).await;
                assert_eq!(f.scheduler.rendered_text(), vec!["done"]);
                run.await.unwrap();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn restarts_end_in_the_same_state() {
        let content = "// intro\n$ make\nbuilding\r\n# root@box$ whoami\nok";
        let f = fixture(content, fast());
        let templates_before = f.scheduler.templates().to_vec();

        let local = LocalSet::new();
        local
            .run_until(async {
                f.scheduler.run().await.unwrap();
                let first = f.scheduler.rendered_text();
                assert_eq!(first.len(), 4);

                for _ in 0..3 {
                    f.scheduler.restart().await.unwrap();
                    assert_eq!(f.scheduler.rendered_text(), first);
                }
            })
            .await;

        assert_eq!(f.scheduler.templates(), templates_before.as_slice());
        assert_eq!(f.scheduler.phase(), Phase::Finished);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_keeps_speed_and_shows_speed_control() {
        let f = fixture("woo", fast());
        let local = LocalSet::new();
        local
            .run_until(async {
                f.scheduler.run().await.unwrap();
                f.scheduler.speed_up();

                let run = f.scheduler.restart();
                assert!(f.scheduler.rendered_text().is_empty());
                assert_eq!(
                    f.scheduler.with_view(|v| v.control.mode()),
                    ControlMode::SpeedControl
                );
                assert_eq!(f.scheduler.with_view(|v| v.control.label().to_string()), "2x");
                run.await.unwrap();
            })
            .await;
        assert_eq!(f.scheduler.speed_multiplier(), 2.0);
    }

    #[tokio::test(start_paused = true)]
    async fn auto_scroll_suspends_while_scrolled_away() {
        let templates = templates_for("0\n1\n2\n3\n4\n5", &fast());
        let f = fixture_with(templates, fast(), 2);
        let scroll_top = || f.scheduler.with_view(|v| v.region.scroll_top());

        let local = LocalSet::new();
        local
            .run_until(async {
                let run = f.scheduler.init();
                sleep(Duration::from_millis(250)).await;
                assert_eq!(scroll_top(), 20);

                f.scheduler.dispatch(Intent::ScrollBy(-1));
                assert_eq!(scroll_top(), 0);

                sleep(Duration::from_millis(100)).await;
                assert!(!f.scheduler.auto_scroll());
                assert_eq!(scroll_top(), 0);

                f.scheduler.dispatch(Intent::ScrollToBottom);
                sleep(Duration::from_millis(100)).await;
                assert!(f.scheduler.auto_scroll());
                assert_eq!(scroll_top(), 60);
                run.await.unwrap();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn control_intents_follow_displayed_control() {
        let f = fixture("woo", fast());
        let local = LocalSet::new();
        local
            .run_until(async {
                assert_eq!(f.scheduler.dispatch(Intent::Restart), InputResult::Continue);
                sleep(Duration::from_millis(1)).await;
                assert_eq!(f.scheduler.phase(), Phase::Idle);

                f.scheduler.dispatch(Intent::SpeedUp);
                assert_eq!(f.scheduler.speed_multiplier(), 2.0);

                f.scheduler.run().await.unwrap();
                f.scheduler.dispatch(Intent::SlowDown);
                assert_eq!(f.scheduler.speed_multiplier(), 2.0);

                f.scheduler.dispatch(Intent::Restart);
                assert_eq!(f.scheduler.phase(), Phase::Finished);
                sleep(Duration::from_millis(1)).await;
                assert_eq!(f.scheduler.phase(), Phase::Running);
            })
            .await;
        assert_eq!(f.scheduler.dispatch(Intent::Quit), InputResult::Quit);
    }

    #[tokio::test(start_paused = true)]
    async fn copy_line_shows_feedback_then_clears_it() {
        let f = fixture("$ make test\nok", fast());
        let local = LocalSet::new();
        local
            .run_until(async {
                f.scheduler.run().await.unwrap();
                f.scheduler.dispatch(Intent::CopyLine(0));
                assert_eq!(f.clipboard.entries(), vec!["make test"]);
                assert_eq!(
                    f.scheduler.with_view(|v| v.toast.clone()).as_deref(),
                    Some("Copied!")
                );

                sleep(Duration::from_millis(1999)).await;
                assert!(f.scheduler.with_view(|v| v.toast.is_some()));
                sleep(Duration::from_millis(2)).await;
                assert!(f.scheduler.with_view(|v| v.toast.is_none()));

                // output lines have nothing to copy
                f.scheduler.dispatch(Intent::CopyLine(1));
                assert_eq!(f.clipboard.entries().len(), 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn copy_all_joins_input_lines() {
        let f = fixture("$ make\nbuilding\n# root@box$ make install", fast());
        let local = LocalSet::new();
        local
            .run_until(async {
                f.scheduler.dispatch(Intent::CopyAll);
                assert_eq!(f.clipboard.entries(), vec!["make\nmake install"]);
                assert!(f
                    .frames
                    .last()
                    .is_some_and(|frame| frame.contains("Copied all input!")));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn clipboard_failure_shows_nothing() {
        let options = fast();
        let scheduler = Scheduler::new(
            templates_for("$ ls", &options),
            options,
            Element::new("pre"),
            Collaborators {
                surface: Box::new(HeadlessSurface::default()),
                clock: Rc::new(TokioClock),
                clipboard: Box::new(BrokenClipboard),
            },
        );
        scheduler.dispatch(Intent::CopyAll);
        assert!(scheduler.with_view(|v| v.toast.is_none()));
    }

    #[tokio::test(start_paused = true)]
    async fn progress_line_fills_then_stops_at_limit() {
        let options = ResolvedOptions {
            progress_length: 4,
            ..fast()
        };
        let templates = vec![
            Element::new("span").with_attr("data-ty", "progress"),
            Element::new("span")
                .with_attr("data-ty", "progress")
                .with_attr("data-ty-progressPercent", "50")
                .with_attr("data-ty-progressChar", "#"),
        ];
        let f = fixture_with(templates, options, 24);
        f.scheduler.run().await.unwrap();

        assert_eq!(f.scheduler.rendered_text(), vec!["████ 100%", "### 75%"]);
        assert_eq!(f.clock.waits_ms(), vec![0, 10, 10, 10, 10, 100, 10, 10, 10, 100]);
    }

    #[tokio::test(start_paused = true)]
    async fn oversized_progress_length_falls_back_to_default() {
        let options = ResolvedOptions {
            progress_length: 4,
            ..fast()
        };
        let templates = vec![Element::new("span")
            .with_attr("data-ty", "progress")
            .with_attr("data-ty-progressLength", "1e300")];
        let f = fixture_with(templates, options, 24);
        f.scheduler.run().await.unwrap();

        assert_eq!(f.scheduler.rendered_text(), vec!["████ 100%"]);
        assert_eq!(f.scheduler.phase(), Phase::Finished);
    }

    #[tokio::test(start_paused = true)]
    async fn cursor_marks_the_line_being_typed() {
        let options = ResolvedOptions {
            type_delay: 100.0,
            ..fast()
        };
        let f = fixture("$ ab", options);
        let local = LocalSet::new();
        local
            .run_until(async {
                let run = f.scheduler.init();
                sleep(Duration::from_millis(50)).await;
                assert!(f
                    .frames
                    .last()
                    .is_some_and(|frame| frame.contains(r#"data-ty-cursor="▋""#)));
                run.await.unwrap();
            })
            .await;
        assert!(f.frames.last().is_some_and(|frame| !frame.contains("data-ty-cursor")));
    }

    #[tokio::test(start_paused = true)]
    async fn draw_failure_stops_the_run() {
        let options = fast();
        let scheduler = Scheduler::new(
            templates_for("a\nb", &options),
            options,
            Element::new("pre"),
            Collaborators {
                surface: Box::new(BrokenSurface),
                clock: Rc::new(TokioClock),
                clipboard: Box::new(MemoryClipboard::new()),
            },
        );
        let err = scheduler.run().await.unwrap_err();
        assert!(err.to_string().contains("terminal went away"));
        assert_eq!(scheduler.phase(), Phase::Idle);
        assert_eq!(scheduler.active_runs(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_init_overlaps_runs() {
        let f = fixture("a\nb", fast());
        let local = LocalSet::new();
        local
            .run_until(async {
                let first = f.scheduler.init();
                let second = f.scheduler.init();
                sleep(Duration::from_millis(1)).await;
                assert_eq!(f.scheduler.active_runs(), 2);
                first.await.unwrap();
                second.await.unwrap();
            })
            .await;
        assert_eq!(f.scheduler.rendered_text(), vec!["a", "a", "b", "b"]);
    }
}
