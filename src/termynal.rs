//! Public entry point.
//!
//! [`Termynal`] resolves a container in a [`Document`], resolves options
//! against the container's `data-<prefix>-*` attributes, classifies the
//! container's content into [`LineData`], renders the line templates once and
//! hands them to a [`Scheduler`].

use std::rc::Rc;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::clipboard::Clipboard;
use crate::document::{ContainerRef, Document};
use crate::error::TermynalError;
use crate::lines::{Classifier, LineData, LineRenderer};
use crate::markup::Element;
use crate::options::{Options, ResolvedOptions};
use crate::player::{Clock, Collaborators, InputResult, Intent, Phase, Scheduler, Surface};

/// Attribute marking a container as a termynal instance.
pub const INSTANCE_ATTR: &str = "data-termynal";

/// Builder for [`Termynal`].
#[derive(Default)]
pub struct TermynalBuilder {
    options: Options,
    defaults: Options,
    line_data: Option<Vec<LineData>>,
    collaborators: Collaborators,
}

impl TermynalBuilder {
    /// Explicit options; these win over container attributes.
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Fallback options, typically the `[playback]` table of the config file.
    pub fn defaults(mut self, defaults: Options) -> Self {
        self.defaults = defaults;
        self
    }

    /// Play these lines instead of classifying the container's content.
    pub fn line_data(mut self, lines: Vec<LineData>) -> Self {
        self.line_data = Some(lines);
        self
    }

    pub fn surface(mut self, surface: impl Surface + 'static) -> Self {
        self.collaborators.surface = Box::new(surface);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.collaborators.clock = Rc::new(clock);
        self
    }

    pub fn clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.collaborators.clipboard = Box::new(clipboard);
        self
    }

    /// Resolve the container and prepare playback.
    ///
    /// When the resolved `initNow` is set this also starts the first run,
    /// which must happen inside a tokio `LocalSet`.
    pub fn build<'a>(
        self,
        document: &'a Document,
        container: impl Into<ContainerRef<'a>>,
    ) -> Result<Termynal, TermynalError> {
        let source = container.into().resolve(document)?;
        let options = ResolvedOptions::resolve(&self.options, Some(source), &self.defaults);

        let line_data = match self.line_data {
            Some(lines) => lines,
            None => Classifier::new(
                options.prompt_literal_start.as_str(),
                options.custom_prompt_literal_start.as_str(),
            )
            .with_prefix(options.prefix.as_str())
            .classify(&source.inner_html()),
        };
        let templates = LineRenderer::new(options.prefix.as_str()).render_all(&line_data);
        debug!(lines = templates.len(), prefix = %options.prefix, "prepared line templates");

        let mut container = source.clone();
        container.set_attr(INSTANCE_ATTR, "");

        let init_now = options.init_now;
        let scheduler = Scheduler::new(templates, options, container.clone(), self.collaborators);
        let termynal = Termynal {
            container,
            line_data,
            scheduler,
        };
        if init_now {
            termynal.init();
        }
        Ok(termynal)
    }
}

/// A prepared animated terminal.
#[derive(Debug)]
pub struct Termynal {
    container: Element,
    line_data: Vec<LineData>,
    scheduler: Scheduler,
}

impl Termynal {
    pub fn builder() -> TermynalBuilder {
        TermynalBuilder::default()
    }

    /// Build with explicit options and default collaborators.
    pub fn new<'a>(
        document: &'a Document,
        container: impl Into<ContainerRef<'a>>,
        options: Options,
    ) -> Result<Self, TermynalError> {
        Self::builder().options(options).build(document, container)
    }

    /// Start a run. Calling this while a run is in progress starts a second,
    /// overlapping run.
    pub fn init(&self) -> JoinHandle<()> {
        self.scheduler.init()
    }

    pub fn dispatch(&self, intent: Intent) -> InputResult {
        self.scheduler.dispatch(intent)
    }

    /// The container as marked at construction.
    pub fn container(&self) -> &Element {
        &self.container
    }

    pub fn line_data(&self) -> &[LineData] {
        &self.line_data
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn options(&self) -> &ResolvedOptions {
        self.scheduler.options()
    }

    pub fn phase(&self) -> Phase {
        self.scheduler.phase()
    }

    /// Markup of every line template, one per line.
    pub fn templates_html(&self) -> String {
        self.scheduler
            .templates()
            .iter()
            .map(Element::outer_html)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Markup of the whole view as currently shown.
    pub fn to_html(&self) -> String {
        self.scheduler.with_view(|view| view.to_html())
    }
}
