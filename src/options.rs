//! Playback options and their resolution.
//!
//! Every key can come from four places. Resolution picks, per key:
//!
//! 1. the explicit option passed by the caller
//! 2. the container attribute `data-<prefix>-<key>`
//! 3. the config file `[playback]` table
//! 4. the documented default

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::lines::classify::{DEFAULT_CUSTOM_PROMPT_LITERAL, DEFAULT_PROMPT_LITERAL};
use crate::lines::render::DEFAULT_PREFIX;
use crate::markup::Element;

pub const DEFAULT_START_DELAY: f64 = 600.0;
pub const DEFAULT_TYPE_DELAY: f64 = 90.0;
pub const DEFAULT_LINE_DELAY: f64 = 1500.0;
pub const DEFAULT_PROGRESS_LENGTH: usize = 40;
/// Longest progress bar a line may ask for.
pub const MAX_PROGRESS_LENGTH: usize = 1_000;
pub const DEFAULT_PROGRESS_CHAR: &str = "█";
pub const DEFAULT_PROGRESS_PERCENT: f64 = 100.0;
pub const DEFAULT_CURSOR: &str = "▋";

/// Optional playback settings, as written by a caller or a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Attribute prefix, without `data-`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Delay before the first line, in ms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_delay: Option<f64>,
    /// Delay between typed characters, in ms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_delay: Option<f64>,
    /// Delay after each line, in ms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_char: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Stick to the bottom until the viewer scrolls away
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scroll: Option<bool>,
    /// Start playing at construction instead of waiting for `init()`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_now: Option<bool>,
    /// Inverse of `init_now`; ignored when `init_now` is set alongside it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_init: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_literal_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_prompt_literal_start: Option<String>,
}

/// Fully resolved settings used by the classifier and scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub prefix: String,
    pub start_delay: f64,
    pub type_delay: f64,
    pub line_delay: f64,
    pub progress_length: usize,
    pub progress_char: String,
    pub progress_percent: f64,
    pub cursor: String,
    pub auto_scroll: bool,
    pub init_now: bool,
    pub prompt_literal_start: String,
    pub custom_prompt_literal_start: String,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            start_delay: DEFAULT_START_DELAY,
            type_delay: DEFAULT_TYPE_DELAY,
            line_delay: DEFAULT_LINE_DELAY,
            progress_length: DEFAULT_PROGRESS_LENGTH,
            progress_char: DEFAULT_PROGRESS_CHAR.to_string(),
            progress_percent: DEFAULT_PROGRESS_PERCENT,
            cursor: DEFAULT_CURSOR.to_string(),
            auto_scroll: true,
            init_now: false,
            prompt_literal_start: DEFAULT_PROMPT_LITERAL.to_string(),
            custom_prompt_literal_start: DEFAULT_CUSTOM_PROMPT_LITERAL.to_string(),
        }
    }
}

impl ResolvedOptions {
    /// Resolve with no container and no file defaults.
    pub fn from_options(explicit: &Options) -> Self {
        Self::resolve(explicit, None, &Options::default())
    }

    /// Resolve every key: explicit > container attribute > file default >
    /// built-in default.
    pub fn resolve(explicit: &Options, container: Option<&Element>, file: &Options) -> Self {
        let base = Self::default();
        let prefix = explicit
            .prefix
            .clone()
            .or_else(|| file.prefix.clone())
            .unwrap_or(base.prefix);
        let attrs = ContainerAttrs { container, prefix: &prefix };

        Self {
            start_delay: explicit
                .start_delay
                .or_else(|| attrs.number("startDelay"))
                .or(file.start_delay)
                .unwrap_or(base.start_delay),
            type_delay: explicit
                .type_delay
                .or_else(|| attrs.number("typeDelay"))
                .or(file.type_delay)
                .unwrap_or(base.type_delay),
            line_delay: explicit
                .line_delay
                .or_else(|| attrs.number("lineDelay"))
                .or(file.line_delay)
                .unwrap_or(base.line_delay),
            progress_length: explicit
                .progress_length
                .or_else(|| attrs.parsed("progressLength"))
                .or(file.progress_length)
                .and_then(bounded_progress_length)
                .unwrap_or(base.progress_length),
            progress_char: explicit
                .progress_char
                .clone()
                .or_else(|| attrs.text("progressChar"))
                .or_else(|| file.progress_char.clone())
                .unwrap_or(base.progress_char),
            progress_percent: explicit
                .progress_percent
                .or_else(|| attrs.number("progressPercent"))
                .or(file.progress_percent)
                .unwrap_or(base.progress_percent),
            cursor: explicit
                .cursor
                .clone()
                .or_else(|| attrs.text("cursor"))
                .or_else(|| file.cursor.clone())
                .unwrap_or(base.cursor),
            auto_scroll: explicit
                .auto_scroll
                .or_else(|| attrs.parsed("autoScroll"))
                .or(file.auto_scroll)
                .unwrap_or(base.auto_scroll),
            init_now: explicit
                .start_now()
                .or_else(|| attrs.start_now())
                .or_else(|| file.start_now())
                .unwrap_or(base.init_now),
            prompt_literal_start: explicit
                .prompt_literal_start
                .clone()
                .or_else(|| attrs.text("promptLiteralStart"))
                .or_else(|| file.prompt_literal_start.clone())
                .unwrap_or(base.prompt_literal_start),
            custom_prompt_literal_start: explicit
                .custom_prompt_literal_start
                .clone()
                .or_else(|| attrs.text("customPromptLiteralStart"))
                .or_else(|| file.custom_prompt_literal_start.clone())
                .unwrap_or(base.custom_prompt_literal_start),
            prefix,
        }
    }

    /// Full attribute name for a field under the resolved prefix.
    pub fn attr_name(&self, field: &str) -> String {
        format!("data-{}-{}", self.prefix, field)
    }

    /// The bare type attribute under the resolved prefix.
    pub fn type_attr(&self) -> String {
        format!("data-{}", self.prefix)
    }
}

impl Options {
    /// `init_now`, or the inverse of `no_init` when only that is set.
    fn start_now(&self) -> Option<bool> {
        self.init_now.or(self.no_init.map(|no_init| !no_init))
    }
}

/// `length` when it is at most [`MAX_PROGRESS_LENGTH`], otherwise `None`
/// after a warning.
pub fn bounded_progress_length(length: usize) -> Option<usize> {
    if length > MAX_PROGRESS_LENGTH {
        warn!(
            length,
            max = MAX_PROGRESS_LENGTH,
            "progress length too large, using the default"
        );
        return None;
    }
    Some(length)
}

/// Reads `data-<prefix>-<key>` overrides from a container element.
struct ContainerAttrs<'a> {
    container: Option<&'a Element>,
    prefix: &'a str,
}

impl ContainerAttrs<'_> {
    fn text(&self, key: &str) -> Option<String> {
        let name = format!("data-{}-{}", self.prefix, key);
        self.container?
            .attr(&name)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn parsed<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        let raw = self.text(key)?;
        match raw.trim().parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(key, value = %raw, "ignoring unparseable container attribute");
                None
            }
        }
    }

    fn start_now(&self) -> Option<bool> {
        self.parsed::<bool>("initNow")
            .or_else(|| self.parsed::<bool>("noInit").map(|no_init| !no_init))
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.parsed::<f64>(key).filter(|v| v.is_finite() && *v >= 0.0)
    }
}
