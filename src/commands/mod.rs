//! Subcommand handlers.

pub mod completions;
pub mod config;
pub mod parse;
pub mod play;
pub mod render;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use termynal::cli::SourceArgs;
use termynal::document::DEFAULT_SELECTOR;
use termynal::{logging, Config, Document, Options, Termynal};

/// Whether stdout output may carry ANSI colors.
pub fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
}

/// Load the config and log to stderr.
pub fn setup() -> Result<Config> {
    let config = Config::load()?;
    logging::init(&config.logging.level, None)?;
    Ok(config)
}

/// Read a transcript. HTML files are parsed as pages; anything else becomes
/// the content of a single `#termynal` container.
pub fn load_document(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let is_html = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"));
    Ok(if is_html {
        Document::parse(&content)
    } else {
        Document::from_text(&content)
    })
}

/// Build a termynal that is never started, for the inspection commands.
pub fn prepare(path: &Path, source: &SourceArgs, config: &Config) -> Result<Termynal> {
    let document = load_document(path)?;
    let selector = source.selector.as_deref().unwrap_or(DEFAULT_SELECTOR);
    let options = Options {
        init_now: Some(false),
        ..source.to_options()
    };
    let termynal = Termynal::builder()
        .options(options)
        .defaults(config.playback.clone())
        .build(&document, selector)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(termynal)
}
