//! `play` subcommand: full-screen playback.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio::task::LocalSet;
use tracing::info;

use termynal::cli::{PlaybackArgs, SourceArgs};
use termynal::document::DEFAULT_SELECTOR;
use termynal::player::input::{map_event, EventReader};
use termynal::player::render::TerminalSurface;
use termynal::player::{InputResult, Intent, Phase};
use termynal::{logging, Config, Document, Options, Termynal};

type Backend = CrosstermBackend<io::Stdout>;

#[cfg(not(tarpaulin_include))]
pub fn handle(
    file: &Path,
    source: &SourceArgs,
    playback: &PlaybackArgs,
    no_auto_scroll: bool,
    no_init: bool,
) -> Result<()> {
    let config = Config::load()?;
    let _log_guard = logging::init(&config.logging.level, config.log_file().as_deref())?;

    let document = super::load_document(file)?;
    let selector = source.selector.as_deref().unwrap_or(DEFAULT_SELECTOR);
    // Fail before touching the terminal
    document
        .select(selector)?
        .with_context(|| format!("container not found: {}", selector))?;

    let mut options = playback.to_options(source);
    if no_auto_scroll {
        options.auto_scroll = Some(false);
    }
    options.init_now = Some(!no_init);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start runtime")?;
    let local = LocalSet::new();
    local.block_on(&runtime, run(&document, selector, options, config.playback))
}

#[cfg(not(tarpaulin_include))]
async fn run(document: &Document, selector: &str, options: Options, defaults: Options) -> Result<()> {
    let terminal = setup_terminal()?;
    let result = event_loop(document, selector, options, defaults, terminal).await;
    let restored = restore_terminal();
    result.and(restored)
}

#[cfg(not(tarpaulin_include))]
async fn event_loop(
    document: &Document,
    selector: &str,
    options: Options,
    defaults: Options,
    terminal: Terminal<Backend>,
) -> Result<()> {
    let termynal = Termynal::builder()
        .options(options)
        .defaults(defaults)
        .surface(TerminalSurface::new(terminal))
        .build(document, selector)?;
    termynal.dispatch(Intent::Redraw);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let _reader = EventReader::spawn(tx);

    while let Some(event) = rx.recv().await {
        let (width, height) = crossterm::terminal::size().context("Failed to read terminal size")?;
        let intent = termynal
            .scheduler()
            .with_view(|view| map_event(event, view, width, height));
        let Some(intent) = intent else { continue };

        // Enter only starts a deferred first run
        if intent == Intent::Init && termynal.phase() != Phase::Idle {
            continue;
        }
        if termynal.dispatch(intent) == InputResult::Quit {
            info!("quit requested");
            break;
        }
    }
    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn setup_terminal() -> Result<Terminal<Backend>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

#[cfg(not(tarpaulin_include))]
fn restore_terminal() -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show)
        .context("Failed to restore terminal")?;
    Ok(())
}
