//! CLI definitions, shared by the binary and the man page generator.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::options::Options;

/// Version string: `0.1.0 (abc1234 2026-01-01)` for dev builds.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("TERMYNAL_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TERMYNAL_BUILD_DATE"),
    ")"
);

/// termynal - animated terminal transcripts
#[derive(Parser, Debug)]
#[command(name = "termynal")]
#[command(version = VERSION)]
#[command(about = "Play shell transcripts as animated terminal sessions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a transcript full-screen
    #[command(long_about = "Play a transcript full-screen.

Lines starting with `$ ` are typed out, `# prompt$ ` sets a custom prompt,
`// ` lines are comments, lines ending in a carriage return vanish after
their delay, everything else is printed as output.

KEYS:
  + / →      speed up          - / ←      slow down
  r          restart           c          copy all input lines
  ↑ ↓ PgUp PgDn                scroll     End  jump to bottom
  Enter      start (with --no-init)       q / Esc  quit

MOUSE:
  hover shows a line's copy button, click copies it, wheel scrolls.")]
    Play {
        /// Transcript file (.html/.htm is searched for the container)
        file: PathBuf,
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        playback: PlaybackArgs,
        /// Don't follow new output
        #[arg(long)]
        no_auto_scroll: bool,
        /// Wait for Enter before starting
        #[arg(long)]
        no_init: bool,
    },
    /// Print the classified lines as JSON
    Parse {
        /// Transcript file
        file: PathBuf,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the rendered line templates as markup
    Render {
        /// Transcript file
        file: PathBuf,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Show configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Where the transcript lives and how it is read.
#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    /// Container selector in an HTML file [default: #termynal]
    #[arg(long, short)]
    pub selector: Option<String>,
    /// Literal that starts an input line [default: "$ "]
    #[arg(long, value_name = "LITERAL")]
    pub prompt: Option<String>,
    /// Literal that starts a custom-prompt line [default: "# "]
    #[arg(long, value_name = "LITERAL")]
    pub custom_prompt: Option<String>,
    /// Attribute prefix, as in data-<prefix>-delay [default: ty]
    #[arg(long)]
    pub prefix: Option<String>,
}

/// Timing and appearance overrides.
#[derive(Args, Debug, Default, Clone)]
pub struct PlaybackArgs {
    /// Delay before the first line, in ms
    #[arg(long, value_name = "MS")]
    pub start_delay: Option<f64>,
    /// Delay between typed characters, in ms
    #[arg(long, value_name = "MS")]
    pub type_delay: Option<f64>,
    /// Delay after each line, in ms
    #[arg(long, value_name = "MS")]
    pub line_delay: Option<f64>,
    /// Cursor glyph
    #[arg(long)]
    pub cursor: Option<String>,
    /// Progress bar length in characters
    #[arg(long, value_name = "N")]
    pub progress_length: Option<usize>,
    /// Progress bar fill character
    #[arg(long, value_name = "CHAR")]
    pub progress_char: Option<String>,
}

impl SourceArgs {
    pub fn to_options(&self) -> Options {
        Options {
            prefix: self.prefix.clone(),
            prompt_literal_start: self.prompt.clone(),
            custom_prompt_literal_start: self.custom_prompt.clone(),
            ..Options::default()
        }
    }
}

impl PlaybackArgs {
    /// Explicit options from flags; unset flags stay `None`.
    pub fn to_options(&self, source: &SourceArgs) -> Options {
        Options {
            start_delay: self.start_delay,
            type_delay: self.type_delay,
            line_delay: self.line_delay,
            cursor: self.cursor.clone(),
            progress_length: self.progress_length,
            progress_char: self.progress_char.clone(),
            ..source.to_options()
        }
    }
}
