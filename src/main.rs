//! termynal - play shell transcripts as animated terminal sessions

mod commands;

use anyhow::Result;
use clap::Parser;

use termynal::cli::{Cli, Commands, ConfigCommands};
use termynal::player::render::Theme;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        let message = format!("Error: {:#}", e);
        if std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stderr) {
            eprintln!("{}", Theme::default().error_text(&message));
        } else {
            eprintln!("{}", message);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Play {
            file,
            source,
            playback,
            no_auto_scroll,
            no_init,
        } => commands::play::handle(&file, &source, &playback, no_auto_scroll, no_init),
        Commands::Parse { file, source } => commands::parse::handle(&file, &source),
        Commands::Render { file, source } => commands::render::handle(&file, &source),
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Init { force } => commands::config::handle_init(force),
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
