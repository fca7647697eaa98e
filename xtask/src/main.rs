//! Development tasks for termynal.
//!
//! `cargo run -p xtask -- man` writes man pages for the CLI and every
//! subcommand into `target/man`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_mangen::Man;

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for termynal")]
struct Xtask {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    match Xtask::parse().command {
        Task::Man { out } => generate_man_pages(&out),
    }
}

fn generate_man_pages(out: &Path) -> Result<()> {
    fs::create_dir_all(out).with_context(|| format!("Failed to create {}", out.display()))?;

    let cmd = termynal::cli::Cli::command();
    write_page(&cmd, &out.join("termynal.1"))?;

    for sub in cmd.get_subcommands() {
        let name = format!("termynal-{}", sub.get_name());
        let sub = sub.clone().name(name.clone());
        write_page(&sub, &out.join(format!("{}.1", name)))?;
    }

    println!("Man pages written to {}", out.display());
    Ok(())
}

fn write_page(cmd: &clap::Command, path: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    Man::new(cmd.clone())
        .render(&mut buffer)
        .with_context(|| format!("Failed to render {}", path.display()))?;
    fs::write(path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
