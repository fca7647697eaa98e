//! `parse` subcommand: classified lines as JSON.

use std::path::Path;

use anyhow::Result;

use termynal::cli::SourceArgs;

pub fn handle(file: &Path, source: &SourceArgs) -> Result<()> {
    let config = super::setup()?;
    let termynal = super::prepare(file, source, &config)?;
    println!("{}", serde_json::to_string_pretty(termynal.line_data())?);
    Ok(())
}
