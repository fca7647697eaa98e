//! `render` subcommand: line templates as markup.

use std::path::Path;

use anyhow::Result;

use termynal::cli::SourceArgs;

pub fn handle(file: &Path, source: &SourceArgs) -> Result<()> {
    let config = super::setup()?;
    let termynal = super::prepare(file, source, &config)?;
    println!("{}", termynal.templates_html());
    Ok(())
}
