//! Config subcommands handler

use anyhow::{bail, Result};

use termynal::player::render::Theme;
use termynal::Config;

/// Show current configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let toml_str = toml::to_string_pretty(&config)?;
    if super::color_enabled() {
        println!("{}", Theme::default().primary_text(&toml_str));
    } else {
        println!("{}", toml_str);
    }
    Ok(())
}

/// Print the config file path.
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Write the default configuration, keeping an existing file unless forced.
pub fn handle_init(force: bool) -> Result<()> {
    let config_path = Config::config_path()?;
    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            config_path.display()
        );
    }
    Config::default().save()?;
    println!("Wrote {}", config_path.display());
    Ok(())
}
