mod cli;
mod display;
mod error;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, ReportCommand, RunCommand};
use covidview::config::Config;
use error::CovidViewCliResult;
use log::debug;

const DEFAULT_LOGGING_LEVEL: &str = "warn";

fn main() -> Result<()> {
    // Set RUST_LOG to `DEFAULT_LOGGING_LEVEL` if not set
    let _ =
        std::env::var("RUST_LOG").map_err(|_| std::env::set_var("RUST_LOG", DEFAULT_LOGGING_LEVEL));
    pretty_env_logger::init_timed();
    let args = Cli::parse();
    debug!("args: {args:?}");
    let config = read_config_from_toml()?;
    debug!("config: {config:?}");

    match args.command {
        Some(command) => command.run(config)?,
        None => ReportCommand { quiet: args.quiet }.run(config)?,
    }
    Ok(())
}

fn read_config_from_toml() -> CovidViewCliResult<Config> {
    // macOS: ~/Library/Application Support/covidview/config.toml
    match dirs::config_dir() {
        Some(config_dir) => read_config(config_dir.join("covidview").join("config.toml")),
        None => Ok(Config::default()),
    }
}

/// Reads `Config` from a TOML file. A missing file gives the defaults.
fn read_config<P: AsRef<Path>>(file_path: P) -> CovidViewCliResult<Config> {
    match std::fs::read_to_string(file_path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(e.into()),
    }
}
