mod generate;
mod init;
mod markers;

pub use generate::GenerateCommand;
pub use init::InitCommand;
pub use markers::MarkersCommand;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ifacegen_core::IfacegenConfig;
use std::fs;
use std::path::Path;

use ifacegen_codegen::OutputUnit;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "ifacegen.toml";

/// ifacegen - interfaces for marked types
#[derive(Parser)]
#[command(name = "ifacegen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generate interfaces for every marked type in a symbol model.
    Generate(GenerateCommand),

    /// Write the marker attribute declarations.
    Markers(MarkersCommand),

    /// Write a default ifacegen.toml.
    Init(InitCommand),
}

impl Cli {
    /// Execute the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Generate(cmd) => cmd.execute(),
            Commands::Markers(cmd) => cmd.execute(),
            Commands::Init(cmd) => cmd.execute(),
        }
    }
}

/// Load the explicit config file, else `ifacegen.toml` if present, else defaults.
pub(crate) fn load_config(path: Option<&str>) -> Result<IfacegenConfig> {
    match path {
        Some(path) => IfacegenConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path)),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            tracing::debug!("Loading configuration from {}", DEFAULT_CONFIG_FILE);
            Ok(IfacegenConfig::from_file(DEFAULT_CONFIG_FILE)?)
        }
        None => Ok(IfacegenConfig::default()),
    }
}

/// Write each unit to `<dir>/<key><extension>`, replacing earlier versions.
pub(crate) fn write_units(dir: &Path, units: &[OutputUnit], extension: &str) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    for unit in units {
        let path = dir.join(unit.file_name(extension));
        fs::write(&path, &unit.text)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(file = %path.display(), "Wrote unit");
    }

    Ok(())
}
