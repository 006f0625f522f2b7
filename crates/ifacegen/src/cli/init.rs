use anyhow::{bail, Result};
use clap::Parser;
use console::style;
use ifacegen_core::IfacegenConfig;
use std::fs;
use std::path::Path;

use super::DEFAULT_CONFIG_FILE;

/// Write a default configuration file.
#[derive(Parser)]
pub struct InitCommand {
    /// Path of the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub path: String,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(self) -> Result<()> {
        let path = Path::new(&self.path);
        if path.exists() && !self.force {
            bail!("{} already exists (use --force to overwrite)", self.path);
        }

        let content = format!(
            "# ifacegen configuration\n# ${{VAR}} references are substituted from the environment.\n\n{}",
            IfacegenConfig::default().to_toml()?
        );
        fs::write(path, content)?;

        println!("  {} Wrote {}", style("✓").green(), style(&self.path).cyan());
        Ok(())
    }
}
