use anyhow::Result;
use clap::Parser;
use console::style;

use super::{load_config, write_units};

/// Write the marker attribute declarations.
#[derive(Parser)]
pub struct MarkersCommand {
    /// Output directory (defaults to generated).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Configuration file (defaults to ifacegen.toml when present).
    #[arg(short, long)]
    pub config: Option<String>,
}

impl MarkersCommand {
    /// Execute the markers command.
    pub fn execute(self) -> Result<()> {
        let config = load_config(self.config.as_deref())?;
        let output_dir = self.output.unwrap_or_else(|| "generated".to_string());

        let units = ifacegen_codegen::support_units(&config.markers.to_markers());
        write_units(
            std::path::Path::new(&output_dir),
            &units,
            &config.output.file_extension,
        )?;

        for unit in &units {
            println!("  {} {}", style("✓").green(), style(&unit.key).cyan());
        }
        Ok(())
    }
}
