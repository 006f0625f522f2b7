use anyhow::{bail, Context, Result};
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use std::time::Duration;

use ifacegen_codegen::{GenerationResult, Pipeline};
use ifacegen_core::config::GlobalNamespaceKey;

use super::{load_config, write_units};

/// Generate interfaces from a symbol model dump.
#[derive(Parser)]
pub struct GenerateCommand {
    /// Symbol model dump: a JSON file or a directory of JSON files.
    #[arg(short, long)]
    pub model: String,

    /// Output directory (defaults to generated).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Configuration file (defaults to ifacegen.toml when present).
    #[arg(short, long)]
    pub config: Option<String>,

    /// Derive keys of global-namespace types from their names instead of random tokens.
    #[arg(long)]
    pub stable_keys: bool,

    /// Also write the marker attribute declarations.
    #[arg(long)]
    pub emit_markers: bool,

    /// Remove previously generated files from the output directory first.
    #[arg(long)]
    pub clean: bool,
}

impl GenerateCommand {
    /// Execute the generate command.
    pub fn execute(self) -> Result<()> {
        let mut config = load_config(self.config.as_deref())?;
        if self.stable_keys {
            config.output.global_namespace_key = GlobalNamespaceKey::Stable;
        }

        let model_path = Path::new(&self.model);
        if !model_path.exists() {
            bail!("Symbol model not found: {}", self.model);
        }

        let output_dir = self.output.unwrap_or_else(|| "generated".to_string());
        let output_path = Path::new(&output_dir);
        let extension = config.output.file_extension.clone();

        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.enable_steady_tick(Duration::from_millis(100));

        pb.set_message("Loading symbol model...");
        let compilation = ifacegen_codegen::parse_project(model_path)
            .with_context(|| format!("Failed to load symbol model from {}", self.model))?;

        pb.set_message("Generating interfaces...");
        let pipeline = Pipeline::from_config(&config);
        let result = pipeline.run(&compilation);

        if self.clean && output_path.exists() {
            pb.set_message("Removing stale units...");
            let removed = clean_output(output_path, &extension)?;
            tracing::debug!(removed, "Removed stale units");
        }

        pb.set_message("Writing units...");
        write_units(output_path, &result.units, &extension)?;
        let marker_count = if self.emit_markers {
            let support = ifacegen_codegen::support_units(pipeline.markers());
            write_units(output_path, &support, &extension)?;
            support.len()
        } else {
            0
        };

        pb.finish_and_clear();
        print_summary(&result, compilation.len(), marker_count, &output_dir);

        Ok(())
    }
}

/// Remove files with the generated extension directly under `dir`.
fn clean_output(dir: &Path, extension: &str) -> Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_generated = path.is_file()
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(extension));
        if is_generated {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}

fn print_summary(result: &GenerationResult, type_count: usize, marker_count: usize, output: &str) {
    println!();
    for diagnostic in &result.diagnostics {
        println!(
            "  {} {} {}: {}",
            style("error").red(),
            style(diagnostic.code).dim(),
            style(&diagnostic.type_name).cyan(),
            diagnostic.message
        );
    }
    if result.has_errors() {
        println!();
    }

    println!(
        "  {} Generated {} interfaces from {} types",
        style("✓").green(),
        style(result.units.len()).cyan(),
        style(type_count).cyan()
    );
    if marker_count > 0 {
        println!(
            "  {} Wrote {} marker declarations",
            style("✓").green(),
            style(marker_count).cyan()
        );
    }
    if result.has_errors() {
        println!(
            "  {} Skipped {} types with diagnostics",
            style("⚠").yellow(),
            style(result.diagnostics.len()).yellow()
        );
    }
    println!("  {} Output: {}", style("📁").dim(), style(output).cyan());
    println!();
}
