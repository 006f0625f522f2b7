//! Loading of JSON symbol-model dumps.
//!
//! A dump is a `{ "types": [...] }` document produced by the host's semantic
//! model. A directory is walked recursively and every `.json` file in it is
//! merged, in path order, into one compilation.

use std::path::Path;

use ifacegen_core::symbols::{Compilation, ModelFile, TypeDescriptor};
use walkdir::WalkDir;

use crate::Error;

/// Load a symbol model from a dump file or a directory of dump files.
pub fn parse_project(path: &Path) -> Result<Compilation, Error> {
    if path.is_file() {
        let content = std::fs::read_to_string(path)?;
        return Ok(Compilation::from_json(&content)?);
    }

    let mut types = Vec::new();
    for entry in WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().map(|ext| ext == "json").unwrap_or(false))
    {
        let content = match std::fs::read_to_string(entry.path()) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(file = ?entry.path(), error = %e, "Failed to read model file");
                continue;
            }
        };
        match parse_file(&content) {
            Ok(mut parsed) => {
                tracing::debug!(file = ?entry.path(), types = parsed.len(), "Loaded model file");
                types.append(&mut parsed);
            }
            Err(e) => {
                tracing::warn!(file = ?entry.path(), error = %e, "Failed to parse model file");
            }
        }
    }

    Ok(Compilation::new(types)?)
}

/// Parse the types of a single dump.
fn parse_file(content: &str) -> Result<Vec<TypeDescriptor>, Error> {
    Ok(ModelFile::from_json(content)?.types)
}
