use serde::{Deserialize, Serialize};

/// Output key strategy for types declared in the global namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlobalNamespaceKey {
    /// Fresh random token per type and run. Not reproducible across runs.
    #[default]
    Random,
    /// Hash of the type's metadata name. Reproducible.
    Stable,
}

/// Emitted output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub global_namespace_key: GlobalNamespaceKey,

    /// Emit `[GeneratedCode]` on each interface.
    #[serde(default = "default_true")]
    pub generated_code_attribute: bool,

    /// Extension appended to the output key when units are written to disk.
    #[serde(default = "default_file_extension")]
    pub file_extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            global_namespace_key: GlobalNamespaceKey::default(),
            generated_code_attribute: true,
            file_extension: default_file_extension(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_file_extension() -> String {
    ".g.cs".to_string()
}
