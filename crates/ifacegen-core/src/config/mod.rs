mod limits;
mod output;

pub use limits::LimitsConfig;
pub use output::{GlobalNamespaceKey, OutputConfig};

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{IfacegenError, Result};
use crate::marker::{
    Markers, DEFAULT_DISCOVERY_MARKER, DEFAULT_EXCLUSION_MARKER, DEFAULT_MARKER_NAMESPACE,
};

/// Root configuration for ifacegen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IfacegenConfig {
    /// Marker names.
    #[serde(default)]
    pub markers: MarkersConfig,

    /// Traversal limits.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Emitted output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl IfacegenConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| IfacegenError::Config(format!("Failed to read config file: {}", e)))?;

        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let content = substitute_env_vars(content);

        let config: Self = toml::from_str(&content)
            .map_err(|e| IfacegenError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| IfacegenError::Serialization(format!("Failed to render config: {}", e)))
    }

    fn validate(&self) -> Result<()> {
        if self.markers.discovery.trim().is_empty() || self.markers.exclusion.trim().is_empty() {
            return Err(IfacegenError::Config(
                "marker names must not be empty".to_string(),
            ));
        }
        if self.limits.max_signature_depth == 0 || self.limits.max_inheritance_depth == 0 {
            return Err(IfacegenError::Config(
                "limits must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Qualified names of the discovery and exclusion markers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkersConfig {
    #[serde(default = "default_discovery")]
    pub discovery: String,

    #[serde(default = "default_exclusion")]
    pub exclusion: String,
}

impl MarkersConfig {
    /// Build the marker set handed to the pipeline.
    pub fn to_markers(&self) -> Markers {
        Markers::new(&self.discovery, &self.exclusion)
    }
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            discovery: default_discovery(),
            exclusion: default_exclusion(),
        }
    }
}

fn default_discovery() -> String {
    format!("{}.{}", DEFAULT_MARKER_NAMESPACE, DEFAULT_DISCOVERY_MARKER)
}

fn default_exclusion() -> String {
    format!("{}.{}", DEFAULT_MARKER_NAMESPACE, DEFAULT_EXCLUSION_MARKER)
}

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
});

/// Substitute environment variables in the format ${VAR_NAME}.
fn substitute_env_vars(content: &str) -> String {
    let mut result = content.to_string();

    for cap in ENV_VAR_PATTERN.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}
