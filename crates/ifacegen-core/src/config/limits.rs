use serde::{Deserialize, Serialize};

/// Bounds on traversals over the symbol model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Deepest generic argument nesting rendered before giving up.
    #[serde(default = "default_max_signature_depth")]
    pub max_signature_depth: usize,

    /// Longest base-type chain walked before the graph is declared malformed.
    #[serde(default = "default_max_inheritance_depth")]
    pub max_inheritance_depth: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_signature_depth: default_max_signature_depth(),
            max_inheritance_depth: default_max_inheritance_depth(),
        }
    }
}

fn default_max_signature_depth() -> usize {
    64
}

fn default_max_inheritance_depth() -> usize {
    256
}
