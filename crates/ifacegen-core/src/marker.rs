//! Discovery and exclusion markers.
//!
//! Markers are plain data handed to the pipeline by the host integration.
//! Nothing is registered globally.

use serde::{Deserialize, Serialize};

const ATTRIBUTE_SUFFIX: &str = "Attribute";
const GLOBAL_PREFIX: &str = "global::";

/// Default namespace of the well-known markers.
pub const DEFAULT_MARKER_NAMESPACE: &str = "AutomaticInterface";
/// Default discovery marker class name.
pub const DEFAULT_DISCOVERY_MARKER: &str = "GenerateAutomaticInterfaceAttribute";
/// Default exclusion marker class name.
pub const DEFAULT_EXCLUSION_MARKER: &str = "IgnoreAutomaticInterfaceAttribute";

/// Declaration kinds a marker may be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerTarget {
    Class,
    Struct,
    Method,
    Property,
    Event,
}

impl MarkerTarget {
    /// Member name in `System.AttributeTargets`.
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerTarget::Class => "Class",
            MarkerTarget::Struct => "Struct",
            MarkerTarget::Method => "Method",
            MarkerTarget::Property => "Property",
            MarkerTarget::Event => "Event",
        }
    }
}

/// A well-known attribute, identified by its qualified class name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Namespace of the attribute class, `None` for the global namespace.
    pub namespace: Option<String>,
    /// Attribute class name, normally ending in `Attribute`.
    pub name: String,
    /// Where the attribute may be applied.
    pub targets: Vec<MarkerTarget>,
}

impl Marker {
    /// Build a marker from a qualified name such as `Acme.GenerateAttribute`.
    pub fn from_qualified(qualified: &str, targets: Vec<MarkerTarget>) -> Self {
        let qualified = qualified.trim();
        let qualified = qualified.strip_prefix(GLOBAL_PREFIX).unwrap_or(qualified);
        let (namespace, name) = match qualified.rsplit_once('.') {
            Some((ns, name)) => (Some(ns.to_string()), name.to_string()),
            None => (None, qualified.to_string()),
        };

        Self {
            namespace,
            name,
            targets,
        }
    }

    /// Qualified class name.
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.clone(),
        }
    }

    /// Check whether an attribute, as written in source, refers to this marker.
    ///
    /// Accepts `Name`, `NameAttribute`, `Ns.Name`, `Ns.NameAttribute`, each
    /// optionally prefixed with `global::`.
    pub fn matches(&self, written: &str) -> bool {
        let written = written.trim();
        let written = written.strip_prefix(GLOBAL_PREFIX).unwrap_or(written);
        let written = strip_suffix(written);

        let short = strip_suffix(&self.name);
        if written == short {
            return true;
        }

        match &self.namespace {
            Some(ns) => written
                .strip_prefix(ns.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .is_some_and(|rest| rest == short),
            None => false,
        }
    }
}

fn strip_suffix(name: &str) -> &str {
    match name.strip_suffix(ATTRIBUTE_SUFFIX) {
        Some(stem) if !stem.is_empty() => stem,
        _ => name,
    }
}

/// The two markers the pipeline understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    /// Triggers interface generation for a type.
    pub discovery: Marker,
    /// Removes a member from the generated surface.
    pub exclusion: Marker,
}

impl Markers {
    /// Build markers from qualified names, using the default targets.
    pub fn new(discovery: &str, exclusion: &str) -> Self {
        Self {
            discovery: Marker::from_qualified(discovery, vec![MarkerTarget::Class]),
            exclusion: Marker::from_qualified(
                exclusion,
                vec![
                    MarkerTarget::Method,
                    MarkerTarget::Property,
                    MarkerTarget::Event,
                ],
            ),
        }
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::new(
            &format!("{}.{}", DEFAULT_MARKER_NAMESPACE, DEFAULT_DISCOVERY_MARKER),
            &format!("{}.{}", DEFAULT_MARKER_NAMESPACE, DEFAULT_EXCLUSION_MARKER),
        )
    }
}
