//! Discovery pipeline: marked types in, one output unit per type out.

use std::collections::HashSet;
use std::fmt;

use ifacegen_core::config::{GlobalNamespaceKey, IfacegenConfig};
use ifacegen_core::symbols::{SymbolModel, TypeDescriptor};
use ifacegen_core::Markers;
use sha2::{Digest, Sha256};

use crate::csharp::{interface_name, InterfaceSynthesizer};
use crate::resolver::MemberResolver;
use crate::signature::SignatureRenderer;
use crate::Error;

/// A generated source unit handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    /// Unique key within a run, `<namespace>.I<Name>` for interfaces.
    pub key: String,
    /// Generated source text.
    pub text: String,
}

impl OutputUnit {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }

    /// File name for this unit with the given extension (`.g.cs`).
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}{}", self.key, extension)
    }
}

/// A per-type error reported instead of an output unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: &'static str,
    /// Metadata name of the offending type.
    pub type_name: String,
    pub message: String,
}

impl Diagnostic {
    fn from_error(type_name: String, error: &Error) -> Self {
        let code = match error {
            Error::MalformedTypeGraph { .. } => "IFG001",
            Error::SignatureTooDeep { .. } => "IFG002",
            Error::Io(_) | Error::Core(_) => "IFG000",
        };

        Self {
            code,
            type_name,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error {}: {} ({})", self.code, self.message, self.type_name)
    }
}

/// Everything produced by one pipeline run.
#[derive(Debug, Default)]
pub struct GenerationResult {
    pub units: Vec<OutputUnit>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationResult {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Tunables of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub max_signature_depth: usize,
    pub max_inheritance_depth: usize,
    pub global_namespace_key: GlobalNamespaceKey,
    pub generated_code_attribute: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from(&IfacegenConfig::default())
    }
}

impl From<&IfacegenConfig> for PipelineOptions {
    fn from(config: &IfacegenConfig) -> Self {
        Self {
            max_signature_depth: config.limits.max_signature_depth,
            max_inheritance_depth: config.limits.max_inheritance_depth,
            global_namespace_key: config.output.global_namespace_key,
            generated_code_attribute: config.output.generated_code_attribute,
        }
    }
}

/// Discovers marked types and synthesizes one interface unit for each.
///
/// A pipeline holds no mutable state; [`Pipeline::generate_one`] may be
/// called from several threads at once.
#[derive(Debug, Clone)]
pub struct Pipeline {
    markers: Markers,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(markers: Markers, options: PipelineOptions) -> Self {
        Self { markers, options }
    }

    /// Build a pipeline from loaded configuration.
    pub fn from_config(config: &IfacegenConfig) -> Self {
        Self::new(config.markers.to_markers(), PipelineOptions::from(config))
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Marked types, deduplicated by metadata name in first-seen order.
    pub fn discover<'a, M: SymbolModel + ?Sized>(&self, model: &'a M) -> Vec<&'a TypeDescriptor> {
        let mut seen = HashSet::new();
        model
            .types()
            .iter()
            .filter(|ty| ty.has_marker(&self.markers.discovery))
            .filter(|ty| seen.insert(ty.metadata_name()))
            .collect()
    }

    /// Output key for `ty`: `<namespace>.I<Name>`, with a fallback for the
    /// global namespace.
    pub fn output_key(&self, ty: &TypeDescriptor) -> String {
        let namespace = if ty.is_global_namespace() {
            match self.options.global_namespace_key {
                GlobalNamespaceKey::Random => format!("${}", uuid::Uuid::new_v4()),
                GlobalNamespaceKey::Stable => {
                    let digest = Sha256::digest(ty.metadata_name().as_bytes());
                    format!("${}", &hex::encode(digest)[..16])
                }
            }
        } else {
            ty.namespace.clone().unwrap_or_default()
        };

        format!("{}.{}", namespace, interface_name(ty))
    }

    /// Resolve and synthesize a single type.
    pub fn generate_one<M: SymbolModel + ?Sized>(
        &self,
        model: &M,
        ty: &TypeDescriptor,
    ) -> Result<OutputUnit, Error> {
        let resolver = MemberResolver::new(
            model,
            &self.markers.exclusion,
            self.options.max_inheritance_depth,
        );
        let synthesizer = InterfaceSynthesizer::new(
            SignatureRenderer::new(self.options.max_signature_depth),
            self.options.generated_code_attribute,
        );

        let members = resolver.resolve(ty)?;
        let text = synthesizer.synthesize(ty, &members)?;

        Ok(OutputUnit::new(self.output_key(ty), text))
    }

    /// Run over every type in `model`.
    ///
    /// Failures are reported per type and never abort the run.
    pub fn run<M: SymbolModel + ?Sized>(&self, model: &M) -> GenerationResult {
        let mut result = GenerationResult::default();
        let mut keys = HashSet::new();

        for ty in self.discover(model) {
            let type_name = ty.metadata_name();
            tracing::debug!(type_name = %type_name, "Generating interface");

            match self.generate_one(model, ty) {
                Ok(unit) => {
                    if keys.insert(unit.key.clone()) {
                        result.units.push(unit);
                    } else {
                        tracing::warn!(type_name = %type_name, key = %unit.key, "Duplicate output key");
                        result.diagnostics.push(Diagnostic {
                            code: "IFG003",
                            message: format!(
                                "output key {} is already used by another type",
                                unit.key
                            ),
                            type_name,
                        });
                    }
                }
                Err(e) => {
                    tracing::warn!(type_name = %type_name, error = %e, "Skipping type");
                    result.diagnostics.push(Diagnostic::from_error(type_name, &e));
                }
            }
        }

        tracing::info!(
            units = result.units.len(),
            diagnostics = result.diagnostics.len(),
            "Interface generation finished"
        );

        result
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Markers::default(), PipelineOptions::default())
    }
}
