pub mod csharp;
mod error;
pub mod loader;
pub mod pipeline;
pub mod resolver;
pub mod signature;

pub use csharp::{support_units, InterfaceSynthesizer};
pub use error::Error;
pub use loader::parse_project;
pub use pipeline::{Diagnostic, GenerationResult, OutputUnit, Pipeline, PipelineOptions};
pub use resolver::{MemberResolver, ResolvedMember};
pub use signature::SignatureRenderer;
