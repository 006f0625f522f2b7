use ifacegen_core::IfacegenError;

/// Code generation error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed type graph at {type_name}: {detail}")]
    MalformedTypeGraph { type_name: String, detail: String },

    #[error("Signature of {type_name} nests deeper than {limit} type arguments")]
    SignatureTooDeep { type_name: String, limit: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] IfacegenError),
}
