pub mod config;
pub mod error;
pub mod marker;
pub mod symbols;

pub use config::IfacegenConfig;
pub use error::{IfacegenError, Result};
pub use marker::{Marker, MarkerTarget, Markers};
pub use symbols::{
    Compilation, GenericParameter, MemberDescriptor, SymbolModel, TypeArgument, TypeDescriptor,
    TypeReference,
};
