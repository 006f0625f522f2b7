mod member;
mod model;
mod types;

pub use member::{Accessibility, MemberDescriptor, MemberSignature, Parameter, ParameterModifier};
pub use model::{Compilation, ModelFile, SymbolModel, TypeDescriptor};
pub use types::{Constraints, GenericParameter, KindConstraint, TypeArgument, TypeReference};
