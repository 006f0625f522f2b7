use serde::{Deserialize, Serialize};

/// A usage of a named type, possibly with type arguments.
///
/// The name is the already-printed form of the type (`int`,
/// `global::System.Collections.Generic.List`); only the argument list is
/// reconstructed by the code generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeReference {
    /// Printed type name without its argument list.
    pub name: String,

    /// Type arguments in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<TypeArgument>,
}

impl TypeReference {
    /// Create a non-generic type reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Create a generic type reference.
    pub fn generic(name: impl Into<String>, arguments: Vec<TypeArgument>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Check whether this reference carries type arguments.
    pub fn is_generic(&self) -> bool {
        !self.arguments.is_empty()
    }
}

/// One slot of a type argument list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeArgument {
    /// Filled by one of the enclosing type's (or method's) own generic parameters.
    Parameter(String),
    /// Filled by a concrete type, which may itself be generic.
    Concrete(TypeReference),
}

impl TypeArgument {
    /// Reference an enclosing generic parameter by name.
    pub fn parameter(name: impl Into<String>) -> Self {
        TypeArgument::Parameter(name.into())
    }

    /// A concrete, non-generic type.
    pub fn named(name: impl Into<String>) -> Self {
        TypeArgument::Concrete(TypeReference::new(name))
    }

    /// A concrete generic type.
    pub fn generic(name: impl Into<String>, arguments: Vec<TypeArgument>) -> Self {
        TypeArgument::Concrete(TypeReference::generic(name, arguments))
    }
}

impl From<TypeReference> for TypeArgument {
    fn from(reference: TypeReference) -> Self {
        TypeArgument::Concrete(reference)
    }
}

/// Reference-type or value-type restriction on a generic parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindConstraint {
    /// `class`
    Class,
    /// `struct`
    Struct,
}

impl KindConstraint {
    pub fn as_str(&self) -> &'static str {
        match self {
            KindConstraint::Class => "class",
            KindConstraint::Struct => "struct",
        }
    }
}

/// Constraint facts attached to a generic parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    /// At most one of `class` / `struct`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<KindConstraint>,

    /// `new()`
    #[serde(default)]
    pub constructor: bool,

    /// `notnull`
    #[serde(default)]
    pub not_null: bool,

    /// Explicit base-type and interface constraints in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeArgument>,
}

impl Constraints {
    /// Check whether no constraint applies.
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && !self.constructor && !self.not_null && self.types.is_empty()
    }
}

/// A generic parameter declared on a type or method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericParameter {
    /// Parameter name (`T`, `TKey`).
    pub name: String,

    /// Constraint facts.
    #[serde(default)]
    pub constraints: Constraints,
}

impl GenericParameter {
    /// Create an unconstrained parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraints: Constraints::default(),
        }
    }

    pub fn with_kind(mut self, kind: KindConstraint) -> Self {
        self.constraints.kind = Some(kind);
        self
    }

    pub fn with_constructor(mut self) -> Self {
        self.constraints.constructor = true;
        self
    }

    pub fn with_not_null(mut self) -> Self {
        self.constraints.not_null = true;
        self
    }

    pub fn with_type_constraint(mut self, constraint: impl Into<TypeArgument>) -> Self {
        self.constraints.types.push(constraint.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_argument_json_shape() {
        let arg = TypeArgument::generic(
            "Outer",
            vec![TypeArgument::generic(
                "Inner",
                vec![TypeArgument::parameter("T")],
            )],
        );

        let json = serde_json::to_value(&arg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "concrete": {
                    "name": "Outer",
                    "arguments": [
                        { "concrete": { "name": "Inner", "arguments": [{ "parameter": "T" }] } }
                    ]
                }
            })
        );

        let back: TypeArgument = serde_json::from_value(json).unwrap();
        assert_eq!(back, arg);
    }

    #[test]
    fn test_constraints_is_empty() {
        assert!(GenericParameter::new("T").constraints.is_empty());
        assert!(!GenericParameter::new("T").with_not_null().constraints.is_empty());
        assert!(!GenericParameter::new("T")
            .with_type_constraint(TypeReference::new("IDisposable"))
            .constraints
            .is_empty());
    }

    #[test]
    fn test_constraints_deserialize_defaults() {
        let param: GenericParameter =
            serde_json::from_str(r#"{ "name": "T", "constraints": { "kind": "struct" } }"#)
                .unwrap();
        assert_eq!(param.constraints.kind, Some(KindConstraint::Struct));
        assert!(!param.constraints.constructor);
        assert!(param.constraints.types.is_empty());
    }
}
