//! Reconstruction of generic signatures as C# source text.
//!
//! Type argument lists are rendered with an explicit work stack rather than
//! recursion, so nesting depth is limited by the renderer's configured
//! maximum and never by the call stack.

use ifacegen_core::symbols::{GenericParameter, TypeArgument, TypeReference};

use crate::Error;

/// Renders type references, generic parameter lists and constraint clauses.
#[derive(Debug, Clone, Copy)]
pub struct SignatureRenderer {
    max_depth: usize,
}

/// Pending output while walking a type argument tree.
enum Step<'a> {
    Argument(&'a TypeArgument, usize),
    Text(&'static str),
}

impl SignatureRenderer {
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    /// Create a renderer that rejects argument nesting deeper than `max_depth`.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Full text of a type reference: `Name` or `Name<A, B<C>>`.
    pub fn type_reference(&self, reference: &TypeReference) -> Result<String, Error> {
        let mut out = String::new();
        let mut stack = Vec::new();

        self.open(reference, 0, reference, &mut out, &mut stack)?;
        while let Some(step) = stack.pop() {
            match step {
                Step::Text(text) => out.push_str(text),
                Step::Argument(TypeArgument::Parameter(name), _) => out.push_str(name),
                Step::Argument(TypeArgument::Concrete(inner), depth) => {
                    self.open(inner, depth, reference, &mut out, &mut stack)?
                }
            }
        }

        Ok(out)
    }

    /// Text of a single type argument slot.
    pub fn type_argument(&self, argument: &TypeArgument) -> Result<String, Error> {
        match argument {
            TypeArgument::Parameter(name) => Ok(name.clone()),
            TypeArgument::Concrete(reference) => self.type_reference(reference),
        }
    }

    /// `where T : c1, c2`, or empty text when `param` is unconstrained.
    pub fn constraint_clause(&self, param: &GenericParameter) -> Result<String, Error> {
        let constraints = &param.constraints;
        if constraints.is_empty() {
            return Ok(String::new());
        }

        let mut entries: Vec<String> = Vec::new();

        if let Some(kind) = constraints.kind {
            entries.push(kind.as_str().to_string());
        }
        if constraints.constructor {
            entries.push("new()".to_string());
        }
        if constraints.not_null {
            entries.push("notnull".to_string());
        }
        for constraint in &constraints.types {
            entries.push(self.type_argument(constraint)?);
        }

        Ok(format!("where {} : {}", param.name, entries.join(", ")))
    }

    /// Constraint clauses of every constrained parameter, in declaration order.
    pub fn constraint_clauses(&self, params: &[GenericParameter]) -> Result<Vec<String>, Error> {
        let mut clauses = Vec::new();
        for param in params {
            let clause = self.constraint_clause(param)?;
            if !clause.is_empty() {
                clauses.push(clause);
            }
        }
        Ok(clauses)
    }

    /// `<T, U>`, or empty text when there are no parameters.
    pub fn parameter_list(&self, params: &[GenericParameter]) -> String {
        if params.is_empty() {
            return String::new();
        }

        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        format!("<{}>", names.join(", "))
    }

    /// Write `reference`'s name and schedule its argument list.
    fn open<'a>(
        &self,
        reference: &'a TypeReference,
        depth: usize,
        root: &TypeReference,
        out: &mut String,
        stack: &mut Vec<Step<'a>>,
    ) -> Result<(), Error> {
        out.push_str(&reference.name);
        if !reference.is_generic() {
            return Ok(());
        }

        let nested = depth + 1;
        if nested > self.max_depth {
            return Err(Error::SignatureTooDeep {
                type_name: root.name.clone(),
                limit: self.max_depth,
            });
        }

        stack.push(Step::Text(">"));
        for (i, argument) in reference.arguments.iter().enumerate().rev() {
            stack.push(Step::Argument(argument, nested));
            if i > 0 {
                stack.push(Step::Text(", "));
            }
        }
        stack.push(Step::Text("<"));

        Ok(())
    }
}

impl Default for SignatureRenderer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifacegen_core::symbols::KindConstraint;

    fn nested(depth: usize) -> TypeReference {
        let mut reference = TypeReference::generic("Leaf", vec![TypeArgument::parameter("T")]);
        for _ in 1..depth {
            reference = TypeReference::generic("Box", vec![reference.into()]);
        }
        reference
    }

    #[test]
    fn test_plain_reference() {
        let renderer = SignatureRenderer::default();
        assert_eq!(
            renderer.type_reference(&TypeReference::new("int")).unwrap(),
            "int"
        );
    }

    #[test]
    fn test_nested_generic_reference() {
        let renderer = SignatureRenderer::default();
        let reference = TypeReference::generic(
            "Outer",
            vec![TypeArgument::generic(
                "Inner",
                vec![TypeArgument::parameter("T")],
            )],
        );
        assert_eq!(
            renderer.type_reference(&reference).unwrap(),
            "Outer<Inner<T>>"
        );
    }

    #[test]
    fn test_mixed_arguments() {
        let renderer = SignatureRenderer::default();
        let reference = TypeReference::generic(
            "Dictionary",
            vec![
                TypeArgument::parameter("TKey"),
                TypeArgument::generic(
                    "List",
                    vec![TypeArgument::generic(
                        "KeyValuePair",
                        vec![TypeArgument::named("string"), TypeArgument::parameter("TValue")],
                    )],
                ),
                TypeArgument::named("int"),
            ],
        );
        assert_eq!(
            renderer.type_reference(&reference).unwrap(),
            "Dictionary<TKey, List<KeyValuePair<string, TValue>>, int>"
        );
    }

    #[test]
    fn test_type_argument_parameter() {
        let renderer = SignatureRenderer::default();
        assert_eq!(
            renderer
                .type_argument(&TypeArgument::parameter("TItem"))
                .unwrap(),
            "TItem"
        );
    }

    #[test]
    fn test_depth_limit() {
        let renderer = SignatureRenderer::new(2);
        assert_eq!(
            renderer.type_reference(&nested(2)).unwrap(),
            "Box<Leaf<T>>"
        );

        let err = renderer.type_reference(&nested(3)).unwrap_err();
        match err {
            Error::SignatureTooDeep { type_name, limit } => {
                assert_eq!(type_name, "Box");
                assert_eq!(limit, 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_deep_nesting_within_limit() {
        let renderer = SignatureRenderer::new(4096);
        let rendered = renderer.type_reference(&nested(2000)).unwrap();
        assert!(rendered.starts_with("Box<Box<"));
        assert!(rendered.contains("Box<Leaf<T>>"));
        assert_eq!(rendered.matches('<').count(), 2000);
        assert_eq!(rendered.matches('>').count(), 2000);
    }

    #[test]
    fn test_class_new_clause() {
        let renderer = SignatureRenderer::default();
        let param = GenericParameter::new("T")
            .with_kind(KindConstraint::Class)
            .with_constructor();
        assert_eq!(
            renderer.constraint_clause(&param).unwrap(),
            "where T : class, new()"
        );
    }

    #[test]
    fn test_empty_clause() {
        let renderer = SignatureRenderer::default();
        assert_eq!(
            renderer
                .constraint_clause(&GenericParameter::new("T"))
                .unwrap(),
            ""
        );
    }

    #[test]
    fn test_clause_order() {
        let renderer = SignatureRenderer::default();
        let param = GenericParameter::new("T")
            .with_type_constraint(TypeArgument::generic(
                "IComparable",
                vec![TypeArgument::parameter("T")],
            ))
            .with_not_null()
            .with_kind(KindConstraint::Struct)
            .with_type_constraint(TypeArgument::parameter("TBase"));
        assert_eq!(
            renderer.constraint_clause(&param).unwrap(),
            "where T : struct, notnull, IComparable<T>, TBase"
        );
    }

    #[test]
    fn test_clause_propagates_depth_error() {
        let renderer = SignatureRenderer::new(1);
        let param = GenericParameter::new("T").with_type_constraint(nested(2));
        assert!(matches!(
            renderer.constraint_clause(&param),
            Err(Error::SignatureTooDeep { .. })
        ));
    }

    #[test]
    fn test_constraint_clauses_skip_unconstrained() {
        let renderer = SignatureRenderer::default();
        let params = vec![
            GenericParameter::new("TKey").with_not_null(),
            GenericParameter::new("TValue"),
            GenericParameter::new("TOut").with_kind(KindConstraint::Class),
        ];
        assert_eq!(
            renderer.constraint_clauses(&params).unwrap(),
            vec!["where TKey : notnull", "where TOut : class"]
        );
    }

    #[test]
    fn test_parameter_list() {
        let renderer = SignatureRenderer::default();
        assert_eq!(renderer.parameter_list(&[]), "");
        assert_eq!(
            renderer.parameter_list(&[GenericParameter::new("T"), GenericParameter::new("U")]),
            "<T, U>"
        );
    }
}
