use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::member::MemberDescriptor;
use super::types::GenericParameter;
use crate::error::{IfacegenError, Result};
use crate::marker::Marker;

/// A type declared in the compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Containing namespace, `None` for the global namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Simple type name without arity.
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_parameters: Vec<GenericParameter>,

    /// Metadata name of the base type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,

    /// Attribute names as written on the type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl TypeDescriptor {
    /// Create a non-generic type with no members.
    pub fn new(namespace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            name: name.into(),
            generic_parameters: Vec::new(),
            base_type: None,
            attributes: Vec::new(),
            members: Vec::new(),
            documentation: None,
        }
    }

    /// Identity of the type: ``Namespace.Name`Arity``.
    pub fn metadata_name(&self) -> String {
        let mut name = match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.clone(),
        };
        if !self.generic_parameters.is_empty() {
            name.push_str(&format!("`{}", self.generic_parameters.len()));
        }
        name
    }

    pub fn is_global_namespace(&self) -> bool {
        self.namespace.as_deref().map_or(true, str::is_empty)
    }

    pub fn has_marker(&self, marker: &Marker) -> bool {
        self.attributes.iter().any(|attr| marker.matches(attr))
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base_type = Some(base.into());
        self
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    pub fn with_generic_parameter(mut self, param: GenericParameter) -> Self {
        self.generic_parameters.push(param);
        self
    }

    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }
}

/// Boundary to the host's semantic model.
///
/// Implementations are queried read-only and may be shared across threads
/// while a pass is running.
pub trait SymbolModel: Send + Sync {
    /// Every type in the compilation, in source order.
    fn types(&self) -> &[TypeDescriptor];

    /// Look a type up by metadata name.
    fn resolve(&self, metadata_name: &str) -> Option<&TypeDescriptor>;

    /// Base type of `ty`, or `None` when the chain ends or leaves the model.
    fn base_type(&self, ty: &TypeDescriptor) -> Option<&TypeDescriptor> {
        ty.base_type.as_deref().and_then(|name| self.resolve(name))
    }
}

/// On-disk shape of a symbol model dump.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ModelFile {
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
}

impl ModelFile {
    /// Parse a JSON model dump.
    ///
    /// Type arguments nest arbitrarily deep, so the parser's recursion limit
    /// is lifted and the stack grows on demand instead. Depth is enforced
    /// later, per type, by the signature renderer.
    pub fn from_json(content: &str) -> Result<Self> {
        let mut de = serde_json::Deserializer::from_str(content);
        de.disable_recursion_limit();
        let file = Self::deserialize(serde_stacker::Deserializer::new(&mut de))?;
        de.end()?;
        Ok(file)
    }
}

/// In-memory symbol model indexed by metadata name.
#[derive(Debug, Default)]
pub struct Compilation {
    types: Vec<TypeDescriptor>,
    index: HashMap<String, usize>,
}

impl Compilation {
    /// Build a compilation.
    ///
    /// Declarations sharing a metadata name are partial declarations of one
    /// type: they are folded into the first, with attributes unioned and
    /// members appended in declaration order.
    pub fn new(types: Vec<TypeDescriptor>) -> Result<Self> {
        let mut merged: Vec<TypeDescriptor> = Vec::with_capacity(types.len());
        let mut index = HashMap::with_capacity(types.len());

        for (i, ty) in types.into_iter().enumerate() {
            if ty.name.trim().is_empty() {
                return Err(IfacegenError::InvalidModel(format!(
                    "type #{} in namespace {:?} has an empty name",
                    i, ty.namespace
                )));
            }

            let name = ty.metadata_name();
            match index.get(&name) {
                Some(&existing) => {
                    tracing::debug!(type_name = %name, "Merging partial declaration");
                    merge_partial(&mut merged[existing], ty);
                }
                None => {
                    index.insert(name, merged.len());
                    merged.push(ty);
                }
            }
        }

        tracing::debug!(types = merged.len(), "Indexed compilation");
        Ok(Self {
            types: merged,
            index,
        })
    }

    /// Parse a compilation from a JSON model dump.
    pub fn from_json(content: &str) -> Result<Self> {
        Self::new(ModelFile::from_json(content)?.types)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn merge_partial(target: &mut TypeDescriptor, part: TypeDescriptor) {
    for attribute in part.attributes {
        if !target.attributes.contains(&attribute) {
            target.attributes.push(attribute);
        }
    }
    target.members.extend(part.members);
    if target.base_type.is_none() {
        target.base_type = part.base_type;
    }
    if target.documentation.is_none() {
        target.documentation = part.documentation;
    }
}

impl SymbolModel for Compilation {
    fn types(&self) -> &[TypeDescriptor] {
        &self.types
    }

    fn resolve(&self, metadata_name: &str) -> Option<&TypeDescriptor> {
        self.index.get(metadata_name).map(|&i| &self.types[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_name() {
        let plain = TypeDescriptor::new(Some("Demo"), "User");
        assert_eq!(plain.metadata_name(), "Demo.User");

        let generic = TypeDescriptor::new(Some("Demo"), "Box")
            .with_generic_parameter(GenericParameter::new("T"))
            .with_generic_parameter(GenericParameter::new("U"));
        assert_eq!(generic.metadata_name(), "Demo.Box`2");

        let global = TypeDescriptor::new(None, "Loose");
        assert_eq!(global.metadata_name(), "Loose");
        assert!(global.is_global_namespace());
    }

    #[test]
    fn test_base_type_lookup() {
        let compilation = Compilation::new(vec![
            TypeDescriptor::new(Some("Demo"), "Derived").with_base("Demo.Base"),
            TypeDescriptor::new(Some("Demo"), "Base").with_base("System.Object"),
        ])
        .unwrap();

        let derived = compilation.resolve("Demo.Derived").unwrap();
        let base = compilation.base_type(derived).unwrap();
        assert_eq!(base.name, "Base");
        // System.Object is outside the model, so the chain ends here.
        assert!(compilation.base_type(base).is_none());
    }

    #[test]
    fn test_partial_declarations_merge() {
        let first = TypeDescriptor::new(Some("Demo"), "User")
            .with_attribute("GenerateAutomaticInterface")
            .with_member(MemberDescriptor::property(
                "A",
                crate::symbols::TypeArgument::named("int"),
            ));
        let mut second = TypeDescriptor::new(Some("Demo"), "User")
            .with_attribute("GenerateAutomaticInterface")
            .with_attribute("Serializable")
            .with_base("Demo.Entity")
            .with_member(MemberDescriptor::property(
                "B",
                crate::symbols::TypeArgument::named("string"),
            ));
        second.documentation = Some("second".into());

        let compilation = Compilation::new(vec![first, second]).unwrap();
        assert_eq!(compilation.len(), 1);

        let user = compilation.resolve("Demo.User").unwrap();
        let names: Vec<&str> = user.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(
            user.attributes,
            vec!["GenerateAutomaticInterface", "Serializable"]
        );
        assert_eq!(user.base_type.as_deref(), Some("Demo.Entity"));
        assert_eq!(user.documentation.as_deref(), Some("second"));
    }

    #[test]
    fn test_from_json_deeply_nested_arguments() {
        let depth = 500;
        let json = format!(
            r#"{{"types":[{{"namespace":"Demo","name":"Deep","members":[{{"name":"Value","signature":{{"property":{{"type":{}{}{}}}}}}}]}}]}}"#,
            r#"{"concrete":{"name":"Task","arguments":["#.repeat(depth),
            r#"{"concrete":{"name":"int"}}"#,
            "]}}".repeat(depth),
        );

        let compilation = Compilation::from_json(&json).unwrap();
        let deep = compilation.resolve("Demo.Deep").unwrap();
        assert_eq!(deep.members.len(), 1);
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = Compilation::new(vec![TypeDescriptor::new(Some("Demo"), " ")]).unwrap_err();
        assert!(matches!(err, IfacegenError::InvalidModel(_)));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "types": [
                {
                    "namespace": "Demo",
                    "name": "Repository",
                    "attributes": ["GenerateAutomaticInterface"],
                    "generic_parameters": [
                        { "name": "T", "constraints": { "kind": "class", "constructor": true } }
                    ],
                    "members": [
                        {
                            "name": "Count",
                            "signature": { "property": { "type": { "concrete": { "name": "int" } } } }
                        }
                    ]
                }
            ]
        }"#;

        let compilation = Compilation::from_json(json).unwrap();
        let repo = compilation.resolve("Demo.Repository`1").unwrap();
        assert_eq!(repo.members.len(), 1);
        assert!(repo.generic_parameters[0].constraints.constructor);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = Compilation::from_json("{ \"types\": 3 }").unwrap_err();
        assert!(matches!(err, IfacegenError::Serialization(_)));
    }
}
