//! Member definitions of a type's declared surface.

use serde::{Deserialize, Serialize};

use super::types::{GenericParameter, TypeArgument};
use crate::marker::Marker;

/// Declared accessibility of a member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    #[default]
    Public,
    Internal,
    Protected,
    ProtectedInternal,
    PrivateProtected,
    Private,
}

/// Passing mode of a method parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterModifier {
    Ref,
    Out,
    In,
    Params,
}

impl ParameterModifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterModifier::Ref => "ref",
            ParameterModifier::Out => "out",
            ParameterModifier::In => "in",
            ParameterModifier::Params => "params",
        }
    }
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeArgument,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<ParameterModifier>,

    /// Default value, already printed (`null`, `10`, `"abc"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeArgument>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            modifier: None,
            default_value: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Declared signature of a member, one case per supported member kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberSignature {
    Property {
        #[serde(rename = "type")]
        ty: TypeArgument,
        #[serde(default = "default_true")]
        getter: bool,
        #[serde(default)]
        setter: bool,
    },
    Method {
        return_type: TypeArgument,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        generic_parameters: Vec<GenericParameter>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        parameters: Vec<Parameter>,
    },
    Event {
        #[serde(rename = "type")]
        ty: TypeArgument,
    },
}

/// A member declared directly on a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDescriptor {
    pub name: String,

    #[serde(default)]
    pub accessibility: Accessibility,

    #[serde(default)]
    pub is_static: bool,

    /// Attribute names as written on the member.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,

    /// Documentation comment body, one entry per line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    pub signature: MemberSignature,
}

impl MemberDescriptor {
    /// Create a public member.
    pub fn new(name: impl Into<String>, signature: MemberSignature) -> Self {
        Self {
            name: name.into(),
            accessibility: Accessibility::Public,
            is_static: false,
            attributes: Vec::new(),
            documentation: None,
            signature,
        }
    }

    /// Public read/write property.
    pub fn property(name: impl Into<String>, ty: impl Into<TypeArgument>) -> Self {
        Self::new(
            name,
            MemberSignature::Property {
                ty: ty.into(),
                getter: true,
                setter: true,
            },
        )
    }

    /// Public non-generic method.
    pub fn method(
        name: impl Into<String>,
        return_type: impl Into<TypeArgument>,
        parameters: Vec<Parameter>,
    ) -> Self {
        Self::new(
            name,
            MemberSignature::Method {
                return_type: return_type.into(),
                generic_parameters: Vec::new(),
                parameters,
            },
        )
    }

    /// Public event.
    pub fn event(name: impl Into<String>, ty: impl Into<TypeArgument>) -> Self {
        Self::new(name, MemberSignature::Event { ty: ty.into() })
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Check whether the member carries the exclusion marker.
    pub fn is_excluded(&self, exclusion: &Marker) -> bool {
        self.attributes.iter().any(|attr| exclusion.matches(attr))
    }

    /// Check whether the member belongs to the public instance contract.
    pub fn is_public_contract(&self) -> bool {
        self.accessibility == Accessibility::Public && !self.is_static
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::Markers;

    #[test]
    fn test_is_excluded() {
        let markers = Markers::default();
        let plain = MemberDescriptor::method("Run", TypeArgument::named("void"), vec![]);
        assert!(!plain.is_excluded(&markers.exclusion));

        let ignored = plain.clone().with_attribute("IgnoreAutomaticInterface");
        assert!(ignored.is_excluded(&markers.exclusion));
        assert!(!ignored.is_excluded(&markers.discovery));
    }

    #[test]
    fn test_public_contract() {
        let prop = MemberDescriptor::property("Id", TypeArgument::named("int"));
        assert!(prop.is_public_contract());
        assert!(!prop
            .clone()
            .with_accessibility(Accessibility::Protected)
            .is_public_contract());

        let mut shared = prop;
        shared.is_static = true;
        assert!(!shared.is_public_contract());
    }

    #[test]
    fn test_member_deserialize() {
        let json = r#"{
            "name": "Find",
            "attributes": ["IgnoreAutomaticInterface"],
            "signature": {
                "method": {
                    "return_type": { "parameter": "T" },
                    "parameters": [
                        { "name": "id", "type": { "concrete": { "name": "int" } } },
                        { "name": "found", "type": { "concrete": { "name": "bool" } }, "modifier": "out" }
                    ]
                }
            }
        }"#;

        let member: MemberDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(member.accessibility, Accessibility::Public);
        match member.signature {
            MemberSignature::Method { parameters, .. } => {
                assert_eq!(parameters.len(), 2);
                assert_eq!(parameters[1].modifier, Some(ParameterModifier::Out));
            }
            other => panic!("unexpected signature: {:?}", other),
        }
    }
}
