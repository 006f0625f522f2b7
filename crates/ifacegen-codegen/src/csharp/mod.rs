//! C# interface synthesis.

mod markers;
mod writer;

pub use markers::{marker_source, support_units};
pub use writer::CodeWriter;

use ifacegen_core::symbols::{MemberDescriptor, MemberSignature, Parameter, TypeDescriptor};

use crate::resolver::ResolvedMember;
use crate::signature::SignatureRenderer;
use crate::Error;

/// Tool name stamped into `[GeneratedCode]`.
pub const GENERATOR_NAME: &str = "ifacegen";
/// Tool version stamped into `[GeneratedCode]`.
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Write the `<auto-generated>` banner that opens every emitted file.
pub(crate) fn write_banner(writer: &mut CodeWriter) {
    writer.line("// <auto-generated>");
    writer.line(&format!("//     This code was generated by {}.", GENERATOR_NAME));
    writer.line("//     Changes to this file will be lost when the code is regenerated.");
    writer.line("// </auto-generated>");
    writer.blank();
}

/// Name of the interface generated for `ty`.
pub fn interface_name(ty: &TypeDescriptor) -> String {
    format!("I{}", ty.name)
}

/// Formats an interface declaration from a type and its resolved members.
///
/// Performs no semantic validation; conflicting or duplicate members are
/// emitted as given.
#[derive(Debug, Clone, Copy)]
pub struct InterfaceSynthesizer {
    renderer: SignatureRenderer,
    generated_code_attribute: bool,
}

impl InterfaceSynthesizer {
    pub fn new(renderer: SignatureRenderer, generated_code_attribute: bool) -> Self {
        Self {
            renderer,
            generated_code_attribute,
        }
    }

    /// Full source text of `I<Name>` for `ty`.
    ///
    /// Members are emitted in the order given; only public instance members
    /// are part of the contract.
    pub fn synthesize(
        &self,
        ty: &TypeDescriptor,
        members: &[ResolvedMember<'_>],
    ) -> Result<String, Error> {
        let mut writer = CodeWriter::new();
        write_banner(&mut writer);

        let namespace = if ty.is_global_namespace() {
            None
        } else {
            ty.namespace.as_deref()
        };
        if let Some(ns) = namespace {
            writer.line(&format!("namespace {}", ns));
            writer.open();
        }

        if let Some(doc) = &ty.documentation {
            writer.doc(doc);
        }
        if self.generated_code_attribute {
            writer.line(&format!(
                "[global::System.CodeDom.Compiler.GeneratedCode(\"{}\", \"{}\")]",
                GENERATOR_NAME, GENERATOR_VERSION
            ));
        }
        writer.line(&format!(
            "public partial interface {}{}",
            interface_name(ty),
            self.renderer.parameter_list(&ty.generic_parameters)
        ));
        writer.indent();
        for clause in self.renderer.constraint_clauses(&ty.generic_parameters)? {
            writer.line(&clause);
        }
        writer.dedent();

        writer.open();
        let mut first = true;
        for resolved in members.iter().filter(|m| m.member.is_public_contract()) {
            if !first {
                writer.blank();
            }
            first = false;
            self.write_member(&mut writer, resolved.member)?;
        }
        writer.close();

        if namespace.is_some() {
            writer.close();
        }

        Ok(writer.finish())
    }

    fn write_member(&self, writer: &mut CodeWriter, member: &MemberDescriptor) -> Result<(), Error> {
        if let Some(doc) = &member.documentation {
            writer.doc(doc);
        }

        match &member.signature {
            MemberSignature::Property { ty, getter, setter } => {
                let mut accessors = Vec::new();
                if *getter {
                    accessors.push("get;");
                }
                if *setter {
                    accessors.push("set;");
                }
                writer.line(&format!(
                    "{} {} {{ {} }}",
                    self.renderer.type_argument(ty)?,
                    member.name,
                    accessors.join(" ")
                ));
            }
            MemberSignature::Method {
                return_type,
                generic_parameters,
                parameters,
            } => {
                let params = parameters
                    .iter()
                    .map(|p| self.parameter(p))
                    .collect::<Result<Vec<_>, _>>()?;
                let head = format!(
                    "{} {}{}({})",
                    self.renderer.type_argument(return_type)?,
                    member.name,
                    self.renderer.parameter_list(generic_parameters),
                    params.join(", ")
                );

                let clauses = self.renderer.constraint_clauses(generic_parameters)?;
                match clauses.split_last() {
                    None => writer.line(&format!("{};", head)),
                    Some((last, rest)) => {
                        writer.line(&head);
                        writer.indent();
                        for clause in rest {
                            writer.line(clause);
                        }
                        writer.line(&format!("{};", last));
                        writer.dedent();
                    }
                }
            }
            MemberSignature::Event { ty } => {
                writer.line(&format!(
                    "event {} {};",
                    self.renderer.type_argument(ty)?,
                    member.name
                ));
            }
        }

        Ok(())
    }

    fn parameter(&self, param: &Parameter) -> Result<String, Error> {
        let mut text = String::new();
        if let Some(modifier) = param.modifier {
            text.push_str(modifier.as_str());
            text.push(' ');
        }
        text.push_str(&self.renderer.type_argument(&param.ty)?);
        text.push(' ');
        text.push_str(&param.name);
        if let Some(default) = &param.default_value {
            text.push_str(" = ");
            text.push_str(default);
        }
        Ok(text)
    }
}

impl Default for InterfaceSynthesizer {
    fn default() -> Self {
        Self::new(SignatureRenderer::default(), true)
    }
}
