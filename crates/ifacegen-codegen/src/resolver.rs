//! Member surface resolution across a type's inheritance chain.

use std::collections::HashSet;

use ifacegen_core::symbols::{MemberDescriptor, SymbolModel, TypeDescriptor};
use ifacegen_core::Marker;

use crate::Error;

/// A member together with the type in the chain that declares it.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedMember<'a> {
    pub declaring_type: &'a TypeDescriptor,
    pub member: &'a MemberDescriptor,
}

/// Walks base-type chains and collects the visible, non-excluded members.
pub struct MemberResolver<'a, M: SymbolModel + ?Sized> {
    model: &'a M,
    exclusion: &'a Marker,
    max_depth: usize,
}

impl<'a, M: SymbolModel + ?Sized> MemberResolver<'a, M> {
    pub fn new(model: &'a M, exclusion: &'a Marker, max_depth: usize) -> Self {
        Self {
            model,
            exclusion,
            max_depth,
        }
    }

    /// Members of `ty` followed by those of each ancestor, derived to base.
    ///
    /// Redeclared members are not deduplicated: an override and the member
    /// it overrides both appear, the derived one first.
    pub fn resolve(&self, ty: &'a TypeDescriptor) -> Result<Vec<ResolvedMember<'a>>, Error> {
        let mut members = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(ty);
        let mut depth = 0;

        while let Some(declaring_type) = current {
            if depth > self.max_depth {
                return Err(Error::MalformedTypeGraph {
                    type_name: ty.metadata_name(),
                    detail: format!("base-type chain exceeds {} levels", self.max_depth),
                });
            }

            let name = declaring_type.metadata_name();
            if !visited.insert(name.clone()) {
                return Err(Error::MalformedTypeGraph {
                    type_name: ty.metadata_name(),
                    detail: format!("base-type chain revisits {}", name),
                });
            }

            members.extend(
                declaring_type
                    .members
                    .iter()
                    .filter(|member| !member.is_excluded(self.exclusion))
                    .map(|member| ResolvedMember {
                        declaring_type,
                        member,
                    }),
            );

            current = self.model.base_type(declaring_type);
            depth += 1;
        }

        tracing::trace!(
            type_name = %ty.metadata_name(),
            depth,
            members = members.len(),
            "Resolved member surface"
        );

        Ok(members)
    }
}
