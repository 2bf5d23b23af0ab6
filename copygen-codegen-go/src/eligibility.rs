//! Which Go types get copy methods.

use std::collections::HashSet;

use copygen_codegen::language::{Eligibility, EligibilityFilter};
use copygen_ir::{Package, TypeDecl, TypeExpr, TypeKind};

use crate::{
    GoBackend,
    deepcopy::{is_plain, underlying_kind},
};

impl EligibilityFilter for GoBackend {
    fn eligibility(&self, package: &Package, ty: &TypeDecl) -> Eligibility {
        if !is_exported(&ty.name) {
            return Eligibility::Skipped("unexported type".to_string());
        }

        let plain = match &ty.kind {
            TypeKind::Named(underlying) => is_plain(package, underlying, &mut HashSet::new()),
            _ => false,
        };
        if plain {
            return Eligibility::Skipped("plain value type".to_string());
        }

        // Types defined over other local types take their shape from the
        // declaration at the end of the chain.
        match underlying_kind(package, ty) {
            Some(TypeKind::Interface | TypeKind::Named(TypeExpr::Interface)) => {
                Eligibility::Skipped("interface type".to_string())
            }
            Some(TypeKind::Named(TypeExpr::Pointer(_))) => Eligibility::Invalid(format!(
                "cannot generate deepcopy for {}: named pointer types are not supported",
                ty.name
            )),
            _ => Eligibility::Eligible,
        }
    }
}

/// Go exports identifiers that start with an upper-case letter.
fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
