//! Lowering of the raw manifest into the package model.

use std::{collections::HashSet, path::PathBuf};

use copygen_ir::{Field, Package, TypeDecl, TypeExpr, TypeKind};

use super::{
    Manifest,
    raw::{RawField, RawManifest, RawPackage, RawType},
    validate::ParseContext,
};
use crate::Result;

pub(super) fn lower_manifest(raw: RawManifest, ctx: &ParseContext<'_>) -> Result<Manifest> {
    let mut seen_dirs = HashSet::new();
    let mut packages = Vec::with_capacity(raw.packages.len());

    for raw_pkg in &raw.packages {
        let package = lower_package(raw_pkg, ctx)?;
        if !seen_dirs.insert(package.dir.clone()) {
            return Err(ctx.error_at(
                format!(
                    "package directory '{}' is listed more than once",
                    package.dir.display()
                ),
                &package.dir.display().to_string(),
            ));
        }
        packages.push(package);
    }

    Ok(Manifest {
        generator: raw.generator,
        packages,
    })
}

fn lower_package(raw: &RawPackage, ctx: &ParseContext<'_>) -> Result<Package> {
    ctx.validate_name(&raw.name, "package")?;
    let pkg_ctx = ctx.push(&raw.name);

    for qualifier in raw.imports.keys() {
        pkg_ctx.validate_name(qualifier, "import qualifier")?;
    }

    let types = raw
        .types
        .iter()
        .map(|ty| lower_type(ty, raw, &pkg_ctx))
        .collect::<Result<Vec<_>>>()?;

    Ok(Package {
        name: raw.name.clone(),
        dir: raw.path.clone().unwrap_or_else(|| PathBuf::from(".")),
        markers: raw.markers.clone(),
        imports: raw.imports.clone(),
        types,
    })
}

fn lower_type(raw: &RawType, pkg: &RawPackage, ctx: &ParseContext<'_>) -> Result<TypeDecl> {
    ctx.validate_name(&raw.name, "type")?;
    let type_ctx = ctx.push(&raw.name);

    let shapes = [
        !raw.fields.is_empty(),
        raw.underlying.is_some(),
        raw.interface,
    ];
    if shapes.iter().filter(|s| **s).count() > 1 {
        return Err(ctx.error_at(
            format!(
                "type '{}' must declare only one of fields, underlying or interface",
                raw.name
            ),
            &raw.name,
        ));
    }

    let kind = if raw.interface {
        TypeKind::Interface
    } else if let Some(underlying) = &raw.underlying {
        let expr = parse_type(underlying, &raw.name, pkg, &type_ctx)?;
        TypeKind::Named(expr)
    } else {
        let fields = raw
            .fields
            .iter()
            .map(|f| lower_field(f, pkg, &type_ctx))
            .collect::<Result<Vec<_>>>()?;
        TypeKind::Struct(fields)
    };

    Ok(TypeDecl {
        name: raw.name.clone(),
        markers: raw.markers.clone(),
        kind,
        methods: raw.methods.clone(),
    })
}

fn lower_field(raw: &RawField, pkg: &RawPackage, ctx: &ParseContext<'_>) -> Result<Field> {
    let label = raw.name.as_deref().unwrap_or(&raw.ty);
    let ty = parse_type(&raw.ty, label, pkg, ctx)?;

    let name = match &raw.name {
        Some(name) => name.clone(),
        None => embedded_name(&ty).ok_or_else(|| {
            ctx.error_at(
                format!(
                    "field of type '{}' needs a name{}",
                    raw.ty,
                    if raw.embedded {
                        ": only named types can be embedded"
                    } else {
                        ""
                    }
                ),
                &raw.ty,
            )
        })?,
    };
    ctx.validate_name(&name, "field")?;

    Ok(Field::new(name, ty))
}

fn parse_type(
    source: &str,
    field: &str,
    pkg: &RawPackage,
    ctx: &ParseContext<'_>,
) -> Result<TypeExpr> {
    let expr: TypeExpr = source.parse().map_err(|e: copygen_ir::TypeExprError| {
        ctx.source_context()
            .invalid_type_error(source, field, e.to_string(), ctx.find_span(source))
    })?;

    if let Some(missing) = expr
        .qualifiers()
        .into_iter()
        .find(|q| !pkg.imports.contains_key(*q))
    {
        return Err(ctx.source_context().invalid_type_error(
            source,
            field,
            format!("qualifier '{}' is not declared in [packages.imports]", missing),
            ctx.find_span(source),
        ));
    }

    Ok(expr)
}

/// The implicit name of an embedded field: the type name without qualifier or pointer.
fn embedded_name(ty: &TypeExpr) -> Option<String> {
    match ty {
        TypeExpr::Named { name, .. } => Some(name.clone()),
        TypeExpr::Pointer(elem) => match elem.as_ref() {
            TypeExpr::Named { name, .. } => Some(name.clone()),
            _ => None,
        },
        _ => None,
    }
}
