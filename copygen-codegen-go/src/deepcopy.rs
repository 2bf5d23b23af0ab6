//! Copy method synthesis.
//!
//! Inside generated bodies `in` and `out` are always rebound so that the
//! statements for a nested value can be emitted the same way at any depth:
//! `value` expects both to point at the value being copied, `non_nil` expects
//! both to point at a non-nil pointer, slice or map.

use std::collections::HashSet;

use copygen_codegen::{
    builder::CodeBuilder,
    enablement::EnablementDecision,
    generation::ImportAliasTable,
    language::SynthesisError,
};
use copygen_ir::{Field, Package, TypeDecl, TypeExpr, TypeKind};

/// Import path of the root object interface's package.
const RUNTIME_PACKAGE: &str = "k8s.io/apimachinery/pkg/runtime";

/// External types that hold no references and have no copy methods.
const PLAIN_EXTERNAL_TYPES: &[&str] = &["k8s.io/apimachinery/pkg/apis/meta/v1.TypeMeta"];

const INTERFACE_REASON: &str = "interfaces cannot be deep-copied";

/// How a value of some type is copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CopyKind<'t> {
    /// Plain assignment copies it completely.
    Plain,
    /// The type has a `DeepCopyInto` method. `nillable` named slices and maps
    /// are guarded against nil.
    Method { nillable: bool },
    Pointer(&'t TypeExpr),
    Slice(&'t TypeExpr),
    Map(&'t TypeExpr, &'t TypeExpr),
    Unsupported(&'static str),
}

/// Decide how values of `ty` are copied within `package`.
pub(crate) fn classify<'t>(package: &Package, ty: &'t TypeExpr) -> CopyKind<'t> {
    match ty {
        TypeExpr::Basic(name) if name == "error" => CopyKind::Unsupported(INTERFACE_REASON),
        TypeExpr::Basic(_) => CopyKind::Plain,
        TypeExpr::Interface => CopyKind::Unsupported(INTERFACE_REASON),
        TypeExpr::Pointer(elem) => CopyKind::Pointer(elem),
        TypeExpr::Slice(elem) => CopyKind::Slice(elem),
        TypeExpr::Map(key, value) => CopyKind::Map(key, value),
        TypeExpr::Named { .. } if is_plain(package, ty, &mut HashSet::new()) => CopyKind::Plain,
        TypeExpr::Named {
            qualifier: Some(_), ..
        } => CopyKind::Method { nillable: false },
        TypeExpr::Named {
            qualifier: None,
            name,
        } => match package
            .find_type(name)
            .and_then(|decl| underlying_kind(package, decl))
        {
            Some(TypeKind::Interface) | Some(TypeKind::Named(TypeExpr::Interface)) => {
                CopyKind::Unsupported(INTERFACE_REASON)
            }
            Some(TypeKind::Named(TypeExpr::Pointer(_))) => {
                CopyKind::Unsupported("named pointer types are not supported")
            }
            Some(TypeKind::Named(TypeExpr::Slice(_) | TypeExpr::Map(..))) => {
                CopyKind::Method { nillable: true }
            }
            _ => CopyKind::Method { nillable: false },
        },
    }
}

/// Follow `type A B` declarations through the package to the one that
/// defines the underlying shape. `None` for a cycle or an undeclared name.
pub(crate) fn underlying_kind<'p>(package: &'p Package, ty: &'p TypeDecl) -> Option<&'p TypeKind> {
    let mut kind = &ty.kind;
    let mut seen = HashSet::new();
    seen.insert(ty.name.as_str());
    while let TypeKind::Named(TypeExpr::Named {
        qualifier: None,
        name,
    }) = kind
    {
        if !seen.insert(name.as_str()) {
            return None;
        }
        kind = &package.find_type(name)?.kind;
    }
    Some(kind)
}

/// True if assigning a value of `ty` shares no memory with the source.
pub(crate) fn is_plain(package: &Package, ty: &TypeExpr, visiting: &mut HashSet<String>) -> bool {
    match ty {
        TypeExpr::Basic(name) => name != "error",
        TypeExpr::Named {
            qualifier: Some(qualifier),
            name,
        } => package
            .import_path(qualifier)
            .is_some_and(|path| {
                PLAIN_EXTERNAL_TYPES.contains(&format!("{}.{}", path, name).as_str())
            }),
        TypeExpr::Named {
            qualifier: None,
            name,
        } => {
            // A type that refers back to itself is never plain.
            if !visiting.insert(name.clone()) {
                return false;
            }
            let plain = match package.find_type(name).map(|decl| &decl.kind) {
                Some(TypeKind::Struct(fields)) => {
                    fields.iter().all(|f| is_plain(package, &f.ty, visiting))
                }
                Some(TypeKind::Named(underlying)) => is_plain(package, underlying, visiting),
                Some(TypeKind::Interface) | None => false,
            };
            visiting.remove(name);
            plain
        }
        TypeExpr::Pointer(_) | TypeExpr::Slice(_) | TypeExpr::Map(..) | TypeExpr::Interface => {
            false
        }
    }
}

/// Writes the copy methods of one type.
pub(crate) struct CopyWriter<'a> {
    package: &'a Package,
    imports: &'a mut ImportAliasTable,
    out: &'a mut CodeBuilder,
}

impl<'a> CopyWriter<'a> {
    pub(crate) fn new(
        package: &'a Package,
        imports: &'a mut ImportAliasTable,
        out: &'a mut CodeBuilder,
    ) -> Self {
        Self {
            package,
            imports,
            out,
        }
    }

    pub(crate) fn write_type(
        mut self,
        ty: &TypeDecl,
        decision: EnablementDecision,
    ) -> Result<(), SynthesisError> {
        let name = ty.name.as_str();
        let kind = underlying_kind(self.package, ty).ok_or_else(|| {
            SynthesisError::UnsupportedUnderlying {
                ty: ty.name.clone(),
                reason: "the underlying type is not declared in this package".to_string(),
            }
        })?;
        // A type defined over a local struct copies like the struct itself.
        let (receiver, by_value) = match kind {
            TypeKind::Struct(_) => (format!("in *{}", name), false),
            TypeKind::Named(_) => (format!("in {}", name), true),
            TypeKind::Interface => {
                return Err(SynthesisError::UnsupportedUnderlying {
                    ty: "interface".to_string(),
                    reason: INTERFACE_REASON.to_string(),
                });
            }
        };

        if !ty.has_method("DeepCopyInto") {
            self.doc("DeepCopyInto", "writing into out. in must be non-nil.");
            self.open(&format!("func ({}) DeepCopyInto(out *{}) {{", receiver, name));
            match kind {
                TypeKind::Struct(fields) => {
                    self.line("*out = *in");
                    for field in fields {
                        self.field(field)?;
                    }
                }
                TypeKind::Named(underlying) => self.named_body(name, underlying)?,
                TypeKind::Interface => {}
            }
            self.close();
            self.out.push_blank();
        }

        if !ty.has_method("DeepCopy") {
            self.doc("DeepCopy", &format!("creating a new {}.", name));
            if by_value {
                self.open(&format!("func ({}) DeepCopy() {} {{", receiver, name));
            } else {
                self.open(&format!("func ({}) DeepCopy() *{} {{", receiver, name));
            }
            self.open("if in == nil {");
            self.line("return nil");
            self.close();
            self.line(&format!("out := new({})", name));
            self.line("in.DeepCopyInto(out)");
            self.line(if by_value { "return *out" } else { "return out" });
            self.close();
            self.out.push_blank();
        }

        if decision.implements_root_interface && !ty.has_method("DeepCopyObject") {
            let object = format!("{}.Object", self.imports.need(RUNTIME_PACKAGE));
            self.doc("DeepCopyObject", &format!("creating a new {}.", object));
            self.open(&format!("func ({}) DeepCopyObject() {} {{", receiver, object));
            self.open("if c := in.DeepCopy(); c != nil {");
            self.line("return c");
            self.close();
            self.line("return nil");
            self.close();
            self.out.push_blank();
        }

        Ok(())
    }

    /// Body of `DeepCopyInto` for a named slice or map, with a value receiver.
    fn named_body(&mut self, name: &str, underlying: &TypeExpr) -> Result<(), SynthesisError> {
        match classify(self.package, underlying) {
            CopyKind::Slice(_) | CopyKind::Map(..) => {
                self.open("{");
                self.line("in := &in");
                self.non_nil(underlying, Some(name))?;
                self.close();
                Ok(())
            }
            CopyKind::Plain => Err(unsupported(
                underlying,
                "plain value types need no copy methods",
            )),
            CopyKind::Pointer(_) => Err(unsupported(
                underlying,
                "named pointer types are not supported",
            )),
            CopyKind::Method { .. } => Err(unsupported(
                underlying,
                "named types defined over external types are not supported",
            )),
            CopyKind::Unsupported(reason) => Err(unsupported(underlying, reason)),
        }
    }

    fn field(&mut self, field: &Field) -> Result<(), SynthesisError> {
        let name = field.name.as_str();
        match classify(self.package, &field.ty) {
            CopyKind::Plain if matches!(field.ty, TypeExpr::Basic(_)) => {}
            CopyKind::Plain => self.line(&format!("out.{0} = in.{0}", name)),
            CopyKind::Method { nillable: false } => {
                self.line(&format!("in.{0}.DeepCopyInto(&out.{0})", name))
            }
            CopyKind::Method { nillable: true } => {
                self.open(&format!("if in.{} != nil {{", name));
                self.line(&format!("in.{0}.DeepCopyInto(&out.{0})", name));
                self.close();
            }
            CopyKind::Pointer(_) | CopyKind::Slice(_) | CopyKind::Map(..) => {
                self.open(&format!("if in.{} != nil {{", name));
                self.line(&format!("in, out := &in.{0}, &out.{0}", name));
                self.non_nil(&field.ty, None)
                    .map_err(|err| in_field(err, field))?;
                self.close();
            }
            CopyKind::Unsupported(reason) => {
                return Err(SynthesisError::UnsupportedField {
                    field: name.to_string(),
                    ty: field.ty.to_string(),
                    reason: reason.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Copy `*in` into `*out` where `*in` is a non-nil pointer, slice or map.
    ///
    /// `named` replaces the rendered type in `make` for named slices and maps.
    fn non_nil(&mut self, ty: &TypeExpr, named: Option<&str>) -> Result<(), SynthesisError> {
        match classify(self.package, ty) {
            CopyKind::Pointer(elem) => {
                let elem_ty = self.render(elem)?;
                self.line(&format!("*out = new({})", elem_ty));
                match classify(self.package, elem) {
                    CopyKind::Plain => self.line("**out = **in"),
                    CopyKind::Unsupported(reason) => return Err(unsupported(elem, reason)),
                    _ => {
                        self.line("in, out := *in, *out");
                        self.value(elem)?;
                    }
                }
            }
            CopyKind::Slice(elem) => {
                let slice_ty = match named {
                    Some(name) => name.to_string(),
                    None => self.render(ty)?,
                };
                self.line(&format!("*out = make({}, len(*in))", slice_ty));
                match classify(self.package, elem) {
                    CopyKind::Plain => self.line("copy(*out, *in)"),
                    CopyKind::Method { nillable: false } => {
                        self.open("for i := range *in {");
                        self.line("(*in)[i].DeepCopyInto(&(*out)[i])");
                        self.close();
                    }
                    CopyKind::Unsupported(reason) => return Err(unsupported(elem, reason)),
                    _ => {
                        self.open("for i := range *in {");
                        self.line("in, out := &(*in)[i], &(*out)[i]");
                        self.value(elem)?;
                        self.close();
                    }
                }
            }
            CopyKind::Map(_, value) => {
                let map_ty = match named {
                    Some(name) => name.to_string(),
                    None => self.render(ty)?,
                };
                self.line(&format!("*out = make({}, len(*in))", map_ty));
                self.open("for key, val := range *in {");
                match classify(self.package, value) {
                    CopyKind::Plain => self.line("(*out)[key] = val"),
                    CopyKind::Method { nillable: false } => {
                        self.line("(*out)[key] = *val.DeepCopy()")
                    }
                    CopyKind::Method { nillable: true } => {
                        self.line("(*out)[key] = val.DeepCopy()")
                    }
                    CopyKind::Unsupported(reason) => return Err(unsupported(value, reason)),
                    _ => {
                        let value_ty = self.render(value)?;
                        self.line(&format!("var outVal {}", value_ty));
                        self.open("if val == nil {");
                        self.line("(*out)[key] = nil");
                        self.out.push_dedent();
                        self.open("} else {");
                        self.line("in, out := &val, &outVal");
                        self.non_nil(value, None)?;
                        self.close();
                        self.line("(*out)[key] = outVal");
                    }
                }
                self.close();
            }
            _ => self.value(ty)?,
        }
        Ok(())
    }

    /// Copy `*in` into `*out`.
    fn value(&mut self, ty: &TypeExpr) -> Result<(), SynthesisError> {
        match classify(self.package, ty) {
            CopyKind::Plain => self.line("*out = *in"),
            CopyKind::Method { nillable: false } => self.line("(*in).DeepCopyInto(out)"),
            CopyKind::Method { nillable: true } => {
                self.open("if *in != nil {");
                self.line("(*in).DeepCopyInto(out)");
                self.close();
            }
            CopyKind::Pointer(_) | CopyKind::Slice(_) | CopyKind::Map(..) => {
                self.open("if *in != nil {");
                self.non_nil(ty, None)?;
                self.close();
            }
            CopyKind::Unsupported(reason) => return Err(unsupported(ty, reason)),
        }
        Ok(())
    }

    /// Render `ty` as Go source, importing any packages it refers to.
    fn render(&mut self, ty: &TypeExpr) -> Result<String, SynthesisError> {
        Ok(match ty {
            TypeExpr::Basic(name) => name.clone(),
            TypeExpr::Named {
                qualifier: None,
                name,
            } => name.clone(),
            TypeExpr::Named {
                qualifier: Some(qualifier),
                name,
            } => {
                let path = self.package.import_path(qualifier).ok_or_else(|| {
                    SynthesisError::UnknownQualifier {
                        qualifier: qualifier.clone(),
                    }
                })?;
                format!("{}.{}", self.imports.need(path), name)
            }
            TypeExpr::Pointer(elem) => format!("*{}", self.render(elem)?),
            TypeExpr::Slice(elem) => format!("[]{}", self.render(elem)?),
            TypeExpr::Map(key, value) => {
                format!("map[{}]{}", self.render(key)?, self.render(value)?)
            }
            TypeExpr::Interface => "interface{}".to_string(),
        })
    }

    fn doc(&mut self, method: &str, tail: &str) {
        self.line(&format!(
            "// {} is an autogenerated deepcopy function, copying the receiver, {}",
            method, tail
        ));
    }

    fn line(&mut self, s: &str) {
        self.out.push_line(s);
    }

    fn open(&mut self, header: &str) {
        self.out.push_line(header).push_indent();
    }

    fn close(&mut self) {
        self.out.push_dedent().push_line("}");
    }
}

fn unsupported(ty: &TypeExpr, reason: &str) -> SynthesisError {
    SynthesisError::UnsupportedUnderlying {
        ty: ty.to_string(),
        reason: reason.to_string(),
    }
}

/// Attribute an error found inside a container to the field holding it.
fn in_field(err: SynthesisError, field: &Field) -> SynthesisError {
    match err {
        SynthesisError::UnsupportedUnderlying { reason, .. } => SynthesisError::UnsupportedField {
            field: field.name.clone(),
            ty: field.ty.to_string(),
            reason,
        },
        other => other,
    }
}
