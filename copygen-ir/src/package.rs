//! Package and type declarations.

use std::{collections::BTreeMap, path::PathBuf};

use crate::TypeExpr;

/// A source package: the unit the generator produces one output file for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Package clause name (e.g. `v1`).
    pub name: String,
    /// Directory the generated file is written into.
    pub dir: PathBuf,
    /// Raw package-level marker comments.
    pub markers: Vec<String>,
    /// Qualifier used in field types -> import path.
    pub imports: BTreeMap<String, String>,
    /// Type declarations, in the order the loader enumerated them.
    pub types: Vec<TypeDecl>,
}

impl Package {
    /// Create an empty package.
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            markers: Vec::new(),
            imports: BTreeMap::new(),
            types: Vec::new(),
        }
    }

    /// Add a package-level marker.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.markers.push(marker.into());
        self
    }

    /// Register an import qualifier.
    pub fn with_import(mut self, qualifier: impl Into<String>, path: impl Into<String>) -> Self {
        self.imports.insert(qualifier.into(), path.into());
        self
    }

    /// Add a type declaration.
    pub fn with_type(mut self, decl: TypeDecl) -> Self {
        self.types.push(decl);
        self
    }

    /// Find a type declared in this package by name.
    pub fn find_type(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Resolve a field-type qualifier to its import path.
    pub fn import_path(&self, qualifier: &str) -> Option<&str> {
        self.imports.get(qualifier).map(String::as_str)
    }
}

/// The shape of a declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// `type T struct { ... }`
    Struct(Vec<Field>),
    /// `type T <underlying>` for a non-struct, non-interface underlying type.
    Named(TypeExpr),
    /// `type T interface { ... }`
    Interface,
}

impl TypeKind {
    /// Short name of the kind, used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Struct(_) => "struct",
            TypeKind::Named(TypeExpr::Pointer(_)) => "pointer",
            TypeKind::Named(TypeExpr::Slice(_)) => "slice",
            TypeKind::Named(TypeExpr::Map(..)) => "map",
            TypeKind::Named(_) => "named",
            TypeKind::Interface => "interface",
        }
    }
}

/// A type declaration discovered in a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    /// Raw marker comments attached to the declaration.
    pub markers: Vec<String>,
    pub kind: TypeKind,
    /// Methods already written by hand (e.g. `DeepCopyInto`).
    pub methods: Vec<String>,
}

impl TypeDecl {
    /// Create a struct declaration.
    pub fn structure(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self::new(name, TypeKind::Struct(fields))
    }

    /// Create a named non-struct declaration.
    pub fn named(name: impl Into<String>, underlying: TypeExpr) -> Self {
        Self::new(name, TypeKind::Named(underlying))
    }

    /// Create an interface declaration.
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            markers: Vec::new(),
            kind,
            methods: Vec::new(),
        }
    }

    /// Attach a marker comment.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.markers.push(marker.into());
        self
    }

    /// Declare a hand-written method.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.methods.push(method.into());
        self
    }

    /// Whether `method` is already implemented by hand.
    pub fn has_method(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m == method)
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.kind, TypeKind::Struct(_))
    }
}

/// A struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name; for embedded fields this is the type's name.
    pub name: String,
    pub ty: TypeExpr,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}
