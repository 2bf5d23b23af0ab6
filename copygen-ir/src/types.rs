//! Field type expressions.

use std::{fmt, str::FromStr};

use thiserror::Error;

const BASIC_TYPES: &[&str] = &[
    "bool",
    "byte",
    "complex64",
    "complex128",
    "error",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

const KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

/// Returns true if `name` is a predeclared basic type.
pub fn is_basic_type(name: &str) -> bool {
    BASIC_TYPES.contains(&name)
}

/// Returns true if `name` is reserved and cannot be used as an identifier.
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// A type as written in a field or as the underlying type of a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// Predeclared type such as `string` or `int64`.
    Basic(String),
    /// A named type, optionally qualified by an import (`metav1.Time`).
    Named {
        qualifier: Option<String>,
        name: String,
    },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Map(Box<TypeExpr>, Box<TypeExpr>),
    /// `interface{}` or `any`.
    Interface,
}

impl TypeExpr {
    pub fn basic(name: impl Into<String>) -> Self {
        TypeExpr::Basic(name.into())
    }

    /// A type declared in the same package.
    pub fn local(name: impl Into<String>) -> Self {
        TypeExpr::Named {
            qualifier: None,
            name: name.into(),
        }
    }

    /// A type from an imported package.
    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Named {
            qualifier: Some(qualifier.into()),
            name: name.into(),
        }
    }

    pub fn pointer(elem: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(elem))
    }

    pub fn slice(elem: TypeExpr) -> Self {
        TypeExpr::Slice(Box::new(elem))
    }

    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Map(Box::new(key), Box::new(value))
    }

    /// Every import qualifier referenced by this expression.
    pub fn qualifiers(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_qualifiers(&mut out);
        out
    }

    fn collect_qualifiers<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TypeExpr::Named {
                qualifier: Some(q), ..
            } => out.push(q),
            TypeExpr::Pointer(elem) | TypeExpr::Slice(elem) => elem.collect_qualifiers(out),
            TypeExpr::Map(key, value) => {
                key.collect_qualifiers(out);
                value.collect_qualifiers(out);
            }
            _ => {}
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Basic(name) => write!(f, "{}", name),
            TypeExpr::Named {
                qualifier: Some(q),
                name,
            } => write!(f, "{}.{}", q, name),
            TypeExpr::Named {
                qualifier: None,
                name,
            } => write!(f, "{}", name),
            TypeExpr::Pointer(elem) => write!(f, "*{}", elem),
            TypeExpr::Slice(elem) => write!(f, "[]{}", elem),
            TypeExpr::Map(key, value) => write!(f, "map[{}]{}", key, value),
            TypeExpr::Interface => write!(f, "interface{{}}"),
        }
    }
}

/// Error parsing a type expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeExprError {
    #[error("empty type expression")]
    Empty,
    #[error("unexpected '{found}' at offset {offset} in '{input}'")]
    Unexpected {
        input: String,
        offset: usize,
        found: String,
    },
    #[error("invalid identifier '{ident}' in '{input}'")]
    InvalidIdent { input: String, ident: String },
}

impl FromStr for TypeExpr {
    type Err = TypeExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(TypeExprError::Empty);
        }
        let mut parser = Parser { input, pos: 0 };
        let expr = parser.parse_expr()?;
        if parser.pos < input.len() {
            return Err(parser.unexpected());
        }
        Ok(expr)
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), TypeExprError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn unexpected(&self) -> TypeExprError {
        let found = self
            .rest()
            .chars()
            .next()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "end of input".to_string());
        TypeExprError::Unexpected {
            input: self.input.to_string(),
            offset: self.pos,
            found,
        }
    }

    fn parse_expr(&mut self) -> Result<TypeExpr, TypeExprError> {
        if self.eat("*") {
            return Ok(TypeExpr::pointer(self.parse_expr()?));
        }
        if self.eat("[]") {
            return Ok(TypeExpr::slice(self.parse_expr()?));
        }
        if self.eat("map[") {
            let key = self.parse_expr()?;
            self.expect("]")?;
            let value = self.parse_expr()?;
            return Ok(TypeExpr::map(key, value));
        }
        if self.eat("interface{}") {
            return Ok(TypeExpr::Interface);
        }
        self.parse_named()
    }

    fn parse_named(&mut self) -> Result<TypeExpr, TypeExprError> {
        let first = self.ident()?;
        if self.eat(".") {
            let name = self.ident()?;
            return Ok(TypeExpr::qualified(first, name));
        }
        Ok(match first.as_str() {
            "any" => TypeExpr::Interface,
            name if is_basic_type(name) => TypeExpr::Basic(first),
            _ => TypeExpr::local(first),
        })
    }

    fn ident(&mut self) -> Result<String, TypeExprError> {
        let len = self
            .rest()
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(self.rest().len());
        if len == 0 {
            return Err(self.unexpected());
        }
        let ident = &self.rest()[..len];
        if ident.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(TypeExprError::InvalidIdent {
                input: self.input.to_string(),
                ident: ident.to_string(),
            });
        }
        self.pos += len;
        Ok(ident.to_string())
    }
}
