//! Marker definitions and help text.

use std::fmt;

use crate::{MarkerError, MarkerValue};

/// What a marker can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    Package,
    Type,
}

impl Target {
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Package => "package",
            Target::Type => "type",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The payload a marker accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `+name`, `+name=true` or `+name=false`.
    Flag,
    /// Everything after `=`, verbatim. A bare marker has an empty payload.
    Raw,
    /// A single string value, optionally double-quoted.
    String,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Flag => "bool",
            Shape::Raw => "raw",
            Shape::String => "string",
        }
    }
}

/// A registered marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerDefinition {
    /// Namespace-qualified name, e.g. `kubebuilder:object:generate`.
    pub name: &'static str,
    pub target: Target,
    pub shape: Shape,
    /// Deprecated dialect kept for compatibility.
    pub legacy: bool,
}

impl MarkerDefinition {
    pub const fn new(name: &'static str, target: Target, shape: Shape) -> Self {
        Self {
            name,
            target,
            shape,
            legacy: false,
        }
    }

    /// Mark this definition as part of the legacy dialect.
    pub const fn legacy(mut self) -> Self {
        self.legacy = true;
        self
    }

    /// Parse the payload of one occurrence of this marker.
    ///
    /// `payload` is `None` for a bare `+name`.
    pub fn parse(&self, payload: Option<&str>) -> Result<MarkerValue, MarkerError> {
        match self.shape {
            Shape::Flag => match payload.map(str::trim) {
                None | Some("true") => Ok(MarkerValue::Flag(true)),
                Some("false") => Ok(MarkerValue::Flag(false)),
                Some(other) => Err(self.invalid(other, "expected true or false")),
            },
            Shape::Raw => Ok(MarkerValue::Raw(payload.unwrap_or_default().to_string())),
            Shape::String => {
                let Some(payload) = payload else {
                    return Err(self.invalid("", "a value is required"));
                };
                let payload = payload.trim();
                let unquoted = match payload.strip_prefix('"') {
                    Some(rest) => rest
                        .strip_suffix('"')
                        .ok_or_else(|| self.invalid(payload, "unterminated string"))?,
                    None => payload,
                };
                Ok(MarkerValue::String(unquoted.to_string()))
            }
        }
    }

    fn invalid(&self, payload: &str, reason: &str) -> MarkerError {
        MarkerError::InvalidPayload {
            name: self.name.to_string(),
            target: self.target,
            payload: payload.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Documentation attached to a marker definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerHelp {
    /// Grouping used by documentation tooling (e.g. `object`).
    pub category: &'static str,
    pub summary: &'static str,
    /// Name of the marker that replaces a deprecated one.
    pub deprecated_by: Option<&'static str>,
}

impl MarkerHelp {
    pub fn simple(category: &'static str, summary: &'static str) -> Self {
        Self {
            category,
            summary,
            deprecated_by: None,
        }
    }

    pub fn deprecated(
        replacement: &'static str,
        category: &'static str,
        summary: &'static str,
    ) -> Self {
        Self {
            category,
            summary,
            deprecated_by: Some(replacement),
        }
    }
}

impl fmt::Display for MarkerHelp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary)?;
        if let Some(replacement) = self.deprecated_by {
            write!(f, " (deprecated: use +{})", replacement)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAG: MarkerDefinition = MarkerDefinition::new("a:flag", Target::Type, Shape::Flag);
    const RAW: MarkerDefinition =
        MarkerDefinition::new("a:raw", Target::Package, Shape::Raw).legacy();
    const STRING: MarkerDefinition = MarkerDefinition::new("a:str", Target::Type, Shape::String);

    #[test]
    fn test_flag_payloads() {
        assert_eq!(FLAG.parse(None).unwrap(), MarkerValue::Flag(true));
        assert_eq!(FLAG.parse(Some("true")).unwrap(), MarkerValue::Flag(true));
        assert_eq!(FLAG.parse(Some("false")).unwrap(), MarkerValue::Flag(false));
        assert!(matches!(
            FLAG.parse(Some("yes")),
            Err(MarkerError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn test_raw_payloads() {
        assert!(RAW.legacy);
        assert_eq!(
            RAW.parse(Some("package,register")).unwrap(),
            MarkerValue::Raw("package,register".to_string())
        );
        assert_eq!(RAW.parse(None).unwrap(), MarkerValue::Raw(String::new()));
    }

    #[test]
    fn test_string_payloads() {
        assert_eq!(
            STRING.parse(Some("\"quoted\"")).unwrap(),
            MarkerValue::String("quoted".to_string())
        );
        assert_eq!(
            STRING.parse(Some("k8s.io/apimachinery/pkg/runtime.Object")).unwrap(),
            MarkerValue::String("k8s.io/apimachinery/pkg/runtime.Object".to_string())
        );
        assert!(STRING.parse(None).is_err());
        assert!(STRING.parse(Some("\"open")).is_err());
    }

    #[test]
    fn test_help_display() {
        let help = MarkerHelp::deprecated("new:name", "object", "does things");
        assert_eq!(help.to_string(), "does things (deprecated: use +new:name)");
        assert_eq!(MarkerHelp::simple("object", "plain").to_string(), "plain");
    }
}
