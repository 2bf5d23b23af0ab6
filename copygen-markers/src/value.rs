//! Parsed marker values.

/// The value of one marker occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerValue {
    Flag(bool),
    Raw(String),
    String(String),
}

impl MarkerValue {
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            MarkerValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&str> {
        match self {
            MarkerValue::Raw(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            MarkerValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the value's shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            MarkerValue::Flag(_) => "bool",
            MarkerValue::Raw(_) => "raw",
            MarkerValue::String(_) => "string",
        }
    }
}

/// Split a raw marker comment into its name and optional payload.
///
/// Accepts `+name`, `+name=payload`, and the same without the leading `+`.
/// Surrounding whitespace and a leading `//` are ignored.
pub fn split_marker(raw: &str) -> (&str, Option<&str>) {
    let raw = raw.trim();
    let raw = raw.strip_prefix("//").map(str::trim_start).unwrap_or(raw);
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    match raw.split_once('=') {
        Some((name, payload)) => (name.trim_end(), Some(payload)),
        None => (raw, None),
    }
}
