//! Generator configuration.

use std::{fmt, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::DEFAULT_OUTPUT_FILE;

/// How the assembled output is canonicalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    /// Pipe through the `gofmt` binary.
    Gofmt,
    /// Built-in canonicalizer (delimiter check and whitespace cleanup).
    #[default]
    Builtin,
    /// Leave output untouched.
    None,
}

impl FormatterKind {
    /// Returns the formatter identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatterKind::Gofmt => "gofmt",
            FormatterKind::Builtin => "builtin",
            FormatterKind::None => "none",
        }
    }
}

impl fmt::Display for FormatterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FormatterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gofmt" => Ok(FormatterKind::Gofmt),
            "builtin" => Ok(FormatterKind::Builtin),
            "none" | "off" => Ok(FormatterKind::None),
            _ => Err(format!(
                "unknown formatter '{}', expected 'gofmt', 'builtin' or 'none'",
                s
            )),
        }
    }
}

/// The `[generator]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Header text (e.g. license) prepended to generated files.
    #[serde(default)]
    pub header_file: Option<PathBuf>,

    /// Substituted for `" YEAR"` in the header text.
    #[serde(default)]
    pub year: Option<String>,

    #[serde(default)]
    pub formatter: FormatterKind,

    /// Output filename, defaults to [`DEFAULT_OUTPUT_FILE`].
    #[serde(default)]
    pub output_file: Option<String>,
}

impl GeneratorConfig {
    pub fn output_file(&self) -> &str {
        self.output_file.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE)
    }

    pub fn year(&self) -> &str {
        self.year.as_deref().unwrap_or_default()
    }
}
