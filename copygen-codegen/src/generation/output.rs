//! Header, formatting and raw fallback for one package's output.

use crate::language::{FormatError, LanguageBackend, SourceFormatter};

/// Inputs to a backend's file header.
#[derive(Debug, Clone, Copy)]
pub struct HeaderParts<'a> {
    /// License text with the year already substituted; may be empty.
    pub license: &'a str,
    pub package_name: &'a str,
    /// Rendered import lines, sorted by path.
    pub import_specs: &'a [String],
}

/// The bytes to write for a package.
#[derive(Debug)]
pub enum OutputUnit {
    Formatted(Vec<u8>),
    /// Formatting failed; the unformatted source is written instead.
    RawFallback { bytes: Vec<u8>, error: FormatError },
}

impl OutputUnit {
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Formatted(bytes) | Self::RawFallback { bytes, .. } => bytes,
        }
    }

    pub fn is_formatted(&self) -> bool {
        matches!(self, Self::Formatted(_))
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Formatted(bytes) | Self::RawFallback { bytes, .. } => bytes,
        }
    }
}

/// Prepend the header to `body` and format the result.
///
/// A formatter failure never loses output: the raw source is kept.
pub fn finalize(
    backend: &dyn LanguageBackend,
    formatter: &dyn SourceFormatter,
    header: &HeaderParts<'_>,
    body: &[u8],
) -> OutputUnit {
    let mut source = backend.render_header(header).into_bytes();
    source.extend_from_slice(body);

    match formatter.format(&source) {
        Ok(formatted) => OutputUnit::Formatted(formatted),
        Err(error) => {
            tracing::warn!(
                package = header.package_name,
                formatter = formatter.name(),
                %error,
                "formatting failed, keeping unformatted source"
            );
            OutputUnit::RawFallback {
                bytes: source,
                error,
            }
        }
    }
}
