use std::path::{Path, PathBuf};

use super::Manifest;
use crate::{Error, Result};

/// Represents a copygen.toml file with both raw content and parsed manifest.
pub struct CopygenToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl CopygenToml {
    /// Open and parse a copygen.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Directory the manifest lives in; package paths are relative to it.
    pub fn base_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Read a header file, resolving relative paths against the manifest directory.
    ///
    /// Returns an empty string when `header_file` is `None`.
    pub fn read_header(&self, header_file: Option<&Path>) -> Result<String> {
        let Some(header_file) = header_file else {
            return Ok(String::new());
        };
        let path = self.base_dir().join(header_file);
        std::fs::read_to_string(&path)
            .map_err(|source| Box::new(Error::HeaderFile { path, source }))
    }
}
