use std::{
    cell::RefCell,
    collections::BTreeMap,
    io::{self, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Errors raised while persisting a generated file.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create '{path}'")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("short write to '{path}': wrote {written} of {expected} bytes")]
    ShortWrite {
        path: PathBuf,
        written: usize,
        expected: usize,
    },
}

impl WriteError {
    /// The file the failed write targeted.
    pub fn path(&self) -> &Path {
        match self {
            WriteError::Open { path, .. }
            | WriteError::Io { path, .. }
            | WriteError::ShortWrite { path, .. } => path,
        }
    }
}

/// Where generated files go.
///
/// The handle returned by [`OutputSink::open`] is released when dropped, so
/// callers hold it only for the scope of a single write.
pub trait OutputSink {
    /// Open `file_name` inside `dir` for writing, truncating any previous content.
    fn open(&self, dir: &Path, file_name: &str) -> Result<Box<dyn Write + '_>, WriteError>;
}

/// Write `bytes` to `file_name` inside `dir` through `sink`.
///
/// The content is handed to the writer in a single `write` call; fewer bytes
/// accepted than requested is reported as [`WriteError::ShortWrite`] rather
/// than retried.
pub fn write_output(
    sink: &dyn OutputSink,
    dir: &Path,
    file_name: &str,
    bytes: &[u8],
) -> Result<PathBuf, WriteError> {
    let path = dir.join(file_name);
    let mut handle = sink.open(dir, file_name)?;

    let written = handle.write(bytes).map_err(|source| WriteError::Io {
        path: path.clone(),
        source,
    })?;
    if written < bytes.len() {
        return Err(WriteError::ShortWrite {
            path,
            written,
            expected: bytes.len(),
        });
    }
    handle.flush().map_err(|source| WriteError::Io {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

/// Writes files to disk, creating parent directories as needed.
#[derive(Debug, Clone, Default)]
pub struct FileSink {
    root: PathBuf,
}

impl FileSink {
    /// Create a sink that resolves package directories against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl OutputSink for FileSink {
    fn open(&self, dir: &Path, file_name: &str) -> Result<Box<dyn Write + '_>, WriteError> {
        let dir = self.root.join(dir);
        let path = dir.join(file_name);
        std::fs::create_dir_all(&dir).map_err(|source| WriteError::Open {
            path: path.clone(),
            source,
        })?;
        let file = std::fs::File::create(&path).map_err(|source| WriteError::Open {
            path: path.clone(),
            source,
        })?;
        Ok(Box::new(file))
    }
}

/// Keeps generated files in memory, used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: RefCell<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content written to `path`, if any.
    pub fn get(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }

    /// Every file written so far, ordered by path.
    pub fn files(&self) -> Vec<(PathBuf, Vec<u8>)> {
        self.files
            .borrow()
            .iter()
            .map(|(path, content)| (path.clone(), content.clone()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.files.borrow().is_empty()
    }
}

impl OutputSink for MemorySink {
    fn open(&self, dir: &Path, file_name: &str) -> Result<Box<dyn Write + '_>, WriteError> {
        let path = dir.join(file_name);
        self.files.borrow_mut().insert(path.clone(), Vec::new());
        Ok(Box::new(MemoryWriter { sink: self, path }))
    }
}

struct MemoryWriter<'a> {
    sink: &'a MemorySink,
    path: PathBuf,
}

impl Write for MemoryWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink
            .files
            .borrow_mut()
            .entry(self.path.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
