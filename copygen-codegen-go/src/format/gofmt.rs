//! Formatting through an external `gofmt` binary.

use std::{
    io::Write,
    path::PathBuf,
    process::{Command, Stdio},
};

use copygen_codegen::language::{FormatError, SourceFormatter};

/// Pipes the source through `gofmt`.
#[derive(Debug, Clone)]
pub struct GoFmt {
    program: PathBuf,
}

impl GoFmt {
    /// Use the `gofmt` found on `PATH`.
    pub fn new() -> Self {
        Self::with_program("gofmt")
    }

    /// Use a specific gofmt-compatible binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn tool(&self) -> String {
        self.program.display().to_string()
    }

    fn spawn_error(&self, source: std::io::Error) -> FormatError {
        FormatError::Spawn {
            tool: self.tool(),
            source,
        }
    }
}

impl Default for GoFmt {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceFormatter for GoFmt {
    fn name(&self) -> &'static str {
        "gofmt"
    }

    fn format(&self, source: &[u8]) -> Result<Vec<u8>, FormatError> {
        tracing::debug!(program = %self.program.display(), bytes = source.len(), "running gofmt");

        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // Feed stdin from another thread so a large output can't deadlock us.
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.spawn_error(std::io::Error::other("stdin was not captured")))?;
        let input = source.to_vec();
        let writer = std::thread::spawn(move || stdin.write_all(&input));

        let output = child.wait_with_output().map_err(|e| self.spawn_error(e))?;
        let written = writer
            .join()
            .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));

        if !output.status.success() {
            return Err(FormatError::Rejected {
                tool: self.tool(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written.map_err(|e| self.spawn_error(e))?;

        Ok(output.stdout)
    }
}
