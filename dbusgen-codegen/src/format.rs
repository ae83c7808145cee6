//! Post-processing of generated sources.

use crate::error::CodegenError;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// A transformation applied to the assembled source.
pub trait PostProcessor {
    /// Processes the source.
    ///
    /// # Errors
    /// Returns `CodegenError::Format` if the source cannot be processed.
    fn process(&self, source: Vec<u8>) -> Result<Vec<u8>, CodegenError>;
}

/// Returns the source unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl PostProcessor for Identity {
    fn process(&self, source: Vec<u8>) -> Result<Vec<u8>, CodegenError> {
        Ok(source)
    }
}

/// Pipes the source through an external `gofmt`.
#[derive(Debug, Clone)]
pub struct Gofmt {
    program: PathBuf,
}

impl Default for Gofmt {
    fn default() -> Self {
        Self {
            program: PathBuf::from("gofmt"),
        }
    }
}

impl Gofmt {
    /// Uses the given executable instead of `gofmt` from `PATH`.
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl PostProcessor for Gofmt {
    fn process(&self, source: Vec<u8>) -> Result<Vec<u8>, CodegenError> {
        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => CodegenError::format(format!(
                    "{} not found",
                    self.program.display()
                )),
                _ => CodegenError::Io(e),
            })?;

        // gofmt reads all of stdin before it writes anything.
        // An early exit shows up in the exit status.
        if let Some(mut stdin) = child.stdin.take()
            && let Err(e) = stdin.write_all(&source)
            && e.kind() != ErrorKind::BrokenPipe
        {
            return Err(e.into());
        }
        let output = child.wait_with_output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CodegenError::format(stderr.trim().to_string()));
        }
        debug!(
            input = source.len(),
            output = output.stdout.len(),
            "formatted source"
        );
        Ok(output.stdout)
    }
}
