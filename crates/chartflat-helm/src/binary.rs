//! The `helm` executable
//!
//! Every Helm operation is a blocking subprocess call. Output is captured;
//! a non-zero exit becomes [`HelmError::CommandFailed`] with Helm's stderr.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{HelmError, Result};

/// Handle on a `helm` executable plus the flags chartflat passes to it
#[derive(Debug, Clone)]
pub struct HelmBinary {
    program: PathBuf,
    skip_refresh: bool,
    forward_output: bool,
}

impl Default for HelmBinary {
    fn default() -> Self {
        Self::new("helm")
    }
}

impl HelmBinary {
    /// Use `program` (a name resolved through `PATH`, or a path)
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            skip_refresh: false,
            forward_output: true,
        }
    }

    /// Pass `--skip-refresh` to `helm dependency update`
    pub fn skip_refresh(mut self, skip: bool) -> Self {
        self.skip_refresh = skip;
        self
    }

    /// Copy dependency update progress into the caller's sink
    pub fn forward_output(mut self, forward: bool) -> Self {
        self.forward_output = forward;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub(crate) fn skips_refresh(&self) -> bool {
        self.skip_refresh
    }

    pub(crate) fn forwards_output(&self) -> bool {
        self.forward_output
    }

    /// Run helm with `args` and return its stdout
    pub(crate) fn execute(&self, args: &[OsString]) -> Result<Vec<u8>> {
        let command = self.command_line(args);
        tracing::debug!("Running {}", command);

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| HelmError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let status = match output.status.code() {
                Some(code) => format!("exit code {code}"),
                None => "terminated by signal".to_string(),
            };
            return Err(HelmError::CommandFailed {
                command,
                status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }

    /// Human-readable command line for logs and errors
    pub(crate) fn command_line(&self, args: &[OsString]) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(args.iter().map(OsString::as_os_str))
            .map(OsStr::to_string_lossy)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
