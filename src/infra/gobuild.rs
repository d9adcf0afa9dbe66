//! The real build-and-report capability: `go build` over a throwaway file.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, trace};

use crate::core::extract::{BuildReport, BuildRunner, ToggleError};

#[cfg(windows)]
const DEV_NULL: &str = "NUL";
#[cfg(not(windows))]
const DEV_NULL: &str = "/dev/null";

/// Compiler invocation settings. `program` is the toolchain entry point;
/// `temp_root` overrides the system temp directory for build workspaces.
/// Both are explicit so tests and callers never depend on ambient state.
#[derive(Debug, Clone)]
pub struct GoBuild {
    pub program: String,
    pub temp_root: Option<PathBuf>,
}

impl Default for GoBuild {
    fn default() -> Self {
        Self {
            program: "go".to_string(),
            temp_root: None,
        }
    }
}

impl BuildRunner for GoBuild {
    /// Write `code` into a fresh uniquely named directory, build it with
    /// the object output discarded, and capture the combined diagnostic
    /// text. The directory is removed when the guard drops — on every exit
    /// path, so concurrent invocations never collide or leave residue.
    fn build(&self, code: &str) -> Result<BuildReport, ToggleError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("unuse");
        let workspace = match &self.temp_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };

        let probe = workspace.path().join("probe.go");
        fs::write(&probe, code)?;

        trace!(program = %self.program, probe = %probe.display(), "invoking build");
        let out = Command::new(&self.program)
            .arg("build")
            .arg("-o")
            .arg(DEV_NULL)
            .arg(&probe)
            .output()?;

        let mut output = String::from_utf8_lossy(&out.stdout).into_owned();
        output.push_str(&String::from_utf8_lossy(&out.stderr));
        debug!(
            success = out.status.success(),
            bytes = output.len(),
            "build finished"
        );
        Ok(BuildReport {
            success: out.status.success(),
            output,
        })
    }
}
