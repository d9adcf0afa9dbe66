//! Stream and file plumbing around the toggle engine. Fatal toggle errors
//! propagate before any output is written, so a failed call never leaves a
//! partial buffer behind.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::cancel::CancelToken;
use crate::core::extract::BuildRunner;
use crate::core::toggle::toggle;

/// Toggle standard input to standard output.
pub fn toggle_stdio(runner: &dyn BuildRunner, cancel: &CancelToken) -> Result<()> {
    let mut code = String::new();
    io::stdin()
        .read_to_string(&mut code)
        .context("Failed to read standard input")?;

    let toggled = toggle(runner, &code, cancel)?;

    io::stdout()
        .write_all(toggled.as_bytes())
        .context("Failed to write standard output")?;
    Ok(())
}

/// Toggle one file: back into itself when `write` is set, to stdout
/// otherwise.
pub fn toggle_file(
    runner: &dyn BuildRunner,
    path: &Path,
    write: bool,
    cancel: &CancelToken,
) -> Result<()> {
    let code = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let toggled = toggle(runner, &code, cancel)?;

    if write {
        fs::write(path, toggled.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
    } else {
        io::stdout()
            .write_all(toggled.as_bytes())
            .context("Failed to write standard output")?;
    }
    Ok(())
}
