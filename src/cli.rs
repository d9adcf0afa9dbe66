use std::path::PathBuf;

use clap::Parser;

/// Command-line surface: `unuse [-w] [file ...]`, filtering stdin to stdout
/// when no files are given.
#[derive(Debug, Parser)]
#[command(name = "unuse")]
#[command(about = "Toggle Go 'declared and not used' build errors with fake usages")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Write results back to the given files instead of stdout
    #[arg(short = 'w', long)]
    pub write: bool,

    /// Compiler program used for diagnostic builds (overrides config)
    #[arg(long, value_name = "PROGRAM")]
    pub build_with: Option<String>,

    /// Files to toggle; reads standard input when omitted
    pub paths: Vec<PathBuf>,
}

/// Flag/path combinations clap cannot express, mapped to exit code 2 like
/// clap's own usage failures.
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    #[error("cannot use -w with standard input")]
    WriteWithStdin,

    #[error("must use -w with multiple paths")]
    MultiplePathsWithoutWrite,
}

impl Cli {
    pub fn validate(&self) -> Result<(), UsageError> {
        if self.paths.is_empty() && self.write {
            return Err(UsageError::WriteWithStdin);
        }
        if self.paths.len() > 1 && !self.write {
            return Err(UsageError::MultiplePathsWithoutWrite);
        }
        Ok(())
    }
}
