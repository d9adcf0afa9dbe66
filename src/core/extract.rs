//! Diagnostic extraction from compiler output.
//!
//! Parses `go build` output into symbol/line tuples for one of the two
//! diagnostic classes the toggle understands. Everything else the compiler
//! prints is ignored; this module must not misinterpret or crash on
//! arbitrary output.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use crate::core::cancel::CancelToken;

/// Report produced by one compiler invocation: overall status plus the
/// combined stdout/stderr text.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub success: bool,
    pub output: String,
}

/// Build-and-report capability. The real implementation shells out to the
/// Go toolchain (`infra::gobuild::GoBuild`); tests substitute recorded
/// output so the diagnostic grammar is testable without a toolchain.
pub trait BuildRunner {
    fn build(&self, code: &str) -> Result<BuildReport, ToggleError>;
}

/// Fatal failures of a toggle call. Anything softer — unrecognized
/// diagnostics, a cancelled extraction, a clean build — degrades to an
/// empty edit set instead.
#[derive(Debug, thiserror::Error)]
pub enum ToggleError {
    /// Temp workspace or compiler invocation failure
    #[error("build workspace I/O: {0}")]
    Io(#[from] std::io::Error),

    /// Diagnostic position field is not a valid line number. Fatal, since
    /// applying a partial edit set would corrupt the buffer.
    #[error("malformed diagnostic position in {0:?}")]
    Parse(String),
}

/// Name and zero-based declaring line of a symbol named by a build error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    pub name: String,
    pub line_num: usize,
}

/// The two diagnostic shapes the toggle understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticClass {
    /// `no required module provides package` — an import no module provides.
    /// These abort the build before unused-symbol analysis runs.
    MissingImportProvider,

    /// `declared and not used:` — a declared but unused symbol.
    UnusedSymbol,
}

impl DiagnosticClass {
    /// Message fragment that follows the position prefix for this class.
    fn fragment(self) -> &'static str {
        match self {
            Self::MissingImportProvider => "no required module provides package",
            Self::UnusedSymbol => "declared and not used:",
        }
    }

    /// Composed line pattern: `.go:<line>:<col>: ` + class fragment, with
    /// the line field captured. Positions in diagnostics are 1-based.
    fn pattern(self) -> &'static Regex {
        static IMPORT: LazyLock<Regex> =
            LazyLock::new(|| position_pattern(DiagnosticClass::MissingImportProvider));
        static UNUSED: LazyLock<Regex> =
            LazyLock::new(|| position_pattern(DiagnosticClass::UnusedSymbol));

        match self {
            Self::MissingImportProvider => &IMPORT,
            Self::UnusedSymbol => &UNUSED,
        }
    }
}

fn position_pattern(class: DiagnosticClass) -> Regex {
    Regex::new(&format!(
        r"\.go:(\d+):\d+: {}",
        regex::escape(class.fragment())
    ))
    .unwrap()
}

/// Extract `(name, line)` pairs for `class` from a build of `code`.
///
/// Returns an empty set when the build succeeds or when `cancel` is already
/// signaled (the build is then never invoked). The returned order is the
/// order diagnostics appeared in the output — source order for the Go
/// compiler — so downstream edits apply monotonically without re-sorting.
#[instrument(level = "debug", skip(runner, code, cancel))]
pub fn extract(
    runner: &dyn BuildRunner,
    code: &str,
    class: DiagnosticClass,
    cancel: &CancelToken,
) -> Result<Vec<SymbolInfo>, ToggleError> {
    if cancel.is_cancelled() {
        debug!("cancelled before build; returning empty set");
        return Ok(Vec::new());
    }

    let report = runner.build(code)?;
    if report.success {
        return Ok(Vec::new());
    }

    let re = class.pattern();
    let mut info = Vec::new();
    for raw in report.output.lines() {
        let Some(caps) = re.captures(raw) else {
            continue;
        };
        let line_num: usize = caps[1]
            .parse()
            .map_err(|_| ToggleError::Parse(raw.to_string()))?;
        // Diagnostic positions are 1-based; the buffer is 0-based.
        let line_num = line_num
            .checked_sub(1)
            .ok_or_else(|| ToggleError::Parse(raw.to_string()))?;
        // The symbol name sits right after the message fragment.
        let name = raw
            .split_once(class.fragment())
            .and_then(|(_, rest)| rest.split_whitespace().next())
            .unwrap_or_default()
            .to_string();
        info.push(SymbolInfo { name, line_num });
    }
    debug!(count = info.len(), "diagnostics extracted");
    Ok(info)
}
