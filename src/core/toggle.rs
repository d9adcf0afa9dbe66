//! The toggle state machine.
//!
//! `Start → CheckMarkers → {Stripped | Detect}`; a detect pass comments out
//! unprovided imports so the build reaches its unused-symbol analysis,
//! appends a fake usage for every reported symbol, then uncomments. A
//! second toggle over the result takes the CheckMarkers exit and restores
//! the original text, so the whole operation is idempotent over two
//! applications.

use tracing::debug;

use crate::core::cancel::CancelToken;
use crate::core::extract::{self, BuildRunner, DiagnosticClass, ToggleError};
use crate::core::marker;
use crate::core::rewrite::LineBuffer;

/// Toggle fake usages in `code`.
///
/// Existing markers (either surface form) are stripped and returned without
/// consulting the compiler. Otherwise unprovided imports are commented out,
/// the now-compilable buffer is rebuilt to surface unused symbols, every
/// reported symbol gets a fake usage appended to its declaring line, and
/// the commented imports are restored verbatim — except for whatever usage
/// was appended to them if the second pass also named those lines.
pub fn toggle(
    runner: &dyn BuildRunner,
    code: &str,
    cancel: &CancelToken,
) -> Result<String, ToggleError> {
    if let Some(stripped) = marker::strip_markers(code) {
        debug!("existing markers stripped");
        return Ok(stripped);
    }

    let mut buf = LineBuffer::from_text(code);

    // Imports without a provider abort the build before unused-symbol
    // analysis runs; neutralize them for the second pass.
    let imports = extract::extract(runner, code, DiagnosticClass::MissingImportProvider, cancel)?;
    let mut commented = Vec::with_capacity(imports.len());
    for info in &imports {
        buf.comment_out(info.line_num);
        commented.push(info.line_num);
    }

    let unused = extract::extract(
        runner,
        &buf.to_text(),
        DiagnosticClass::UnusedSymbol,
        cancel,
    )?;
    debug!(
        imports = imports.len(),
        unused = unused.len(),
        "diagnostics collected"
    );
    for info in &unused {
        buf.append_usage(info.line_num, &info.name);
    }

    // Restore the commented imports. Comment insertion happened before the
    // usage append and removal happens after it, so a line named by both
    // passes ends up as its original text plus the appended usage.
    for line in commented {
        buf.uncomment(line);
    }

    Ok(buf.to_text())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::core::extract::BuildReport;

    /// Replays scripted reports in order and records the code each build
    /// received, so tests can assert on the intermediate buffer.
    struct ScriptedRunner {
        reports: RefCell<VecDeque<BuildReport>>,
        seen: RefCell<Vec<String>>,
    }

    impl ScriptedRunner {
        fn new(reports: Vec<BuildReport>) -> Self {
            Self {
                reports: RefCell::new(reports.into()),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl BuildRunner for ScriptedRunner {
        fn build(&self, code: &str) -> Result<BuildReport, ToggleError> {
            self.seen.borrow_mut().push(code.to_string());
            Ok(self
                .reports
                .borrow_mut()
                .pop_front()
                .expect("script exhausted"))
        }
    }

    /// Proves a code path never reaches the compiler.
    struct PanicRunner;

    impl BuildRunner for PanicRunner {
        fn build(&self, _code: &str) -> Result<BuildReport, ToggleError> {
            panic!("build must not be invoked");
        }
    }

    fn ok() -> BuildReport {
        BuildReport {
            success: true,
            output: String::new(),
        }
    }

    fn errors(output: &str) -> BuildReport {
        BuildReport {
            success: false,
            output: output.to_string(),
        }
    }

    #[test]
    fn clean_input_is_a_no_op() {
        let code = "package main\n\nfunc main() {}\n";
        let runner = ScriptedRunner::new(vec![ok(), ok()]);
        assert_eq!(toggle(&runner, code, &CancelToken::new()).unwrap(), code);
    }

    #[test]
    fn marker_round_trip_canonical_form() {
        let code = "package main\n\nfunc main() {\n\tnotUsed := false\n}\n";
        let diag = "./probe.go:4:2: declared and not used: notUsed\n";
        let runner = ScriptedRunner::new(vec![errors(diag), errors(diag)]);

        let toggled = toggle(&runner, code, &CancelToken::new()).unwrap();
        assert_eq!(
            toggled,
            "package main\n\nfunc main() {\n\tnotUsed := false; _ = notUsed /* TODO: unuse */\n}\n"
        );

        // The second application strips without any build.
        let restored = toggle(&PanicRunner, &toggled, &CancelToken::new()).unwrap();
        assert_eq!(restored, code);
    }

    #[test]
    fn stripping_short_circuits_before_any_build() {
        let marked = "x := 0; _ = x /* TODO: unuse */\n";
        let restored = toggle(&PanicRunner, marked, &CancelToken::new()).unwrap();
        assert_eq!(restored, "x := 0\n");
    }

    #[test]
    fn import_neutralization_round_trip() {
        // The unresolved import blocks the build, so the unused variable is
        // only reported once the import line is commented out.
        let code = "package main\n\nimport \"example.com/missing\"\n\nfunc main() {\n\tv := 1\n}\n";
        let runner = ScriptedRunner::new(vec![
            errors(
                "probe.go:3:8: no required module provides package example.com/missing: \
                 go.mod file not found; to add it:\n",
            ),
            errors("./probe.go:6:2: declared and not used: v\n"),
        ]);

        let toggled = toggle(&runner, code, &CancelToken::new()).unwrap();

        // The second build must have seen the import commented out.
        let seen = runner.seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen[1].contains("// import \"example.com/missing\""));

        // The import line is restored verbatim; only the declaration line
        // gained a usage.
        assert_eq!(
            toggled,
            "package main\n\nimport \"example.com/missing\"\n\nfunc main() {\n\tv := 1; _ = v /* TODO: unuse */\n}\n"
        );
    }

    #[test]
    fn same_line_import_and_unused_symbol() {
        // Both classes naming one line: comment insertion precedes the
        // usage append and uncomment follows it, so the line keeps its
        // original text plus the appended usage.
        let code = "package main\n\nimport alias \"example.com/missing\"\n";
        let runner = ScriptedRunner::new(vec![
            errors("probe.go:3:8: no required module provides package example.com/missing\n"),
            errors("./probe.go:3:8: declared and not used: alias\n"),
        ]);

        let toggled = toggle(&runner, code, &CancelToken::new()).unwrap();
        assert_eq!(
            toggled,
            "package main\n\nimport alias \"example.com/missing\"; _ = alias /* TODO: unuse */\n"
        );
    }

    #[test]
    fn cancelled_call_returns_the_buffer_unmodified() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let code = "package main\n\nfunc main() {\n\tnotUsed := false\n}\n";
        assert_eq!(toggle(&PanicRunner, code, &cancel).unwrap(), code);
    }

    #[test]
    fn toggle_twice_is_the_identity() {
        let code = "package main\n\nfunc main() {\n\ta := 1\n\tb := 2\n}\n";
        let diag = "./probe.go:4:2: declared and not used: a\n\
                    ./probe.go:5:2: declared and not used: b\n";
        let runner = ScriptedRunner::new(vec![errors(diag), errors(diag)]);

        let once = toggle(&runner, code, &CancelToken::new()).unwrap();
        let twice = toggle(&PanicRunner, &once, &CancelToken::new()).unwrap();
        assert_eq!(twice, code);
    }
}
