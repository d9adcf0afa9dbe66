//! Line-level rewriting of a source buffer.
//!
//! Goals
//! - Split on '\n' only; every other byte round-trips exactly.
//! - 0-based line numbers, matching the adjusted diagnostic positions.
//! - Three edits: comment-prefix insert, fake-usage append, comment-prefix
//!   removal measured in chars (safe under multi-byte content).

use crate::core::marker::fake_usage;

/// Comment introducer used to neutralize unprovided imports for the second
/// build pass.
pub const COMMENT_PREFIX: &str = "// ";

/// Source text split on `\n`. Line numbers handed to the edit methods come
/// from a build of this very buffer, so out-of-range indices are treated as
/// an internal invariant rather than a recoverable error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn from_text(code: &str) -> Self {
        Self {
            lines: code.split('\n').map(str::to_string).collect(),
        }
    }

    /// Join the buffer back into flat text. `from_text` → `to_text` is the
    /// identity, trailing newline included.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Prepend the comment introducer to `line`.
    pub fn comment_out(&mut self, line: usize) {
        self.lines[line].insert_str(0, COMMENT_PREFIX);
    }

    /// Append a fake usage of `name` to `line`.
    pub fn append_usage(&mut self, line: usize, name: &str) {
        self.lines[line].push_str(&fake_usage(name));
    }

    /// Remove the comment introducer added by `comment_out`. Strips the
    /// prefix char count, not its byte length, so multi-byte content after
    /// the prefix stays intact.
    pub fn uncomment(&mut self, line: usize) {
        let l = &mut self.lines[line];
        *l = l.chars().skip(COMMENT_PREFIX.chars().count()).collect();
    }
}
