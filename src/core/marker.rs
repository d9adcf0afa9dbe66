//! Fake-usage marker recognition and removal.
//!
//! A marker has two observable surface forms: as originally appended to the
//! declaring line (`notUsed := false; _ = notUsed /* TODO: unuse */`) and as
//! gofmt reflows it onto its own line, where only the discard assignment and
//! the TODO comment survive recognizably.

use std::sync::LazyLock;

use regex::Regex;

/// Text inserted before the symbol name in a fake usage.
pub const USAGE_PREFIX: &str = "; _ = ";

/// Text appended after the symbol name in a fake usage. Must stay bit-exact:
/// the post-gofmt recognizer keys on it.
pub const USAGE_SUFFIX: &str = " /* TODO: unuse */";

/// Canonical form, exactly as `fake_usage` appends it.
static USED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "{}.*{}",
        regex::escape(USAGE_PREFIX),
        regex::escape(USAGE_SUFFIX)
    ))
    .unwrap()
});

/// Post-gofmt form: the discard assignment reflowed onto its own line. The
/// leading `\s*` also swallows the newline and indentation gofmt added, so
/// stripping restores the pre-marker layout.
static USED_AFTER_GOFMT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\s*_\s*= \w*\s*{}", regex::escape(USAGE_SUFFIX))).unwrap()
});

/// The fake usage appended to the line declaring `name`.
pub fn fake_usage(name: &str) -> String {
    format!("{USAGE_PREFIX}{name}{USAGE_SUFFIX}")
}

/// Strip every fake usage from `code`, or return `None` when there is
/// nothing to strip.
///
/// The canonical pattern must be checked before the gofmt one: it is the
/// only form that still carries the leading `;`, which the gofmt pattern
/// would leave behind.
pub fn strip_markers(code: &str) -> Option<String> {
    if USED.is_match(code) {
        return Some(USED.replace_all(code, "").into_owned());
    }
    if USED_AFTER_GOFMT.is_match(code) {
        return Some(USED_AFTER_GOFMT.replace_all(code, "").into_owned());
    }
    None
}
