//! **unuse** - Toggle Go "declared and not used" build errors
//!
//! Appends or strips idiomatic `_ = name` fake usages driven by real
//! compiler diagnostics, never touching any other byte of the source. A
//! first pass inserts markers; a second pass recognizes and removes them
//! without consulting the compiler at all.

/// Command-line interface with clap integration
pub mod cli;

/// Toggle engine - marker recognition, diagnostic extraction, line rewriting
pub mod core {
    /// Cooperative cancellation flag, checked at extraction entry
    pub mod cancel;
    pub use cancel::CancelToken;

    /// Diagnostic extraction from compiler output behind the BuildRunner seam
    pub mod extract;
    pub use extract::{BuildReport, BuildRunner, DiagnosticClass, SymbolInfo, ToggleError};

    /// Fake-usage marker recognition and removal (both surface forms)
    pub mod marker;

    /// Zero-based line buffer with comment/append/uncomment edits
    pub mod rewrite;
    pub use rewrite::LineBuffer;

    /// Two-phase toggle state machine
    pub mod toggle;
    pub use toggle::toggle;
}

/// Infrastructure - configuration, compiler invocation, stream plumbing
pub mod infra {
    /// Layered configuration (unuse.toml + UNUSE_ environment overrides)
    pub mod config;
    // `self::` disambiguates from the extern `config` crate.
    pub use self::config::{Config, load_config};

    /// Real build-and-report capability over the Go toolchain
    pub mod gobuild;
    pub use gobuild::GoBuild;

    /// Stdin/stdout and file plumbing around the toggle engine
    pub mod io;
}

// Strategic re-exports for clean CLI and library use
pub use cli::Cli;
pub use self::core::{BuildRunner, CancelToken, ToggleError, toggle};
pub use self::infra::{Config, GoBuild, load_config};
