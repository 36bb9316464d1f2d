//! Diagnostic emitters.
//!
//! The terminal emitter renders human-readable output with optional ANSI
//! color and source snippets. Emitters implement [`DiagnosticEmitter`] so the
//! sink can forward each diagnostic the moment it is reported.

mod terminal;

pub use terminal::{SourceFile, TerminalEmitter};

use crate::Diagnostic;

/// ANSI color codes shared by the emitter and by message formatters that
/// highlight parts of a message (such as differing type structure).
pub mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    /// Structure that differs between two compared types.
    pub const DIFFERS: &str = "\x1b[1;31m";
    /// Structure two compared types have in common.
    pub const SHARED: &str = "\x1b[2m"; // Dim
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Use colors when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against `is_tty`, which only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Sink-facing output for diagnostics.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit the closing summary line.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}
