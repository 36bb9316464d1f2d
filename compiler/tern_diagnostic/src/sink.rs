//! Immediate-emission diagnostic sink.
//!
//! Every reported diagnostic goes to the emitter at once (no batching, no
//! deduplication) and is kept for inspection. The sink counts errors so
//! passes can ask whether new errors appeared since a checkpoint.

use crate::emitter::DiagnosticEmitter;
use crate::{Diagnostic, ErrorGuaranteed};

pub struct DiagnosticSink<'a> {
    emitter: Option<Box<dyn DiagnosticEmitter + 'a>>,
    emitted: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
    /// Maximum number of errors before the caller should stop (0 = unlimited).
    error_limit: usize,
}

impl<'a> DiagnosticSink<'a> {
    /// A sink that only records diagnostics.
    pub fn new() -> Self {
        DiagnosticSink {
            emitter: None,
            emitted: Vec::new(),
            error_count: 0,
            warning_count: 0,
            error_limit: 0,
        }
    }

    /// A sink that forwards every diagnostic to `emitter`.
    pub fn with_emitter(emitter: impl DiagnosticEmitter + 'a) -> Self {
        DiagnosticSink {
            emitter: Some(Box::new(emitter)),
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_error_limit(mut self, limit: usize) -> Self {
        self.error_limit = limit;
        self
    }

    fn record(&mut self, diag: Diagnostic) {
        tracing::debug!(code = %diag.code, message = %diag.message, "diagnostic");
        if let Some(emitter) = self.emitter.as_mut() {
            emitter.emit(&diag);
        }
        self.emitted.push(diag);
    }

    /// Emit an error and get proof that it was emitted.
    pub fn emit_error(&mut self, diag: Diagnostic) -> ErrorGuaranteed {
        debug_assert!(diag.is_error(), "emit_error called with a non-error");
        self.error_count += 1;
        self.record(diag);
        ErrorGuaranteed::new()
    }

    /// Emit a diagnostic of any severity.
    pub fn emit(&mut self, diag: Diagnostic) -> Option<ErrorGuaranteed> {
        if diag.is_error() {
            Some(self.emit_error(diag))
        } else {
            if matches!(diag.severity, crate::Severity::Warning) {
                self.warning_count += 1;
            }
            self.record(diag);
            None
        }
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Proof of errors if any were emitted.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    /// Whether errors were emitted after a checkpoint taken with
    /// [`error_count`](Self::error_count).
    pub fn errors_since(&self, checkpoint: usize) -> bool {
        self.error_count > checkpoint
    }

    pub fn limit_reached(&self) -> bool {
        self.error_limit > 0 && self.error_count >= self.error_limit
    }

    /// Every diagnostic emitted so far, in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.emitted
    }

    /// Flush the emitter and write the summary line.
    pub fn finish(&mut self) {
        if let Some(emitter) = self.emitter.as_mut() {
            emitter.emit_summary(self.error_count, self.warning_count);
            emitter.flush();
        }
    }
}

impl Default for DiagnosticSink<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DiagnosticSink<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticSink")
            .field("error_count", &self.error_count)
            .field("warning_count", &self.warning_count)
            .field("error_limit", &self.error_limit)
            .finish_non_exhaustive()
    }
}
