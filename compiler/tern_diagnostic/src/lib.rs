//! Diagnostic system for type-checker error reporting.
//!
//! - Error codes for searchability
//! - A message saying what went wrong
//! - A primary span saying where
//! - Notes and suggestions saying why and how to fix it
//!
//! # Error Guarantees
//!
//! `ErrorGuaranteed` is type-level proof that at least one error was
//! emitted. It can only be obtained from [`DiagnosticSink::emit_error`], so a
//! pass that returns one cannot fail silently.

mod diagnostic;
pub mod emitter;
mod error_code;
mod guarantee;
pub mod sink;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use sink::DiagnosticSink;
