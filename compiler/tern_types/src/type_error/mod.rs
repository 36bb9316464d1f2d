//! Type-checker errors and their rendering.
//!
//! Errors are plain data ([`TypeCheckError`]) until they reach the
//! [`ErrorReporter`], which turns them into diagnostics and emits them at
//! once through the diagnostic sink.
//!
//! - `diff`: specific problems found by comparing two types
//! - `format`: `$1`/`$2` message templates with colored types
//! - `report`: conversion of unifier failures and emission

mod diff;
mod format;
mod report;

pub use diff::{diff_types, TypeProblem};
pub use format::format_mismatch;
pub use report::ErrorReporter;

use tern_diagnostic::{Diagnostic, ErrorCode};
use tern_ir::Span;

/// The kinds of type errors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeErrorKind {
    UndeclaredName,
    TypeMismatch,
    OccursCheckFailure,
    ArityMismatch,
    UnresolvedTraitObligation,
    NonExhaustiveMatch,
    AmbiguousField,
    RecursionLimit,
    DuplicateDefinition,
}

impl TypeErrorKind {
    pub const fn code(self) -> ErrorCode {
        match self {
            TypeErrorKind::TypeMismatch => ErrorCode::E2001,
            TypeErrorKind::UndeclaredName => ErrorCode::E2002,
            TypeErrorKind::OccursCheckFailure => ErrorCode::E2003,
            TypeErrorKind::ArityMismatch => ErrorCode::E2004,
            TypeErrorKind::UnresolvedTraitObligation => ErrorCode::E2005,
            TypeErrorKind::NonExhaustiveMatch => ErrorCode::E2006,
            TypeErrorKind::AmbiguousField => ErrorCode::E2007,
            TypeErrorKind::RecursionLimit => ErrorCode::E2008,
            TypeErrorKind::DuplicateDefinition => ErrorCode::E2009,
        }
    }

    /// Short label text shown under the offending span.
    pub const fn title(self) -> &'static str {
        match self {
            TypeErrorKind::UndeclaredName => "not found in this scope",
            TypeErrorKind::TypeMismatch => "mismatched types",
            TypeErrorKind::OccursCheckFailure => "infinite type",
            TypeErrorKind::ArityMismatch => "wrong number of elements",
            TypeErrorKind::UnresolvedTraitObligation => "trait not implemented",
            TypeErrorKind::NonExhaustiveMatch => "match is not exhaustive",
            TypeErrorKind::AmbiguousField => "ambiguous field",
            TypeErrorKind::RecursionLimit => "type too complex",
            TypeErrorKind::DuplicateDefinition => "defined again here",
        }
    }
}

/// A located type error, ready to become a diagnostic.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeCheckError {
    pub kind: TypeErrorKind,
    pub span: Span,
    pub message: String,
    pub notes: Vec<String>,
}

impl TypeCheckError {
    pub fn new(kind: TypeErrorKind, span: Span, message: impl Into<String>) -> Self {
        TypeCheckError {
            kind,
            span,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// `what` is the kind of thing looked up: "variable", "type", "trait"...
    pub fn undeclared(what: &str, name: &str, span: Span) -> Self {
        Self::new(
            TypeErrorKind::UndeclaredName,
            span,
            format!("cannot find {what} `{name}` in this scope"),
        )
    }

    pub fn arity(what: &str, expected: usize, found: usize, span: Span) -> Self {
        let plural = if expected == 1 { "" } else { "s" };
        Self::new(
            TypeErrorKind::ArityMismatch,
            span,
            format!("expected {expected} {what}{plural}, found {found}"),
        )
    }

    pub fn non_exhaustive(missing: &[&str], span: Span) -> Self {
        let list = missing
            .iter()
            .map(|m| format!("`{m}`"))
            .collect::<Vec<_>>()
            .join(", ");
        let noun = if missing.len() == 1 { "pattern" } else { "patterns" };
        Self::new(
            TypeErrorKind::NonExhaustiveMatch,
            span,
            format!("non-exhaustive match: {noun} {list} not covered"),
        )
        .with_note("add an arm for each missing pattern, or a `_` arm")
    }

    pub fn duplicate(what: &str, name: &str, span: Span) -> Self {
        Self::new(
            TypeErrorKind::DuplicateDefinition,
            span,
            format!("the {what} `{name}` is defined more than once"),
        )
    }

    pub fn ambiguous_field(field: &str, owners: &[&str], span: Span) -> Self {
        Self::new(
            TypeErrorKind::AmbiguousField,
            span,
            format!("field `{field}` is declared by more than one type"),
        )
        .with_note(format!("candidates: {}", owners.join(", ")))
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.kind.code())
            .with_message(self.message)
            .with_label(self.span, self.kind.title());
        for note in self.notes {
            diag = diag.with_note(note);
        }
        diag
    }
}
