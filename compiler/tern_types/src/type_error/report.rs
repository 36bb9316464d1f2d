//! Error reporting: unifier failures to type errors, type errors to
//! emitted diagnostics.

use tern_diagnostic::{DiagnosticSink, ErrorGuaranteed};
use tern_ir::StringLookup;

use super::{diff_types, format_mismatch, TypeCheckError, TypeErrorKind};
use crate::unify::{ArityKind, ConstraintFailure, UnifyError};
use crate::{Pool, TypeFormatter};

/// Emits type errors through a diagnostic sink.
pub struct ErrorReporter<'a, 'd> {
    sink: &'a mut DiagnosticSink<'d>,
    names: &'a dyn StringLookup,
    color: bool,
}

impl<'a, 'd> ErrorReporter<'a, 'd> {
    pub fn new(sink: &'a mut DiagnosticSink<'d>, names: &'a dyn StringLookup, color: bool) -> Self {
        ErrorReporter { sink, names, color }
    }

    /// Emit one error now.
    pub fn report(&mut self, error: TypeCheckError) -> ErrorGuaranteed {
        tracing::debug!(kind = ?error.kind, span = ?error.span, "type error");
        self.sink.emit_error(error.into_diagnostic())
    }

    pub fn error_count(&self) -> usize {
        self.sink.error_count()
    }

    pub fn names(&self) -> &'a dyn StringLookup {
        self.names
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Render a failed top-level constraint.
    pub fn constraint_error(&self, pool: &Pool, failure: &ConstraintFailure) -> TypeCheckError {
        let ConstraintFailure {
            ref error,
            lhs,
            rhs,
            span,
            origin,
        } = *failure;
        let mut formatter = TypeFormatter::new(pool, self.names, &[lhs, rhs]).with_color(self.color);
        let message = format_mismatch(&mut formatter, &origin.template(), lhs, rhs);
        match *error {
            UnifyError::Mismatch { expected, found } => {
                let mut err = TypeCheckError::new(TypeErrorKind::TypeMismatch, span, message);
                if (expected, found) != (lhs, rhs) {
                    err = err.with_note(format_mismatch(
                        &mut formatter,
                        "the mismatch is between $1 and $2",
                        expected,
                        found,
                    ));
                }
                for problem in diff_types(pool, expected, found) {
                    err = err.with_note(problem.note());
                }
                err
            }
            UnifyError::InfiniteType { var, containing } => {
                let var_text = formatter.format(var);
                let containing_text = formatter.format(containing);
                TypeCheckError::new(TypeErrorKind::OccursCheckFailure, span, message)
                    .with_note(format!("`{var_text}` occurs inside `{containing_text}`"))
            }
            UnifyError::ArityMismatch {
                expected,
                found,
                kind,
            } => {
                let what = match kind {
                    ArityKind::Tuple => "tuple elements",
                    ArityKind::Function => "parameters",
                    ArityKind::TypeArgs => "type arguments",
                };
                TypeCheckError::new(TypeErrorKind::ArityMismatch, span, message)
                    .with_note(format!("expected {expected} {what}, found {found}"))
            }
            UnifyError::RecursionLimit { limit } => TypeCheckError::new(
                TypeErrorKind::RecursionLimit,
                span,
                format!("{message} (gave up after {limit} unification steps)"),
            ),
        }
    }
}
