//! Unification error types.

use crate::{Idx, Substitution};

/// Why two types could not be unified.
///
/// The types named here are the innermost pair where decomposition
/// stopped; diagnostics render the top-level constraint instead.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum UnifyError {
    #[error("type mismatch: expected {expected:?}, found {found:?}")]
    Mismatch { expected: Idx, found: Idx },

    /// Binding `var` would create an infinite type.
    #[error("infinite type: {var:?} occurs inside {containing:?}")]
    InfiniteType { var: Idx, containing: Idx },

    #[error("{kind} arity mismatch: expected {expected}, found {found}")]
    ArityMismatch {
        expected: usize,
        found: usize,
        kind: ArityKind,
    },

    /// The step budget for one constraint ran out.
    #[error("unification exceeded {limit} steps")]
    RecursionLimit { limit: u32 },
}

/// What kind of construct has an arity mismatch.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ArityKind {
    /// Tuple element count.
    Tuple,
    /// Function parameter count.
    Function,
    /// Type argument count of a nominal type.
    TypeArgs,
}

impl std::fmt::Display for ArityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ArityKind::Tuple => "tuple",
            ArityKind::Function => "function",
            ArityKind::TypeArgs => "type argument",
        })
    }
}

/// A failed unification, with the bindings found before the failure.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnifyFailure {
    pub error: UnifyError,
    pub partial: Substitution,
}

impl UnifyFailure {
    pub fn new(error: UnifyError) -> Self {
        UnifyFailure {
            error,
            partial: Substitution::new(),
        }
    }
}
