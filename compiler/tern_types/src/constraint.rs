//! Constraints emitted by the constraint-finding traversal.

use tern_ir::Span;

use crate::Idx;

/// Why two types were required to be equal. Used to phrase diagnostics.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EqOrigin {
    /// Argument `index` (zero-based) of a call.
    Argument { index: usize },
    /// The result of a call.
    Return,
    /// A function body against the function's return type.
    Body,
    /// An `if` or `while` condition.
    Condition,
    /// The two branches of an `if`.
    Branch,
    /// The arms of a `match`.
    MatchArm,
    /// A type annotation.
    Annotation,
    /// An operator operand or result.
    Operand,
    /// A field access or construction.
    Field,
    /// A pattern against its scrutinee.
    Pattern,
    /// An assignment.
    Assign,
    /// An element of an array literal.
    ArrayElement,
    General,
}

impl EqOrigin {
    /// Message template for a failed constraint, with `$1` standing for
    /// the expected type and `$2` for the one found.
    pub fn template(self) -> String {
        match self {
            EqOrigin::Argument { index } => {
                format!("argument {} has type $2, but the function expects $1", index + 1)
            }
            EqOrigin::Return => "call result has type $1, but the context expects $2".into(),
            EqOrigin::Body => "function returns $1, but its body has type $2".into(),
            EqOrigin::Condition => "condition must be $1, found $2".into(),
            EqOrigin::Branch => "`if` branches have incompatible types $1 and $2".into(),
            EqOrigin::MatchArm => "match arms have incompatible types $1 and $2".into(),
            EqOrigin::Annotation => "expected $1 from the annotation, found $2".into(),
            EqOrigin::Operand => "operands have incompatible types $1 and $2".into(),
            EqOrigin::Field => "expected $1, found $2".into(),
            EqOrigin::Pattern => "pattern of type $2 cannot match a value of type $1".into(),
            EqOrigin::Assign => "cannot assign $2 to a place of type $1".into(),
            EqOrigin::ArrayElement => "array elements have incompatible types $1 and $2".into(),
            EqOrigin::General => "type mismatch: expected $1, found $2".into(),
        }
    }
}

/// A single constraint. Consumed in the order it was emitted.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Constraint {
    /// `lhs` and `rhs` must be the same type.
    Eq {
        lhs: Idx,
        rhs: Idx,
        span: Span,
        origin: EqOrigin,
    },
    /// The trait type `obligation` must be implemented.
    Trait { obligation: Idx, span: Span },
}

impl Constraint {
    pub fn eq(lhs: Idx, rhs: Idx, span: Span, origin: EqOrigin) -> Self {
        Constraint::Eq {
            lhs,
            rhs,
            span,
            origin,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Constraint::Eq { span, .. } | Constraint::Trait { span, .. } => *span,
        }
    }
}
