//! Expression nodes.
//!
//! Children are `ExprId` indices, lists are ranges into the arena, so
//! `Expr` stays `Copy`.

use std::fmt;

use super::operators::{BinaryOp, UnaryOp};
use super::ranges::{ArmRange, ExprRange, ParamRange};
use crate::{ExprId, Name, ParsedTypeId, Span};

/// Expression node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression variants.
///
/// Floats are stored as `u64` bits so the node stays `Hash`. Literal
/// suffixes (`7u8`, `1.5f32`) carry the interned primitive type name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    Int {
        value: u64,
        suffix: Option<Name>,
    },
    Float {
        bits: u64,
        suffix: Option<Name>,
    },
    Bool(bool),
    Char(char),
    /// String literal, typed as a pointer to `c8`.
    String(Name),
    Unit,

    /// Reference to a local binding or a top-level function.
    Ident(Name),

    Call {
        func: ExprId,
        args: ExprRange,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    /// `receiver.field`
    Field {
        receiver: ExprId,
        field: Name,
    },
    /// `Name(args)`: construct a product type or a sum tag.
    Construct {
        name: Name,
        args: ExprRange,
    },
    Tuple(ExprRange),
    /// `[a, b, c]`, a statically sized array.
    Array(ExprRange),

    If {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: Option<ExprId>,
    },
    Match {
        scrutinee: ExprId,
        arms: ArmRange,
    },
    While {
        cond: ExprId,
        body: ExprId,
    },
    /// Sequence of expressions; the value is the last one (`unit` if empty).
    Block(ExprRange),
    /// `let name (: ty)? = init`, scoped to the rest of the enclosing block.
    Let {
        name: Name,
        ty: Option<ParsedTypeId>,
        init: ExprId,
    },
    Assign {
        target: ExprId,
        value: ExprId,
    },
    /// `expr : ty`
    Annotated {
        expr: ExprId,
        ty: ParsedTypeId,
    },
    Lambda {
        params: ParamRange,
        body: ExprId,
    },
}

impl ExprKind {
    /// Float literal from an `f64` value.
    pub fn float(value: f64) -> Self {
        ExprKind::Float {
            bits: value.to_bits(),
            suffix: None,
        }
    }

    /// Plain (unsuffixed) integer literal.
    pub fn int(value: u64) -> Self {
        ExprKind::Int {
            value,
            suffix: None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            ExprKind::Int { .. }
                | ExprKind::Float { .. }
                | ExprKind::Bool(_)
                | ExprKind::Char(_)
                | ExprKind::String(_)
                | ExprKind::Unit
        )
    }
}
