//! Per-construct constraint rules.
//!
//! - `identifiers`: literals and names
//! - `operators`: binary and unary operators
//! - `calls`: function application
//! - `structs`: field access and construction
//! - `sequences`: tuples, arrays, blocks and bindings
//! - `control_flow`: `if`, `match`, `while`

mod calls;
mod control_flow;
mod identifiers;
mod operators;
mod sequences;
mod structs;

use tern_ir::{ExprId, ExprKind};
use tern_stack::ensure_sufficient_stack;

use super::ConstraintFinder;
use crate::Idx;

impl ConstraintFinder<'_, '_> {
    /// Assign `id` a type, emitting the constraints its construct implies,
    /// and record the type for the applier.
    pub(super) fn infer_expr(&mut self, id: ExprId) -> Idx {
        let expr = *self.arena.get_expr(id);
        let span = expr.span;
        let ty = ensure_sufficient_stack(|| match expr.kind {
            ExprKind::Int { suffix, .. } => self.infer_int(suffix, span),
            ExprKind::Float { suffix, .. } => self.infer_float(suffix, span),
            ExprKind::Bool(_) => Idx::BOOL,
            ExprKind::Char(_) => Idx::C8,
            ExprKind::String(_) => self.pool.ptr(Idx::C8),
            ExprKind::Unit => Idx::UNIT,
            ExprKind::Ident(name) => self.infer_ident(name, span),

            ExprKind::Call { func, args } => self.infer_call(id, func, args, span),
            ExprKind::Binary { op, left, right } => self.infer_binary(op, left, right, span),
            ExprKind::Unary { op, operand } => self.infer_unary(op, operand, span),
            ExprKind::Field { receiver, field } => self.infer_field(receiver, field, span),
            ExprKind::Construct { name, args } => self.infer_construct(name, args, span),
            ExprKind::Tuple(elems) => self.infer_tuple(elems),
            ExprKind::Array(elems) => self.infer_array(elems),

            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => self.infer_if(cond, then_branch, else_branch),
            ExprKind::Match { scrutinee, arms } => self.infer_match(scrutinee, arms, span),
            ExprKind::While { cond, body } => self.infer_while(cond, body),
            ExprKind::Block(items) => self.infer_block(items),
            ExprKind::Let { name, ty, init } => self.infer_let(name, ty, init, span),
            ExprKind::Assign { target, value } => self.infer_assign(target, value, span),
            ExprKind::Annotated { expr, ty } => self.infer_annotated(expr, ty, span),
            ExprKind::Lambda { params, body } => self.infer_lambda(params, body),
        });
        tracing::trace!(?id, ?ty, "expr type");
        self.record(id, ty)
    }
}
