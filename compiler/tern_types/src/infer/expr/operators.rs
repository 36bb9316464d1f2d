//! Binary and unary operators.
//!
//! Overloadable operators go through their trait: both operands and the
//! result share one fresh variable `t`, and `Op t` becomes an obligation.
//! There is no implicit numeric widening.

use tern_ir::{BinaryOp, ExprId, Span, UnaryOp};

use crate::constraint::EqOrigin;
use crate::infer::ConstraintFinder;
use crate::type_error::TypeCheckError;
use crate::Idx;

impl ConstraintFinder<'_, '_> {
    pub(super) fn infer_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId, span: Span) -> Idx {
        let left_ty = self.infer_expr(left);
        let right_ty = self.infer_expr(right);
        let left_span = self.arena.get_expr(left).span;
        let right_span = self.arena.get_expr(right).span;

        let Some(trait_name) = op.trait_name() else {
            // `and` / `or`
            self.eq(Idx::BOOL, left_ty, left_span, EqOrigin::Condition);
            self.eq(Idx::BOOL, right_ty, right_span, EqOrigin::Condition);
            return Idx::BOOL;
        };

        let Some(shared) = self.operator_obligation(trait_name, span) else {
            return Idx::ERROR;
        };
        self.eq(shared, left_ty, left_span, EqOrigin::Operand);
        self.eq(shared, right_ty, right_span, EqOrigin::Operand);
        if op.is_comparison() {
            Idx::BOOL
        } else {
            shared
        }
    }

    pub(super) fn infer_unary(&mut self, op: UnaryOp, operand: ExprId, span: Span) -> Idx {
        let operand_ty = self.infer_expr(operand);
        let operand_span = self.arena.get_expr(operand).span;
        match op {
            UnaryOp::Neg => {
                let Some(shared) = self.operator_obligation("Neg", span) else {
                    return Idx::ERROR;
                };
                self.eq(shared, operand_ty, operand_span, EqOrigin::Operand);
                shared
            }
            UnaryOp::Not => {
                self.eq(Idx::BOOL, operand_ty, operand_span, EqOrigin::Condition);
                Idx::BOOL
            }
            UnaryOp::AddrOf => self.pool.ptr(operand_ty),
            UnaryOp::Deref => {
                let target = self.pool.fresh_var();
                let ptr = self.pool.ptr(target);
                self.eq(ptr, operand_ty, operand_span, EqOrigin::Operand);
                target
            }
        }
    }

    /// A fresh `t` with the obligation `trait_name t` emitted, or `None`
    /// after reporting a missing trait.
    fn operator_obligation(&mut self, trait_name: &str, span: Span) -> Option<Idx> {
        let name = self.interner.intern(trait_name);
        if self.registry.lookup_trait(name).is_none() {
            self.error(TypeCheckError::undeclared("trait", trait_name, span));
            return None;
        }
        let shared = self.pool.fresh_var();
        let obligation = self.pool.trait_type(name, shared, &[]);
        self.obligation(obligation, span);
        Some(shared)
    }
}
