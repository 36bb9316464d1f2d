//! `if`, `match` and `while`.

use tern_ir::{ArmRange, ExprId, Span};

use crate::constraint::EqOrigin;
use crate::infer::{missing_patterns, ConstraintFinder};
use crate::type_error::TypeCheckError;
use crate::Idx;

impl ConstraintFinder<'_, '_> {
    /// Without an `else` the branch must be `unit`.
    pub(super) fn infer_if(&mut self, cond: ExprId, then_branch: ExprId, else_branch: Option<ExprId>) -> Idx {
        let cond_ty = self.infer_expr(cond);
        let cond_span = self.arena.get_expr(cond).span;
        self.eq(Idx::BOOL, cond_ty, cond_span, EqOrigin::Condition);

        let then_ty = self.infer_expr(then_branch);
        let then_span = self.arena.get_expr(then_branch).span;
        match else_branch {
            Some(else_branch) => {
                let else_ty = self.infer_expr(else_branch);
                let else_span = self.arena.get_expr(else_branch).span;
                self.eq(then_ty, else_ty, else_span, EqOrigin::Branch);
                then_ty
            }
            None => {
                self.eq(Idx::UNIT, then_ty, then_span, EqOrigin::Branch);
                Idx::UNIT
            }
        }
    }

    /// Arms share one result type. Coverage is checked on the patterns
    /// alone, after the arms, whatever unification later decides.
    pub(super) fn infer_match(&mut self, scrutinee: ExprId, arms: ArmRange, span: Span) -> Idx {
        let scrutinee_ty = self.infer_expr(scrutinee);
        let result = self.pool.fresh_var();
        let arena = self.arena;
        let arms = arena.get_arms(arms);
        for arm in arms {
            self.env.enter_scope();
            self.check_pattern(arm.pattern, scrutinee_ty, arm.span);
            let body_ty = self.infer_expr(arm.body);
            let body_span = arena.get_expr(arm.body).span;
            self.eq(result, body_ty, body_span, EqOrigin::MatchArm);
            self.env.exit_scope();
        }

        let missing = missing_patterns(self.pool, arena, self.interner, arms);
        if !missing.is_empty() {
            let missing: Vec<&str> = missing.iter().map(String::as_str).collect();
            self.error(TypeCheckError::non_exhaustive(&missing, span));
        }
        result
    }

    pub(super) fn infer_while(&mut self, cond: ExprId, body: ExprId) -> Idx {
        let cond_ty = self.infer_expr(cond);
        let cond_span = self.arena.get_expr(cond).span;
        self.eq(Idx::BOOL, cond_ty, cond_span, EqOrigin::Condition);
        self.infer_expr(body);
        Idx::UNIT
    }
}
